//! Dashboard statistics over the full product list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::product::Product;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: usize,
    pub average_price: f64,
    /// Sum of all product prices.
    pub total_value: f64,
    pub category_count: usize,
}

impl DashboardStats {
    pub fn from_products(products: &[Product]) -> Self {
        let total_products = products.len();
        let total_value: f64 = products.iter().map(|p| p.price).sum();
        let average_price = if total_products > 0 {
            total_value / total_products as f64
        } else {
            0.0
        };
        let category_count = products
            .iter()
            .map(|p| p.category.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_products,
            average_price,
            total_value,
            category_count,
        }
    }
}
