//! Product builders shared by the unit tests.

use storefront_core::ProductId;

use crate::product::{Product, Rating};

pub fn product(id: u64, title: &str, category: &str, price: f64, rate: f64) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price,
        description: format!("{title} description"),
        category: category.to_string(),
        image: format!("https://fakestoreapi.com/img/{id}.jpg"),
        rating: Rating { rate, count: 10 },
    }
}

/// `n` products in "misc" priced 10.0, 20.0, ...
pub fn numbered(n: u64) -> Vec<Product> {
    (1..=n)
        .map(|i| product(i, &format!("Item {i}"), "misc", i as f64 * 10.0, 4.0))
        .collect()
}
