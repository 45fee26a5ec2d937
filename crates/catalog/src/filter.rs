//! Filter criteria and the filtering half of the engine.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult};

use crate::product::Product;

pub const DEFAULT_MIN_PRICE: f64 = 0.0;
pub const DEFAULT_MAX_PRICE: f64 = 1000.0;

/// The active set of user-chosen constraints narrowing the product list.
///
/// All filters are AND-combined. Empty text fields and `None` values do not
/// narrow anything; a `None` price bound is unbounded on that side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub search: String,
    pub category: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub rating: Option<u8>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: String::new(),
            min_price: Some(DEFAULT_MIN_PRICE),
            max_price: Some(DEFAULT_MAX_PRICE),
            rating: None,
        }
    }
}

impl FilterCriteria {
    /// Criteria that keep every product (no price bounds at all).
    pub fn unbounded() -> Self {
        Self {
            min_price: None,
            max_price: None,
            ..Self::default()
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        Matcher::new(self).matches(product)
    }

    /// Whether the price range differs from the default `[0, 1000]`.
    pub fn has_custom_price_range(&self) -> bool {
        self.min_price != Some(DEFAULT_MIN_PRICE) || self.max_price != Some(DEFAULT_MAX_PRICE)
    }

    /// Minimum star rating, if one narrows anything. Zero stars means any rating.
    pub fn min_rating(&self) -> Option<u8> {
        self.rating.filter(|&stars| stars > 0)
    }

    /// Number of filters that currently narrow the product list.
    pub fn active_filter_count(&self) -> usize {
        [
            !self.search.is_empty(),
            !self.category.is_empty(),
            self.has_custom_price_range(),
            self.min_rating().is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Reject bounds that cannot be compared (NaN, infinities, negatives).
    ///
    /// The engine itself never fails; this is for validating user input
    /// before it reaches the store. Inverted bounds are accepted and simply
    /// match nothing.
    pub fn validate(&self) -> DomainResult<()> {
        for (name, bound) in [("min price", self.min_price), ("max price", self.max_price)] {
            if let Some(value) = bound {
                if !value.is_finite() {
                    return Err(DomainError::validation(format!("{name} must be a finite number")));
                }
                if value < 0.0 {
                    return Err(DomainError::validation(format!("{name} must not be negative")));
                }
            }
        }
        if let Some(rating) = self.rating {
            if !(1..=5).contains(&rating) {
                return Err(DomainError::validation("rating must be between 1 and 5"));
            }
        }
        Ok(())
    }
}

/// Criteria prepared for repeated matching (search term lowercased once).
struct Matcher<'c> {
    search: Option<String>,
    criteria: &'c FilterCriteria,
}

impl<'c> Matcher<'c> {
    fn new(criteria: &'c FilterCriteria) -> Self {
        let search = (!criteria.search.is_empty()).then(|| criteria.search.to_lowercase());
        Self { search, criteria }
    }

    fn matches(&self, product: &Product) -> bool {
        if let Some(term) = &self.search {
            let in_title = product.title.to_lowercase().contains(term.as_str());
            if !in_title && !product.description.to_lowercase().contains(term.as_str()) {
                return false;
            }
        }

        if !self.criteria.category.is_empty() && product.category != self.criteria.category {
            return false;
        }

        let above_min = self.criteria.min_price.is_none_or(|min| product.price >= min);
        let below_max = self.criteria.max_price.is_none_or(|max| product.price <= max);
        if !(above_min && below_max) {
            return false;
        }

        match self.criteria.min_rating() {
            Some(rating) => product.rating.rate >= f64::from(rating),
            None => true,
        }
    }
}

/// Keep the products matching `criteria`, preserving their order.
pub fn filter_products<'a, I>(products: I, criteria: &FilterCriteria) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let matcher = Matcher::new(criteria);
    products.into_iter().filter(|p| matcher.matches(p)).collect()
}
