use serde::{Deserialize, Serialize};

use storefront_core::ProductId;

/// Aggregated customer rating of a product.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

/// A catalog item (matches the catalog API response shape).
///
/// Products are immutable once fetched; identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    /// A product counts as in stock while it has at least one review.
    pub fn in_stock(&self) -> bool {
        self.rating.count > 0
    }

    /// Number of filled stars (0..=5) for the rating display.
    pub fn star_count(&self) -> u8 {
        if !self.rating.rate.is_finite() {
            return 0;
        }
        self.rating.rate.floor().clamp(0.0, 5.0) as u8
    }

    pub fn display_category(&self) -> String {
        capitalize(&self.category)
    }
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Fjallraven Backpack".to_string(),
            price: 109.95,
            description: "Your perfect pack for everyday use".to_string(),
            category: "men's clothing".to_string(),
            image: "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg".to_string(),
            rating: Rating { rate: 3.9, count: 120 },
        }
    }

    #[test]
    fn deserializes_catalog_api_shape() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product, sample());
    }

    #[test]
    fn missing_rating_defaults_to_zero() {
        let json = r#"{"id":2,"title":"t","price":1.0,"description":"d","category":"c","image":"i"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.rating, Rating::default());
        assert!(!product.in_stock());
    }

    #[test]
    fn stars_are_floored_and_clamped() {
        let mut product = sample();
        assert_eq!(product.star_count(), 3);

        product.rating.rate = 7.2;
        assert_eq!(product.star_count(), 5);

        product.rating.rate = -1.0;
        assert_eq!(product.star_count(), 0);

        product.rating.rate = f64::NAN;
        assert_eq!(product.star_count(), 0);
    }

    #[test]
    fn stock_follows_review_count() {
        let mut product = sample();
        assert!(product.in_stock());
        product.rating.count = 0;
        assert!(!product.in_stock());
    }

    #[test]
    fn category_is_capitalized_for_display() {
        assert_eq!(sample().display_category(), "Men's clothing");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("électronique"), "Électronique");
    }
}
