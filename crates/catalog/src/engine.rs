//! Filter/paginate engine: product list + criteria + page -> page view.

use crate::filter::{filter_products, FilterCriteria};
use crate::pagination::{paginate, PageView, ITEMS_PER_PAGE};
use crate::product::Product;

/// Filter `products` by `criteria` and cut out `requested_page`.
///
/// Total over well-typed input: unmatched criteria or out-of-range pages
/// degrade to an empty or clamped view, never to an error.
pub fn filter_and_paginate<'a>(
    products: &'a [Product],
    criteria: &FilterCriteria,
    requested_page: usize,
) -> PageView<&'a Product> {
    let matched = filter_products(products, criteria);
    let view = paginate(matched, requested_page, ITEMS_PER_PAGE);
    tracing::debug!(
        total = products.len(),
        matched = view.total_matched,
        page = view.page,
        total_pages = view.total_pages,
        "recomputed product view"
    );
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::numbered;

    #[test]
    fn category_example_fits_on_one_page() {
        let mut products = numbered(10);
        for p in products.iter_mut().take(3) {
            p.category = "electronics".to_string();
        }
        let criteria = FilterCriteria {
            category: "electronics".to_string(),
            ..FilterCriteria::default()
        };

        let view = filter_and_paginate(&products, &criteria, 1);
        assert_eq!(view.items.len(), 3);
        assert_eq!(view.total_matched, 3);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn twenty_matches_on_page_three() {
        let products = numbered(20);
        let view = filter_and_paginate(&products, &FilterCriteria::default(), 3);
        assert_eq!(view.items.len(), 4);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.items[0].id.get(), 17);
    }

    #[test]
    fn inverted_bounds_yield_empty_view() {
        let products = numbered(40);
        let criteria = FilterCriteria {
            min_price: Some(500.0),
            max_price: Some(100.0),
            ..FilterCriteria::default()
        };
        let view = filter_and_paginate(&products, &criteria, 2);
        assert!(view.items.is_empty());
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.page, 1);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use crate::fixtures::product;
        use proptest::prelude::*;

        const CATEGORIES: [&str; 4] = ["electronics", "jewelery", "men's clothing", "women's clothing"];
        const WORDS: [&str; 6] = ["Shirt", "Backpack", "Ring", "Monitor", "Jacket", "Drive"];

        fn arb_product() -> impl Strategy<Value = Product> {
            (1u64..10_000, 0usize..WORDS.len(), 0usize..CATEGORIES.len(), 0.0f64..1500.0, 0.0f64..5.0)
                .prop_map(|(id, word, category, price, rate)| {
                    product(id, WORDS[word], CATEGORIES[category], price, rate)
                })
        }

        fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
            (
                prop::sample::select(vec!["", "shirt", "RING", "o", "zzz"]),
                prop::sample::select(vec!["", "electronics", "jewelery"]),
                prop::option::of(0.0f64..1200.0),
                prop::option::of(0.0f64..1200.0),
                prop::option::of(0u8..=5),
            )
                .prop_map(|(search, category, min_price, max_price, rating)| FilterCriteria {
                    search: search.to_string(),
                    category: category.to_string(),
                    min_price,
                    max_price,
                    rating,
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: filtering never invents products.
            #[test]
            fn filter_is_a_subset(
                products in prop::collection::vec(arb_product(), 0..60),
                criteria in arb_criteria()
            ) {
                let matched = filter_products(&products, &criteria);
                prop_assert!(matched.len() <= products.len());
                for p in &matched {
                    prop_assert!(products.iter().any(|q| std::ptr::eq(q, *p)));
                    prop_assert!(criteria.matches(p));
                }
            }

            /// Property: filtering twice equals filtering once.
            #[test]
            fn filter_is_idempotent(
                products in prop::collection::vec(arb_product(), 0..60),
                criteria in arb_criteria()
            ) {
                let once = filter_products(&products, &criteria);
                let twice = filter_products(once.iter().copied(), &criteria);
                prop_assert_eq!(once, twice);
            }

            /// Property: a page never exceeds the page size and stays in range.
            #[test]
            fn page_is_bounded(
                products in prop::collection::vec(arb_product(), 0..60),
                criteria in arb_criteria(),
                page in 0usize..20
            ) {
                let view = filter_and_paginate(&products, &criteria, page);
                prop_assert!(view.items.len() <= ITEMS_PER_PAGE);
                prop_assert!(view.page >= 1);
                prop_assert!(view.page <= view.total_pages.max(1));
                prop_assert_eq!(view.total_pages, view.total_matched.div_ceil(ITEMS_PER_PAGE));
            }
        }
    }
}
