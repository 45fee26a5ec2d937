//! Plain-text rendering of dashboard screens.
//!
//! Every function returns the rendered text; callers decide where it goes.

use std::fmt::Write;

use storefront_catalog::{capitalize, DashboardStats, FilterCriteria, PageView, Product};

const TITLE_WIDTH: usize = 40;
const CATEGORY_WIDTH: usize = 18;

pub fn money(value: f64) -> String {
    format!("${value:.2}")
}

/// Price bounds render without cents, like the price slider.
fn bound(value: Option<f64>, unbounded: &str) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("${v:.0}"),
        Some(v) => money(v),
        None => unbounded.to_string(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn stars(product: &Product) -> String {
    let filled = usize::from(product.star_count());
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn stock_label(product: &Product) -> &'static str {
    if product.in_stock() {
        "In Stock"
    } else {
        "Out of Stock"
    }
}

pub fn stats(stats: &DashboardStats) -> String {
    let cards = [
        ("Total Products", stats.total_products.to_string(), "Products in inventory"),
        ("Average Price", money(stats.average_price), "Per product"),
        ("Total Value", money(stats.total_value), "Inventory value"),
        ("Categories", stats.category_count.to_string(), "Product categories"),
    ];

    let mut out = String::new();
    for (title, value, description) in cards {
        let _ = writeln!(out, "{title:<16} {value:>12}  {description}");
    }
    out
}

pub fn categories(categories: &[String]) -> String {
    let mut out = String::from("All Categories\n");
    for category in categories {
        let _ = writeln!(out, "  {:<20} ({})", capitalize(category), category);
    }
    out
}

/// Active filter badges, or `None` when nothing narrows the list.
pub fn filter_badges(criteria: &FilterCriteria) -> Option<String> {
    let count = criteria.active_filter_count();
    if count == 0 {
        return None;
    }

    let mut badges = Vec::with_capacity(count);
    if !criteria.category.is_empty() {
        badges.push(format!("Category: {}", criteria.category));
    }
    if let Some(rating) = criteria.min_rating() {
        badges.push(format!("Rating: {rating}+ Stars"));
    }
    if criteria.has_custom_price_range() {
        badges.push(format!(
            "Price: {} - {}",
            bound(criteria.min_price, "$0"),
            bound(criteria.max_price, "any")
        ));
    }
    if !criteria.search.is_empty() {
        badges.push(format!("Search: {}", criteria.search));
    }

    Some(format!("Filters ({count}): {}", badges.join(" | ")))
}

pub fn grid(view: &PageView<&Product>) -> String {
    if view.is_empty() {
        return "No products found\n\
                Try adjusting your filters or search term to find what you're looking for.\n"
            .to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<TITLE_WIDTH$}  {:<CATEGORY_WIDTH$}  {:>9}  {:<16}  Stock",
        "ID", "Title", "Category", "Price", "Rating"
    );
    for product in &view.items {
        let rating = format!("{} ({})", product.rating.rate, product.rating.count);
        let _ = writeln!(
            out,
            "{:>4}  {:<TITLE_WIDTH$}  {:<CATEGORY_WIDTH$}  {:>9}  {:<16}  {}",
            product.id,
            truncate(&product.title, TITLE_WIDTH),
            truncate(&product.category, CATEGORY_WIDTH),
            money(product.price),
            rating,
            stock_label(product),
        );
    }

    if view.total_pages > 1 {
        if let Some((first, last, total)) = view.showing_range() {
            let _ = writeln!(
                out,
                "Showing {first} to {last} of {total} products  ·  Page {} of {}",
                view.page, view.total_pages
            );
        }
    }
    out
}

pub fn detail(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", product.title);
    let _ = writeln!(out, "{}", product.display_category());
    let _ = writeln!(
        out,
        "{} ({}) - {} reviews",
        stars(product),
        product.rating.rate,
        product.rating.count
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Price:        {}", money(product.price));
    let _ = writeln!(out, "Availability: {}", stock_label(product));
    let _ = writeln!(out, "Image:        {}", product.image);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", product.description);
    out
}

pub fn load_error(what: &str, message: &str) -> String {
    format!(
        "Error Loading {what}\n\
         There was an error loading the {} details. Please try again.\n\
         ({message})\n",
        what.to_lowercase()
    )
}
