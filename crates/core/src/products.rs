//! Product selection: category filtering, the homepage grid and related products

use chrono::{DateTime, Utc};

use crate::model::Product;

/// Number of products shown in the homepage "recent work" grid
pub const RECENT_LIMIT: usize = 6;

/// Number of related products shown on the product details page
pub const RELATED_LIMIT: usize = 3;

/// Keep the products whose embedded category id equals `category_id`
///
/// Order is preserved. Products without a category never match.
pub fn filter_by_category(products: Vec<Product>, category_id: &str) -> Vec<Product> {
    products
        .into_iter()
        .filter(|product| {
            product
                .category
                .as_ref()
                .is_some_and(|category| category.id == category_id)
        })
        .collect()
}

/// Products in the same category as `current`, excluding `current` itself
///
/// Categories are compared with [`crate::model::CategoryRef::same_category`]; a
/// product without a category has no relatives. At most `limit` entries are
/// returned, in the order of `all`.
pub fn related_products<'a>(current: &Product, all: &'a [Product], limit: usize) -> Vec<&'a Product> {
    let Some(category) = current
        .category
        .as_ref()
        .filter(|category| !category.id.is_empty() || !category.grouping_key().is_empty())
    else {
        return Vec::new();
    };

    all.iter()
        .filter(|candidate| candidate.id != current.id)
        .filter(|candidate| {
            candidate
                .category
                .as_ref()
                .is_some_and(|other| category.same_category(other))
        })
        .take(limit)
        .collect()
}

/// Products for the homepage grid: the first [`RECENT_LIMIT`] in fetch order
pub fn recent_products(products: &[Product]) -> &[Product] {
    &products[..products.len().min(RECENT_LIMIT)]
}

/// Format a date as "January 5, 2024"; a missing date renders empty
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|dt| dt.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}
