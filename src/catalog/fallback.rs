use rust_decimal::Decimal;

use super::view::CatalogView;
use crate::domain::Product;

pub const DEFAULT_CATEGORIES: [&str; 4] = ["Electronics", "Accessories", "Sports", "Home"];

/// Built-in catalog served when the backend cannot be reached.
pub fn fallback_catalog() -> CatalogView {
    let item = |id: &str, name: &str, category: &str, cents: i64, description: &str| {
        Product::new(id, name, category, Decimal::new(cents, 2))
            .with_description(description)
            .with_image(format!("images/{id}.jpg"))
    };
    let products = vec![
        item("fallback_1", "Wireless Headphones", "Electronics", 7999, "Over-ear headphones with 30h battery"),
        item("fallback_2", "Smart Watch", "Electronics", 19999, "Fitness tracking and notifications")
            .with_promotion(10),
        item("fallback_3", "Leather Wallet", "Accessories", 3999, "Slim bifold wallet"),
        item("fallback_4", "Running Shoes", "Sports", 8999, "Lightweight trainers"),
        item("fallback_5", "Yoga Mat", "Sports", 2999, "Non-slip 6mm mat").out_of_stock(),
        item("fallback_6", "Ceramic Vase", "Home", 4500, "Hand glazed, 30cm").with_promotion(20),
    ];
    CatalogView::new(
        products,
        DEFAULT_CATEGORIES.iter().map(|name| name.to_string()).collect(),
    )
}
