//! Synthetic catalog data for demos and local development

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::models::Product;

/// Products inserted per seeding request
pub const SEED_BATCH_SIZE: usize = 40;

const SEED_CATEGORY: &str = "Category1";
const SEED_BRAND: &str = "Brand1";

/// Build `count` products named `Product 1..=count`, all stamped with `now`.
///
/// Prices are drawn from [0, 100) and kept to two decimals; ratings from [0, 5)
/// with one decimal.
pub fn dummy_products<G: Rng + ?Sized>(count: usize, now: DateTime<Utc>, rng: &mut G) -> Vec<Product> {
    (1..=count)
        .map(|n| Product {
            id: None,
            name: format!("Product {n}"),
            image: format!("https://via.placeholder.com/150?text=Product+{n}"),
            description: format!("Description for Product {n}"),
            price: round_to(rng.gen_range(0.0..100.0), 2),
            category: SEED_CATEGORY.to_string(),
            brand: SEED_BRAND.to_string(),
            ratings: round_to(rng.gen_range(0.0..5.0), 1),
            created_at: now,
        })
        .collect()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
