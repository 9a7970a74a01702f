//! Catalog product type.

use serde::Serialize;

use sanchi_core::{Price, ProductId};

/// A catalog product.
///
/// Seeded once at first boot and read-only at runtime; there is no stock
/// count - availability is unlimited by design.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Short description shown on the product card.
    pub description: String,
    /// Unit price in INR.
    pub price: Price,
    /// Display category (e.g. "Hair Care").
    pub category: String,
    /// Image reference path served from /uploads.
    pub img: String,
    /// Optional promotional tag (e.g. "Best Seller").
    pub tag: Option<String>,
}
