//! Cart line type.

use serde::Serialize;

use sanchi_core::{Price, ProductId};

/// One line of a user's active cart.
///
/// Name, price, and image are snapshots of the product at the time it was
/// added; quantity is always at least 1 (reaching 0 requires the explicit
/// remove operation). At most one line exists per (user, product) pair.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// The product this line holds.
    pub product_id: ProductId,
    /// Product name snapshot.
    pub name: String,
    /// Unit price snapshot.
    pub price: Price,
    /// Image reference snapshot.
    pub img: String,
    /// Units held for purchase (>= 1).
    pub quantity: i64,
}

impl CartLine {
    /// The line total (unit price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.line_total(self.quantity)
    }
}
