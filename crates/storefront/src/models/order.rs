//! Order history types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use sanchi_core::{OrderId, OrderStatus, Price};

/// One order in a user's history, with its line items nested.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Unique order ID.
    pub order_id: OrderId,
    /// Order total, recomputed server-side at checkout.
    pub total: Price,
    /// Current status ("Pending Verification" until staff confirm payment).
    pub status: OrderStatus,
    /// When the order was placed.
    pub date: DateTime<Utc>,
    /// Line items, copied from the cart at checkout.
    pub items: Vec<OrderLine>,
}

/// One line of a placed order.
///
/// A snapshot, not a live product reference - later catalog changes never
/// alter historical orders.
#[derive(Debug, Clone, Serialize)]
pub struct OrderLine {
    /// Product name snapshot.
    pub name: String,
    /// Units ordered.
    pub qty: i64,
    /// Unit price snapshot.
    pub price: Price,
}
