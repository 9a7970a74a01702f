//! Order status values.
//!
//! Checkout writes exactly one status (`Pending Verification`); everything
//! after that - payment confirmation, shipping - happens out-of-band, directly
//! against the store. The column is therefore free text, and unknown values
//! round-trip through [`OrderStatus::Other`] instead of failing to decode.

use serde::{Deserialize, Serialize};

/// Payment method recorded on every order: a manual UPI transfer verified by
/// staff against the customer-supplied UTR.
pub const PAYMENT_METHOD_UPI: &str = "UPI";

/// Lifecycle status of an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Payment claimed by the customer, not yet confirmed by staff.
    #[default]
    PendingVerification,
    /// Payment confirmed.
    Paid,
    /// Order handed to the courier.
    Shipped,
    /// Order cancelled.
    Cancelled,
    /// A status written out-of-band that this core does not model.
    Other(String),
}

impl OrderStatus {
    /// The display/storage form of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::PendingVerification => "Pending Verification",
            Self::Paid => "Paid",
            Self::Shipped => "Shipped",
            Self::Cancelled => "Cancelled",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s {
            "Pending Verification" => Self::PendingVerification,
            "Paid" => Self::Paid,
            "Shipped" => Self::Shipped,
            "Cancelled" => Self::Cancelled,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status_text() {
        assert_eq!(OrderStatus::default().as_str(), "Pending Verification");
    }

    #[test]
    fn test_known_round_trip() {
        for status in [
            OrderStatus::PendingVerification,
            OrderStatus::Paid,
            OrderStatus::Shipped,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::from(status.as_str()), status);
        }
    }

    #[test]
    fn test_unknown_passes_through() {
        let status = OrderStatus::from("Refund Requested");
        assert_eq!(status, OrderStatus::Other("Refund Requested".to_owned()));
        assert_eq!(status.as_str(), "Refund Requested");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&OrderStatus::PendingVerification).unwrap();
        assert_eq!(json, "\"Pending Verification\"");

        let parsed: OrderStatus = serde_json::from_str("\"Paid\"").unwrap();
        assert_eq!(parsed, OrderStatus::Paid);
    }
}
