//! Type-safe price representation using decimal arithmetic.
//!
//! The storefront is single-currency (INR). Prices travel as JSON numbers on
//! the wire (the UI does arithmetic on them) and as exact decimal strings in
//! the database, so no float ever reaches storage or totals.

use core::fmt;
use std::iter::Sum;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An INR price or monetary amount.
///
/// Wraps [`Decimal`] so line totals and order totals are computed with exact
/// arithmetic. Comparison is by numeric value (`129` == `129.00`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole-rupee amount.
    #[must_use]
    pub fn from_rupees(rupees: i64) -> Self {
        Self(Decimal::from(rupees))
    }

    /// The zero amount.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The total for `quantity` units at this price.
    #[must_use]
    pub fn line_total(&self, quantity: i64) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{20b9}{}", self.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|p| p.0).sum())
    }
}

impl std::str::FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Decimal>().map(Self)
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Whole amounts serialize as integers so the wire shape matches the
        // catalog (`"price": 129`, not `"price": 129.0`).
        if self.0.is_integer()
            && let Some(n) = self.0.to_i64()
        {
            return serializer.serialize_i64(n);
        }
        match self.0.to_f64() {
            Some(f) => serializer.serialize_f64(f),
            None => Err(serde::ser::Error::custom("price out of range")),
        }
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a price as a JSON number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Price(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Price(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Decimal::from_f64(v)
            .map(Price)
            .ok_or_else(|| E::custom(format!("price out of range: {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<Decimal>()
            .map(Price)
            .map_err(|_| E::custom(format!("invalid price: {v}")))
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PriceVisitor)
    }
}

// SQLx support (with sqlite feature): stored as TEXT for exact round-trips.
#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for Price {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for Price {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        let amount = s.parse::<Decimal>()?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'q, sqlx::Sqlite>>::encode(self.0.to_string(), buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let price = Price::from_rupees(129);
        assert_eq!(price.line_total(2), Price::from_rupees(258));
        assert_eq!(price.line_total(1), price);
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_rupees(258), Price::from_rupees(119)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_rupees(377));
    }

    #[test]
    fn test_value_equality_ignores_scale() {
        let a: Price = "129".parse().unwrap();
        let b: Price = "129.00".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialize_whole_as_integer() {
        let json = serde_json::to_string(&Price::from_rupees(899)).unwrap();
        assert_eq!(json, "899");
    }

    #[test]
    fn test_serialize_fractional_as_float() {
        let price: Price = "49.50".parse().unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "49.5");
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let from_int: Price = serde_json::from_str("899").unwrap();
        assert_eq!(from_int, Price::from_rupees(899));

        let from_float: Price = serde_json::from_str("49.5").unwrap();
        assert_eq!(from_float, "49.50".parse().unwrap());

        let from_str: Price = serde_json::from_str("\"129\"").unwrap();
        assert_eq!(from_str, Price::from_rupees(129));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Price::from_rupees(349)), "\u{20b9}349");
    }
}
