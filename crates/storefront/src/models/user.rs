//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use sanchi_core::{Email, UserId};

/// A storefront account holder (public profile).
///
/// The password hash never leaves the db layer; this type is safe to serve.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
