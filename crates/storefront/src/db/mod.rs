//! Database operations for the storefront SQLite store.
//!
//! # Tables
//!
//! - `users` - Account identity (name, unique email, password hash)
//! - `products` - Catalog, seeded once at first boot, read-only afterwards
//! - `cart_items` - Active carts, one row per (user, product) pair
//! - `orders` / `order_items` - Placed orders with snapshotted line items
//! - `tower_sessions` - Session storage (created by the session store)
//!
//! The schema is applied idempotently at startup via [`migrate`]; the
//! database file itself is created on demand by [`create_pool`].

pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use cart::CartRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a SQLite connection pool with sensible defaults.
///
/// The database file is created if missing, matching the original
/// deployment's first-boot behavior.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = database_url
        .expose_secret()
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Idempotent schema bootstrap, run at every startup.
const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS products (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    price       TEXT NOT NULL,
    category    TEXT NOT NULL,
    img         TEXT NOT NULL,
    tag         TEXT
);

CREATE TABLE IF NOT EXISTS cart_items (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id    INTEGER NOT NULL REFERENCES users (id),
    product_id INTEGER NOT NULL REFERENCES products (id),
    name       TEXT NOT NULL,
    price      TEXT NOT NULL,
    img        TEXT NOT NULL,
    quantity   INTEGER NOT NULL CHECK (quantity >= 1),
    UNIQUE (user_id, product_id)
);

CREATE TABLE IF NOT EXISTS orders (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id          INTEGER NOT NULL REFERENCES users (id),
    total_amount     TEXT NOT NULL,
    status           TEXT NOT NULL,
    payment_method   TEXT NOT NULL,
    transaction_id   TEXT NOT NULL,
    shipping_address TEXT NOT NULL,
    created_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS order_items (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id INTEGER NOT NULL REFERENCES orders (id),
    name     TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    price    TEXT NOT NULL
);
";

/// Apply the schema.
///
/// Every statement is `CREATE TABLE IF NOT EXISTS`, so running this on an
/// existing database is a no-op.
///
/// # Errors
///
/// Returns `sqlx::Error` if a statement fails.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{SqlitePool, SqlitePoolOptions, migrate};

    /// An in-memory database with the schema applied.
    ///
    /// A single connection keeps every query on the same `:memory:` database.
    #[allow(clippy::unwrap_used)]
    pub async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        migrate(&pool).await.unwrap();
        pool
    }
}
