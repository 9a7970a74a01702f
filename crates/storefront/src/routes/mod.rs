//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check (in main)
//! GET  /health/ready            - Readiness check (in main)
//!
//! # Auth
//! POST /api/signup              - Create an account
//! POST /api/login               - Login, establishes the session
//! POST /api/logout              - Destroy the session
//! GET  /api/me                  - Current session profile
//!
//! # Catalog
//! GET  /api/products            - Full catalog
//!
//! # Cart (requires auth; mutations return the refreshed cart)
//! GET    /api/cart              - Current cart lines
//! POST   /api/cart/add          - Add one unit (first add creates the line)
//! POST   /api/cart/decrease     - Decrement one unit (floors at 1)
//! DELETE /api/cart/{productId}  - Remove the line entirely
//!
//! # Checkout & orders (requires auth)
//! POST /api/checkout            - Convert the cart into an order
//! GET  /api/orders              - Order history, most recent first
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/decrease", post(cart::decrease))
        .route("/{product_id}", delete(cart::remove))
}

/// Create the `/api` router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/products", get(products::index))
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::checkout))
        .route("/orders", get(orders::index))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}
