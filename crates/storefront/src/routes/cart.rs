//! Cart route handlers.
//!
//! Every mutation returns the refreshed cart so the client can only ever
//! cache the server's view of it - the UI never writes quantity state itself.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use sanchi_core::ProductId;

use crate::db::{CartRepository, ProductRepository};
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::CartLine;
use crate::state::AppState;

/// Body for add/decrease mutations.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutation {
    pub product_id: ProductId,
}

/// The current cart lines.
///
/// GET /api/cart
///
/// # Errors
///
/// Returns `AppError` if the read fails.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<CartLine>>, AppError> {
    let lines = CartRepository::new(state.pool())
        .items_for_user(user.id)
        .await?;
    Ok(Json(lines))
}

/// Add one unit of a product.
///
/// POST /api/cart/add
///
/// The catalog row is the snapshot source - the client sends only the
/// product id.
///
/// # Errors
///
/// Returns `AppError::NotFound` for unknown products.
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CartMutation>,
) -> Result<Json<Vec<CartLine>>, AppError> {
    let product = ProductRepository::new(state.pool())
        .get(req.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {}", req.product_id)))?;

    let cart = CartRepository::new(state.pool());
    cart.add(user.id, &product).await?;

    tracing::debug!(user_id = %user.id, product_id = %product.id, "cart add");

    let lines = cart.items_for_user(user.id).await?;
    Ok(Json(lines))
}

/// Decrement one unit of a product (floors at quantity 1).
///
/// POST /api/cart/decrease
///
/// # Errors
///
/// Returns `AppError` if the update fails.
pub async fn decrease(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CartMutation>,
) -> Result<Json<Vec<CartLine>>, AppError> {
    let cart = CartRepository::new(state.pool());
    cart.decrease(user.id, req.product_id).await?;

    let lines = cart.items_for_user(user.id).await?;
    Ok(Json(lines))
}

/// Remove a product's line entirely.
///
/// DELETE /api/cart/{productId}
///
/// Idempotent: removing an absent line is not an error.
///
/// # Errors
///
/// Returns `AppError` if the delete fails.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Vec<CartLine>>, AppError> {
    let cart = CartRepository::new(state.pool());
    cart.remove(user.id, product_id).await?;

    let lines = cart.items_for_user(user.id).await?;
    Ok(Json(lines))
}
