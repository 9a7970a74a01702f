//! Catalog route handlers.

use axum::{Json, extract::State};

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::models::Product;
use crate::state::AppState;

/// The full catalog, id order.
///
/// GET /api/products
///
/// # Errors
///
/// Returns `AppError` if the catalog read fails.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}
