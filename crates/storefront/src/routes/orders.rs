//! Order history route handler.

use axum::{Json, extract::State};

use crate::db::OrderRepository;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::OrderSummary;
use crate::state::AppState;

/// The user's order history, most recent first.
///
/// GET /api/orders
///
/// # Errors
///
/// Returns `AppError` if the read fails.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<OrderSummary>>, AppError> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(orders))
}
