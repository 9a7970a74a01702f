//! Checkout route handler.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use sanchi_core::{OrderId, Price};

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::services::CheckoutService;
use crate::state::AppState;

/// Checkout request body.
///
/// `totalAmount` is advisory; the order is built from the server-held cart
/// and the recomputed total must match. Any `cartItems` the client includes
/// are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub total_amount: Price,
    pub transaction_id: String,
    pub address: String,
}

/// Checkout response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: OrderId,
}

/// Convert the current cart into an order.
///
/// POST /api/checkout
///
/// # Errors
///
/// Returns `AppError` for an empty cart, invalid address/UTR, a total
/// mismatch, or a failed transaction.
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>), AppError> {
    let service = CheckoutService::new(state.pool());
    let order_id = service
        .place_order(user.id, req.total_amount, &req.transaction_id, &req.address)
        .await?;

    tracing::info!(user_id = %user.id, %order_id, "order placed, pending verification");

    Ok((StatusCode::CREATED, Json(CheckoutResponse { order_id })))
}
