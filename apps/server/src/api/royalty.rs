use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use kdphub_core::royalty::{CalculatorOptions, RoyaltyError, RoyaltyInput, RoyaltyOutcome};

/// Selectable values for the calculator form.
async fn get_royalty_options(State(state): State<Arc<AppState>>) -> Json<CalculatorOptions> {
    Json(state.royalty_service.options())
}

/// Runs the calculator. The body is either the report or `{"error": "..."}`.
async fn calculate_royalty(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RoyaltyInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RoyaltyOutcome>)> {
    let Json(input) = payload
        .map_err(|e| ApiError::BadRequest(format!("Invalid input values: {}", e.body_text())))?;

    let outcome = state.royalty_service.calculate(input).await;
    let status = match outcome.error() {
        None => StatusCode::OK,
        Some(RoyaltyError::InvalidInput { .. }) => StatusCode::BAD_REQUEST,
        Some(RoyaltyError::MinimumPriceViolation { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        Some(RoyaltyError::UnknownCostRule { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    Ok((status, Json(outcome)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/royalty/options", get(get_royalty_options))
        .route("/royalty/calculate", post(calculate_royalty))
}
