//! API route handlers

pub mod health;
pub mod node;
pub mod staking;
pub mod wallet;

use axum::{http::StatusCode, routing::get, Json, Router};
use garrison_core::Error;

use crate::dto::ApiError;
use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/node", node::router())
        .nest("/wallet", wallet::router())
        .nest("/staking", staking::router())
        .with_state(state)
}

/// Map a core error onto an HTTP response
pub(crate) fn error_response(err: &Error) -> (StatusCode, Json<ApiError>) {
    let (status, api_error) = match err {
        Error::Protocol(p) => (
            StatusCode::from_u16(p.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::new(p.error_code(), p.to_string()),
        ),
        Error::Node(n) => (
            StatusCode::SERVICE_UNAVAILABLE,
            ApiError::new("node_unavailable", n.to_string()),
        ),
        Error::Transaction(t) => {
            use garrison_core::TxError;
            let (status, code) = match t {
                TxError::Rejected { .. } => (StatusCode::CONFLICT, "wallet_rejected"),
                TxError::SubmissionFailed { .. } => (StatusCode::BAD_GATEWAY, "submission_failed"),
                TxError::Reverted { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "tx_reverted"),
            };
            (status, ApiError::new(code, t.to_string()))
        }
        Error::Config(m) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("config_error", m.clone()),
        ),
        Error::Serialization(m) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::internal(m.clone()),
        ),
    };
    (status, Json(api_error))
}
