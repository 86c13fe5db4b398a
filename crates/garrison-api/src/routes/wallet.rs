//! Wallet connection endpoints
//!
//! Wallet connection itself is an external capability; these endpoints bind
//! an already-chosen account to a dashboard session on the active chain.

use alloy_primitives::Address;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::dto::{ApiError, ConnectWalletRequest, WalletStatusResponse};
use crate::routes::error_response;
use crate::AppState;

/// Create wallet routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/connect", post(connect))
        .route("/disconnect", post(disconnect))
        .route("/status", get(get_status))
}

/// POST /wallet/connect - Bind an account and create a dashboard session
pub async fn connect(
    State(state): State<AppState>,
    Json(request): Json<ConnectWalletRequest>,
) -> Result<Json<WalletStatusResponse>, (StatusCode, Json<ApiError>)> {
    let account: Address = request.address.parse().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(
                "invalid_address",
                format!("'{}' is not a valid EVM address", request.address),
            )),
        )
    })?;

    let session = state
        .connect_wallet(account)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(WalletStatusResponse {
        connected: true,
        address: Some(session.account().to_string()),
        chain_id: Some(session.chain_id()),
        chain_name: staking::chain_name(session.chain_id()).map(|s| s.to_string()),
        supported: Some(session.is_supported()),
    }))
}

/// POST /wallet/disconnect - Tear down the session
pub async fn disconnect(State(state): State<AppState>) -> StatusCode {
    state.disconnect_wallet().await;
    StatusCode::NO_CONTENT
}

/// GET /wallet/status
pub async fn get_status(State(state): State<AppState>) -> Json<WalletStatusResponse> {
    match state.session().await {
        Some(session) => Json(WalletStatusResponse {
            connected: true,
            address: Some(session.account().to_string()),
            chain_id: Some(session.chain_id()),
            chain_name: staking::chain_name(session.chain_id()).map(|s| s.to_string()),
            supported: Some(session.is_supported()),
        }),
        None => Json(WalletStatusResponse {
            connected: false,
            address: None,
            chain_id: None,
            chain_name: None,
            supported: None,
        }),
    }
}
