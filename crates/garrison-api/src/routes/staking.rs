//! Staking dashboard and operation endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use garrison_core::{Error, ProtocolError};

use crate::dto::{
    AmountRequest, ApiError, DashboardQuery, DashboardResponse, SubmitResponse,
};
use crate::routes::error_response;
use crate::tracker::OpStatus;
use crate::AppState;

/// Create staking routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/reload", post(reload))
        .route("/operations", get(get_operations))
        .route("/mint", post(mint))
        .route("/approve", post(approve))
        .route("/stake", post(stake))
        .route("/unstake", post(unstake))
        .route("/claim", post(claim))
}

/// GET /staking/dashboard - Derived view + snapshots + operation statuses.
///
/// Pure recomputation from the in-memory snapshots; pass stakeAmount to
/// evaluate the approval gate for the amount currently typed.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, (StatusCode, Json<ApiError>)> {
    let session = state
        .require_session()
        .await
        .map_err(|e| error_response(&e))?;

    let stake_input = query.stake_amount.unwrap_or_default();
    let derived = session.derived_view(&stake_input).await;
    let snapshots = session.snapshots().await;

    Ok(Json(DashboardResponse {
        account: session.account().to_string(),
        chain_id: session.chain_id(),
        supported: session.is_supported(),
        derived,
        account_snapshot: snapshots.account,
        pool_snapshot: snapshots.pool,
        allowance: snapshots.allowance,
        operations: session.operation_statuses(),
    }))
}

/// POST /staking/reload - Re-read all snapshots from the chain.
///
/// Idempotent; the presentation layer may call it freely. A chain-id change
/// detected here tears the stale session down.
pub async fn reload(
    State(state): State<AppState>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    let session = state
        .require_session()
        .await
        .map_err(|e| error_response(&e))?;

    match session.reload().await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            if matches!(e, Error::Protocol(ProtocolError::ChainChanged { .. })) {
                tracing::warn!("Active chain changed; dropping stale session");
                state.disconnect_wallet().await;
            }
            Err(error_response(&e))
        }
    }
}

/// GET /staking/operations - Per-kind lifecycle status
pub async fn get_operations(
    State(state): State<AppState>,
) -> Result<Json<Vec<OpStatus>>, (StatusCode, Json<ApiError>)> {
    let session = state
        .require_session()
        .await
        .map_err(|e| error_response(&e))?;
    Ok(Json(session.operation_statuses()))
}

/// POST /staking/mint - Mint test tokens
pub async fn mint(
    State(state): State<AppState>,
    Json(request): Json<AmountRequest>,
) -> Result<Json<SubmitResponse>, (StatusCode, Json<ApiError>)> {
    let session = state
        .require_session()
        .await
        .map_err(|e| error_response(&e))?;

    let tx_hash = session
        .mint(&request.amount)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(SubmitResponse {
        tx_hash: tx_hash.to_string(),
    }))
}

/// POST /staking/approve - Approve the pool for exactly the typed amount
pub async fn approve(
    State(state): State<AppState>,
    Json(request): Json<AmountRequest>,
) -> Result<Json<SubmitResponse>, (StatusCode, Json<ApiError>)> {
    let session = state
        .require_session()
        .await
        .map_err(|e| error_response(&e))?;

    let tx_hash = session
        .approve(&request.amount)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(SubmitResponse {
        tx_hash: tx_hash.to_string(),
    }))
}

/// POST /staking/stake
pub async fn stake(
    State(state): State<AppState>,
    Json(request): Json<AmountRequest>,
) -> Result<Json<SubmitResponse>, (StatusCode, Json<ApiError>)> {
    let session = state
        .require_session()
        .await
        .map_err(|e| error_response(&e))?;

    let tx_hash = session
        .stake(&request.amount)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(SubmitResponse {
        tx_hash: tx_hash.to_string(),
    }))
}

/// POST /staking/unstake
pub async fn unstake(
    State(state): State<AppState>,
    Json(request): Json<AmountRequest>,
) -> Result<Json<SubmitResponse>, (StatusCode, Json<ApiError>)> {
    let session = state
        .require_session()
        .await
        .map_err(|e| error_response(&e))?;

    let tx_hash = session
        .unstake(&request.amount)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(SubmitResponse {
        tx_hash: tx_hash.to_string(),
    }))
}

/// POST /staking/claim - Claim accrued rewards (no amount)
pub async fn claim(
    State(state): State<AppState>,
) -> Result<Json<SubmitResponse>, (StatusCode, Json<ApiError>)> {
    let session = state
        .require_session()
        .await
        .map_err(|e| error_response(&e))?;

    let tx_hash = session.claim().await.map_err(|e| error_response(&e))?;

    Ok(Json(SubmitResponse {
        tx_hash: tx_hash.to_string(),
    }))
}
