//! Node status and configuration endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use evm_node_client::probe_chain;
use garrison_core::{ContractAddresses, RpcConfig};

use crate::dto::{ApiError, NodeConfigRequest, NodeStatusResponse, RegisterContractsRequest};
use crate::AppState;

/// Create node routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(get_status))
        .route("/configure", post(configure))
        .route("/contracts", post(register_contracts))
}

/// GET /node/status - Probe the configured RPC endpoint
pub async fn get_status(State(state): State<AppState>) -> Json<NodeStatusResponse> {
    let config = state.config().await;

    match probe_chain(&config.rpc.url).await {
        Some(probe) => Json(NodeStatusResponse {
            connected: true,
            url: config.rpc.url,
            chain_id: Some(probe.chain_id),
            chain_name: staking::chain_name(probe.chain_id).map(|s| s.to_string()),
            block_height: Some(probe.block_height),
            latency_ms: Some(probe.latency_ms),
        }),
        None => Json(NodeStatusResponse {
            connected: false,
            url: config.rpc.url,
            chain_id: None,
            chain_name: None,
            block_height: None,
            latency_ms: None,
        }),
    }
}

/// POST /node/configure - Update the RPC endpoint
pub async fn configure(
    State(state): State<AppState>,
    Json(request): Json<NodeConfigRequest>,
) -> Json<NodeStatusResponse> {
    state
        .set_rpc_config(RpcConfig {
            url: request.url.clone(),
        })
        .await;

    // Refresh client and return status
    let _ = state.refresh_node_client().await;

    get_status(State(state)).await
}

/// POST /node/contracts - Register contract addresses for a chain
pub async fn register_contracts(
    State(state): State<AppState>,
    Json(request): Json<RegisterContractsRequest>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    if request.token == request.staking {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::bad_request(
                "Token and staking contract addresses must differ",
            )),
        ));
    }

    state
        .register_contracts(
            request.chain_id,
            ContractAddresses {
                token: request.token,
                staking: request.staking,
            },
        )
        .await;

    tracing::info!(
        chain_id = request.chain_id,
        token = %request.token,
        staking = %request.staking,
        "Registered contracts"
    );

    Ok(StatusCode::NO_CONTENT)
}
