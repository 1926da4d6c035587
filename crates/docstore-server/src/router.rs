use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use docstore_protocol::{Batch, StateResponse, StatusResponse, SubmitAck};
use docstore_types::StateAddress;

use crate::error::{ServerError, ServerResult};
use crate::service::GatewayService;

/// Build the axum router over a shared gateway service.
pub fn build_router(service: Arc<GatewayService>) -> Router {
    Router::new()
        .route("/batches", post(submit_batch))
        .route("/state/:address", get(fetch_state))
        .route("/status", get(status))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Batch ingress endpoint.
async fn submit_batch(
    State(service): State<Arc<GatewayService>>,
    Json(batch): Json<Batch>,
) -> ServerResult<Json<SubmitAck>> {
    Ok(Json(service.submit(&batch)?))
}

/// Single-address state query endpoint.
async fn fetch_state(
    State(service): State<Arc<GatewayService>>,
    Path(address): Path<String>,
) -> ServerResult<Json<StateResponse>> {
    let address =
        StateAddress::from_hex(&address).map_err(|e| ServerError::BadAddress(e.to_string()))?;
    let data = service
        .state_bytes(&address)
        .ok_or_else(|| ServerError::NotFound(address.to_string()))?;
    Ok(Json(StateResponse {
        address: address.to_string(),
        data: hex::encode(data),
    }))
}

/// Liveness and family metadata.
async fn status(State(service): State<Arc<GatewayService>>) -> Json<StatusResponse> {
    Json(service.status())
}
