//! A2A endpoint handlers.

use crate::engine::EngineError;
use crate::middleware::BearerToken;
use crate::AppState;
use a2a_types::{
    AgentCard, EngineRequest, JsonRpcRequest, JsonRpcResponse, ENGINE_ERROR, INTERNAL_ERROR,
};
use axum::extract::{Extension, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// Service name reported by the health check.
pub const SERVICE_NAME: &str = "a2a-npl-server";

/// `GET /health`
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME
    }))
}

/// `GET /a2a/agent-card`
pub async fn agent_card_handler(Extension(state): Extension<Arc<AppState>>) -> Json<AgentCard> {
    Json(state.agent_card.as_ref().clone())
}

/// `POST /a2a/request`: forwards one JSON-RPC call to the policy engine.
///
/// Runs behind [`crate::middleware::auth_middleware`], which guarantees a
/// [`BearerToken`] extension. Every outcome, including engine and transport
/// failures, becomes a JSON-RPC response carrying the caller's `id`.
pub async fn a2a_request_handler(
    Extension(state): Extension<Arc<AppState>>,
    Extension(token): Extension<BearerToken>,
    Json(request): Json<JsonRpcRequest>,
) -> Json<JsonRpcResponse> {
    tracing::info!(
        request_id = %request.id,
        method = %request.method,
        agent_id = request.agent_id(),
        "received A2A request"
    );

    let engine_request = EngineRequest::from_rpc(&request);

    let response = match state.engine.call(&engine_request, &token).await {
        Ok(verdict) => verdict.into_rpc_response(request.id),
        Err(e) if e.is_internal() => {
            tracing::error!(request_id = %request.id, error = %e, "error handling A2A request");
            JsonRpcResponse::error(request.id, INTERNAL_ERROR, format!("Internal error: {e}"))
        }
        Err(e) => {
            if let EngineError::Status { status, body } = &e {
                tracing::error!(
                    request_id = %request.id,
                    status_code = status.as_u16(),
                    response_text = %body,
                    "NPL engine error"
                );
            } else {
                tracing::error!(request_id = %request.id, error = %e, "error calling NPL engine");
            }
            JsonRpcResponse::error(request.id, ENGINE_ERROR, e.to_string())
        }
    };

    Json(response)
}
