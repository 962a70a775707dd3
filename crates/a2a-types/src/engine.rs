//! Request and verdict exchanged with the policy engine.

use serde::{Deserialize, Serialize};

use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse, ENGINE_ERROR};
use crate::JsonObject;

/// Agent id used when the caller does not name one.
pub const UNKNOWN_AGENT_ID: &str = "unknown";

/// Message used when the engine reports failure without saying why.
const UNKNOWN_ENGINE_ERROR: &str = "Unknown error";

/// Body of `POST /npl/evaluate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineRequest {
    pub action: String,
    pub agent_id: String,
    pub context: JsonObject,
}

impl EngineRequest {
    /// Translates an A2A call into an engine evaluation request.
    ///
    /// - `action` is the JSON-RPC method.
    /// - `agent_id` is `params.agent_id` when it is a string, else `"unknown"`.
    /// - `context` is the full `params` object, or `{}` when absent.
    pub fn from_rpc(request: &JsonRpcRequest) -> Self {
        Self {
            action: request.method.clone(),
            agent_id: request.agent_id().unwrap_or(UNKNOWN_AGENT_ID).to_string(),
            context: request.params.clone().unwrap_or_default(),
        }
    }
}

/// Verdict returned by the policy engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EngineResponse {
    /// Maps the verdict onto a JSON-RPC response for call `id`.
    ///
    /// Success yields `result = data` (or `{}`); failure yields error code
    /// `-32000` with the engine's message.
    pub fn into_rpc_response(self, id: impl Into<String>) -> JsonRpcResponse {
        if self.success {
            JsonRpcResponse::result(id, self.data.unwrap_or_default())
        } else {
            JsonRpcResponse::error(
                id,
                ENGINE_ERROR,
                self.error.unwrap_or_else(|| UNKNOWN_ENGINE_ERROR.to_string()),
            )
        }
    }
}
