//! JSON-RPC 2.0 envelope used by the A2A interface.

use serde::{Deserialize, Serialize};

use crate::JsonObject;

/// Protocol version tag carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Internal JSON-RPC error: the gateway failed to build or dispatch the call.
pub const INTERNAL_ERROR: i64 = -32603;
/// Server-defined error: the policy engine refused the call or could not be reached.
pub const ENGINE_ERROR: i64 = -32000;

fn default_version() -> String {
    JSONRPC_VERSION.to_string()
}

/// A JSON-RPC call from an A2A client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version tag. Accepted as sent, defaults to `"2.0"`.
    #[serde(default = "default_version")]
    pub jsonrpc: String,
    /// Caller-supplied correlation id, echoed in the response.
    pub id: String,
    /// Method name; becomes the engine `action`.
    pub method: String,
    /// Optional free-form parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<JsonObject>,
}

impl JsonRpcRequest {
    /// The `agent_id` parameter, if present and a string.
    pub fn agent_id(&self) -> Option<&str> {
        self.params
            .as_ref()
            .and_then(|params| params.get("agent_id"))
            .and_then(|value| value.as_str())
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl JsonRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Payload of a response: a result or an error, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RpcOutcome {
    Result(JsonObject),
    Error(JsonRpcError),
}

/// JSON-RPC response returned to the A2A client.
///
/// The outcome is flattened into the envelope, so the serialized form is
/// either `{"jsonrpc","id","result"}` or `{"jsonrpc","id","error"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: String,
    #[serde(flatten)]
    pub outcome: RpcOutcome,
}

impl JsonRpcResponse {
    /// Successful response carrying `result`.
    pub fn result(id: impl Into<String>, result: JsonObject) -> Self {
        Self {
            jsonrpc: default_version(),
            id: id.into(),
            outcome: RpcOutcome::Result(result),
        }
    }

    /// Error response with the given code and message.
    pub fn error(id: impl Into<String>, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: default_version(),
            id: id.into(),
            outcome: RpcOutcome::Error(JsonRpcError::new(code, message)),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, RpcOutcome::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_defaults_version_and_params() {
        let req: JsonRpcRequest =
            serde_json::from_value(json!({"id": "r1", "method": "check_policy"}))
                .expect("should deserialize");
        assert_eq!(req.jsonrpc, "2.0");
        assert_eq!(req.params, None);
        assert_eq!(req.agent_id(), None);
    }

    #[test]
    fn request_requires_id_and_method() {
        assert!(serde_json::from_value::<JsonRpcRequest>(json!({"method": "m"})).is_err());
        assert!(serde_json::from_value::<JsonRpcRequest>(json!({"id": "r1"})).is_err());
    }

    #[test]
    fn agent_id_ignores_non_string_values() {
        let req: JsonRpcRequest = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": "r1",
            "method": "m",
            "params": {"agent_id": 42}
        }))
        .expect("should deserialize");
        assert_eq!(req.agent_id(), None);
    }

    #[test]
    fn error_codes_are_json_rpc_values() {
        assert_eq!(INTERNAL_ERROR, -32603);
        assert_eq!(ENGINE_ERROR, -32000);
    }

    #[test]
    fn result_response_omits_error() {
        let mut data = JsonObject::new();
        data.insert("allowed".to_string(), json!(true));
        let resp = JsonRpcResponse::result("r1", data);

        let value = serde_json::to_value(&resp).expect("should serialize");
        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "id": "r1", "result": {"allowed": true}})
        );
        assert!(!resp.is_error());
    }

    #[test]
    fn error_response_omits_result() {
        let resp = JsonRpcResponse::error("r1", ENGINE_ERROR, "NPL engine error: 500");

        let value = serde_json::to_value(&resp).expect("should serialize");
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "id": "r1",
                "error": {"code": -32000, "message": "NPL engine error: 500"}
            })
        );
        assert!(resp.is_error());
    }

    #[test]
    fn response_parses_from_wire() {
        let resp: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": "r9",
            "error": {"code": -32603, "message": "Internal error: boom"}
        }))
        .expect("should deserialize");
        assert_eq!(resp.id, "r9");
        assert_eq!(
            resp.outcome,
            RpcOutcome::Error(JsonRpcError::new(INTERNAL_ERROR, "Internal error: boom"))
        );
    }
}
