//! Wire types for the A2A gateway.
//!
//! This crate holds everything that crosses a process boundary: the A2A
//! JSON-RPC envelope served to agents, the request and verdict exchanged
//! with the policy engine, and the static agent card. The translation rules
//! between the two request schemas live here as pure functions so they can
//! be tested without any I/O.
//!
//! Free-form payloads (`params`, `context`, `data`, `result`) are kept as
//! [`JsonObject`], an insertion-ordered map of dynamic JSON values. Nothing
//! beyond the documented fields is validated.

use serde_json::{Map, Value};

/// Ordered string-keyed map of dynamic JSON values.
pub type JsonObject = Map<String, Value>;

mod card;
mod engine;
mod jsonrpc;

pub use card::{AgentCapabilities, AgentCard, AgentSkill};
pub use engine::{EngineRequest, EngineResponse, UNKNOWN_AGENT_ID};
pub use jsonrpc::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcOutcome, ENGINE_ERROR, INTERNAL_ERROR,
    JSONRPC_VERSION,
};
