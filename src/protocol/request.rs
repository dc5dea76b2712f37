use serde::{Deserialize, Serialize};

use crate::value::Value;

/// JSON-RPC 2.0 ID — a number or a string per spec.
///
/// Equality is variant-sensitive: `Str("42")` never equals `Int(42)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Int(i64),
    Str(String),
}

/// JSON-RPC 2.0 request envelope.
///
/// A request without an `id` is a notification: it is routed but never
/// answered.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<RequestId>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}
