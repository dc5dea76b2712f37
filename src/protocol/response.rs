use serde::Serialize;

use super::request::RequestId;
use crate::value::Value;

/// JSON-RPC 2.0 response envelope.
///
/// Exactly one of `result`/`error` is present; the absent one is omitted
/// from the serialized form entirely. The `id` field is always serialized —
/// `null` marks the parse-error path, where no request id could be recovered.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<RequestId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Standard JSON-RPC 2.0 error codes.
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;
/// Default code for server-side failures; custom codes may use -32000..-32099.
pub const SERVER_ERROR: i32 = -32000;

impl JsonRpcError {
    pub fn parse_error() -> Self {
        Self {
            code: PARSE_ERROR,
            message: "Parse error".into(),
            data: None,
        }
    }

    pub fn invalid_request() -> Self {
        Self {
            code: INVALID_REQUEST,
            message: "Invalid Request".into(),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {method}"),
            data: None,
        }
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: detail.into(),
            data: None,
        }
    }

    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: detail.into(),
            data: None,
        }
    }

    /// A server error with the default -32000 code.
    pub fn server_error(detail: impl Into<String>) -> Self {
        Self {
            code: SERVER_ERROR,
            message: detail.into(),
            data: None,
        }
    }

    /// A server error with a custom code in the reserved -32000..-32099 band.
    pub fn server_error_with_code(code: i32, detail: impl Into<String>) -> Self {
        debug_assert!((-32099..=-32000).contains(&code));
        Self {
            code,
            message: detail.into(),
            data: None,
        }
    }
}

/// The payload of a successful `tools/call` response:
/// `{"content":[{"type":"text","text":...}]}`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallResult {
    pub content: Vec<ContentBlock>,
}

/// A single content block inside a tool call result.
#[derive(Debug, Clone, Serialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl ToolCallResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock {
                content_type: "text".into(),
                text: text.into(),
            }],
        }
    }

    /// Convert to a [`Value`] for embedding in a response envelope.
    pub fn into_value(self) -> Value {
        let blocks = self
            .content
            .into_iter()
            .map(|block| {
                let mut fields = std::collections::BTreeMap::new();
                fields.insert("type".to_string(), Value::from(block.content_type));
                fields.insert("text".to_string(), Value::from(block.text));
                Value::Object(fields)
            })
            .collect();
        let mut root = std::collections::BTreeMap::new();
        root.insert("content".to_string(), Value::Array(blocks));
        Value::Object(root)
    }
}
