use std::collections::BTreeMap;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::config::ServerConfig;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallResult};
use crate::registry::ToolRegistry;
use crate::value::Value;

/// Maximum bytes per JSON-RPC message (1 MiB).
const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// MCP protocol revision advertised during `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP server speaking newline-delimited JSON-RPC 2.0 over stdio.
///
/// Requests are not pipelined: each line is fully decoded, routed, and
/// answered (or suppressed, for notifications) before the next line is read,
/// bounding in-flight requests to one. The shared context `C` is handed to
/// every tool invocation. No timeout applies to tool execution; a tool that
/// never completes stalls the server.
pub struct McpServer<C: Send + Sync> {
    config: ServerConfig,
    registry: ToolRegistry<C>,
    context: C,
}

impl<C: Send + Sync> McpServer<C> {
    pub fn new(config: ServerConfig, context: C) -> Self {
        Self {
            config,
            registry: ToolRegistry::new(),
            context,
        }
    }

    /// The registry, for tool registration and introspection.
    pub fn registry(&self) -> &ToolRegistry<C> {
        &self.registry
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Read loop: one line in, at most one line out, until EOF.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin);
        let mut raw = Vec::new();

        loop {
            raw.clear();
            let n = reader.read_until(b'\n', &mut raw).await?;
            if n == 0 {
                break;
            }

            if n > MAX_MESSAGE_BYTES {
                warn!(bytes = n, limit = MAX_MESSAGE_BYTES, "message too large");
                write_response(
                    &mut stdout,
                    &JsonRpcResponse::error(None, JsonRpcError::parse_error()),
                )
                .await?;
                continue;
            }

            let line = match std::str::from_utf8(&raw) {
                Ok(s) => s,
                Err(_) => {
                    write_response(
                        &mut stdout,
                        &JsonRpcResponse::error(None, JsonRpcError::parse_error()),
                    )
                    .await?;
                    continue;
                }
            };

            if let Some(resp) = self.process_line(line).await {
                write_response(&mut stdout, &resp).await?;
            }
        }

        Ok(())
    }

    /// Decode and route one input line.
    ///
    /// Returns `None` for blank lines and notifications. An undecodable line
    /// yields the sole null-id response: a -32700 parse error.
    pub async fn process_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        let req: JsonRpcRequest = match serde_json::from_str(trimmed) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "undecodable request line");
                return Some(JsonRpcResponse::error(None, JsonRpcError::parse_error()));
            }
        };

        self.dispatch(&req).await
    }

    /// Route a decoded request by method.
    pub async fn dispatch(&self, req: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        if req.jsonrpc != "2.0" {
            if req.is_notification() {
                warn!(method = %req.method, "notification with bad jsonrpc version");
                return None;
            }
            return Some(JsonRpcResponse::error(
                req.id.clone(),
                JsonRpcError::invalid_request(),
            ));
        }

        if req.is_notification() {
            self.handle_notification(req);
            return None;
        }

        match req.method.as_str() {
            "initialize" => Some(JsonRpcResponse::success(
                req.id.clone(),
                self.initialize_result(),
            )),

            "tools/list" => Some(JsonRpcResponse::success(
                req.id.clone(),
                self.registry.list_tools(),
            )),

            "tools/call" => Some(self.handle_tool_call(req).await),

            _ => Some(JsonRpcResponse::error(
                req.id.clone(),
                JsonRpcError::method_not_found(&req.method),
            )),
        }
    }

    /// Notifications are routed by method and never answered; failures are
    /// logged only.
    fn handle_notification(&self, req: &JsonRpcRequest) {
        match req.method.as_str() {
            "notifications/initialized" => {
                debug!("client initialization complete");
            }
            other => {
                warn!(method = other, "unhandled notification");
            }
        }
    }

    fn initialize_result(&self) -> Value {
        let mut capabilities = BTreeMap::new();
        capabilities.insert("tools".to_string(), crate::schema::empty());
        if self.config.resources_enabled {
            capabilities.insert("resources".to_string(), crate::schema::empty());
        }
        if self.config.prompts_enabled {
            capabilities.insert("prompts".to_string(), crate::schema::empty());
        }

        let mut server_info = BTreeMap::new();
        server_info.insert(
            "name".to_string(),
            Value::from(self.config.server_name.as_str()),
        );
        server_info.insert(
            "version".to_string(),
            Value::from(self.config.server_version.as_str()),
        );

        let mut result = BTreeMap::new();
        result.insert("protocolVersion".to_string(), Value::from(PROTOCOL_VERSION));
        result.insert("serverInfo".to_string(), Value::Object(server_info));
        result.insert("capabilities".to_string(), Value::Object(capabilities));
        Value::Object(result)
    }

    async fn handle_tool_call(&self, req: &JsonRpcRequest) -> JsonRpcResponse {
        let params = match &req.params {
            Some(p) => p,
            None => {
                return JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::invalid_params("Missing params for tools/call"),
                );
            }
        };

        let name = match params.get("name").and_then(Value::string_value) {
            Some(n) => n,
            None => {
                return JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::invalid_params("tools/call requires a string `name` param"),
                );
            }
        };

        // `arguments` is optional; anything but an object is treated as absent.
        let arguments: BTreeMap<String, Value> = params
            .get("arguments")
            .and_then(Value::object_value)
            .cloned()
            .unwrap_or_default();

        match self
            .registry
            .call(name, &arguments, &self.context, true)
            .await
        {
            Ok(text) => JsonRpcResponse::success(
                req.id.clone(),
                ToolCallResult::text(text).into_value(),
            ),
            Err(e) => {
                JsonRpcResponse::error(req.id.clone(), JsonRpcError::server_error(e.to_string()))
            }
        }
    }
}

async fn write_response(
    stdout: &mut tokio::io::Stdout,
    resp: &JsonRpcResponse,
) -> Result<(), Box<dyn std::error::Error>> {
    // Compact, single-line framing; flushed so the client sees it immediately.
    let out = serde_json::to_string(resp)?;
    stdout.write_all(out.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}
