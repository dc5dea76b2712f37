use std::sync::Arc;

use mcp_tool_server::config::ServerConfig;
use mcp_tool_server::registry::FnTool;
use mcp_tool_server::schema;
use mcp_tool_server::server::McpServer;
use mcp_tool_server::value::Value;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("mcp-tool-server: configuration error: {e}");
            std::process::exit(1);
        }
    };

    let server = McpServer::new(config, ());
    server.registry().register(Arc::new(echo_tool()));
    server.registry().register(Arc::new(add_tool()));

    if let Err(e) = server.run().await {
        eprintln!("mcp-tool-server: fatal error: {e}");
        std::process::exit(1);
    }
}

fn echo_tool() -> FnTool<()> {
    FnTool::new(
        "echo",
        "Echo the message argument back verbatim",
        schema::object(
            [("message", schema::string(Some("Text to echo back"), None))],
            &["message"],
        ),
        |args, _ctx| {
            Box::pin(async move {
                let message = args
                    .get("message")
                    .and_then(Value::string_value)
                    .unwrap_or_default();
                Ok(message.to_string())
            })
        },
    )
}

fn add_tool() -> FnTool<()> {
    FnTool::new(
        "add",
        "Add two integers",
        schema::object(
            [
                ("a", schema::integer(Some("First addend"), None, None)),
                ("b", schema::integer(Some("Second addend"), None, None)),
            ],
            &["a", "b"],
        ),
        |args, _ctx| {
            Box::pin(async move {
                let a = args.get("a").and_then(Value::int_value).unwrap_or(0);
                let b = args.get("b").and_then(Value::int_value).unwrap_or(0);
                Ok((a + b).to_string())
            })
        },
    )
}
