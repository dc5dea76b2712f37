//! Embeddable MCP server exposing schema-validated tools over JSON-RPC 2.0
//! stdio transport.
//!
//! Tools are registered dynamically with a name, a description, and a
//! declared input schema; every `tools/call` is validated against that
//! schema before dispatch. The server speaks newline-delimited JSON-RPC 2.0
//! to a single client and serializes request handling, one line at a time.

pub mod config;
pub mod protocol;
pub mod registry;
pub mod schema;
pub mod server;
pub mod validate;
pub mod value;
