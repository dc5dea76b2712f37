pub mod request;
pub mod response;

pub use request::{JsonRpcRequest, RequestId};
pub use response::{ContentBlock, JsonRpcError, JsonRpcResponse, ToolCallResult};
