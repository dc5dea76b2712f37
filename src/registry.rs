//! Tool trait, declarative registration helper, and the registry that owns
//! the name → tool map.
//!
//! Registry operations serialize on one mutex. The lock is never held across
//! an await: `call` clones the tool handle out before executing, so a tool
//! body may itself call back into registry introspection without deadlock.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::validate::{validate, ValidationError};
use crate::value::Value;

/// Errors produced by user-supplied tool bodies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A named, schema-described, context-aware callable exposed to the client.
///
/// `C` is the shared context supplied once at server construction; any
/// mutation discipline for it is the context type's own responsibility.
#[async_trait]
pub trait Tool<C: Send + Sync>: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// The declared input schema, an object-rooted [`Value`] tree.
    fn input_schema(&self) -> Value;

    /// Run the tool. Arguments have already been validated against
    /// [`Tool::input_schema`] unless the caller opted out.
    async fn execute(
        &self,
        arguments: &BTreeMap<String, Value>,
        context: &C,
    ) -> Result<String, BoxError>;
}

type Handler<C> = Box<
    dyn for<'a> Fn(
            &'a BTreeMap<String, Value>,
            &'a C,
        ) -> Pin<Box<dyn Future<Output = Result<String, BoxError>> + Send + 'a>>
        + Send
        + Sync,
>;

/// A tool built from a plain async closure plus a schema.
///
/// This is the registration path for tools that don't warrant a dedicated
/// type: hand it a name, a description, a schema from [`crate::schema`], and
/// a closure returning a pinned future.
///
/// ```ignore
/// let echo = FnTool::new("echo", "Echo a message back", schema, |args, _ctx| {
///     Box::pin(async move {
///         Ok(args.get("message").and_then(Value::string_value).unwrap_or("").to_string())
///     })
/// });
/// ```
pub struct FnTool<C> {
    name: String,
    description: String,
    schema: Value,
    handler: Handler<C>,
}

impl<C: Send + Sync> FnTool<C> {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: Value,
        handler: impl for<'a> Fn(
                &'a BTreeMap<String, Value>,
                &'a C,
            )
                -> Pin<Box<dyn Future<Output = Result<String, BoxError>> + Send + 'a>>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
            handler: Box::new(handler),
        }
    }
}

#[async_trait]
impl<C: Send + Sync> Tool<C> for FnTool<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_schema(&self) -> Value {
        self.schema.clone()
    }

    async fn execute(
        &self,
        arguments: &BTreeMap<String, Value>,
        context: &C,
    ) -> Result<String, BoxError> {
        (self.handler)(arguments, context).await
    }
}

/// Failure modes of [`ToolRegistry::call`].
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error(transparent)]
    InvalidArguments(#[from] ValidationError),
    #[error("{0}")]
    Execution(BoxError),
}

/// The name → tool map. All mutation and lookup serialize on one lock.
pub struct ToolRegistry<C: Send + Sync> {
    tools: Mutex<BTreeMap<String, Arc<dyn Tool<C>>>>,
}

impl<C: Send + Sync> ToolRegistry<C> {
    pub fn new() -> Self {
        Self {
            tools: Mutex::new(BTreeMap::new()),
        }
    }

    /// Register a tool, overwriting any existing tool of the same name.
    /// Last write wins, silently.
    pub fn register(&self, tool: Arc<dyn Tool<C>>) {
        let mut tools = self.tools.lock().expect("tool map lock poisoned");
        tools.insert(tool.name().to_string(), tool);
    }

    /// Register several tools in order; a later tool overwrites an earlier
    /// one of the same name.
    pub fn register_all(&self, tools: impl IntoIterator<Item = Arc<dyn Tool<C>>>) {
        for tool in tools {
            self.register(tool);
        }
    }

    /// All registered names, lexicographically ordered.
    pub fn tool_names(&self) -> Vec<String> {
        let tools = self.tools.lock().expect("tool map lock poisoned");
        tools.keys().cloned().collect()
    }

    /// Look up a tool by name.
    pub fn tool(&self, name: &str) -> Option<Arc<dyn Tool<C>>> {
        let tools = self.tools.lock().expect("tool map lock poisoned");
        tools.get(name).cloned()
    }

    /// The `tools/list` payload:
    /// `{"tools":[{"name":...,"description":...,"inputSchema":...},...]}`.
    pub fn list_tools(&self) -> Value {
        let tools = self.tools.lock().expect("tool map lock poisoned");
        let entries = tools
            .values()
            .map(|tool| {
                let mut entry = BTreeMap::new();
                entry.insert("name".to_string(), Value::from(tool.name()));
                entry.insert("description".to_string(), Value::from(tool.description()));
                entry.insert("inputSchema".to_string(), tool.input_schema());
                Value::Object(entry)
            })
            .collect();

        let mut payload = BTreeMap::new();
        payload.insert("tools".to_string(), Value::Array(entries));
        Value::Object(payload)
    }

    /// Dispatch a call to the named tool.
    ///
    /// When `validate_args` is set, the arguments are checked against the
    /// tool's declared input schema and the first violation is propagated;
    /// otherwise the tool runs unchecked. Tool failures are forwarded
    /// verbatim as [`CallError::Execution`].
    pub async fn call(
        &self,
        name: &str,
        arguments: &BTreeMap<String, Value>,
        context: &C,
        validate_args: bool,
    ) -> Result<String, CallError> {
        let tool = self
            .tool(name)
            .ok_or_else(|| CallError::UnknownTool(name.to_string()))?;

        if validate_args {
            validate(arguments, &tool.input_schema())?;
        }

        tool.execute(arguments, context)
            .await
            .map_err(CallError::Execution)
    }
}

impl<C: Send + Sync> Default for ToolRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
