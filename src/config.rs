/// Server identity and capability toggles.
///
/// `server_name`/`server_version` are advertised in the `initialize`
/// handshake. The tools capability is always present; resources and prompts
/// are advertised only when enabled here.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_name: String,
    pub server_version: String,
    pub resources_enabled: bool,
    pub prompts_enabled: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{variable} must be one of 0, 1, true, false (got {value:?})")]
    InvalidFlag { variable: String, value: String },
}

impl ServerConfig {
    /// A config for embedding: given identity, no optional capabilities.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            server_name: name.into(),
            server_version: version.into(),
            resources_enabled: false,
            prompts_enabled: false,
        }
    }

    /// Load configuration from environment.
    ///
    /// - `MCP_SERVER_NAME` (optional, default: crate name)
    /// - `MCP_SERVER_VERSION` (optional, default: crate version)
    /// - `MCP_ENABLE_RESOURCES` (optional, 0/1/true/false, default off)
    /// - `MCP_ENABLE_PROMPTS` (optional, 0/1/true/false, default off)
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_name =
            std::env::var("MCP_SERVER_NAME").unwrap_or_else(|_| env!("CARGO_PKG_NAME").to_string());
        let server_version = std::env::var("MCP_SERVER_VERSION")
            .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

        Ok(Self {
            server_name,
            server_version,
            resources_enabled: flag_from_env("MCP_ENABLE_RESOURCES")?,
            prompts_enabled: flag_from_env("MCP_ENABLE_PROMPTS")?,
        })
    }
}

fn flag_from_env(variable: &str) -> Result<bool, ConfigError> {
    match std::env::var(variable) {
        Ok(value) => match value.as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            _ => Err(ConfigError::InvalidFlag {
                variable: variable.to_string(),
                value,
            }),
        },
        Err(_) => Ok(false),
    }
}
