// Server configuration from FEAST_MCP_* environment variables.

use serde::Deserialize;

use crate::error::Result;

pub const ENV_PREFIX: &str = "FEAST_MCP_";

/// MCP server configuration loaded from environment variables via `envy`.
///
/// Each field maps to `FEAST_MCP_<FIELD>`:
///   - `FEAST_MCP_NAMESPACE` (default `default`)
///   - `FEAST_MCP_LOG`       (default `feast_operator_mcp=info,info`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Namespace for manifests without `metadata.namespace`.
    #[serde(rename = "namespace", default = "default_namespace")]
    pub default_namespace: String,

    /// Log filter used when `RUST_LOG` is unset.
    #[serde(rename = "log", default = "default_log_filter")]
    pub log_filter: String,
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_log_filter() -> String {
    "feast_operator_mcp=info,info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            default_namespace: default_namespace(),
            log_filter: default_log_filter(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Ok(envy::prefixed(ENV_PREFIX).from_env::<ServerConfig>()?)
    }
}
