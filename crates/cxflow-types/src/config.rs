//! Global configuration types for cxflow.
//!
//! `CxConfig` represents the top-level `config.toml` that sets the default
//! agent, API version and credential source.

use serde::{Deserialize, Serialize};

/// Top-level configuration. Loaded from `~/.cxflow/config.toml`; every
/// field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CxConfig {
    /// Agent used when a command is not given one,
    /// `projects/<P>/locations/<L>/agents/<A>`.
    #[serde(default)]
    pub default_agent_id: Option<String>,

    /// REST API version path segment.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Replaces the region-derived endpoint (`http://localhost:8080` for a
    /// local emulator or proxy).
    #[serde(default)]
    pub endpoint_override: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Environment variable holding the OAuth access token.
    #[serde(default = "default_access_token_env")]
    pub access_token_env: String,

    /// Language used for entity type requests when none is given.
    #[serde(default)]
    pub default_language_code: Option<String>,
}

fn default_api_version() -> String {
    "v3beta1".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_access_token_env() -> String {
    "CXFLOW_ACCESS_TOKEN".to_string()
}

impl Default for CxConfig {
    fn default() -> Self {
        Self {
            default_agent_id: None,
            api_version: default_api_version(),
            endpoint_override: None,
            timeout_secs: default_timeout_secs(),
            access_token_env: default_access_token_env(),
            default_language_code: None,
        }
    }
}
