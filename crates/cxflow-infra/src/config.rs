//! Layered configuration for cxflow.
//!
//! Settings resolve in three layers: built-in defaults, then
//! `{data_dir}/config.toml`, then `CXFLOW_*` environment variables. A
//! configured default agent must be a well-formed agent id, so a typo in the
//! file or environment fails at startup instead of on the first remote call.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use cxflow_core::service::resource::{ResourceType, parse_resource_path};
use cxflow_types::config::CxConfig;
use cxflow_types::error::ResourcePathError;

pub const CONFIG_FILE: &str = "config.toml";

pub const ENV_HOME: &str = "CXFLOW_HOME";
pub const ENV_AGENT_ID: &str = "CXFLOW_AGENT_ID";
pub const ENV_ENDPOINT: &str = "CXFLOW_ENDPOINT";
pub const ENV_LANGUAGE: &str = "CXFLOW_LANGUAGE";
pub const ENV_API_VERSION: &str = "CXFLOW_API_VERSION";
pub const ENV_TIMEOUT_SECS: &str = "CXFLOW_TIMEOUT_SECS";
pub const ENV_TOKEN_VAR: &str = "CXFLOW_TOKEN_VAR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid cxflow config: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{var}='{value}' is not a valid {expected}")]
    Env {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("default agent: {0}")]
    DefaultAgent(#[from] ResourcePathError),
}

/// Resolve the full configuration against the process environment.
pub async fn load_config(data_dir: &Path) -> Result<CxConfig, ConfigError> {
    load_config_with(data_dir, |var| std::env::var(var).ok()).await
}

/// [`load_config`] with an explicit environment lookup.
pub async fn load_config_with<F>(data_dir: &Path, env: F) -> Result<CxConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = read_config_file(&data_dir.join(CONFIG_FILE)).await?;
    apply_env_overrides(&mut config, env)?;

    if let Some(agent_id) = &config.default_agent_id {
        parse_resource_path(ResourceType::Agent, agent_id)?;
    }
    Ok(config)
}

/// A missing file is an empty layer; anything else that stops the file
/// from loading is an error.
async fn read_config_file(path: &Path) -> Result<CxConfig, ConfigError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(CxConfig::default())
        }
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Overlay the `CXFLOW_*` variables onto `config`. Blank values are ignored.
pub fn apply_env_overrides<F>(config: &mut CxConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |var: &'static str| {
        let value = env(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        if value.is_some() {
            tracing::debug!(var, "config overridden from environment");
        }
        value
    };

    if let Some(agent_id) = lookup(ENV_AGENT_ID) {
        config.default_agent_id = Some(agent_id);
    }
    if let Some(endpoint) = lookup(ENV_ENDPOINT) {
        config.endpoint_override = Some(endpoint);
    }
    if let Some(language) = lookup(ENV_LANGUAGE) {
        config.default_language_code = Some(language);
    }
    if let Some(version) = lookup(ENV_API_VERSION) {
        config.api_version = version;
    }
    if let Some(token_var) = lookup(ENV_TOKEN_VAR) {
        config.access_token_env = token_var;
    }
    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        config.timeout_secs = raw
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::Env {
                var: ENV_TIMEOUT_SECS,
                value: raw,
                expected: "positive number of seconds",
            })?;
    }
    Ok(())
}

/// Directory holding `config.toml`: `$CXFLOW_HOME`, else the platform config
/// directory (`~/.config/cxflow` on Linux), else `./.cxflow`.
pub fn data_dir() -> PathBuf {
    data_dir_with(std::env::var(ENV_HOME).ok())
}

fn data_dir_with(home_override: Option<String>) -> PathBuf {
    match home_override.filter(|dir| !dir.trim().is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::config_dir()
            .map(|dir| dir.join("cxflow"))
            .unwrap_or_else(|| PathBuf::from(".cxflow")),
    }
}
