//! Access token resolution.
//!
//! The REST client authenticates with an opaque OAuth bearer token taken
//! from an environment variable (`CXFLOW_ACCESS_TOKEN` unless configured
//! otherwise). Tokens are wrapped in [`SecretString`] as soon as they are
//! read and only exposed when building request headers.

use secrecy::SecretString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error(
        "no access token found in ${0}; export one, e.g. `export {0}=$(gcloud auth print-access-token)`"
    )]
    MissingToken(String),
}

/// Read the bearer token from the environment variable `var`.
///
/// Unset, empty and non-Unicode values are all treated as missing.
pub fn access_token_from_env(var: &str) -> Result<SecretString, CredentialError> {
    match std::env::var(var) {
        Ok(token) if !token.trim().is_empty() => Ok(SecretString::from(token.trim().to_string())),
        _ => Err(CredentialError::MissingToken(var.to_string())),
    }
}
