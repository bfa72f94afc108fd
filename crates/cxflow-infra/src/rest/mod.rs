//! REST/JSON transport for the Dialogflow CX API.
//!
//! Contains the concrete [`EntityTypesClient`] implementation and the
//! status mapping shared by every call.
//!
//! [`EntityTypesClient`]: cxflow_core::repository::entity_type::EntityTypesClient

pub mod entity_types;

use cxflow_types::error::RemoteError;
use serde::Deserialize;

pub use self::entity_types::RestEntityTypesClient;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// The `error.message` of a Google API error body, or the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string())
}

/// Map a non-success HTTP status to a [`RemoteError`].
fn status_error(status: reqwest::StatusCode, body: &str) -> RemoteError {
    let message = error_message(body);
    match status.as_u16() {
        401 => RemoteError::Unauthenticated,
        403 => RemoteError::PermissionDenied(message),
        404 => RemoteError::NotFound(message),
        code => RemoteError::Status { code, message },
    }
}

/// Pass a successful response through; turn anything else into an error.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(%status, "remote call failed");
    Err(status_error(status, &body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_message_prefers_google_envelope() {
        let body = r#"{"error":{"code":404,"message":"Entity type not found.","status":"NOT_FOUND"}}"#;
        assert_eq!(error_message(body), "Entity type not found.");
        assert_eq!(error_message("plain text"), "plain text");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_error(StatusCode::UNAUTHORIZED, ""),
            RemoteError::Unauthenticated
        );
        assert_eq!(
            status_error(StatusCode::FORBIDDEN, "nope"),
            RemoteError::PermissionDenied("nope".to_string())
        );
        assert_eq!(
            status_error(StatusCode::SERVICE_UNAVAILABLE, "busy"),
            RemoteError::Status {
                code: 503,
                message: "busy".to_string()
            }
        );
    }
}
