use serde::{Deserialize, Serialize};

/// Per-call transport options derived from a resource id.
///
/// Different regions are served from different API endpoints, and the
/// project in the resource id is billed for the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOptions {
    /// Host and port, e.g. `us-central1-dialogflow.googleapis.com:443`.
    pub api_endpoint: String,
    pub quota_project_id: String,
}
