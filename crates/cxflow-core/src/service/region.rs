//! Regional endpoint selection.

use cxflow_types::client::ClientOptions;
use cxflow_types::error::EntityTypeError;

use super::resource::{ResourceType, parse_resource_path};

const GLOBAL_ENDPOINT: &str = "dialogflow.googleapis.com:443";

/// Validate `resource_id` as a `resource_type` id and derive the endpoint
/// and quota project for calls on it.
///
/// Non-global locations are served from `<location>-dialogflow.googleapis.com`.
pub fn client_options(
    resource_type: ResourceType,
    resource_id: &str,
) -> Result<ClientOptions, EntityTypeError> {
    let path = parse_resource_path(resource_type, resource_id).inspect_err(|e| {
        tracing::error!(resource_id, resource_type = %resource_type, "{e}");
    })?;

    let api_endpoint = if path.location == "global" {
        GLOBAL_ENDPOINT.to_string()
    } else {
        format!("{}-{GLOBAL_ENDPOINT}", path.location)
    };

    Ok(ClientOptions {
        api_endpoint,
        quota_project_id: path.project,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cxflow_types::error::ResourcePathError;

    #[test]
    fn test_global_location() {
        let opts = client_options(ResourceType::Agent, "projects/acme/locations/global/agents/123")
            .unwrap();
        assert_eq!(opts.api_endpoint, "dialogflow.googleapis.com:443");
        assert_eq!(opts.quota_project_id, "acme");
    }

    #[test]
    fn test_regional_location() {
        let opts = client_options(
            ResourceType::EntityType,
            "projects/acme/locations/us-central1/agents/123/entityTypes/9",
        )
        .unwrap();
        assert_eq!(opts.api_endpoint, "us-central1-dialogflow.googleapis.com:443");
        assert_eq!(opts.quota_project_id, "acme");
    }

    #[test]
    fn test_short_path_fails() {
        let err = client_options(ResourceType::Agent, "projects/acme/locations").unwrap_err();
        assert!(matches!(
            err,
            EntityTypeError::InvalidResourceId(ResourcePathError::Invalid { id, .. })
                if id == "projects/acme/locations"
        ));
    }

    #[test]
    fn test_malformed_agent_id_fails() {
        let err = client_options(ResourceType::Agent, "projects/x/locations/y/agents/BAD!")
            .unwrap_err();
        assert!(matches!(
            err,
            EntityTypeError::InvalidResourceId(ResourcePathError::Invalid { resource: "agent", .. })
        ));
    }

    #[test]
    fn test_entity_id_is_not_an_agent_id() {
        let id = "projects/acme/locations/global/agents/123/entityTypes/9";
        assert!(client_options(ResourceType::Agent, id).is_err());
        assert!(client_options(ResourceType::EntityType, id).is_ok());
    }
}
