//! RestEntityTypesClient -- concrete [`EntityTypesClient`] over the
//! Dialogflow CX REST API.
//!
//! Each call is sent to the endpoint named in its [`ClientOptions`] (or to
//! the configured base URL override), authenticated with a bearer token and
//! billed to the quota project via `x-goog-user-project`.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use cxflow_core::repository::entity_type::EntityTypesClient;
use cxflow_types::client::ClientOptions;
use cxflow_types::entity_type::{
    CreateEntityTypeRequest, EntityType, ListEntityTypesRequest, ListEntityTypesResponse,
    UpdateEntityTypeRequest,
};
use cxflow_types::error::RemoteError;

use super::check_status;

/// Entity types client for the REST surface of the API.
///
/// The access token is only exposed when building the `Authorization`
/// header; this type deliberately has no `Debug` impl.
pub struct RestEntityTypesClient {
    client: reqwest::Client,
    access_token: SecretString,
    api_version: String,
    base_url: Option<String>,
}

impl RestEntityTypesClient {
    pub fn new(
        access_token: SecretString,
        api_version: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            access_token,
            api_version: api_version.into(),
            base_url: None,
        })
    }

    /// Send every call to `base_url` instead of the region-derived endpoint
    /// (local emulators, proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    /// Full URL of `resource` (a resource name or collection path).
    fn url(&self, options: &ClientOptions, resource: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{base}/{}/{resource}", self.api_version),
            None => format!(
                "https://{}/{}/{resource}",
                options.api_endpoint, self.api_version
            ),
        }
    }

    fn request(
        &self,
        method: reqwest::Method,
        url: &str,
        options: &ClientOptions,
    ) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(self.access_token.expose_secret())
            .header("x-goog-user-project", &options.quota_project_id)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RemoteError> {
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Transport(format!("HTTP request failed: {e}")))?;
        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::Deserialization(format!("failed to parse response: {e}")))
    }
}

fn language_query(language_code: Option<&str>) -> Vec<(&'static str, String)> {
    language_code
        .map(|lc| vec![("languageCode", lc.to_string())])
        .unwrap_or_default()
}

impl EntityTypesClient for RestEntityTypesClient {
    async fn list_entity_types(
        &self,
        options: &ClientOptions,
        request: &ListEntityTypesRequest,
    ) -> Result<ListEntityTypesResponse, RemoteError> {
        let url = self.url(options, &format!("{}/entityTypes", request.parent));

        let mut query = language_query(request.language_code.as_deref());
        if let Some(size) = request.page_size {
            query.push(("pageSize", size.to_string()));
        }
        if let Some(token) = &request.page_token {
            query.push(("pageToken", token.clone()));
        }

        self.send_json(self.request(reqwest::Method::GET, &url, options).query(&query))
            .await
    }

    async fn get_entity_type(
        &self,
        options: &ClientOptions,
        name: &str,
        language_code: Option<&str>,
    ) -> Result<EntityType, RemoteError> {
        let url = self.url(options, name);
        let query = language_query(language_code);

        self.send_json(self.request(reqwest::Method::GET, &url, options).query(&query))
            .await
    }

    async fn create_entity_type(
        &self,
        options: &ClientOptions,
        request: &CreateEntityTypeRequest,
    ) -> Result<EntityType, RemoteError> {
        let url = self.url(options, &format!("{}/entityTypes", request.parent));
        let query = language_query(request.language_code.as_deref());

        self.send_json(
            self.request(reqwest::Method::POST, &url, options)
                .query(&query)
                .json(&request.entity_type),
        )
        .await
    }

    async fn update_entity_type(
        &self,
        options: &ClientOptions,
        request: &UpdateEntityTypeRequest,
    ) -> Result<EntityType, RemoteError> {
        let url = self.url(options, &request.entity_type.name);
        let mut query = language_query(request.language_code.as_deref());
        query.push(("updateMask", request.update_mask.to_query_value()));

        self.send_json(
            self.request(reqwest::Method::PATCH, &url, options)
                .query(&query)
                .json(&request.entity_type),
        )
        .await
    }

    async fn delete_entity_type(
        &self,
        options: &ClientOptions,
        name: &str,
    ) -> Result<(), RemoteError> {
        let url = self.url(options, name);

        let response = self
            .request(reqwest::Method::DELETE, &url, options)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(format!("HTTP request failed: {e}")))?;
        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cxflow_types::entity_type::{Entity, EntityKind, FieldMask};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const AGENT: &str = "projects/acme/locations/global/agents/a1";

    fn options() -> ClientOptions {
        ClientOptions {
            api_endpoint: "dialogflow.googleapis.com:443".to_string(),
            quota_project_id: "acme".to_string(),
        }
    }

    fn client(server: &MockServer) -> RestEntityTypesClient {
        RestEntityTypesClient::new(
            SecretString::from("test-token".to_string()),
            "v3beta1",
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url(server.uri())
    }

    #[test]
    fn test_url_uses_region_endpoint_without_override() {
        let client = RestEntityTypesClient::new(
            SecretString::from("t".to_string()),
            "v3",
            Duration::from_secs(5),
        )
        .unwrap();
        let opts = ClientOptions {
            api_endpoint: "us-east1-dialogflow.googleapis.com:443".to_string(),
            quota_project_id: "acme".to_string(),
        };
        assert_eq!(
            client.url(&opts, "projects/acme/locations/us-east1/agents/a1/entityTypes"),
            "https://us-east1-dialogflow.googleapis.com:443/v3/projects/acme/locations/us-east1/agents/a1/entityTypes"
        );
    }

    #[tokio::test]
    async fn test_list_sends_auth_and_quota_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/v3beta1/{AGENT}/entityTypes")))
            .and(header("authorization", "Bearer test-token"))
            .and(header("x-goog-user-project", "acme"))
            .and(query_param("pageToken", "p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "entityTypes": [{
                    "name": format!("{AGENT}/entityTypes/color"),
                    "displayName": "color",
                    "kind": "KIND_MAP",
                    "entities": [{"value": "red", "synonyms": ["red"]}]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = ListEntityTypesRequest {
            parent: AGENT.to_string(),
            page_token: Some("p2".to_string()),
            ..Default::default()
        };
        let response = client(&server)
            .list_entity_types(&options(), &request)
            .await
            .unwrap();
        assert_eq!(response.entity_types.len(), 1);
        assert_eq!(response.entity_types[0].kind, EntityKind::KindMap);
        assert!(response.next_page_token.is_none());
    }

    #[tokio::test]
    async fn test_create_posts_entity_type_without_name() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("/v3beta1/{AGENT}/entityTypes")))
            .and(query_param("languageCode", "en"))
            .and(body_partial_json(json!({"displayName": "size", "kind": "KIND_LIST"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": format!("{AGENT}/entityTypes/new"),
                "displayName": "size",
                "kind": "KIND_LIST"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = CreateEntityTypeRequest {
            parent: AGENT.to_string(),
            entity_type: EntityType {
                display_name: "size".to_string(),
                kind: EntityKind::KindList,
                entities: vec![Entity::new("small", ["small"])],
                ..Default::default()
            },
            language_code: Some("en".to_string()),
        };
        let created = client(&server)
            .create_entity_type(&options(), &request)
            .await
            .unwrap();
        assert_eq!(created.name, format!("{AGENT}/entityTypes/new"));
    }

    #[tokio::test]
    async fn test_update_sends_mask() {
        let server = MockServer::start().await;
        let name = format!("{AGENT}/entityTypes/color");

        Mock::given(method("PATCH"))
            .and(path(format!("/v3beta1/{name}")))
            .and(query_param("updateMask", "display_name,redact"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": name,
                "displayName": "colour",
                "redact": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = UpdateEntityTypeRequest {
            entity_type: EntityType {
                name: name.clone(),
                display_name: "colour".to_string(),
                redact: true,
                ..Default::default()
            },
            update_mask: FieldMask::new(vec!["display_name".to_string(), "redact".to_string()]),
            language_code: None,
        };
        let updated = client(&server)
            .update_entity_type(&options(), &request)
            .await
            .unwrap();
        assert!(updated.redact);
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_body() {
        let server = MockServer::start().await;
        let name = format!("{AGENT}/entityTypes/color");

        Mock::given(method("DELETE"))
            .and(path(format!("/v3beta1/{name}")))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .delete_entity_type(&options(), &name)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_not_found_maps_to_remote_error() {
        let server = MockServer::start().await;
        let name = format!("{AGENT}/entityTypes/missing");

        Mock::given(method("GET"))
            .and(path(format!("/v3beta1/{name}")))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"code": 404, "message": "Entity type not found.", "status": "NOT_FOUND"}
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .get_entity_type(&options(), &name, None)
            .await
            .unwrap_err();
        assert_eq!(err, RemoteError::NotFound("Entity type not found.".to_string()));
    }

    #[tokio::test]
    async fn test_unauthenticated() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let request = ListEntityTypesRequest {
            parent: AGENT.to_string(),
            ..Default::default()
        };
        let err = client(&server)
            .list_entity_types(&options(), &request)
            .await
            .unwrap_err();
        assert_eq!(err, RemoteError::Unauthenticated);
    }

    #[tokio::test]
    async fn test_malformed_body_is_deserialization_error() {
        let server = MockServer::start().await;
        let name = format!("{AGENT}/entityTypes/color");

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server)
            .get_entity_type(&options(), &name, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Deserialization(_)));
    }
}
