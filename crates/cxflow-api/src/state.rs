//! Application state wiring the entity type service to the REST transport.
//!
//! `EntityTypeService` is generic over the client port; AppState pins it to
//! the concrete REST implementation.

use std::time::Duration;

use cxflow_core::service::entity_type::EntityTypeService;
use cxflow_infra::config::{data_dir, load_config};
use cxflow_infra::credentials::access_token_from_env;
use cxflow_infra::rest::RestEntityTypesClient;
use cxflow_types::config::CxConfig;

pub type ConcreteEntityTypeService = EntityTypeService<RestEntityTypesClient>;

pub struct AppState {
    pub entity_types: ConcreteEntityTypeService,
    pub config: CxConfig,
}

impl AppState {
    /// Load config, resolve the access token and build the service.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = data_dir();
        let config = load_config(&data_dir).await?;
        tracing::debug!(data_dir = %data_dir.display(), api_version = %config.api_version, "loaded config");

        let token = access_token_from_env(&config.access_token_env)?;
        let mut client = RestEntityTypesClient::new(
            token,
            config.api_version.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        if let Some(endpoint) = &config.endpoint_override {
            tracing::info!(endpoint = %endpoint, "using endpoint override");
            client = client.with_base_url(endpoint.clone());
        }

        let mut entity_types = EntityTypeService::new(client);
        if let Some(agent_id) = &config.default_agent_id {
            entity_types = entity_types.with_agent_id(agent_id.clone());
        }

        Ok(Self {
            entity_types,
            config,
        })
    }

    /// The explicit language code, else the configured default.
    pub fn language_code<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit.or(self.config.default_language_code.as_deref())
    }
}
