//! Entity type client trait definition.

use cxflow_types::client::ClientOptions;
use cxflow_types::entity_type::{
    CreateEntityTypeRequest, EntityType, ListEntityTypesRequest, ListEntityTypesResponse,
    UpdateEntityTypeRequest,
};
use cxflow_types::error::RemoteError;

/// Client for the Dialogflow CX entity types API.
///
/// Every call is routed by the [`ClientOptions`] derived from the resource
/// id (see [`crate::service::region::client_options`]). Implementations do
/// not retry.
pub trait EntityTypesClient: Send + Sync {
    /// Fetch one page of entity types under an agent.
    fn list_entity_types(
        &self,
        options: &ClientOptions,
        request: &ListEntityTypesRequest,
    ) -> impl std::future::Future<Output = Result<ListEntityTypesResponse, RemoteError>> + Send;

    fn get_entity_type(
        &self,
        options: &ClientOptions,
        name: &str,
        language_code: Option<&str>,
    ) -> impl std::future::Future<Output = Result<EntityType, RemoteError>> + Send;

    /// Create an entity type. Returns the stored object with its new name.
    fn create_entity_type(
        &self,
        options: &ClientOptions,
        request: &CreateEntityTypeRequest,
    ) -> impl std::future::Future<Output = Result<EntityType, RemoteError>> + Send;

    /// Patch the fields named in the request's update mask.
    fn update_entity_type(
        &self,
        options: &ClientOptions,
        request: &UpdateEntityTypeRequest,
    ) -> impl std::future::Future<Output = Result<EntityType, RemoteError>> + Send;

    fn delete_entity_type(
        &self,
        options: &ClientOptions,
        name: &str,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;
}
