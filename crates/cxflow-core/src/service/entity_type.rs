//! Entity type service.
//!
//! Forwards CRUD calls to an [`EntityTypesClient`], filling in default agent
//! and entity ids, validating them and deriving the regional endpoint for
//! every call, and counting calls per method. Also projects entity types
//! into tables and id/display-name maps.

use std::collections::BTreeMap;

use cxflow_types::entity_type::{
    CreateEntityTypeRequest, EntityType, EntityTypeFields, FieldMask, ListEntityTypesRequest,
    UpdateEntityTypeRequest,
};
use cxflow_types::error::EntityTypeError;

use crate::repository::entity_type::EntityTypesClient;
use crate::service::api_calls::ApiCallCounter;
use crate::service::region::client_options;
use crate::service::resource::ResourceType;
use crate::table::schema::{self, Resource};
use crate::table::{Cell, DataFrame, TableMode};

const LIST: &str = "list_entity_types";
const GET: &str = "get_entity_type";
const CREATE: &str = "create_entity_type";
const UPDATE: &str = "update_entity_type";
const DELETE: &str = "delete_entity_type";

/// Tabular projection of one or more entity types.
///
/// Excluded phrases are only projected in advanced mode.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityTypeTables {
    pub entity_types: DataFrame,
    pub excluded_phrases: Option<DataFrame>,
}

/// Service for the entity types of an agent.
pub struct EntityTypeService<C: EntityTypesClient> {
    client: C,
    agent_id: Option<String>,
    entity_id: Option<String>,
    calls: ApiCallCounter,
}

impl<C: EntityTypesClient> EntityTypeService<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            agent_id: None,
            entity_id: None,
            calls: ApiCallCounter::new(&[LIST, GET, CREATE, UPDATE, DELETE]),
        }
    }

    /// Agent used when a call does not name one.
    pub fn with_agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    /// Entity type used when a call does not name one.
    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn api_calls_details(&self) -> BTreeMap<String, u64> {
        self.calls.api_calls_details()
    }

    pub fn api_calls_count(&self) -> u64 {
        self.calls.api_calls_count()
    }

    fn agent_or_default(&self, agent_id: Option<&str>) -> Result<String, EntityTypeError> {
        agent_id
            .or(self.agent_id.as_deref())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or(EntityTypeError::MissingId("agent_id"))
    }

    fn entity_or_default(&self, entity_id: Option<&str>) -> Result<String, EntityTypeError> {
        entity_id
            .or(self.entity_id.as_deref())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or(EntityTypeError::MissingId("entity_id"))
    }

    /// All entity types of the agent, following page tokens until the
    /// listing is exhausted.
    pub async fn list_entity_types(
        &self,
        agent_id: Option<&str>,
    ) -> Result<Vec<EntityType>, EntityTypeError> {
        let agent_id = self.agent_or_default(agent_id)?;
        let options = client_options(ResourceType::Agent, &agent_id)?;

        let mut request = ListEntityTypesRequest {
            parent: agent_id,
            ..Default::default()
        };
        let mut entity_types = Vec::new();
        loop {
            tracing::debug!(parent = %request.parent, page_token = ?request.page_token, "listing entity types");
            self.calls.record(LIST);
            let response = self.client.list_entity_types(&options, &request).await?;
            entity_types.extend(response.entity_types);

            match response.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => request.page_token = Some(token),
                None => break,
            }
        }
        Ok(entity_types)
    }

    pub async fn get_entity_type(
        &self,
        entity_id: Option<&str>,
    ) -> Result<EntityType, EntityTypeError> {
        let entity_id = self.entity_or_default(entity_id)?;
        let options = client_options(ResourceType::EntityType, &entity_id)?;

        tracing::debug!(name = %entity_id, "getting entity type");
        self.calls.record(GET);
        Ok(self.client.get_entity_type(&options, &entity_id, None).await?)
    }

    /// Create an entity type under the agent.
    ///
    /// A pre-built `obj` has its name cleared so the server assigns one; the
    /// supplied `fields` are then applied on top of it.
    pub async fn create_entity_type(
        &self,
        agent_id: Option<&str>,
        obj: Option<EntityType>,
        language_code: Option<&str>,
        fields: EntityTypeFields,
    ) -> Result<EntityType, EntityTypeError> {
        let agent_id = self.agent_or_default(agent_id)?;
        let options = client_options(ResourceType::Agent, &agent_id)?;

        let mut entity_type = obj.unwrap_or_default();
        entity_type.name.clear();
        fields.apply(&mut entity_type);

        let request = CreateEntityTypeRequest {
            parent: agent_id,
            entity_type,
            language_code: language_code.filter(|l| !l.is_empty()).map(str::to_string),
        };
        tracing::debug!(parent = %request.parent, display_name = %request.entity_type.display_name, "creating entity type");
        self.calls.record(CREATE);
        Ok(self.client.create_entity_type(&options, &request).await?)
    }

    /// Update only the supplied `fields` of an entity type.
    ///
    /// With an explicit `obj` its name is forced to the target id; without
    /// one the current object is fetched first. The update mask is exactly
    /// the names of the supplied fields.
    pub async fn update_entity_type(
        &self,
        entity_type_id: Option<&str>,
        obj: Option<EntityType>,
        language_code: Option<&str>,
        fields: EntityTypeFields,
    ) -> Result<EntityType, EntityTypeError> {
        let entity_type_id = self.entity_or_default(entity_type_id)?;
        let options = client_options(ResourceType::EntityType, &entity_type_id)?;

        let mut entity_type = match obj {
            Some(mut obj) => {
                obj.name = entity_type_id.clone();
                obj
            }
            None => self.get_entity_type(Some(entity_type_id.as_str())).await?,
        };
        fields.apply(&mut entity_type);

        let request = UpdateEntityTypeRequest {
            entity_type,
            update_mask: FieldMask::new(fields.paths()),
            language_code: language_code.filter(|l| !l.is_empty()).map(str::to_string),
        };
        tracing::debug!(name = %entity_type_id, mask = %request.update_mask.to_query_value(), "updating entity type");
        self.calls.record(UPDATE);
        Ok(self.client.update_entity_type(&options, &request).await?)
    }

    /// Delete an entity type. A given `obj` takes precedence over the id.
    pub async fn delete_entity_type(
        &self,
        entity_id: Option<&str>,
        obj: Option<&EntityType>,
    ) -> Result<(), EntityTypeError> {
        let entity_id = match obj {
            Some(obj) => self.entity_or_default(Some(obj.name.as_str()))?,
            None => self.entity_or_default(entity_id)?,
        };
        let options = client_options(ResourceType::EntityType, &entity_id)?;

        tracing::debug!(name = %entity_id, "deleting entity type");
        self.calls.record(DELETE);
        Ok(self.client.delete_entity_type(&options, &entity_id).await?)
    }

    /// Project every entity type of the agent, optionally restricted to the
    /// display names in `subset`.
    ///
    /// Basic output is sorted by display name, then entity value.
    pub async fn entity_types_to_df(
        &self,
        agent_id: Option<&str>,
        mode: TableMode,
        subset: Option<&[String]>,
    ) -> Result<EntityTypeTables, EntityTypeError> {
        let entity_types = self.list_entity_types(agent_id).await?;
        let selected = entity_types
            .iter()
            .filter(|et| subset.is_none_or(|names| names.is_empty() || names.contains(&et.display_name)));

        let mut entities = DataFrame::with_columns(schema::columns(Resource::EntityType, mode));
        let mut phrases = DataFrame::with_columns(schema::columns(Resource::ExcludedPhrase, mode));
        for obj in selected {
            let tables = entity_type_proto_to_dataframe(obj, mode);
            entities.concat(tables.entity_types);
            if let Some(excluded) = tables.excluded_phrases {
                phrases.concat(excluded);
            }
        }

        match mode {
            TableMode::Basic => {
                entities.sort_by(&["display_name", "entity_value"])?;
                Ok(EntityTypeTables {
                    entity_types: entities,
                    excluded_phrases: None,
                })
            }
            TableMode::Advanced => Ok(EntityTypeTables {
                entity_types: entities,
                excluded_phrases: Some(phrases),
            }),
        }
    }

    /// Map of entity type id to display name, or the reverse.
    pub async fn get_entities_map(
        &self,
        agent_id: Option<&str>,
        reverse: bool,
    ) -> Result<BTreeMap<String, String>, EntityTypeError> {
        let entity_types = self.list_entity_types(agent_id).await?;
        Ok(entity_types
            .into_iter()
            .map(|et| {
                if reverse {
                    (et.display_name, et.name)
                } else {
                    (et.name, et.display_name)
                }
            })
            .collect())
    }
}

/// One row per (entity value, synonym). Entities without synonyms yield no
/// rows.
pub fn entity_type_proto_to_dataframe(obj: &EntityType, mode: TableMode) -> EntityTypeTables {
    let mut entities = DataFrame::with_columns(schema::columns(Resource::EntityType, mode));

    let header: Vec<(&str, Cell)> = match mode {
        TableMode::Basic => vec![("display_name", Cell::from(obj.display_name.as_str()))],
        TableMode::Advanced => vec![
            ("entity_type_id", Cell::from(obj.name.as_str())),
            ("display_name", Cell::from(obj.display_name.as_str())),
            ("kind", Cell::from(obj.kind.as_str())),
            (
                "auto_expansion_mode",
                Cell::from(obj.auto_expansion_mode.is_enabled()),
            ),
            ("fuzzy_extraction", Cell::from(obj.enable_fuzzy_extraction)),
            ("redact", Cell::from(obj.redact)),
        ],
    };
    for entity in &obj.entities {
        for synonym in &entity.synonyms {
            let mut row = header.clone();
            row.push(("entity_value", Cell::from(entity.value.as_str())));
            row.push(("synonyms", Cell::from(synonym.as_str())));
            entities.push_row(row);
        }
    }

    let excluded_phrases = (mode == TableMode::Advanced).then(|| {
        let mut phrases = DataFrame::with_columns(schema::columns(Resource::ExcludedPhrase, mode));
        for phrase in &obj.excluded_phrases {
            phrases.push_row([
                ("entity_type_id", Cell::from(obj.name.as_str())),
                ("display_name", Cell::from(obj.display_name.as_str())),
                ("excluded_phrase", Cell::from(phrase.value.as_str())),
            ]);
        }
        phrases
    });

    EntityTypeTables {
        entity_types: entities,
        excluded_phrases,
    }
}
