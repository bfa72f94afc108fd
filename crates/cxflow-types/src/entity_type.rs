//! Entity type messages and the request/response shapes of the entity type
//! API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named, reusable value extractor referenced by form parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    /// `projects/<P>/locations/<L>/agents/<A>/entityTypes/<E>`. Assigned by
    /// the server on create.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub kind: EntityKind,
    #[serde(default)]
    pub auto_expansion_mode: AutoExpansionMode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Entity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_phrases: Vec<ExcludedPhrase>,
    #[serde(default)]
    pub enable_fuzzy_extraction: bool,
    #[serde(default)]
    pub redact: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entity {
    pub value: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl Entity {
    pub fn new<S: Into<String>>(value: impl Into<String>, synonyms: impl IntoIterator<Item = S>) -> Self {
        Self {
            value: value.into(),
            synonyms: synonyms.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExcludedPhrase {
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    #[default]
    KindUnspecified,
    KindMap,
    KindList,
    KindRegexp,
}

impl EntityKind {
    /// The API enum name, e.g. `KIND_MAP`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::KindUnspecified => "KIND_UNSPECIFIED",
            EntityKind::KindMap => "KIND_MAP",
            EntityKind::KindList => "KIND_LIST",
            EntityKind::KindRegexp => "KIND_REGEXP",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "KIND_UNSPECIFIED" => Ok(EntityKind::KindUnspecified),
            "KIND_MAP" | "MAP" => Ok(EntityKind::KindMap),
            "KIND_LIST" | "LIST" => Ok(EntityKind::KindList),
            "KIND_REGEXP" | "REGEXP" => Ok(EntityKind::KindRegexp),
            other => Err(format!("invalid entity kind: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AutoExpansionMode {
    #[default]
    #[serde(rename = "AUTO_EXPANSION_MODE_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "AUTO_EXPANSION_MODE_DEFAULT")]
    Default,
}

impl AutoExpansionMode {
    pub fn is_enabled(&self) -> bool {
        matches!(self, AutoExpansionMode::Default)
    }
}

/// Explicitly enumerated fields that may be set on create or update.
///
/// Only `Some` fields are applied, and on update exactly those field names
/// become the update mask.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityTypeFields {
    pub display_name: Option<String>,
    pub kind: Option<EntityKind>,
    pub auto_expansion_mode: Option<AutoExpansionMode>,
    pub entities: Option<Vec<Entity>>,
    pub excluded_phrases: Option<Vec<ExcludedPhrase>>,
    pub enable_fuzzy_extraction: Option<bool>,
    pub redact: Option<bool>,
}

impl EntityTypeFields {
    pub fn is_empty(&self) -> bool {
        self.paths().is_empty()
    }

    /// Field paths of the supplied fields, named exactly as the fields.
    pub fn paths(&self) -> Vec<String> {
        let supplied = [
            ("display_name", self.display_name.is_some()),
            ("kind", self.kind.is_some()),
            ("auto_expansion_mode", self.auto_expansion_mode.is_some()),
            ("entities", self.entities.is_some()),
            ("excluded_phrases", self.excluded_phrases.is_some()),
            ("enable_fuzzy_extraction", self.enable_fuzzy_extraction.is_some()),
            ("redact", self.redact.is_some()),
        ];
        supplied
            .into_iter()
            .filter(|(_, present)| *present)
            .map(|(path, _)| path.to_string())
            .collect()
    }

    /// Copy every supplied field onto `entity_type`.
    pub fn apply(&self, entity_type: &mut EntityType) {
        if let Some(display_name) = &self.display_name {
            entity_type.display_name = display_name.clone();
        }
        if let Some(kind) = self.kind {
            entity_type.kind = kind;
        }
        if let Some(mode) = self.auto_expansion_mode {
            entity_type.auto_expansion_mode = mode;
        }
        if let Some(entities) = &self.entities {
            entity_type.entities = entities.clone();
        }
        if let Some(phrases) = &self.excluded_phrases {
            entity_type.excluded_phrases = phrases.clone();
        }
        if let Some(fuzzy) = self.enable_fuzzy_extraction {
            entity_type.enable_fuzzy_extraction = fuzzy;
        }
        if let Some(redact) = self.redact {
            entity_type.redact = redact;
        }
    }
}

/// Set of field paths to update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldMask {
    pub paths: Vec<String>,
}

impl FieldMask {
    pub fn new(paths: Vec<String>) -> Self {
        Self { paths }
    }

    /// Comma-joined form used in the `updateMask` query parameter.
    pub fn to_query_value(&self) -> String {
        self.paths.join(",")
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListEntityTypesRequest {
    /// Agent id, `projects/<P>/locations/<L>/agents/<A>`.
    pub parent: String,
    pub language_code: Option<String>,
    pub page_size: Option<u32>,
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntityTypesResponse {
    #[serde(default)]
    pub entity_types: Vec<EntityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateEntityTypeRequest {
    pub parent: String,
    pub entity_type: EntityType,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateEntityTypeRequest {
    pub entity_type: EntityType,
    pub update_mask: FieldMask,
    pub language_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_paths_follow_supplied_fields() {
        let fields = EntityTypeFields {
            redact: Some(true),
            display_name: Some("color".to_string()),
            ..Default::default()
        };
        assert_eq!(fields.paths(), vec!["display_name", "redact"]);
        assert!(EntityTypeFields::default().is_empty());
    }

    #[test]
    fn test_fields_apply_only_touches_supplied_fields() {
        let mut et = EntityType {
            display_name: "size".to_string(),
            kind: EntityKind::KindMap,
            ..Default::default()
        };
        let fields = EntityTypeFields {
            enable_fuzzy_extraction: Some(true),
            ..Default::default()
        };
        fields.apply(&mut et);
        assert_eq!(et.display_name, "size");
        assert_eq!(et.kind, EntityKind::KindMap);
        assert!(et.enable_fuzzy_extraction);
    }

    #[test]
    fn test_entity_type_wire_shape() {
        let et: EntityType = serde_json::from_value(json!({
            "name": "projects/p/locations/global/agents/a/entityTypes/e",
            "displayName": "color",
            "kind": "KIND_MAP",
            "autoExpansionMode": "AUTO_EXPANSION_MODE_DEFAULT",
            "entities": [{"value": "red", "synonyms": ["red", "crimson"]}],
            "enableFuzzyExtraction": true
        }))
        .unwrap();
        assert_eq!(et.kind, EntityKind::KindMap);
        assert!(et.auto_expansion_mode.is_enabled());
        assert_eq!(et.entities[0].synonyms.len(), 2);
        assert!(!et.redact);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("map".parse::<EntityKind>().unwrap(), EntityKind::KindMap);
        assert_eq!("KIND_REGEXP".parse::<EntityKind>().unwrap(), EntityKind::KindRegexp);
        assert!("tree".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_field_mask_query_value() {
        let mask = FieldMask::new(vec!["display_name".to_string(), "entities".to_string()]);
        assert_eq!(mask.to_query_value(), "display_name,entities");
    }
}
