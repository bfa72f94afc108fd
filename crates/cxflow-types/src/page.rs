//! Page and form messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fulfillment::Fulfillment;
use crate::route::{EventHandler, TransitionRoute};

/// A node of a flow: entry fulfillment, a form of parameters to collect,
/// and the routes and handlers that leave the page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// `projects/<P>/locations/<L>/agents/<A>/flows/<F>/pages/<Page>`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Fulfillment::is_empty")]
    pub entry_fulfillment: Fulfillment,
    #[serde(default, skip_serializing_if = "Form::is_empty")]
    pub form: Form,
    /// Ids of the transition route groups referenced by the page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transition_route_groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transition_routes: Vec<TransitionRoute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event_handlers: Vec<EventHandler>,
}

impl Page {
    /// The flow this page belongs to, derived from the page name.
    pub fn flow_id(&self) -> &str {
        self.name
            .split_once("/pages")
            .map_or(self.name.as_str(), |(flow, _)| flow)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Form {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<FormParameter>,
}

impl Form {
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn parameter(&self, display_name: &str) -> Option<&FormParameter> {
        self.parameters
            .iter()
            .find(|p| p.display_name == display_name)
    }
}

/// A slot-filling field collected from the user within a page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormParameter {
    pub display_name: String,
    #[serde(default)]
    pub required: bool,
    /// `projects/-/locations/-/agents/-/entityTypes/sys.date` for system
    /// entity types, or a full developer entity type id.
    pub entity_type: String,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default)]
    pub fill_behavior: FillBehavior,
    /// Only meaningful for optional parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub redact: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillBehavior {
    #[serde(default, skip_serializing_if = "Fulfillment::is_empty")]
    pub initial_prompt_fulfillment: Fulfillment,
    /// Handlers for `sys.no-match-<N>`, `sys.no-input-<N>`,
    /// `sys.invalid-parameter` and their defaults.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reprompt_event_handlers: Vec<EventHandler>,
}
