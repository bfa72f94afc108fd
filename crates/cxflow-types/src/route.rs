//! Dialog graph edges: transition routes and event handlers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fulfillment::Fulfillment;

/// Where a route or handler transitions to. A target is either a page or a
/// flow, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteTarget {
    /// `projects/<P>/locations/<L>/agents/<A>/flows/<F>/pages/<Page>`
    #[serde(rename = "targetPage")]
    Page(String),
    /// `projects/<P>/locations/<L>/agents/<A>/flows/<F>`
    #[serde(rename = "targetFlow")]
    Flow(String),
}

impl RouteTarget {
    /// Build a target from the two optional ids, rejecting the case where
    /// both are given.
    pub fn from_parts(
        target_page: Option<String>,
        target_flow: Option<String>,
    ) -> Result<Option<Self>, String> {
        match (target_page, target_flow) {
            (Some(_), Some(_)) => {
                Err("at most one of target_page and target_flow can be specified".to_string())
            }
            (Some(page), None) => Ok(Some(RouteTarget::Page(page))),
            (None, Some(flow)) => Ok(Some(RouteTarget::Flow(flow))),
            (None, None) => Ok(None),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RouteTarget::Page(_) => "target_page",
            RouteTarget::Flow(_) => "target_flow",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            RouteTarget::Page(id) | RouteTarget::Flow(id) => id,
        }
    }
}

impl fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.id())
    }
}

/// A conditional edge guarded by an intent match and/or a condition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRoute {
    /// Server-assigned unique id of the route.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Fulfillment::is_empty")]
    pub trigger_fulfillment: Fulfillment,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub target: Option<RouteTarget>,
}

/// An edge fired by a named event (no-match, no-input, webhook errors, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHandler {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub event: String,
    #[serde(default, skip_serializing_if = "Fulfillment::is_empty")]
    pub trigger_fulfillment: Fulfillment,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub target: Option<RouteTarget>,
}
