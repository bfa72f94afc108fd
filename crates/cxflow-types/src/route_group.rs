use serde::{Deserialize, Serialize};

use crate::route::TransitionRoute;

/// A reusable set of transition routes shared between pages of a flow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRouteGroup {
    /// `projects/<P>/locations/<L>/agents/<A>/flows/<F>/transitionRouteGroups/<G>`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transition_routes: Vec<TransitionRoute>,
}

impl TransitionRouteGroup {
    /// The flow this group belongs to, derived from the group name.
    pub fn flow_id(&self) -> &str {
        self.name
            .split_once("/transitionRouteGroups")
            .map_or(self.name.as_str(), |(flow, _)| flow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_id_from_group_name() {
        let group = TransitionRouteGroup {
            name: "projects/p/locations/us-east1/agents/a/flows/f/transitionRouteGroups/g"
                .to_string(),
            display_name: "Commons".to_string(),
            transition_routes: Vec::new(),
        };
        assert_eq!(group.flow_id(), "projects/p/locations/us-east1/agents/a/flows/f");
    }
}
