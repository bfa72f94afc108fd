use std::fmt;

use cxflow_types::error::BuilderError;
use cxflow_types::route::TransitionRoute;
use cxflow_types::route_group::TransitionRouteGroup;

use super::common::{ProtoSlot, require_non_empty};
use super::routes::{self, RouteArgs, RouteMatch, describe_route};
use crate::table::schema::{self, Resource};
use crate::table::{DataFrame, TableMode};

/// Builds and edits a single [`TransitionRouteGroup`].
#[derive(Debug, Clone, Default)]
pub struct TransitionRouteGroupBuilder {
    slot: ProtoSlot<TransitionRouteGroup>,
}

impl TransitionRouteGroupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_proto(obj: TransitionRouteGroup) -> Self {
        Self {
            slot: ProtoSlot::seeded(obj),
        }
    }

    pub fn proto(&self) -> Option<&TransitionRouteGroup> {
        self.slot.get()
    }

    pub fn into_proto(self) -> Option<TransitionRouteGroup> {
        self.slot.into_inner()
    }

    pub fn create_new_transition_route_group(
        &mut self,
        display_name: &str,
        transition_routes: Vec<TransitionRoute>,
        overwrite: bool,
    ) -> Result<&TransitionRouteGroup, BuilderError> {
        self.slot.check_vacant(overwrite)?;
        require_non_empty(display_name, "display_name")?;

        let obj = TransitionRouteGroup {
            name: String::new(),
            display_name: display_name.to_string(),
            transition_routes,
        };
        Ok(&*self.slot.install(obj, overwrite)?)
    }

    pub fn show_transition_route_group(&self) -> Result<String, BuilderError> {
        Ok(describe(self.slot.require()?))
    }

    pub fn add_transition_route(
        &mut self,
        args: RouteArgs,
    ) -> Result<&TransitionRouteGroup, BuilderError> {
        self.slot.require()?;
        let new_routes = args.into_routes()?;

        let group = self.slot.require_mut()?;
        group.transition_routes.extend(new_routes);
        Ok(&*group)
    }

    pub fn remove_transition_route(
        &mut self,
        criteria: RouteMatch,
    ) -> Result<&TransitionRouteGroup, BuilderError> {
        let group = self.slot.require_mut()?;
        routes::remove_matching_routes(&mut group.transition_routes, &criteria)?;
        Ok(&*group)
    }

    /// One row per route, tagged with the group's name and flow.
    pub fn to_dataframe(&self, mode: TableMode) -> Result<DataFrame, BuilderError> {
        let group = self.slot.require()?;

        let mut df = DataFrame::concat_all(
            schema::columns(Resource::TransitionRoute, mode),
            group
                .transition_routes
                .iter()
                .map(|r| routes::route_frame(r, mode)),
        );
        df.set_column("name", group.name.as_str());
        df.set_column("display_name", group.display_name.as_str());
        df.set_column("flow", group.flow_id());

        Ok(df.select(schema::columns(Resource::TransitionRouteGroup, mode))?)
    }
}

impl fmt::Display for TransitionRouteGroupBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.get() {
            Some(group) => f.write_str(&describe(group)),
            None => f.write_str("(no TransitionRouteGroup)"),
        }
    }
}

fn describe(group: &TransitionRouteGroup) -> String {
    let routes = group
        .transition_routes
        .iter()
        .enumerate()
        .map(|(i, r)| format!("\n\n - Transition Route{}:\n{}", i + 1, describe_route(r)))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "display_name: {}\nTransitionRoutes:\n{}\n{routes}",
        group.display_name,
        "-".repeat(20)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    fn commons() -> TransitionRouteGroupBuilder {
        let mut trgb = TransitionRouteGroupBuilder::new();
        trgb.create_new_transition_route_group("Commons", Vec::new(), false)
            .unwrap();
        trgb.add_transition_route(RouteArgs {
            intent: Some("intents/help".to_string()),
            agent_response: Some(vec!["I can help with orders.".to_string()]),
            ..Default::default()
        })
        .unwrap();
        trgb.add_transition_route(RouteArgs {
            intent: Some("intents/bye".to_string()),
            target_page: Some("pages/END_SESSION".to_string()),
            ..Default::default()
        })
        .unwrap();
        trgb
    }

    #[test]
    fn test_create_requires_display_name_and_vacancy() {
        let mut trgb = TransitionRouteGroupBuilder::new();
        assert!(
            trgb.create_new_transition_route_group(" ", Vec::new(), false)
                .is_err()
        );

        let mut trgb = commons();
        assert_eq!(
            trgb.create_new_transition_route_group("Other", Vec::new(), false)
                .unwrap_err(),
            BuilderError::AlreadyExists("TransitionRouteGroup")
        );
        let group = trgb
            .create_new_transition_route_group("Other", Vec::new(), true)
            .unwrap();
        assert!(group.transition_routes.is_empty());
    }

    #[test]
    fn test_remove_transition_route_by_intent() {
        let mut trgb = commons();
        let group = trgb
            .remove_transition_route(RouteMatch::intent("intents/help"))
            .unwrap();
        assert_eq!(group.transition_routes.len(), 1);
        assert_eq!(
            group.transition_routes[0].intent.as_deref(),
            Some("intents/bye")
        );
    }

    #[test]
    fn test_dataframe_tags_group_columns() {
        let mut group = commons().into_proto().unwrap();
        group.name =
            "projects/p/locations/global/agents/a/flows/f/transitionRouteGroups/g".to_string();
        let trgb = TransitionRouteGroupBuilder::from_proto(group);

        let df = trgb.to_dataframe(TableMode::Basic).unwrap();
        assert_eq!(
            df.columns(),
            schema::columns(Resource::TransitionRouteGroup, TableMode::Basic)
        );
        assert_eq!(df.len(), 2);
        assert_eq!(df.get(1, "display_name"), Some(&Cell::from("Commons")));
        assert_eq!(
            df.get(0, "flow"),
            Some(&Cell::from("projects/p/locations/global/agents/a/flows/f"))
        );
        assert_eq!(df.get(1, "next_step"), Some(&Cell::from("pages/END_SESSION")));
    }

    #[test]
    fn test_empty_group_dataframe_keeps_schema() {
        let mut trgb = TransitionRouteGroupBuilder::new();
        trgb.create_new_transition_route_group("Empty", Vec::new(), false)
            .unwrap();
        let df = trgb.to_dataframe(TableMode::Advanced).unwrap();
        assert!(df.is_empty());
        assert_eq!(
            df.columns(),
            schema::columns(Resource::TransitionRouteGroup, TableMode::Advanced)
        );
    }

    #[test]
    fn test_show_group() {
        let trgb = commons();
        let text = trgb.show_transition_route_group().unwrap();
        assert!(text.starts_with("display_name: Commons\nTransitionRoutes:\n"));
        assert!(text.contains(" - Transition Route2:"));
        assert!(text.contains("I can help with orders."));
    }
}
