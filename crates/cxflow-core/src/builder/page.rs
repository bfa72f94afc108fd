//! Page builder.
//!
//! A page is one step of a flow: an entry fulfillment, a form of parameters
//! to collect, and the routes and event handlers that leave it.
//! [`PageBuilder`] holds one page at a time and edits it in place. Every
//! mutator validates its arguments before touching the page and returns the
//! updated page.
//!
//! Pages also render as text (see [`PageSection`]) and flatten into a
//! [`DataFrame`] for bulk export.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use cxflow_types::error::BuilderError;
use cxflow_types::fulfillment::Fulfillment;
use cxflow_types::page::{FillBehavior, FormParameter, Page};
use cxflow_types::route::EventHandler;

use super::common::{ProtoSlot, heading, require_non_empty, require_non_empty_list};
use super::fulfillment::{
    self, AudioTextMode, FulfillmentBuilder, ParameterMap, ResponseMessageInput,
};
use super::routes::{
    self, EventHandlerArgs, RouteArgs, RouteMatch, describe_event_handler, describe_route,
};
use super::stats::PageStats;
use crate::table::schema::{self, Resource};
use crate::table::{Cell, DataFrame, TableMode};

/// Part of a page to render with [`PageBuilder::show_page_info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSection {
    Basic,
    #[default]
    Whole,
    Parameters,
    Routes,
    RouteGroups,
    Events,
}

impl FromStr for PageSection {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(PageSection::Basic),
            "whole" => Ok(PageSection::Whole),
            "parameters" => Ok(PageSection::Parameters),
            "routes" | "transition routes" => Ok(PageSection::Routes),
            "route groups" | "transition route groups" => Ok(PageSection::RouteGroups),
            "events" | "event handlers" => Ok(PageSection::Events),
            other => Err(BuilderError::InvalidArgument(format!(
                "section should be one of ['basic', 'whole', 'parameters', 'routes', \
                 'transition routes', 'route groups', 'transition route groups', \
                 'events', 'event handlers'], got '{other}'"
            ))),
        }
    }
}

/// Arguments for [`PageBuilder::add_parameter`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterArgs {
    pub display_name: String,
    /// Entity type id, e.g. `projects/-/locations/-/agents/-/entityTypes/sys.email`.
    pub entity_type: String,
    pub initial_prompt_fulfillment: Fulfillment,
    pub required: bool,
    /// Required for optional parameters, ignored for required ones.
    pub default_value: Option<String>,
    pub is_list: bool,
    pub redact: bool,
    pub reprompt_event_handlers: Vec<EventHandler>,
}

impl ParameterArgs {
    /// A required, single-valued, unredacted parameter.
    pub fn new(
        display_name: impl Into<String>,
        entity_type: impl Into<String>,
        initial_prompt_fulfillment: Fulfillment,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            entity_type: entity_type.into(),
            initial_prompt_fulfillment,
            required: true,
            default_value: None,
            is_list: false,
            redact: false,
            reprompt_event_handlers: Vec::new(),
        }
    }

    /// Make the parameter optional, filled with `default_value` when the
    /// user never supplies it.
    pub fn optional(mut self, default_value: impl Into<String>) -> Self {
        self.required = false;
        self.default_value = Some(default_value.into());
        self
    }

    /// Collect a list of values instead of one.
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    pub fn redacted(mut self) -> Self {
        self.redact = true;
        self
    }

    /// Handlers fired when the parameter is not filled, e.g. on
    /// `sys.no-match-default`.
    pub fn reprompt_event_handlers(mut self, handlers: Vec<EventHandler>) -> Self {
        self.reprompt_event_handlers = handlers;
        self
    }
}

/// Arguments for [`PageBuilder::set_entry_fulfillment`].
#[derive(Debug, Clone, Default)]
pub struct EntryFulfillmentArgs {
    pub message: Option<ResponseMessageInput>,
    /// Only read for output audio text messages.
    pub mode: Option<AudioTextMode>,
    pub webhook: Option<String>,
    pub tag: Option<String>,
    pub return_partial_responses: bool,
    pub parameter_map: Option<ParameterMap>,
}

/// Builds and edits a single [`Page`].
#[derive(Debug, Clone, Default)]
pub struct PageBuilder {
    slot: ProtoSlot<Page>,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit an existing page, e.g. one fetched from the API.
    pub fn from_proto(obj: Page) -> Self {
        Self {
            slot: ProtoSlot::seeded(obj),
        }
    }

    pub fn proto(&self) -> Option<&Page> {
        self.slot.get()
    }

    pub fn into_proto(self) -> Option<Page> {
        self.slot.into_inner()
    }

    /// Start a new page named `display_name`. Fails if the builder already
    /// holds a page, unless `overwrite` is set.
    pub fn create_new_page(
        &mut self,
        display_name: &str,
        entry_fulfillment: Option<Fulfillment>,
        overwrite: bool,
    ) -> Result<&Page, BuilderError> {
        self.slot.check_vacant(overwrite)?;
        require_non_empty(display_name, "display_name")?;

        let obj = Page {
            display_name: display_name.to_string(),
            entry_fulfillment: entry_fulfillment.unwrap_or_default(),
            ..Default::default()
        };
        Ok(&*self.slot.install(obj, overwrite)?)
    }

    /// Text rendering of one section of the page, or all of it.
    pub fn show_page_info(&self, section: PageSection) -> Result<String, BuilderError> {
        let page = self.slot.require()?;
        Ok(match section {
            PageSection::Basic => show_basic_info(page),
            PageSection::Whole => describe_page(page),
            PageSection::Parameters => show_parameters(page),
            PageSection::Routes => show_transition_routes(page),
            PageSection::RouteGroups => show_transition_route_groups(page),
            PageSection::Events => show_event_handlers(page),
        })
    }

    /// Counts of parameters, routes, handlers and webhooks. See [`PageStats`].
    pub fn show_stats(&self) -> Result<String, BuilderError> {
        Ok(PageStats::from_page(self.slot.require()?).to_string())
    }

    /// Replace the entry fulfillment.
    pub fn set_entry_fulfillment(
        &mut self,
        args: EntryFulfillmentArgs,
    ) -> Result<&Page, BuilderError> {
        self.slot.require()?;

        let mut fb = FulfillmentBuilder::new();
        fb.create_new_proto_obj(args.webhook, args.tag, args.return_partial_responses, false)?;
        if let Some(message) = args.message {
            fb.add_response_message(message, args.mode)?;
        }
        if let Some(parameter_map) = args.parameter_map {
            fb.add_parameter_presets(parameter_map)?;
        }
        let ff = fb
            .into_proto()
            .ok_or(BuilderError::MissingObject("Fulfillment"))?;

        let page = self.slot.require_mut()?;
        page.entry_fulfillment = ff;
        Ok(&*page)
    }

    /// Append a form parameter. Display names are unique within the form.
    pub fn add_parameter(&mut self, args: ParameterArgs) -> Result<&Page, BuilderError> {
        let page = self.slot.require()?;
        require_non_empty(&args.display_name, "display_name")?;
        if args.entity_type.trim().is_empty() {
            return Err(BuilderError::InvalidArgument(
                "`entity_type` should be a valid entity type id".to_string(),
            ));
        }
        if args.initial_prompt_fulfillment.is_empty() {
            return Err(BuilderError::InvalidArgument(
                "`initial_prompt_fulfillment` should be a nonempty Fulfillment".to_string(),
            ));
        }
        if page.form.parameter(&args.display_name).is_some() {
            return Err(BuilderError::DuplicateParameter(args.display_name));
        }
        let default_value = if args.required {
            None
        } else {
            let value = args.default_value.ok_or_else(|| {
                BuilderError::InvalidArgument(
                    "`default_value` should be a string for an optional parameter".to_string(),
                )
            })?;
            Some(Value::String(value))
        };

        let param = FormParameter {
            display_name: args.display_name,
            required: args.required,
            entity_type: args.entity_type,
            is_list: args.is_list,
            fill_behavior: FillBehavior {
                initial_prompt_fulfillment: args.initial_prompt_fulfillment,
                reprompt_event_handlers: args.reprompt_event_handlers,
            },
            default_value,
            redact: args.redact,
        };

        let page = self.slot.require_mut()?;
        page.form.parameters.push(param);
        Ok(&*page)
    }

    /// Append one route per intent or condition in `args`.
    pub fn add_transition_route(&mut self, args: RouteArgs) -> Result<&Page, BuilderError> {
        self.slot.require()?;
        let routes = args.into_routes()?;

        let page = self.slot.require_mut()?;
        page.transition_routes.extend(routes);
        Ok(&*page)
    }

    /// Append one handler per event in `args`.
    pub fn add_event_handler(&mut self, args: EventHandlerArgs) -> Result<&Page, BuilderError> {
        self.slot.require()?;
        let handlers = args.into_handlers()?;

        let page = self.slot.require_mut()?;
        page.event_handlers.extend(handlers);
        Ok(&*page)
    }

    /// Attach route groups by resource id. Order is kept; the API evaluates
    /// groups in sequence.
    pub fn add_transition_route_group<S: AsRef<str>>(
        &mut self,
        transition_route_groups: &[S],
    ) -> Result<&Page, BuilderError> {
        self.slot.require()?;
        require_non_empty_list(transition_route_groups, "transition_route_groups")?;

        let page = self.slot.require_mut()?;
        page.transition_route_groups.extend(
            transition_route_groups
                .iter()
                .map(|id| id.as_ref().to_string()),
        );
        Ok(&*page)
    }

    /// Remove form parameters by display name.
    pub fn remove_parameter<S: AsRef<str>>(
        &mut self,
        display_names: &[S],
    ) -> Result<&Page, BuilderError> {
        self.slot.require()?;
        require_non_empty_list(display_names, "display_name")?;

        let page = self.slot.require_mut()?;
        page.form
            .parameters
            .retain(|p| !display_names.iter().any(|n| n.as_ref() == p.display_name));
        Ok(&*page)
    }

    /// Remove every route matched by `criteria`.
    pub fn remove_transition_route(&mut self, criteria: RouteMatch) -> Result<&Page, BuilderError> {
        let page = self.slot.require_mut()?;
        routes::remove_matching_routes(&mut page.transition_routes, &criteria)?;
        Ok(&*page)
    }

    /// Remove handlers equal to one of `event_handlers`, or whose event is
    /// one of `event_names`. Exactly one of the two must be non-empty.
    pub fn remove_event_handler(
        &mut self,
        event_handlers: &[EventHandler],
        event_names: &[&str],
    ) -> Result<&Page, BuilderError> {
        let page = self.slot.require_mut()?;
        match (event_handlers.is_empty(), event_names.is_empty()) {
            (false, false) => {
                return Err(BuilderError::InvalidArgument(
                    "only one of `event_handlers` and `event_names` should be specified"
                        .to_string(),
                ));
            }
            (true, true) => {
                return Err(BuilderError::InvalidArgument(
                    "at least one of `event_handlers` and `event_names` should be specified"
                        .to_string(),
                ));
            }
            (false, true) => page
                .event_handlers
                .retain(|eh| !event_handlers.contains(eh)),
            (true, false) => page
                .event_handlers
                .retain(|eh| !event_names.contains(&eh.event.as_str())),
        }
        Ok(&*page)
    }

    pub fn remove_transition_route_group<S: AsRef<str>>(
        &mut self,
        transition_route_groups: &[S],
    ) -> Result<&Page, BuilderError> {
        self.slot.require()?;
        require_non_empty_list(transition_route_groups, "transition_route_groups")?;

        let page = self.slot.require_mut()?;
        page.transition_route_groups
            .retain(|id| !transition_route_groups.iter().any(|g| g.as_ref() == id));
        Ok(&*page)
    }

    /// Flatten the page into one row per entry fulfillment, form parameter
    /// (plus one per reprompt handler), route, event handler and route
    /// group reference.
    pub fn to_dataframe(&self, mode: TableMode) -> Result<DataFrame, BuilderError> {
        let page = self.slot.require()?;

        let routes = DataFrame::concat_all(
            schema::columns(Resource::TransitionRoute, mode),
            page.transition_routes
                .iter()
                .map(|r| routes::route_frame(r, mode)),
        );
        let handlers = DataFrame::concat_all(
            schema::columns(Resource::EventHandler, mode),
            page.event_handlers
                .iter()
                .map(|eh| routes::event_handler_frame(eh, mode)),
        );
        let mut route_groups = DataFrame::with_columns(&["route_groups"]);
        for id in &page.transition_route_groups {
            route_groups.push_row([("route_groups", Cell::from(id.as_str()))]);
        }

        let mut df = fulfillment::fulfillment_frame(&page.entry_fulfillment, mode);
        df.concat(form_parameters_frame(&page.form.parameters, mode));
        df.concat(routes);
        df.concat(handlers);
        df.concat(route_groups);

        df.set_column("name", page.name.as_str());
        df.set_column("display_name", page.display_name.as_str());
        df.set_column("flow", page.flow_id());

        Ok(df.select(schema::columns(Resource::Page, mode))?)
    }
}

impl fmt::Display for PageBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.get() {
            Some(page) => f.write_str(&describe_page(page)),
            None => f.write_str("(no Page)"),
        }
    }
}

/// One row per parameter with its initial prompt, followed by one row per
/// reprompt handler repeating the parameter columns.
fn form_parameters_frame(params: &[FormParameter], mode: TableMode) -> DataFrame {
    let mut df = DataFrame::with_columns(schema::columns(Resource::FormParameter, mode));
    for param in params {
        let param_cells = parameter_cells(param, mode);

        let mut row = param_cells.clone();
        row.extend(fulfillment::fulfillment_cells(
            &param.fill_behavior.initial_prompt_fulfillment,
            mode,
        ));
        df.push_row(row);

        for handler in &param.fill_behavior.reprompt_event_handlers {
            let mut row = param_cells.clone();
            row.extend(routes::event_handler_cells(handler, mode));
            df.push_row(row);
        }
    }
    df
}

fn parameter_cells(param: &FormParameter, mode: TableMode) -> Vec<(&'static str, Cell)> {
    let mut cells = vec![
        ("parameter_display_name", Cell::from(param.display_name.as_str())),
        ("parameter_entity_type", Cell::from(param.entity_type.as_str())),
    ];
    if mode == TableMode::Advanced {
        let default_value = if param.required {
            Cell::Null
        } else {
            Cell::from(param.default_value.as_ref().map(value_text))
        };
        cells.extend([
            ("parameter_is_required", Cell::from(param.required)),
            ("parameter_is_list", Cell::from(param.is_list)),
            ("parameter_is_redact", Cell::from(param.redact)),
            ("parameter_default_value", default_value),
        ]);
    }
    cells
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn show_basic_info(page: &Page) -> String {
    format!(
        "display_name: {}\nentry_fulfillment:\n\n{}",
        page.display_name,
        fulfillment::describe(&page.entry_fulfillment)
    )
}

fn show_parameters(page: &Page) -> String {
    page.form
        .parameters
        .iter()
        .map(|p| {
            format!(
                "display_name: {}\n\tentity_type: {}\n\trequired: {}\n\tis_list: {}\n\tredact: {}\n\tdefault_value: {}",
                p.display_name,
                p.entity_type,
                p.required,
                p.is_list,
                p.redact,
                p.default_value.as_ref().map(value_text).unwrap_or_default(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn show_transition_routes(page: &Page) -> String {
    page.transition_routes
        .iter()
        .enumerate()
        .map(|(i, r)| format!("TransitionRoute {}:\n{}\n{}\n", i + 1, describe_route(r), "*".repeat(20)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn show_event_handlers(page: &Page) -> String {
    page.event_handlers
        .iter()
        .enumerate()
        .map(|(i, eh)| {
            format!(
                "EventHandler {}:\n{}\n{}\n",
                i + 1,
                describe_event_handler(eh),
                "*".repeat(20)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn show_transition_route_groups(page: &Page) -> String {
    page.transition_route_groups
        .iter()
        .enumerate()
        .map(|(i, id)| format!("TransitionRouteGroup {}: {id}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_page(page: &Page) -> String {
    [
        (heading("Basic Information"), show_basic_info(page)),
        (heading("Parameters"), show_parameters(page)),
        (heading("TransitionRoutes"), show_transition_routes(page)),
        (heading("EventHandlers"), show_event_handlers(page)),
        (heading("TransitionRouteGroups"), show_transition_route_groups(page)),
    ]
    .into_iter()
    .map(|(title, body)| format!("{title}\n{body}"))
    .collect::<Vec<_>>()
    .join("\n\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cxflow_types::route::{RouteTarget, TransitionRoute};

    const SYS_EMAIL: &str = "projects/-/locations/-/agents/-/entityTypes/sys.email";

    fn prompt(text: &str) -> Fulfillment {
        let mut fb = FulfillmentBuilder::new();
        fb.create_new_proto_obj(None, None, false, false).unwrap();
        fb.add_response_message(ResponseMessageInput::text([text]), None)
            .unwrap();
        fb.into_proto().unwrap()
    }

    fn collect_email() -> PageBuilder {
        let mut pb = PageBuilder::new();
        pb.create_new_page("Collect Email", None, false).unwrap();
        pb.add_parameter(ParameterArgs::new(
            "email",
            SYS_EMAIL,
            prompt("What is your email?"),
        ))
        .unwrap();
        pb
    }

    #[test]
    fn test_collect_email_stats() {
        let pb = collect_email();
        let stats = PageStats::from_page(pb.proto().unwrap());
        assert_eq!(stats.parameters_count, 1);
        assert_eq!(stats.parameters_ratio, 0.0);

        let report = pb.show_stats().unwrap();
        assert!(report.contains("# of Parameters: 1"));
    }

    #[test]
    fn test_create_page_twice() {
        let mut pb = collect_email();
        assert_eq!(
            pb.create_new_page("Other", None, false).unwrap_err(),
            BuilderError::AlreadyExists("Page")
        );
        assert_eq!(pb.proto().unwrap().form.parameters.len(), 1);

        let page = pb.create_new_page("Other", None, true).unwrap();
        assert_eq!(page.display_name, "Other");
        assert!(page.form.parameters.is_empty());
    }

    #[test]
    fn test_create_page_requires_display_name() {
        let mut pb = PageBuilder::new();
        assert!(pb.create_new_page("", None, false).is_err());
        assert!(pb.proto().is_none());
    }

    #[test]
    fn test_mutations_require_page() {
        let mut pb = PageBuilder::new();
        let err = pb
            .add_transition_route(RouteArgs {
                condition: Some("true".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, BuilderError::MissingObject("Page"));
        assert_eq!(
            pb.show_page_info(PageSection::Whole).unwrap_err(),
            BuilderError::MissingObject("Page")
        );
    }

    #[test]
    fn test_add_parameter_validation() {
        let mut pb = collect_email();

        let duplicate = ParameterArgs::new("email", SYS_EMAIL, prompt("again?"));
        assert_eq!(
            pb.add_parameter(duplicate).unwrap_err(),
            BuilderError::DuplicateParameter("email".to_string())
        );

        let no_prompt = ParameterArgs::new("name", "entityTypes/sys.person", Fulfillment::default());
        assert!(pb.add_parameter(no_prompt).is_err());

        let mut no_default = ParameterArgs::new("nickname", "entityTypes/sys.any", prompt("?"));
        no_default.required = false;
        assert!(pb.add_parameter(no_default).is_err());

        assert_eq!(pb.proto().unwrap().form.parameters.len(), 1);
    }

    #[test]
    fn test_optional_parameter_keeps_default() {
        let mut pb = collect_email();
        let page = pb
            .add_parameter(
                ParameterArgs::new("newsletter", "entityTypes/sys.any", prompt("Subscribe?"))
                    .optional("no"),
            )
            .unwrap();
        let param = page.form.parameter("newsletter").unwrap();
        assert!(!param.required);
        assert_eq!(param.default_value, Some(Value::String("no".to_string())));
    }

    #[test]
    fn test_add_then_remove_route_restores_routes() {
        let mut pb = collect_email();
        pb.add_transition_route(RouteArgs {
            condition: Some("$page.params.status = \"FINAL\"".to_string()),
            target_page: Some("pages/confirm".to_string()),
            ..Default::default()
        })
        .unwrap();
        let before = pb.proto().unwrap().transition_routes.clone();

        pb.add_transition_route(RouteArgs {
            intent: Some("intents/cancel".to_string()),
            agent_response: Some(vec!["Cancelled.".to_string()]),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(pb.proto().unwrap().transition_routes.len(), 2);

        let page = pb
            .remove_transition_route(RouteMatch::intent("intents/cancel"))
            .unwrap();
        assert_eq!(page.transition_routes, before);
    }

    #[test]
    fn test_remove_route_requires_criteria() {
        let mut pb = collect_email();
        assert!(pb.remove_transition_route(RouteMatch::default()).is_err());
    }

    #[test]
    fn test_event_handlers_add_and_remove() {
        let mut pb = collect_email();
        pb.add_event_handler(EventHandlerArgs {
            event: Some("sys.no-match-default".to_string()),
            agent_response: Some(vec!["Sorry?".to_string()]),
            ..Default::default()
        })
        .unwrap();
        pb.add_event_handler(EventHandlerArgs::handlers(vec![EventHandler {
            event: "sys.no-input-default".to_string(),
            ..Default::default()
        }]))
        .unwrap();

        let handler = pb.proto().unwrap().event_handlers[1].clone();
        assert!(
            pb.remove_event_handler(std::slice::from_ref(&handler), &["sys.no-match-default"])
                .is_err()
        );
        assert!(pb.remove_event_handler(&[], &[]).is_err());

        pb.remove_event_handler(&[handler], &[]).unwrap();
        let page = pb.remove_event_handler(&[], &["sys.no-match-default"]).unwrap();
        assert!(page.event_handlers.is_empty());
    }

    #[test]
    fn test_route_groups_and_parameters_removal() {
        let mut pb = collect_email();
        pb.add_transition_route_group(&["groups/a", "groups/b"]).unwrap();
        pb.remove_transition_route_group(&["groups/a"]).unwrap();
        assert_eq!(pb.proto().unwrap().transition_route_groups, vec!["groups/b"]);

        let empty: [&str; 0] = [];
        assert!(pb.remove_parameter(&empty).is_err());
        let page = pb.remove_parameter(&["email"]).unwrap();
        assert!(page.form.parameters.is_empty());
    }

    #[test]
    fn test_set_entry_fulfillment() {
        let mut pb = collect_email();
        let page = pb
            .set_entry_fulfillment(EntryFulfillmentArgs {
                message: Some(ResponseMessageInput::text(["Welcome!"])),
                webhook: Some("webhooks/w".to_string()),
                tag: Some("welcome".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(page.entry_fulfillment.has_webhook());
        assert_eq!(page.entry_fulfillment.messages.len(), 1);
    }

    #[test]
    fn test_page_dataframe_rows() {
        let mut page = collect_email().into_proto().unwrap();
        page.name = "projects/p/locations/global/agents/a/flows/f/pages/x".to_string();
        page.form.parameters[0].fill_behavior.reprompt_event_handlers = vec![EventHandler {
            event: "sys.no-match-1".to_string(),
            ..Default::default()
        }];
        page.transition_routes.push(TransitionRoute {
            intent: Some("intents/yes".to_string()),
            target: Some(RouteTarget::Page("pages/done".to_string())),
            ..Default::default()
        });
        page.transition_route_groups.push("groups/g".to_string());
        let pb = PageBuilder::from_proto(page);

        let df = pb.to_dataframe(TableMode::Basic).unwrap();
        assert_eq!(df.columns(), schema::columns(Resource::Page, TableMode::Basic));
        // entry fulfillment, parameter, its reprompt handler, route, route group
        assert_eq!(df.len(), 5);
        assert_eq!(df.get(1, "parameter_display_name"), Some(&Cell::from("email")));
        assert_eq!(df.get(2, "event"), Some(&Cell::from("sys.no-match-1")));
        assert_eq!(df.get(2, "parameter_display_name"), Some(&Cell::from("email")));
        assert_eq!(df.get(3, "next_step"), Some(&Cell::from("pages/done")));
        assert_eq!(df.get(4, "route_groups"), Some(&Cell::from("groups/g")));
        assert_eq!(
            df.get(4, "flow"),
            Some(&Cell::from("projects/p/locations/global/agents/a/flows/f"))
        );

        let advanced = pb.to_dataframe(TableMode::Advanced).unwrap();
        assert_eq!(advanced.get(1, "parameter_is_required"), Some(&Cell::Bool(true)));
        assert_eq!(advanced.get(1, "parameter_default_value"), Some(&Cell::Null));
    }

    #[test]
    fn test_every_parameter_contributes_rows() {
        let mut pb = collect_email();
        pb.add_parameter(
            ParameterArgs::new("phone", "entityTypes/sys.phone-number", prompt("Phone?"))
                .reprompt_event_handlers(vec![EventHandler {
                    event: "sys.no-match-1".to_string(),
                    ..Default::default()
                }]),
        )
        .unwrap();

        let df = pb.to_dataframe(TableMode::Basic).unwrap();
        let names: Vec<String> = df
            .column("parameter_display_name")
            .unwrap()
            .iter()
            .filter(|c| !c.is_null())
            .map(|c| c.to_string())
            .collect();
        assert_eq!(names, vec!["email", "phone", "phone"]);
    }

    #[test]
    fn test_show_page_info_sections() {
        let mut pb = collect_email();
        pb.add_transition_route_group(&["groups/g"]).unwrap();

        let params = pb.show_page_info(PageSection::Parameters).unwrap();
        assert!(params.starts_with("display_name: email"));
        assert!(params.contains("\tredact: false"));

        let groups = pb.show_page_info("route groups".parse().unwrap()).unwrap();
        assert_eq!(groups, "TransitionRouteGroup 1: groups/g");

        let whole = pb.to_string();
        assert!(whole.starts_with("Basic Information:\n"));
        assert!(whole.contains("TransitionRouteGroups:\n"));

        assert!("everything".parse::<PageSection>().is_err());
    }
}
