//! Builders for the edges of the dialog graph: transition routes and event
//! handlers, plus the argument and matching types the composite builders
//! use to add and remove them.

use std::fmt;

use cxflow_types::error::BuilderError;
use cxflow_types::fulfillment::Fulfillment;
use cxflow_types::route::{EventHandler, RouteTarget, TransitionRoute};

use super::common::{ProtoSlot, non_blank, require_non_empty};
use super::fulfillment::{self, FulfillmentBuilder, ParameterMap, ResponseMessageInput};
use crate::table::schema::{self, Resource};
use crate::table::{Cell, DataFrame, TableMode};

fn target(
    target_page: Option<String>,
    target_flow: Option<String>,
) -> Result<Option<RouteTarget>, BuilderError> {
    RouteTarget::from_parts(non_blank(target_page), non_blank(target_flow))
        .map_err(BuilderError::InvalidArgument)
}

/// A fulfillment holding an optional text response and optional presets.
fn response_fulfillment(
    message: Option<Vec<String>>,
    parameter_map: Option<ParameterMap>,
) -> Result<Fulfillment, BuilderError> {
    let mut fb = FulfillmentBuilder::new();
    fb.create_new_proto_obj(None, None, false, false)?;
    if let Some(message) = message {
        fb.add_response_message(ResponseMessageInput::Text(message), None)?;
    }
    if let Some(parameter_map) = parameter_map {
        fb.add_parameter_presets(parameter_map)?;
    }
    fb.into_proto()
        .ok_or(BuilderError::MissingObject("Fulfillment"))
}

fn describe_target(target: Option<&RouteTarget>) -> String {
    target.map_or_else(|| "target: -".to_string(), RouteTarget::to_string)
}

// ---------------------------------------------------------------------------
// TransitionRoute
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct TransitionRouteBuilder {
    slot: ProtoSlot<TransitionRoute>,
}

impl TransitionRouteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_proto(obj: TransitionRoute) -> Self {
        Self {
            slot: ProtoSlot::seeded(obj),
        }
    }

    pub fn proto(&self) -> Option<&TransitionRoute> {
        self.slot.get()
    }

    pub fn into_proto(self) -> Option<TransitionRoute> {
        self.slot.into_inner()
    }

    /// Create a route guarded by `intent`, `condition`, or both.
    ///
    /// At most one of `target_page` and `target_flow` may be given.
    pub fn create_new_proto_obj(
        &mut self,
        intent: Option<String>,
        condition: Option<String>,
        trigger_fulfillment: Option<Fulfillment>,
        target_page: Option<String>,
        target_flow: Option<String>,
        overwrite: bool,
    ) -> Result<&TransitionRoute, BuilderError> {
        self.slot.check_vacant(overwrite)?;

        let intent = non_blank(intent);
        let condition = non_blank(condition);
        if intent.is_none() && condition.is_none() {
            return Err(BuilderError::InvalidArgument(
                "at least one of `intent` and `condition` must be specified".to_string(),
            ));
        }
        let target = target(target_page, target_flow)?;

        let obj = TransitionRoute {
            name: String::new(),
            intent,
            condition,
            trigger_fulfillment: trigger_fulfillment.unwrap_or_default(),
            target,
        };
        Ok(&*self.slot.install(obj, overwrite)?)
    }

    /// Replace the trigger fulfillment with one built from a text response
    /// and parameter presets.
    pub fn set_fulfillment(
        &mut self,
        message: Option<Vec<String>>,
        parameter_map: Option<ParameterMap>,
    ) -> Result<&TransitionRoute, BuilderError> {
        self.slot.require()?;
        let ff = response_fulfillment(message, parameter_map)?;

        let obj = self.slot.require_mut()?;
        obj.trigger_fulfillment = ff;
        Ok(&*obj)
    }

    pub fn to_dataframe(&self, mode: TableMode) -> Result<DataFrame, BuilderError> {
        Ok(route_frame(self.slot.require()?, mode))
    }
}

impl fmt::Display for TransitionRouteBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.get() {
            Some(obj) => f.write_str(&describe_route(obj)),
            None => f.write_str("(no TransitionRoute)"),
        }
    }
}

pub(crate) fn describe_route(obj: &TransitionRoute) -> String {
    format!(
        "intent: {}\ncondition: {}\n{}\ntrigger_fulfillment:\n{}",
        obj.intent.as_deref().unwrap_or_default(),
        obj.condition.as_deref().unwrap_or_default(),
        describe_target(obj.target.as_ref()),
        fulfillment::describe(&obj.trigger_fulfillment),
    )
}

pub(crate) fn route_cells(obj: &TransitionRoute, mode: TableMode) -> Vec<(&'static str, Cell)> {
    let mut cells = vec![
        ("intent", Cell::from(obj.intent.clone())),
        ("condition", Cell::from(obj.condition.clone())),
    ];
    cells.extend(target_cells(obj.target.as_ref(), mode));
    cells.extend(fulfillment::fulfillment_cells(&obj.trigger_fulfillment, mode));
    cells
}

pub(crate) fn route_frame(obj: &TransitionRoute, mode: TableMode) -> DataFrame {
    let mut df = DataFrame::with_columns(schema::columns(Resource::TransitionRoute, mode));
    df.push_row(route_cells(obj, mode));
    df
}

fn target_cells(target: Option<&RouteTarget>, mode: TableMode) -> Vec<(&'static str, Cell)> {
    match mode {
        TableMode::Basic => vec![("next_step", Cell::from(target.map(RouteTarget::id)))],
        TableMode::Advanced => vec![
            ("target_type", Cell::from(target.map(RouteTarget::kind))),
            ("target_id", Cell::from(target.map(RouteTarget::id))),
        ],
    }
}

/// Arguments for adding routes to a page or route group.
///
/// When `transition_routes` is set it is used as is and the other fields
/// are ignored. Otherwise a single route is built from the fields; if no
/// `trigger_fulfillment` is given one is made from `agent_response` and
/// `parameter_map`.
#[derive(Debug, Clone, Default)]
pub struct RouteArgs {
    pub transition_routes: Option<Vec<TransitionRoute>>,
    pub intent: Option<String>,
    pub condition: Option<String>,
    pub target_page: Option<String>,
    pub target_flow: Option<String>,
    pub trigger_fulfillment: Option<Fulfillment>,
    pub agent_response: Option<Vec<String>>,
    pub parameter_map: Option<ParameterMap>,
}

impl RouteArgs {
    pub fn routes(transition_routes: Vec<TransitionRoute>) -> Self {
        Self {
            transition_routes: Some(transition_routes),
            ..Default::default()
        }
    }

    pub(crate) fn into_routes(self) -> Result<Vec<TransitionRoute>, BuilderError> {
        if let Some(routes) = self.transition_routes {
            return Ok(routes);
        }

        let build_fulfillment = self.trigger_fulfillment.is_none();
        let mut trb = TransitionRouteBuilder::new();
        trb.create_new_proto_obj(
            self.intent,
            self.condition,
            self.trigger_fulfillment,
            self.target_page,
            self.target_flow,
            false,
        )?;
        if build_fulfillment {
            trb.set_fulfillment(self.agent_response, self.parameter_map)?;
        }
        let route = trb
            .into_proto()
            .ok_or(BuilderError::MissingObject("TransitionRoute"))?;
        Ok(vec![route])
    }
}

/// Criteria for removing routes.
///
/// A route matches when it equals `transition_route`, or when every given
/// `intent`/`condition` equals the route's own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteMatch {
    pub transition_route: Option<TransitionRoute>,
    pub intent: Option<String>,
    pub condition: Option<String>,
}

impl RouteMatch {
    pub fn route(route: TransitionRoute) -> Self {
        Self {
            transition_route: Some(route),
            ..Default::default()
        }
    }

    pub fn intent(intent: impl Into<String>) -> Self {
        Self {
            intent: Some(intent.into()),
            ..Default::default()
        }
    }

    pub fn condition(condition: impl Into<String>) -> Self {
        Self {
            condition: Some(condition.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transition_route.is_none() && self.intent.is_none() && self.condition.is_none()
    }

    pub fn matches(&self, route: &TransitionRoute) -> bool {
        if self.transition_route.as_ref() == Some(route) {
            return true;
        }
        if self.intent.is_none() && self.condition.is_none() {
            return false;
        }
        let intent_ok = self
            .intent
            .as_ref()
            .is_none_or(|i| route.intent.as_ref() == Some(i));
        let condition_ok = self
            .condition
            .as_ref()
            .is_none_or(|c| route.condition.as_ref() == Some(c));
        intent_ok && condition_ok
    }
}

/// Drop every route matched by `criteria`.
pub(crate) fn remove_matching_routes(
    routes: &mut Vec<TransitionRoute>,
    criteria: &RouteMatch,
) -> Result<(), BuilderError> {
    if criteria.is_empty() {
        return Err(BuilderError::InvalidArgument(
            "at least one of `transition_route`, `intent`, and `condition` should be specified"
                .to_string(),
        ));
    }
    routes.retain(|r| !criteria.matches(r));
    Ok(())
}

// ---------------------------------------------------------------------------
// EventHandler
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct EventHandlerBuilder {
    slot: ProtoSlot<EventHandler>,
}

impl EventHandlerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_proto(obj: EventHandler) -> Self {
        Self {
            slot: ProtoSlot::seeded(obj),
        }
    }

    pub fn proto(&self) -> Option<&EventHandler> {
        self.slot.get()
    }

    pub fn into_proto(self) -> Option<EventHandler> {
        self.slot.into_inner()
    }

    pub fn create_new_proto_obj(
        &mut self,
        event: &str,
        trigger_fulfillment: Option<Fulfillment>,
        target_page: Option<String>,
        target_flow: Option<String>,
        overwrite: bool,
    ) -> Result<&EventHandler, BuilderError> {
        self.slot.check_vacant(overwrite)?;
        require_non_empty(event, "event")?;
        let target = target(target_page, target_flow)?;

        let obj = EventHandler {
            name: String::new(),
            event: event.to_string(),
            trigger_fulfillment: trigger_fulfillment.unwrap_or_default(),
            target,
        };
        Ok(&*self.slot.install(obj, overwrite)?)
    }

    pub fn set_fulfillment(
        &mut self,
        message: Option<Vec<String>>,
        parameter_map: Option<ParameterMap>,
    ) -> Result<&EventHandler, BuilderError> {
        self.slot.require()?;
        let ff = response_fulfillment(message, parameter_map)?;

        let obj = self.slot.require_mut()?;
        obj.trigger_fulfillment = ff;
        Ok(&*obj)
    }

    pub fn to_dataframe(&self, mode: TableMode) -> Result<DataFrame, BuilderError> {
        Ok(event_handler_frame(self.slot.require()?, mode))
    }
}

impl fmt::Display for EventHandlerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.get() {
            Some(obj) => f.write_str(&describe_event_handler(obj)),
            None => f.write_str("(no EventHandler)"),
        }
    }
}

pub(crate) fn describe_event_handler(obj: &EventHandler) -> String {
    format!(
        "event: {}\n{}\ntrigger_fulfillment:\n{}",
        obj.event,
        describe_target(obj.target.as_ref()),
        fulfillment::describe(&obj.trigger_fulfillment),
    )
}

pub(crate) fn event_handler_cells(obj: &EventHandler, mode: TableMode) -> Vec<(&'static str, Cell)> {
    let mut cells = vec![("event", Cell::from(obj.event.as_str()))];
    cells.extend(target_cells(obj.target.as_ref(), mode));
    cells.extend(fulfillment::fulfillment_cells(&obj.trigger_fulfillment, mode));
    cells
}

pub(crate) fn event_handler_frame(obj: &EventHandler, mode: TableMode) -> DataFrame {
    let mut df = DataFrame::with_columns(schema::columns(Resource::EventHandler, mode));
    df.push_row(event_handler_cells(obj, mode));
    df
}

/// Arguments for adding event handlers to a page. Mirrors [`RouteArgs`].
#[derive(Debug, Clone, Default)]
pub struct EventHandlerArgs {
    pub event_handlers: Option<Vec<EventHandler>>,
    pub event: Option<String>,
    pub target_page: Option<String>,
    pub target_flow: Option<String>,
    pub trigger_fulfillment: Option<Fulfillment>,
    pub agent_response: Option<Vec<String>>,
    pub parameter_map: Option<ParameterMap>,
}

impl EventHandlerArgs {
    pub fn handlers(event_handlers: Vec<EventHandler>) -> Self {
        Self {
            event_handlers: Some(event_handlers),
            ..Default::default()
        }
    }

    pub(crate) fn into_handlers(self) -> Result<Vec<EventHandler>, BuilderError> {
        if let Some(handlers) = self.event_handlers {
            return Ok(handlers);
        }

        let build_fulfillment = self.trigger_fulfillment.is_none();
        let mut ehb = EventHandlerBuilder::new();
        ehb.create_new_proto_obj(
            self.event.as_deref().unwrap_or_default(),
            self.trigger_fulfillment,
            self.target_page,
            self.target_flow,
            false,
        )?;
        if build_fulfillment {
            ehb.set_fulfillment(self.agent_response, self.parameter_map)?;
        }
        let handler = ehb
            .into_proto()
            .ok_or(BuilderError::MissingObject("EventHandler"))?;
        Ok(vec![handler])
    }
}
