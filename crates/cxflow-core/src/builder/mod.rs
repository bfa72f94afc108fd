//! In-memory builders for Dialogflow CX resources.
//!
//! Leaf builders (fulfillments, routes, event handlers) produce sub-objects
//! that the composite builders (pages, transition route groups) assemble.
//! Every builder holds at most one object, validates its arguments before
//! touching it, and renders it as text or as a [`crate::table::DataFrame`].

pub mod common;
pub mod fulfillment;
pub mod page;
pub mod route_group;
pub mod routes;
pub mod stats;

pub use fulfillment::{AudioTextMode, FulfillmentBuilder, ParameterMap, ResponseMessageInput};
pub use page::{EntryFulfillmentArgs, PageBuilder, PageSection, ParameterArgs};
pub use route_group::TransitionRouteGroupBuilder;
pub use routes::{EventHandlerArgs, EventHandlerBuilder, RouteArgs, RouteMatch, TransitionRouteBuilder};
pub use stats::PageStats;
