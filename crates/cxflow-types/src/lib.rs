//! Shared domain types for cxflow.
//!
//! This crate contains the Dialogflow CX resource messages that the builders
//! assemble (Page, Form, TransitionRoute, EventHandler, Fulfillment,
//! TransitionRouteGroup, EntityType), the request/response shapes of the
//! entity type API, the error enums and the global configuration types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod client;
pub mod config;
pub mod entity_type;
pub mod error;
pub mod fulfillment;
pub mod page;
pub mod route;
pub mod route_group;
