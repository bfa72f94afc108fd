//! Infrastructure layer for cxflow.
//!
//! Contains the REST implementation of the [`EntityTypesClient`] port defined
//! in `cxflow-core`, access token resolution and the config file loader.
//!
//! [`EntityTypesClient`]: cxflow_core::repository::entity_type::EntityTypesClient

pub mod config;
pub mod credentials;
pub mod rest;
