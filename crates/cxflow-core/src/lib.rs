//! Resource builders, reporting and the entity type service for cxflow.
//!
//! Builders edit Dialogflow CX resources in memory and project them into
//! text and [`table::DataFrame`]s. The remote side is reached through the
//! port traits in [`repository`], implemented by `cxflow-infra`. This crate
//! depends only on `cxflow-types`, never on an HTTP client.

pub mod builder;
pub mod repository;
pub mod service;
pub mod table;
