//! Remote resource trait definitions (ports).
//!
//! These traits define the Dialogflow CX API surface that the
//! infrastructure layer (cxflow-infra) implements. The core crate never
//! depends on a specific transport.

pub mod entity_type;
