//! Services (use cases) over the remote ports.
//!
//! Services hold the default ids and call accounting, and depend on the
//! traits in [`crate::repository`], never on a concrete transport.

pub mod api_calls;
pub mod entity_type;
pub mod region;
pub mod resource;
