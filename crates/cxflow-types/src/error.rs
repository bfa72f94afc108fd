use thiserror::Error;

/// Errors raised by the resource builders.
///
/// Argument errors are always raised before the held object is touched, so a
/// failed call never leaves a half-applied mutation behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuilderError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("there is no {0} in the builder; create one first or pass an existing object")]
    MissingObject(&'static str),

    #[error("the builder already contains a {0}; pass overwrite to replace it")]
    AlreadyExists(&'static str),

    #[error("a parameter named '{0}' already exists in the form")]
    DuplicateParameter(String),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Errors from the tabular projection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("invalid mode '{0}': expected one of [basic, advanced]")]
    InvalidMode(String),

    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}

/// Errors surfaced by a remote API transport.
///
/// These are propagated unchanged by the services; nothing retries them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request is not authenticated")]
    Unauthenticated,

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("remote call failed with HTTP {code}: {message}")]
    Status { code: u16, message: String },

    #[error("failed to decode response: {0}")]
    Deserialization(String),
}

/// A resource id that does not match the path layout of its resource type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourcePathError {
    #[error("{resource} id must be provided in the format {format}, got '{id}'")]
    Invalid {
        resource: &'static str,
        format: &'static str,
        id: String,
    },

    #[error("no console link can be built for '{0}'")]
    NoLink(String),
}

/// Errors from entity type operations.
#[derive(Debug, Error)]
pub enum EntityTypeError {
    #[error("no {0} given and no default is configured")]
    MissingId(&'static str),

    #[error(transparent)]
    InvalidResourceId(#[from] ResourcePathError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}
