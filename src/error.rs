use thiserror::Error;

/// Errors that can occur while assembling a renderer's node-type registry.
///
/// These are programmer errors and surface at build time only; a render pass
/// never raises them.
#[derive(Error, Debug, Clone)]
pub enum RegistryError {
    #[error("A renderer for node type '{0}' is already registered")]
    DuplicateType(String),

    #[error("Type alias '{alias}' points at unknown node type '{target}'")]
    UnknownAliasTarget { alias: String, target: String },
}

/// Errors that can occur while dispatching an action descriptor.
///
/// Only structurally malformed descriptors land here; network and backend
/// failures are reported as [`DispatchOutcome`](crate::dispatch::DispatchOutcome)
/// variants after the user has been notified.
#[derive(Error, Debug, Clone)]
pub enum DispatchError {
    #[error("NAVIGATE action carries no 'to' or 'navigate' route")]
    MissingRoute,

    #[error("ACTION descriptor carries no command name under 'value'")]
    MissingCommandName,

    #[error("API_CALL action carries no 'url'")]
    MissingUrl,

    #[error("Could not resolve '{url}' against the configured base URL: {message}")]
    InvalidUrl { url: String, message: String },
}

/// Errors that can occur while fetching a screen document from the backend.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request to '{url}' failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend returned HTTP {status} for '{url}'")]
    Status { url: String, status: u16 },

    #[error("Could not decode the screen response from '{url}': {message}")]
    Decode { url: String, message: String },

    #[error("Backend reported an error: {0}")]
    Backend(String),
}
