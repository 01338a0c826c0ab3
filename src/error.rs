//! Error module.

use thiserror::Error;

/// The error types for request dispatch and response handling.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// An unexpected-response error carrying the JSON kind the transport
    /// actually resolved to.
    pub fn unexpected_response(actual: &'static str) -> Self {
        Self::new(ErrorKind::UnexpectedResponse { actual })
    }

    /// Wraps a failure raised by the transport. The error is passed through
    /// to the caller untouched, never retried.
    pub fn transport(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::new(ErrorKind::Transport(Box::new(source)))
    }

    /// The error information, for matching on the failure condition.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Determines if the error came from the transport resolving to a value
    /// of an unexpected shape.
    pub fn is_unexpected_response(&self) -> bool {
        matches!(self.kind, ErrorKind::UnexpectedResponse { .. })
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("unexpected response body `{actual}` returned, expected a JSON object. Are you using a compatible transport version?")]
    UnexpectedResponse { actual: &'static str },

    #[error("error decoding the response body: {0}")]
    ResponseDecode(#[source] serde_json::Error),

    #[error("error executing the request: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::new(ErrorKind::ResponseDecode(source))
    }
}

/// The JSON kind of a value, for reporting shape mismatches.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
