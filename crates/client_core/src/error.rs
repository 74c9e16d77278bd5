//! Error types for the gateway and controller layers.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("precondition violated: {0}")]
    Precondition(&'static str),
    #[error("malformed response body: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationContext {
    Load,
    Create,
    Update,
    Delete,
}

impl fmt::Display for OperationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Load => "load",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Api,
    Precondition,
    Decode,
    Validation,
}

/// Failure of a single controller operation, handed back to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("{context} failed: {source}")]
    Gateway {
        context: OperationContext,
        #[source]
        source: GatewayError,
    },
    #[error("invalid draft: {0}")]
    InvalidDraft(&'static str),
}

impl ControllerError {
    pub fn gateway(context: OperationContext, source: GatewayError) -> Self {
        Self::Gateway { context, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Gateway { source, .. } => match source {
                GatewayError::Transport(_) => ErrorKind::Transport,
                GatewayError::Api { .. } => ErrorKind::Api,
                GatewayError::Precondition(_) => ErrorKind::Precondition,
                GatewayError::Decode(_) => ErrorKind::Decode,
            },
            Self::InvalidDraft(_) => ErrorKind::Validation,
        }
    }

    pub fn context(&self) -> Option<OperationContext> {
        match self {
            Self::Gateway { context, .. } => Some(*context),
            _ => None,
        }
    }

    /// Short text suitable for an alert or status line.
    pub fn notification(&self) -> String {
        match self {
            Self::Gateway { context, source } => {
                let headline = match context {
                    OperationContext::Load => "Error while loading the games",
                    OperationContext::Create => "Error while creating the game",
                    OperationContext::Update => "Error while updating the game",
                    OperationContext::Delete => "Error while deleting the game",
                };
                match source {
                    GatewayError::Transport(_) => {
                        format!("{headline}: the backend is unreachable")
                    }
                    GatewayError::Api { status, message } => {
                        format!("{headline} (HTTP {status}): {message}")
                    }
                    other => format!("{headline}: {other}"),
                }
            }
            Self::InvalidDraft(reason) => format!("Cannot add the game: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_names_operation_and_status() {
        let err = ControllerError::gateway(
            OperationContext::Delete,
            GatewayError::Api {
                status: 404,
                message: "Not Found".into(),
            },
        );
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.context(), Some(OperationContext::Delete));
        assert_eq!(
            err.notification(),
            "Error while deleting the game (HTTP 404): Not Found"
        );
    }

    #[test]
    fn transport_failures_read_as_connectivity_problems() {
        let err = ControllerError::gateway(
            OperationContext::Create,
            GatewayError::Transport("connection refused".into()),
        );
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.notification().contains("unreachable"));
    }
}
