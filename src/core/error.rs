//! Error type shared by every session, resolution, and catalog operation.

use std::error::Error as StdError;
use std::fmt;

use reqwest::StatusCode;

/// Which request of a chat resolution produced an unexpected status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStage {
    /// The "continue history" probe.
    Probe,
    /// The "create history" fallback.
    Create,
}

impl fmt::Display for ResolutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionStage::Probe => write!(f, "continue history"),
            ResolutionStage::Create => write!(f, "create history"),
        }
    }
}

/// Errors surfaced by [`crate::Client`] and the types it is built from.
///
/// Every operation either completes fully or returns one of these without
/// touching session state. Nothing is retried internally.
#[derive(Debug)]
pub enum ClientError {
    /// The operation was invoked in the wrong session state, e.g.
    /// authenticating twice or calling a gated endpoint while signed out.
    Precondition(&'static str),

    /// A caller-supplied argument was malformed (typically empty).
    Validation(String),

    /// The service answered with a status other than the one expected.
    Transport {
        operation: &'static str,
        status: StatusCode,
    },

    /// A chat resolution request answered with an unexpected status.
    Resolution {
        stage: ResolutionStage,
        status: StatusCode,
    },

    /// Authentication was rejected or could not be completed.
    Auth {
        reason: String,
        source: Option<reqwest::Error>,
    },

    /// The request could not be sent or its body could not be read.
    Http(reqwest::Error),

    /// A successful response lacked the field the operation returns.
    MalformedResponse {
        operation: &'static str,
        detail: String,
    },
}

impl ClientError {
    pub(crate) fn auth(reason: impl Into<String>) -> Self {
        ClientError::Auth {
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn auth_transport(reason: impl Into<String>, source: reqwest::Error) -> Self {
        ClientError::Auth {
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// Returns the HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Transport { status, .. } | ClientError::Resolution { status, .. } => {
                Some(*status)
            }
            ClientError::Http(err) => err.status(),
            ClientError::Auth {
                source: Some(err), ..
            } => err.status(),
            _ => None,
        }
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, ClientError::Precondition(_))
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Precondition(msg) => write!(f, "{msg}"),
            ClientError::Validation(msg) => write!(f, "Invalid arguments: {msg}"),
            ClientError::Transport { operation, status } => {
                write!(f, "{operation} failed with status {status}")
            }
            ClientError::Resolution { stage, status } => {
                write!(f, "Could not resolve chat: {stage} returned status {status}")
            }
            ClientError::Auth { reason, .. } => write!(f, "Authentication failed: {reason}"),
            ClientError::Http(err) => write!(f, "HTTP request failed: {err}"),
            ClientError::MalformedResponse { operation, detail } => {
                write!(f, "{operation} returned an unexpected payload: {detail}")
            }
        }
    }
}

impl StdError for ClientError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ClientError::Http(err) => Some(err),
            ClientError::Auth {
                source: Some(err), ..
            } => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http(err)
    }
}
