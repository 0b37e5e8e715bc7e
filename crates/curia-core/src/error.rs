//! Error types for the curia toolkit.
//!
//! One flat taxonomy covers every failure the engine and its transports can
//! produce. Remote failures are converted into these kinds at the transport
//! boundary; nothing else leaks upward.

use thiserror::Error;

/// The unified error type for curia operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure (DNS, TLS, connection, timeout, 5xx).
    #[error("network error: {message}")]
    Network { message: String },

    /// Expired or invalid session; the caller must re-authenticate.
    #[error("authentication required: {message}")]
    Auth { message: String },

    /// The target identifier is absent server-side.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The server rejected a patch.
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// A mutation for the same identifier is already pending.
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// Programmer error, fatal to the calling operation.
    #[error("precondition violated: {message}")]
    Precondition { message: String },

    /// Requested page outside `1..=total`.
    #[error("page {page} out of range, total pages {total}")]
    OutOfRange { page: usize, total: usize },
}

impl Error {
    pub fn network(message: impl Into<String>) -> Self {
        Error::Network {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Error::Auth {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Error::Conflict {
            message: message.into(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Error::Precondition {
            message: message.into(),
        }
    }

    /// Returns true for failures that should force re-authentication.
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth { .. })
    }

    /// The single human-readable message shown to the operator.
    ///
    /// Server-supplied validation text is surfaced verbatim; everything else
    /// gets a fixed phrasing so a transport hiccup never dumps internals
    /// into the terminal.
    pub fn user_message(&self) -> String {
        match self {
            Error::Network { .. } => {
                "Something went wrong talking to the server. Please try again.".to_string()
            }
            Error::Auth { .. } => "Your session has expired. Please sign in again.".to_string(),
            Error::NotFound { .. } => "Already removed.".to_string(),
            Error::Validation { message } => {
                if message.is_empty() {
                    "The server rejected the change.".to_string()
                } else {
                    message.clone()
                }
            }
            Error::Conflict { .. } => "Operation already in progress.".to_string(),
            Error::Precondition { message } => format!("Internal error: {message}"),
            Error::OutOfRange { .. } => "That page does not exist.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_verbatim() {
        let err = Error::validation("title is required");
        assert_eq!(err.user_message(), "title is required");
    }

    #[test]
    fn empty_validation_message_falls_back() {
        let err = Error::validation("");
        assert_eq!(err.user_message(), "The server rejected the change.");
    }

    #[test]
    fn network_message_is_generic() {
        let err = Error::network("connection reset by peer");
        assert!(!err.user_message().contains("peer"));
    }

    #[test]
    fn auth_detection() {
        assert!(Error::auth("expired").is_auth());
        assert!(!Error::network("down").is_auth());
    }
}
