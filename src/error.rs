// src/error.rs
//! Error types for recipe synchronization
//!
//! Every failure the client can hit falls into one of three user-facing
//! kinds (see [`ErrorKind`]): a validation failure caught before any request
//! is made, an HTTP failure where the backend answered with an unexpected
//! status, and a transport failure where no response was obtained at all.
//! The remaining variants cover local configuration and session storage.

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// A user-triggered action against the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Fetch,
    Search,
    Create,
    Update,
    Delete,
    Logout,
    Register,
}

impl Operation {
    /// Alert text shown when the backend answers with a non-success status
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Fetch => "Failed to fetch recipes.",
            Operation::Search => "Failed to search recipes.",
            Operation::Create => "Failed to add recipe.",
            Operation::Update => "Failed to update recipe.",
            Operation::Delete => "Failed to delete recipe.",
            Operation::Logout => "Logout failed.",
            Operation::Register => "Registration failed. Please try again.",
        }
    }

    /// Alert text shown when the request never completed
    pub fn transport_message(self) -> &'static str {
        match self {
            Operation::Fetch => "Error fetching recipes.",
            Operation::Search => "Error searching recipes.",
            Operation::Create => "Error adding recipe.",
            Operation::Update => "Error updating recipe.",
            Operation::Delete => "Error deleting recipe.",
            Operation::Logout => "Error during logout.",
            Operation::Register => "An unexpected error occurred during registration.",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Fetch => write!(f, "fetch"),
            Operation::Search => write!(f, "search"),
            Operation::Create => write!(f, "create"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
            Operation::Logout => write!(f, "logout"),
            Operation::Register => write!(f, "register"),
        }
    }
}

/// The three user-facing failure categories, plus local failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any request was sent
    Validation,
    /// The backend answered with a status the operation does not accept
    Http,
    /// No usable response was obtained
    Transport,
    /// Configuration or session storage problem on this machine
    Local,
}

/// Failure to obtain a response from the backend
#[derive(Error, Debug)]
pub enum TransportError {
    /// reqwest could not complete the exchange
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Any other transport-level failure (used by test doubles)
    #[error("{0}")]
    Other(String),
}

/// Errors produced by the sync and registration modules
#[derive(Error, Debug)]
pub enum Error {
    /// A required field was empty or inputs were inconsistent
    #[error("{message}")]
    Validation { message: String },

    /// Name lookup against the local snapshot found nothing
    #[error("Recipe not found: '{name}'")]
    NotFound { name: String },

    /// The backend rejected the request
    #[error("{operation} failed with HTTP {status}")]
    Http {
        operation: Operation,
        status: StatusCode,
    },

    /// Username or email already registered
    #[error("Username or email already exists")]
    Conflict,

    /// The request did not complete
    #[error("{operation} request did not complete: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: TransportError,
    },

    /// A request or response body was not valid JSON for its type
    #[error("{operation} JSON error: {source}")]
    Json {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session storage could not be read or written
    #[error("Session storage error: {0}")]
    Session(String),
}

impl Error {
    /// Build a validation error from a message
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// Which user-facing category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } | Error::NotFound { .. } => ErrorKind::Validation,
            Error::Http { .. } | Error::Conflict => ErrorKind::Http,
            Error::Transport { .. } | Error::Json { .. } => ErrorKind::Transport,
            Error::Config(_) | Error::Session(_) => ErrorKind::Local,
        }
    }

    /// Message suitable for a blocking alert
    ///
    /// HTTP status codes and transport causes are left out; they belong in
    /// the diagnostic log.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation { message } => message.clone(),
            Error::NotFound { .. } => "Recipe not found.".to_string(),
            Error::Http { operation, .. } => operation.failure_message().to_string(),
            Error::Conflict => "Username or email already exists.".to_string(),
            Error::Transport { operation, .. } | Error::Json { operation, .. } => {
                operation.transport_message().to_string()
            }
            Error::Config(_) | Error::Session(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(Error::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(
            Error::NotFound { name: "Soup".into() }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            Error::Http {
                operation: Operation::Create,
                status: StatusCode::INTERNAL_SERVER_ERROR
            }
            .kind(),
            ErrorKind::Http
        );
        assert_eq!(
            Error::Transport {
                operation: Operation::Fetch,
                source: TransportError::Other("connection refused".into()),
            }
            .kind(),
            ErrorKind::Transport
        );
        assert_eq!(Error::Config("bad".into()).kind(), ErrorKind::Local);
    }

    #[test]
    fn test_user_message_hides_status() {
        let err = Error::Http {
            operation: Operation::Update,
            status: StatusCode::FORBIDDEN,
        };
        assert_eq!(err.user_message(), "Failed to update recipe.");
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn test_transport_and_http_messages_differ() {
        for op in [
            Operation::Fetch,
            Operation::Search,
            Operation::Create,
            Operation::Update,
            Operation::Delete,
            Operation::Logout,
            Operation::Register,
        ] {
            assert_ne!(op.failure_message(), op.transport_message(), "{op}");
        }
    }

    #[test]
    fn test_not_found_message() {
        let err = Error::NotFound {
            name: "Pie".to_string(),
        };
        assert_eq!(err.user_message(), "Recipe not found.");
        assert!(err.to_string().contains("Pie"));
    }
}
