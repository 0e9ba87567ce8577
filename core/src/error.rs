//! Error types for the users API client.
//!
//! # Design
//! Every non-2xx response is a `FetchFailed`, whatever the status. Callers
//! only ever need a human-readable message out of it, so the variant keeps
//! the status for logs and the server's own explanation when one was sent.

use thiserror::Error;

/// The four logical operations against the remote collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Message used when a request of this kind gets a non-2xx response
    /// without an explanation in the body.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch users",
            Operation::Create => "Failed to create user",
            Operation::Update => "Failed to update user",
            Operation::Delete => "Failed to delete user",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Operation::List => 0,
            Operation::Create => 1,
            Operation::Update => 2,
            Operation::Delete => 3,
        }
    }
}

/// Errors returned by `UserClient` parse and build methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a status outside 200..=299.
    #[error("{}", .detail.as_deref().unwrap_or(.operation.failure_message()))]
    FetchFailed {
        operation: Operation,
        status: u16,
        detail: Option<String>,
    },

    /// The request never got a response.
    #[error("{message}")]
    Transport { operation: Operation, message: String },

    /// The list body was not a JSON array of users.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("could not encode request: {0}")]
    Encode(String),
}
