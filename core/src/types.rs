//! Domain DTOs for the users API.
//!
//! # Design
//! These types mirror the remote service's JSON schema but are defined
//! independently of the mock-server crate; integration tests catch drift.
//! Timestamps are kept as the server formats them. The client never
//! interprets them, so a server-side format change cannot break decoding.

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a user.
pub type UserId = i64;

/// A single user returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Request payload for creating a new user. The id is assigned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

/// Request payload for replacing the name and email of an existing user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl UpdateUser {
    /// Merge freshly submitted fields with the id of the user being edited.
    pub fn from_submission(id: UserId, fields: CreateUser) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
        }
    }
}

/// Request payload for deleting a user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteUser {
    pub id: UserId,
}
