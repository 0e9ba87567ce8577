//! Stateless HTTP request builder and response parser for the users API.
//!
//! # Design
//! `UserClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The host executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.
//!
//! All four operations share one endpoint; the method and the JSON body
//! select the action.

use serde::Serialize;

use crate::error::{ApiError, Operation};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, TransportError};
use crate::types::{CreateUser, DeleteUser, UpdateUser, User, UserId};

/// Path appended to the base URL for every operation.
pub const USERS_PATH: &str = "/users.php";

/// Synchronous, stateless client for the users API.
#[derive(Debug, Clone)]
pub struct UserClient {
    base_url: String,
}

impl UserClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}{USERS_PATH}", self.base_url)
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.request(HttpMethod::Get, None)
    }

    pub fn build_create_user(&self, input: &CreateUser) -> Result<HttpRequest, ApiError> {
        Ok(self.request(HttpMethod::Post, Some(encode(input)?)))
    }

    pub fn build_update_user(&self, input: &UpdateUser) -> Result<HttpRequest, ApiError> {
        Ok(self.request(HttpMethod::Put, Some(encode(input)?)))
    }

    pub fn build_delete_user(&self, id: UserId) -> Result<HttpRequest, ApiError> {
        Ok(self.request(HttpMethod::Delete, Some(encode(&DeleteUser { id })?)))
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        check_status(&response, Operation::List)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Parse the response to a create, update or delete. Any 2xx succeeds and
    /// the body is ignored.
    pub fn parse_mutation(&self, operation: Operation, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, operation)
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.parse_mutation(Operation::Create, response)
    }

    pub fn parse_update_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.parse_mutation(Operation::Update, response)
    }

    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.parse_mutation(Operation::Delete, response)
    }

    fn request(&self, method: HttpMethod, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path: self.endpoint(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        }
    }
}

/// Lift a host-side transport failure into the error of the operation that
/// was in flight.
pub fn transport_failure(operation: Operation, error: TransportError) -> ApiError {
    ApiError::Transport {
        operation,
        message: error.0,
    }
}

fn encode<T: Serialize>(input: &T) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::Encode(e.to_string()))
}

/// Map a non-2xx status to `FetchFailed`, keeping the server's explanation
/// when the body carries one.
fn check_status(response: &HttpResponse, operation: Operation) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::FetchFailed {
        operation,
        status: response.status,
        detail: server_message(&response.body),
    })
}

/// Extract `message` or `error` from a JSON object body.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}
