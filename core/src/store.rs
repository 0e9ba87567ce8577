//! Query/mutation coordinator for the user list.
//!
//! # Design
//! `UserStore` is the single owner of the cached user list and of every
//! in-flight request's bookkeeping. It never performs I/O: each entry point
//! returns the `Effect`s the host must carry out, and the host reports each
//! request's outcome back through `resolve`, in whatever order responses
//! arrive.
//!
//! The list is only ever replaced wholesale by a successful fetch, so the
//! last fetch to resolve wins. A successful mutation invalidates the list by
//! issuing a fresh fetch alongside any fetch that is already running.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::client::{transport_failure, UserClient};
use crate::error::{ApiError, Operation};
use crate::http::{HttpRequest, HttpResponse, TransportError};
use crate::types::{CreateUser, UpdateUser, User, UserId};

/// Identifies one issued request until the host resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Work the host must carry out on behalf of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Execute `request` and hand the outcome back via `UserStore::resolve`.
    Send { id: RequestId, request: HttpRequest },
    /// Show a transient notification.
    Notify(Notification),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A transient, user-visible message about the outcome of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub operation: Operation,
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

impl Notification {
    /// Success notification for a mutation. List fetches succeed silently,
    /// so there is none for `Operation::List`.
    pub fn success(operation: Operation) -> Option<Self> {
        let description = match operation {
            Operation::List => return None,
            Operation::Create => "User created successfully.",
            Operation::Update => "User updated successfully.",
            Operation::Delete => "User deleted successfully.",
        };
        Some(Self {
            operation,
            severity: Severity::Success,
            title: "Success!".to_string(),
            description: description.to_string(),
        })
    }

    /// Failure notification carrying the error's message, or the operation's
    /// fallback when the error has nothing to say.
    pub fn failure(operation: Operation, error: &ApiError) -> Self {
        let message = error.to_string();
        let description = if message.trim().is_empty() {
            fallback_message(operation).to_string()
        } else {
            message
        };
        Self {
            operation,
            severity: Severity::Error,
            title: "Error".to_string(),
            description,
        }
    }
}

fn fallback_message(operation: Operation) -> &'static str {
    match operation {
        Operation::List => "Error loading users.",
        Operation::Create => "Error creating user.",
        Operation::Update => "Error updating user.",
        Operation::Delete => "Error deleting user.",
    }
}

/// In-memory cache of the remote user list plus per-operation status.
#[derive(Debug)]
pub struct UserStore {
    client: UserClient,
    users: Vec<User>,
    settled: bool,
    error: Option<ApiError>,
    in_flight: HashMap<RequestId, Operation>,
    pending: [usize; 4],
    next_id: u64,
}

impl UserStore {
    pub fn new(client: UserClient) -> Self {
        Self {
            client,
            users: Vec::new(),
            settled: false,
            error: None,
            in_flight: HashMap::new(),
            pending: [0; 4],
            next_id: 0,
        }
    }

    pub fn client(&self) -> &UserClient {
        &self.client
    }

    /// Initial fetch for a freshly shown page.
    pub fn mount(&mut self) -> Vec<Effect> {
        self.list()
    }

    pub fn list(&mut self) -> Vec<Effect> {
        let request = self.client.build_list_users();
        vec![self.send(Operation::List, request)]
    }

    pub fn create(&mut self, input: CreateUser) -> Vec<Effect> {
        let request = self.client.build_create_user(&input);
        self.mutate(Operation::Create, request)
    }

    pub fn update(&mut self, input: UpdateUser) -> Vec<Effect> {
        let request = self.client.build_update_user(&input);
        self.mutate(Operation::Update, request)
    }

    pub fn remove(&mut self, id: UserId) -> Vec<Effect> {
        let request = self.client.build_delete_user(id);
        self.mutate(Operation::Delete, request)
    }

    /// Apply the outcome of a request issued earlier through an `Effect::Send`.
    pub fn resolve(
        &mut self,
        id: RequestId,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Vec<Effect> {
        let Some(operation) = self.in_flight.remove(&id) else {
            warn!(request = id.0, "ignoring outcome of unknown request");
            return Vec::new();
        };
        self.pending[operation.index()] -= 1;

        let result = outcome
            .map_err(|e| transport_failure(operation, e))
            .and_then(|response| match operation {
                Operation::List => self.client.parse_list_users(response).map(Some),
                _ => self.client.parse_mutation(operation, response).map(|()| None),
            });
        debug!(request = id.0, ?operation, ok = result.is_ok(), "request resolved");

        match (operation, result) {
            (Operation::List, Ok(users)) => {
                self.users = users.unwrap_or_default();
                self.error = None;
                self.settled = true;
                Vec::new()
            }
            (Operation::List, Err(error)) => {
                warn!(%error, "user list fetch failed");
                self.settled = true;
                let effect = Effect::Notify(Notification::failure(operation, &error));
                self.error = Some(error);
                vec![effect]
            }
            (_, Ok(_)) => {
                info!(?operation, "mutation succeeded, refreshing list");
                let mut effects: Vec<Effect> = Notification::success(operation).map(Effect::Notify).into_iter().collect();
                effects.extend(self.list());
                effects
            }
            (_, Err(error)) => {
                warn!(?operation, %error, "mutation failed");
                vec![Effect::Notify(Notification::failure(operation, &error))]
            }
        }
    }

    /// Cached users, empty until the first successful fetch.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// True until the first list fetch resolves, successfully or not.
    pub fn is_loading(&self) -> bool {
        !self.settled
    }

    /// The most recent list fetch failure, cleared by the next success.
    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn is_pending(&self, operation: Operation) -> bool {
        self.pending[operation.index()] > 0
    }

    pub fn is_creating(&self) -> bool {
        self.is_pending(Operation::Create)
    }

    pub fn is_updating(&self) -> bool {
        self.is_pending(Operation::Update)
    }

    pub fn is_deleting(&self) -> bool {
        self.is_pending(Operation::Delete)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    fn mutate(&mut self, operation: Operation, request: Result<HttpRequest, ApiError>) -> Vec<Effect> {
        match request {
            Ok(request) => vec![self.send(operation, request)],
            Err(error) => {
                warn!(?operation, %error, "request not sent");
                vec![Effect::Notify(Notification::failure(operation, &error))]
            }
        }
    }

    fn send(&mut self, operation: Operation, request: HttpRequest) -> Effect {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.in_flight.insert(id, operation);
        self.pending[operation.index()] += 1;
        debug!(request = id.0, ?operation, method = request.method.as_str(), "request issued");
        Effect::Send { id, request }
    }
}
