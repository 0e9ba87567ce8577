//! Headless core of the users admin page.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps all page state
//! (the cached user list, in-flight request status, the form, search and
//! delete confirmation) as plain data driven by messages.
//!
//! # Design
//! - `UserClient` is stateless; it holds only `base_url`.
//! - `UserStore` returns `Effect`s instead of performing requests; the host
//!   executes them and reports each outcome back by `RequestId`.
//! - `UsersView` turns `Message`s into `Intent`s and renders a `Screen`.
//! - `UsersApp` pairs one store with one view for the lifetime of a page.

pub mod app;
pub mod card;
pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod search;
pub mod store;
pub mod types;
pub mod view;

pub use app::{Snapshot, UsersApp};
pub use card::{CardAction, CardView};
pub use client::UserClient;
pub use error::{ApiError, Operation};
pub use form::{Field, FormError, FormView, UserForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse, TransportError};
pub use store::{Effect, Notification, RequestId, Severity, UserStore};
pub use types::{CreateUser, DeleteUser, UpdateUser, User, UserId};
pub use view::{Body, ConfirmDialog, EmptyState, Intent, ListScreen, Message, Mode, Screen, UsersView};
