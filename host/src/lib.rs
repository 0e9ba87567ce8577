//! Runtime for the users admin page.
//!
//! # Overview
//! `users-core` decides what to do; this crate does it. A `Session` runs one
//! page's event loop on a tokio task, executes the core's requests through a
//! `Transport`, and publishes snapshots and notifications to subscribers.
//!
//! # Design
//! - Every state change happens on the event loop task, one input at a
//!   time, so the core state needs no locking.
//! - Requests run on the blocking pool and post their outcome back to the
//!   loop as an ordinary input. Nothing orders or cancels them.
//! - `Transport` is the only seam; tests swap in scripted transports.

pub mod config;
pub mod error;
pub mod session;
pub mod transport;

pub use config::HostConfig;
pub use error::{ConfigError, HostError};
pub use session::Session;
pub use transport::{Transport, UreqTransport};
