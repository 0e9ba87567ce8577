use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("base URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Error)]
pub enum HostError {
    /// The session's event loop is no longer running.
    #[error("session closed")]
    Closed,

    #[error("session task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
