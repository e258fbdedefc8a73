//! Error types for Project Hub operations.

use thiserror::Error;

/// Failure talking to the projects API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected payload shape: {0}")]
    UnexpectedShape(String),
}

impl ApiError {
    /// Whether retrying the same request may succeed.
    ///
    /// Transport failures and 5xx responses are transient; client errors and
    /// contract violations are not.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { status, .. } => *status >= 500,
            ApiError::Decode(_) | ApiError::UnexpectedShape(_) => false,
        }
    }
}

/// Loading the project list failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to load projects: {0}")]
    Api(#[from] ApiError),

    #[error("view was torn down before the project list arrived")]
    Detached,
}

/// Creating a project failed or was refused.
#[derive(Debug, Error)]
pub enum CreateError {
    #[error("failed to create project: {0}")]
    Api(#[from] ApiError),

    #[error("project name is required")]
    NameRequired,

    #[error("a project is already being created")]
    InFlight,

    #[error("view was torn down before the project was created")]
    Detached,
}
