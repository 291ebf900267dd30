//! Error types for the Inertia adapter.
//!
//! # Design Decisions
//! - Configuration-class failures (templates, missing root view) surface from
//!   `Inertia::new` so the process refuses to start
//! - Request-time failures map to a 500 with a minimal body
//! - Soft failures (manifest unreadable) never reach this type on the request path

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Errors raised by the adapter.
#[derive(Debug, thiserror::Error)]
pub enum InertiaError {
    #[error("failed to read templates from {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse template {view}: {message}")]
    TemplateParse { view: String, message: String },

    #[error("view not registered: {0}")]
    MissingView(String),

    #[error("failed to render {view}: {message}")]
    Render { view: String, message: String },

    #[error("failed to load manifest {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("inertia middleware is not installed for this route")]
    MissingContext,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl InertiaError {
    /// The status code reported to the client for this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for InertiaError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(error = %self, status = status.as_u16(), "Inertia request failed");
        let reason = status.canonical_reason().unwrap_or("Error");
        (status, reason).into_response()
    }
}
