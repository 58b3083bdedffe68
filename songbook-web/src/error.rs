//! Page-level error handling
//!
//! Callers only ever see two failures: the not-found view and the generic
//! internal-error view. Everything that lands on the latter is logged first.

use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::views;

#[derive(Debug, Error)]
pub enum PageError {
    /// Resource not found (404 view)
    #[error("Resource not found")]
    NotFound,

    /// Body could not be read as a form
    #[error("Unreadable form: {0}")]
    Form(#[from] FormRejection),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Persistence, validation or any other failure
    #[error(transparent)]
    Common(#[from] songbook_common::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        if let PageError::NotFound = self {
            return (StatusCode::NOT_FOUND, Html(views::errors::not_found_page())).into_response();
        }

        error!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(views::errors::internal_error_page()),
        )
            .into_response()
    }
}

/// Result type for page handlers
pub type PageResult<T> = Result<T, PageError>;
