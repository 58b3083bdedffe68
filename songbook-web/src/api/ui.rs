//! Public pages

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::views;

/// GET /
///
/// Where unauthenticated requests are redirected.
pub async fn landing_page() -> Html<String> {
    Html(views::landing::page())
}

/// Fallback for unknown routes
pub async fn not_found_page() -> Response {
    (StatusCode::NOT_FOUND, Html(views::errors::not_found_page())).into_response()
}
