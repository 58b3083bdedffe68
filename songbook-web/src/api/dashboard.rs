//! Owner dashboard
//!
//! Where create, update and delete land: every song of the session user,
//! private ones included, newest first.

use axum::{extract::State, response::Html, Extension};
use songbook_common::db::songs::{self, SongFilter};

use crate::api::auth::CurrentUser;
use crate::error::PageResult;
use crate::views;
use crate::AppState;

/// GET /dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> PageResult<Html<String>> {
    let songs = songs::list_songs(&state.db, &SongFilter::owned_by(&user.id)).await?;
    Ok(Html(views::dashboard::page(&user, &songs)))
}
