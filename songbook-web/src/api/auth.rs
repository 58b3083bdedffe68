//! Session gate
//!
//! Resolves the session to a user before any protected handler runs.
//! Requests without a live session are redirected to the landing page.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use songbook_common::db::users;
use tower_sessions::Session;
use tracing::{debug, info};

use crate::error::PageResult;
use crate::session::SESSION_USER_ID_KEY;
use crate::AppState;

/// The authenticated user, inserted into request extensions by
/// [`require_session`]
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: String,
}

/// Session middleware
///
/// Applied to protected routes only; `/` and `/health` do NOT use it.
pub async fn require_session(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> PageResult<Response> {
    let Some(user_id) = session.get::<String>(SESSION_USER_ID_KEY).await? else {
        debug!("No live session on {}", request.uri().path());
        return Ok(Redirect::to("/").into_response());
    };

    // The user may have been removed since the session was issued
    let Some(user) = users::find_user(&state.db, &user_id).await? else {
        debug!("Session for unknown user {} on {}", user_id, request.uri().path());
        session.flush().await?;
        return Ok(Redirect::to("/").into_response());
    };

    request.extensions_mut().insert(CurrentUser {
        id: user.guid,
        display_name: user.display_name,
    });

    Ok(next.run(request).await)
}

/// GET /logout
///
/// Deletes the session from the store and clears the cookie.
pub async fn logout(
    session: Session,
    Extension(user): Extension<CurrentUser>,
) -> PageResult<Redirect> {
    session.flush().await?;
    info!("User {} logged out", user.id);

    Ok(Redirect::to("/"))
}
