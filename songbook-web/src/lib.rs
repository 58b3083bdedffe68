//! songbook-web library
//!
//! Session-gated song sharing: the song resource controller, the owner's
//! dashboard, and the HTML views they render.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;

pub mod api;
pub mod error;
pub mod session;
pub mod views;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
///
/// Everything except the landing page and `/health` sits behind the
/// session gate. `sessions` loads the session each request carries.
pub fn build_router(state: AppState, sessions: SessionManagerLayer<SqliteStore>) -> Router {
    use axum::middleware;
    use axum::routing::get;

    // Protected routes (require a session)
    let protected = Router::new()
        .route("/songs", get(api::list_public_songs).post(api::create_song))
        .route("/songs/add", get(api::add_song_page))
        .route("/songs/edit/:id", get(api::edit_song_page))
        .route("/songs/user/:user_id", get(api::list_user_songs))
        .route(
            "/songs/:id",
            get(api::show_song)
                .put(api::update_song)
                .delete(api::delete_song)
                .post(api::override_song_method),
        )
        .route("/dashboard", get(api::dashboard))
        .route("/logout", get(api::logout))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_session,
        ));

    // Public routes (no session)
    let public = Router::new()
        .route("/", get(api::landing_page))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .fallback(api::not_found_page)
        .layer(sessions)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
