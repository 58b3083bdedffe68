//! HTTP handlers for songbook-web

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod songs;
pub mod ui;

pub use auth::{logout, require_session, CurrentUser};
pub use dashboard::dashboard;
pub use health::health_routes;
pub use songs::{
    add_song_page, create_song, delete_song, edit_song_page, list_public_songs, list_user_songs,
    override_song_method, show_song, update_song,
};
pub use ui::{landing_page, not_found_page};
