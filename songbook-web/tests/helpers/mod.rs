//! Shared helpers for songbook-web integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use songbook_common::db::init::init_memory_database;
use songbook_common::db::users::{self, NewUser};
use songbook_common::db::{songs, Song, SongDraft, SongStatus, User};
use songbook_web::session::{self, SESSION_COOKIE};
use songbook_web::{build_router, AppState};
use sqlx::SqlitePool;
use time::Duration;
use tower_sessions_sqlx_store::SqliteStore;

/// App backed by a fresh in-memory database
pub async fn setup() -> (Router, SqlitePool) {
    let pool = init_memory_database()
        .await
        .expect("Should create in-memory database");
    let store = session::open_store(&pool)
        .await
        .expect("Should create session table");
    let app = build_router(
        AppState::new(pool.clone()),
        session::session_layer(store, Duration::hours(1)),
    );
    (app, pool)
}

/// Issue a session for `user_id` lasting `lifetime`; returns a `Cookie` value
pub async fn session_cookie(pool: &SqlitePool, user_id: &str, lifetime: Duration) -> String {
    let store = SqliteStore::new(pool.clone());
    let id = session::issue_session(&store, user_id, lifetime).await.unwrap();
    format!("{}={}", SESSION_COOKIE, id)
}

/// Create a user with a live session; returns the user and a `Cookie` value
pub async fn login(pool: &SqlitePool, name: &str) -> (User, String) {
    let user = users::find_or_create_user(pool, &NewUser::named(name)).await.unwrap();
    let cookie = session_cookie(pool, &user.guid, Duration::hours(1)).await;
    (user, cookie)
}

/// Insert a song directly through the repository
pub async fn seed_song(pool: &SqlitePool, owner: &User, title: &str, status: SongStatus) -> Song {
    let draft = SongDraft {
        title: title.to_string(),
        genre: None,
        lyrics: Some(format!("lyrics of {}", title)),
        status,
    };
    songs::insert_song(pool, &owner.guid, &draft).await.unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    request("GET", uri, cookie, None)
}

pub fn form(method: &str, uri: &str, cookie: &str, body: &str) -> Request<Body> {
    request(method, uri, Some(cookie), Some(body))
}

pub fn request(method: &str, uri: &str, cookie: Option<&str>, body: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Value of the `Location` header
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Should have a Location header")
        .to_str()
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Should read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}

/// Request whose body is JSON, which the form extractor rejects
pub fn json_request(method: &str, uri: &str, cookie: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
