//! Session store and cookie settings
//!
//! Sessions are kept in the application database by
//! `tower-sessions-sqlx-store`. A session carries only the id of its user,
//! stored under [`SESSION_USER_ID_KEY`].

use std::collections::HashMap;

use songbook_common::{Error, Result};
use sqlx::SqlitePool;
use time::{Duration, OffsetDateTime};
use tower_sessions::cookie::SameSite;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::SqliteStore;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "songbook_session";

/// Session key holding the user's guid
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Open the session store, creating its table if needed
pub async fn open_store(pool: &SqlitePool) -> Result<SqliteStore> {
    let store = SqliteStore::new(pool.clone());
    store.migrate().await?;
    Ok(store)
}

/// Convert a configured lifetime in hours, refusing values that overflow
pub fn session_lifetime(hours: i64) -> Result<Duration> {
    hours
        .checked_mul(3600)
        .map(Duration::seconds)
        .ok_or_else(|| Error::Config(format!("session lifetime of {} hours is out of range", hours)))
}

pub fn session_layer(store: SqliteStore, lifetime: Duration) -> SessionManagerLayer<SqliteStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(lifetime))
}

/// Store a session for `user_id` that lives for `lifetime`.
///
/// Returns the id to present as the session cookie value.
pub async fn issue_session(store: &SqliteStore, user_id: &str, lifetime: Duration) -> Result<Id> {
    let expiry_date = OffsetDateTime::now_utc()
        .checked_add(lifetime)
        .ok_or_else(|| Error::Session("session expiry is out of range".to_string()))?;

    let mut record = Record {
        id: Id::default(),
        data: HashMap::from([(
            SESSION_USER_ID_KEY.to_string(),
            serde_json::Value::from(user_id),
        )]),
        expiry_date,
    };
    store
        .create(&mut record)
        .await
        .map_err(|e| Error::Session(e.to_string()))?;

    Ok(record.id)
}

/// Drop every expired session
pub async fn purge_expired(store: &SqliteStore) -> Result<()> {
    store
        .delete_expired()
        .await
        .map_err(|e| Error::Session(e.to_string()))
}
