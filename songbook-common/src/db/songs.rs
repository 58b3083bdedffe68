//! Song database operations
//!
//! Ownership is enforced inside the mutating statements themselves
//! (`WHERE guid = ? AND user_id = ?`), so there is no gap between the
//! owner check and the write.

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use crate::db::models::{Mutation, Song, SongDraft, SongStatus, SongWithOwner};
use crate::db::users::user_from_row;
use crate::{time, Error, Result};

const SELECT_WITH_OWNER: &str = r#"
    SELECT s.guid, s.user_id, s.title, s.genre, s.lyrics, s.status,
           s.created_at, s.updated_at,
           u.guid AS owner_guid,
           u.display_name AS owner_display_name,
           u.first_name AS owner_first_name,
           u.last_name AS owner_last_name,
           u.image AS owner_image,
           u.created_at AS owner_created_at
    FROM songs s
    JOIN users u ON u.guid = s.user_id
"#;

/// Filter for song listings; `None` fields match everything
#[derive(Debug, Clone, Default)]
pub struct SongFilter {
    pub owner: Option<String>,
    pub status: Option<SongStatus>,
}

impl SongFilter {
    /// All public songs
    pub fn public() -> Self {
        Self {
            owner: None,
            status: Some(SongStatus::Public),
        }
    }

    /// Public songs of one owner
    pub fn public_by(owner: &str) -> Self {
        Self {
            owner: Some(owner.to_string()),
            status: Some(SongStatus::Public),
        }
    }

    /// Every song of one owner, any status
    pub fn owned_by(owner: &str) -> Self {
        Self {
            owner: Some(owner.to_string()),
            status: None,
        }
    }
}

/// Insert a new song owned by `owner`
pub async fn insert_song(pool: &SqlitePool, owner: &str, draft: &SongDraft) -> Result<Song> {
    let now = time::now_db();
    let song = Song {
        guid: Uuid::new_v4().to_string(),
        user_id: owner.to_string(),
        title: draft.title.clone(),
        genre: draft.genre.clone(),
        lyrics: draft.lyrics.clone(),
        status: draft.status,
        created_at: now.clone(),
        updated_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO songs (guid, user_id, title, genre, lyrics, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&song.guid)
    .bind(&song.user_id)
    .bind(&song.title)
    .bind(&song.genre)
    .bind(&song.lyrics)
    .bind(song.status.as_str())
    .bind(&song.created_at)
    .bind(&song.updated_at)
    .execute(pool)
    .await?;

    Ok(song)
}

/// Load a song without resolving its owner
pub async fn find_song(pool: &SqlitePool, guid: &str) -> Result<Option<Song>> {
    let row = sqlx::query(
        r#"
        SELECT guid, user_id, title, genre, lyrics, status, created_at, updated_at
        FROM songs
        WHERE guid = ?
        "#,
    )
    .bind(guid)
    .fetch_optional(pool)
    .await?;

    row.map(|r| song_from_row(&r)).transpose()
}

/// Load a song joined with its owner
pub async fn find_song_with_owner(pool: &SqlitePool, guid: &str) -> Result<Option<SongWithOwner>> {
    let sql = format!("{} WHERE s.guid = ?", SELECT_WITH_OWNER);
    let row = sqlx::query(&sql)
        .bind(guid)
        .fetch_optional(pool)
        .await?;

    row.map(|r| song_with_owner_from_row(&r)).transpose()
}

/// List songs matching `filter`, newest first
pub async fn list_songs(pool: &SqlitePool, filter: &SongFilter) -> Result<Vec<SongWithOwner>> {
    // rowid breaks ties between songs created in the same millisecond
    let sql = format!(
        "{} WHERE (?1 IS NULL OR s.user_id = ?1) AND (?2 IS NULL OR s.status = ?2)
         ORDER BY s.created_at DESC, s.rowid DESC",
        SELECT_WITH_OWNER
    );

    let rows = sqlx::query(&sql)
        .bind(filter.owner.as_deref())
        .bind(filter.status.map(|s| s.as_str()))
        .fetch_all(pool)
        .await?;

    rows.iter().map(song_with_owner_from_row).collect()
}

/// Replace a song's user-supplied fields if `requester` owns it.
///
/// The owner column is never written.
pub async fn update_owned_song(
    pool: &SqlitePool,
    guid: &str,
    requester: &str,
    draft: &SongDraft,
) -> Result<Mutation> {
    let result = sqlx::query(
        r#"
        UPDATE songs
        SET title = ?, genre = ?, lyrics = ?, status = ?, updated_at = ?
        WHERE guid = ? AND user_id = ?
        "#,
    )
    .bind(&draft.title)
    .bind(&draft.genre)
    .bind(&draft.lyrics)
    .bind(draft.status.as_str())
    .bind(time::now_db())
    .bind(guid)
    .bind(requester)
    .execute(pool)
    .await?;

    if result.rows_affected() > 0 {
        return Ok(Mutation::Applied);
    }
    classify_miss(pool, guid, requester).await
}

/// Hard-delete a song if `requester` owns it
pub async fn delete_owned_song(pool: &SqlitePool, guid: &str, requester: &str) -> Result<Mutation> {
    let result = sqlx::query("DELETE FROM songs WHERE guid = ? AND user_id = ?")
        .bind(guid)
        .bind(requester)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        return Ok(Mutation::Applied);
    }
    classify_miss(pool, guid, requester).await
}

/// Decide how a write by `requester` to `guid` turns out.
///
/// Called when a conditional write touched no rows, and before reporting a
/// bad form, so ownership is judged in one place. `Applied` means the
/// requester owns the song.
pub async fn classify_miss(pool: &SqlitePool, guid: &str, requester: &str) -> Result<Mutation> {
    let owner: Option<String> = sqlx::query_scalar("SELECT user_id FROM songs WHERE guid = ?")
        .bind(guid)
        .fetch_optional(pool)
        .await?;

    Ok(match owner {
        None => Mutation::NotFound,
        Some(owner) if owner == requester => Mutation::Applied,
        Some(_) => Mutation::NotOwner,
    })
}

fn song_from_row(row: &SqliteRow) -> Result<Song> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<SongStatus>()
        .map_err(|e| Error::Corrupt(format!("song row: {}", e)))?;

    Ok(Song {
        guid: row.try_get("guid")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        genre: row.try_get("genre")?,
        lyrics: row.try_get("lyrics")?,
        status,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn song_with_owner_from_row(row: &SqliteRow) -> Result<SongWithOwner> {
    Ok(SongWithOwner {
        song: song_from_row(row)?,
        owner: user_from_row(row, "owner_")?,
    })
}
