//! User database operations

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use crate::db::models::User;
use crate::{time, Result};

/// Profile of a user as supplied when a session is issued
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
}

impl NewUser {
    /// A profile with only a display name
    pub fn named(display_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            ..Default::default()
        }
    }
}

const USER_COLUMNS: &str = "guid, display_name, first_name, last_name, image, created_at";

pub async fn insert_user(pool: &SqlitePool, new_user: &NewUser) -> Result<User> {
    let user = User {
        guid: Uuid::new_v4().to_string(),
        display_name: new_user.display_name.clone(),
        first_name: new_user.first_name.clone(),
        last_name: new_user.last_name.clone(),
        image: new_user.image.clone(),
        created_at: time::now_db(),
    };

    sqlx::query(
        r#"
        INSERT INTO users (guid, display_name, first_name, last_name, image, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.guid)
    .bind(&user.display_name)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.image)
    .bind(&user.created_at)
    .execute(pool)
    .await?;

    Ok(user)
}

/// Load the user a session points at
pub async fn find_user(pool: &SqlitePool, guid: &str) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {} FROM users WHERE guid = ?", USER_COLUMNS))
        .bind(guid)
        .fetch_optional(pool)
        .await?;

    row.map(|r| user_from_row(&r, "")).transpose()
}

/// Look a user up by display name, creating it if absent.
///
/// Profile fields given for an existing user replace the stored ones;
/// fields left out keep their value.
pub async fn find_or_create_user(pool: &SqlitePool, profile: &NewUser) -> Result<User> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET first_name = COALESCE(?1, first_name),
            last_name = COALESCE(?2, last_name),
            image = COALESCE(?3, image)
        WHERE display_name = ?4
        "#,
    )
    .bind(&profile.first_name)
    .bind(&profile.last_name)
    .bind(&profile.image)
    .bind(&profile.display_name)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return insert_user(pool, profile).await;
    }

    let row = sqlx::query(&format!("SELECT {} FROM users WHERE display_name = ?", USER_COLUMNS))
        .bind(&profile.display_name)
        .fetch_one(pool)
        .await?;
    user_from_row(&row, "")
}

/// Map a row to a `User`; `prefix` selects aliased columns from a join
/// (e.g. `"owner_"` for `owner_display_name`).
pub(crate) fn user_from_row(row: &SqliteRow, prefix: &str) -> Result<User> {
    let col = |name: &str| format!("{}{}", prefix, name);
    Ok(User {
        guid: row.try_get(col("guid").as_str())?,
        display_name: row.try_get(col("display_name").as_str())?,
        first_name: row.try_get(col("first_name").as_str())?,
        last_name: row.try_get(col("last_name").as_str())?,
        image: row.try_get(col("image").as_str())?,
        created_at: row.try_get(col("created_at").as_str())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::init_memory_database;

    #[tokio::test]
    async fn test_find_or_create_is_stable() {
        let pool = init_memory_database().await.unwrap();

        let first = find_or_create_user(&pool, &NewUser::named("Ann")).await.unwrap();
        let second = find_or_create_user(&pool, &NewUser::named("Ann")).await.unwrap();
        assert_eq!(first.guid, second.guid);

        let loaded = find_user(&pool, &first.guid).await.unwrap().unwrap();
        assert_eq!(loaded.display_name, "Ann");
    }

    #[tokio::test]
    async fn test_profile_fields_are_written_and_kept() {
        let pool = init_memory_database().await.unwrap();

        let created = find_or_create_user(
            &pool,
            &NewUser {
                display_name: "Ann".to_string(),
                first_name: Some("Ann".to_string()),
                last_name: Some("Lee".to_string()),
                image: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(created.last_name.as_deref(), Some("Lee"));

        let updated = find_or_create_user(
            &pool,
            &NewUser {
                image: Some("/img/ann.png".to_string()),
                ..NewUser::named("Ann")
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.guid, created.guid);
        assert_eq!(updated.first_name.as_deref(), Some("Ann"));
        assert_eq!(updated.last_name.as_deref(), Some("Lee"));
        assert_eq!(updated.image.as_deref(), Some("/img/ann.png"));
    }

    #[tokio::test]
    async fn test_find_missing_user() {
        let pool = init_memory_database().await.unwrap();
        assert!(find_user(&pool, "nobody").await.unwrap().is_none());
    }
}
