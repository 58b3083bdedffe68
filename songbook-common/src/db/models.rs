//! Database models

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Song visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SongStatus {
    #[default]
    Public,
    Private,
}

impl SongStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SongStatus::Public => "public",
            SongStatus::Private => "private",
        }
    }
}

impl fmt::Display for SongStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SongStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "public" => Ok(SongStatus::Public),
            "private" => Ok(SongStatus::Private),
            other => Err(Error::InvalidSong(format!("unknown song status '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub guid: String,
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
    pub created_at: String,
}

impl User {
    /// "First Last", or whichever part is known
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

/// A stored song, owner unresolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub guid: String,
    /// Owner; written once at insert
    pub user_id: String,
    pub title: String,
    pub genre: Option<String>,
    pub lyrics: Option<String>,
    pub status: SongStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Song {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// A song joined with its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongWithOwner {
    pub song: Song,
    pub owner: User,
}

/// Validated user-supplied song fields.
///
/// The owner is deliberately absent: it comes from the session, never
/// from the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongDraft {
    pub title: String,
    pub genre: Option<String>,
    pub lyrics: Option<String>,
    pub status: SongStatus,
}

impl SongDraft {
    /// Validate raw form input.
    ///
    /// Title is trimmed and required. Blank optional fields become `None`.
    /// A missing status defaults to public; an unknown one is rejected.
    pub fn parse(
        title: Option<&str>,
        genre: Option<&str>,
        lyrics: Option<&str>,
        status: Option<&str>,
    ) -> Result<Self> {
        let title = title.map(str::trim).unwrap_or_default();
        if title.is_empty() {
            return Err(Error::InvalidSong("title is required".to_string()));
        }

        let status = match status.map(str::trim) {
            None | Some("") => SongStatus::default(),
            Some(raw) => raw.parse()?,
        };

        Ok(Self {
            title: title.to_string(),
            genre: non_blank(genre),
            lyrics: non_blank(lyrics),
            status,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Outcome of an owner-conditional update or delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    NotFound,
    NotOwner,
}
