//! Song resource controller
//!
//! Each handler performs one persistence operation, then renders a view or
//! redirects. A non-owner touching someone else's song is not an error:
//! they are sent back to the public list.

use axum::{
    extract::{rejection::FormRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use songbook_common::db::songs::{self, SongFilter};
use songbook_common::db::{Mutation, SongDraft};
use tracing::{info, warn};

use crate::api::auth::CurrentUser;
use crate::error::{PageError, PageResult};
use crate::views;
use crate::AppState;

/// Fields posted by the add and edit forms.
///
/// Anything else in the body (an owner id, for instance) is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct SongForm {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub lyrics: Option<String>,
    pub status: Option<String>,
    /// Method override carried in the body
    #[serde(rename = "_method")]
    pub method: Option<String>,
}

impl SongForm {
    fn to_draft(&self) -> songbook_common::Result<SongDraft> {
        SongDraft::parse(
            self.title.as_deref(),
            self.genre.as_deref(),
            self.lyrics.as_deref(),
            self.status.as_deref(),
        )
    }
}

/// Method override carried in the query string (`?_method=PUT`)
#[derive(Debug, Deserialize)]
pub struct MethodOverride {
    #[serde(rename = "_method")]
    pub method: Option<String>,
}

/// GET /songs/add
pub async fn add_song_page(Extension(user): Extension<CurrentUser>) -> Html<String> {
    Html(views::songs::add_page(&user))
}

/// POST /songs
///
/// The owner is always the session user.
pub async fn create_song(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    form: Result<Form<SongForm>, FormRejection>,
) -> PageResult<Redirect> {
    let Form(form) = form?;
    let draft = form.to_draft()?;
    let song = songs::insert_song(&state.db, &user.id, &draft).await?;
    info!("User {} created song {}", user.id, song.guid);

    Ok(Redirect::to("/dashboard"))
}

/// GET /songs
///
/// Public songs, newest first.
pub async fn list_public_songs(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> PageResult<Html<String>> {
    let songs = songs::list_songs(&state.db, &SongFilter::public()).await?;
    Ok(Html(views::songs::index_page(&user, &songs)))
}

/// GET /songs/:id
pub async fn show_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<CurrentUser>,
) -> PageResult<Html<String>> {
    let song = songs::find_song_with_owner(&state.db, &id)
        .await?
        .ok_or(PageError::NotFound)?;

    Ok(Html(views::songs::show_page(&user, &song)))
}

/// GET /songs/edit/:id
pub async fn edit_song_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<CurrentUser>,
) -> PageResult<Response> {
    let song = songs::find_song(&state.db, &id)
        .await?
        .ok_or(PageError::NotFound)?;

    if !song.is_owned_by(&user.id) {
        warn!("User {} denied edit of song {}", user.id, id);
        return Ok(Redirect::to("/songs").into_response());
    }

    Ok(Html(views::songs::edit_page(&user, &song)).into_response())
}

/// PUT /songs/:id
///
/// An unreadable or invalid form only reaches the caller as a failure once
/// the song is known to exist and belong to them.
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<CurrentUser>,
    form: Result<Form<SongForm>, FormRejection>,
) -> PageResult<Response> {
    let draft = form
        .map_err(PageError::from)
        .and_then(|Form(form)| Ok(form.to_draft()?));

    let draft = match draft {
        Ok(draft) => draft,
        Err(err) => {
            return match songs::classify_miss(&state.db, &id, &user.id).await? {
                Mutation::Applied => Err(err),
                outcome => mutation_response(outcome, &user, &id, Change::Update),
            };
        }
    };

    let outcome = songs::update_owned_song(&state.db, &id, &user.id, &draft).await?;
    mutation_response(outcome, &user, &id, Change::Update)
}

/// DELETE /songs/:id
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<CurrentUser>,
) -> PageResult<Response> {
    let outcome = songs::delete_owned_song(&state.db, &id, &user.id).await?;
    mutation_response(outcome, &user, &id, Change::Delete)
}

/// POST /songs/:id?_method=PUT|DELETE
///
/// HTML forms can only POST; the override may come from the query string
/// or a `_method` form field.
pub async fn override_song_method(
    state: State<AppState>,
    path: Path<String>,
    user: Extension<CurrentUser>,
    Query(query): Query<MethodOverride>,
    form: Result<Form<SongForm>, FormRejection>,
) -> PageResult<Response> {
    let method = query
        .method
        .or_else(|| form.as_ref().ok().and_then(|Form(form)| form.method.clone()))
        .map(|m| m.to_ascii_uppercase());

    match method.as_deref() {
        Some("PUT") => update_song(state, path, user, form).await,
        Some("DELETE") => delete_song(state, path, user).await,
        _ => Ok(StatusCode::METHOD_NOT_ALLOWED.into_response()),
    }
}

/// GET /songs/user/:user_id
///
/// Public songs of one owner, newest first.
pub async fn list_user_songs(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(user): Extension<CurrentUser>,
) -> PageResult<Html<String>> {
    let songs = songs::list_songs(&state.db, &SongFilter::public_by(&user_id)).await?;
    Ok(Html(views::songs::index_page(&user, &songs)))
}

#[derive(Debug, Clone, Copy)]
enum Change {
    Update,
    Delete,
}

impl Change {
    fn verb(self) -> &'static str {
        match self {
            Change::Update => "update",
            Change::Delete => "delete",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            Change::Update => "updated",
            Change::Delete => "deleted",
        }
    }
}

fn mutation_response(
    outcome: Mutation,
    user: &CurrentUser,
    id: &str,
    change: Change,
) -> PageResult<Response> {
    match outcome {
        Mutation::Applied => {
            info!("User {} {} song {}", user.id, change.past_tense(), id);
            Ok(Redirect::to("/dashboard").into_response())
        }
        Mutation::NotOwner => {
            warn!("User {} denied {} of song {}", user.id, change.verb(), id);
            Ok(Redirect::to("/songs").into_response())
        }
        Mutation::NotFound => Err(PageError::NotFound),
    }
}
