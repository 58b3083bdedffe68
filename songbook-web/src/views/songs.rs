//! Song views: add, edit, list and detail

use songbook_common::db::{Song, SongStatus, SongWithOwner};
use songbook_common::time::display_date;

use super::{escape, layout, strip_tags, truncate};
use crate::api::CurrentUser;

/// Lyrics shown on list cards are cut to this many characters
const EXCERPT_CHARS: usize = 150;

pub fn add_page(user: &CurrentUser) -> String {
    let body = format!(
        "        <h1>Add Song</h1>\n{}",
        song_form("/songs", None, None)
    );
    layout("Add Song", Some(user), &body)
}

pub fn edit_page(user: &CurrentUser, song: &Song) -> String {
    let action = format!("/songs/{}", escape(&song.guid));
    let body = format!(
        "        <h1>Edit Song</h1>\n{}",
        song_form(&action, Some(song), Some("PUT"))
    );
    layout("Edit Song", Some(user), &body)
}

pub fn index_page(user: &CurrentUser, songs: &[SongWithOwner]) -> String {
    let mut body = String::from("        <h1>Songs</h1>\n");

    if songs.is_empty() {
        body.push_str("        <p>No songs to display.</p>\n");
    }

    for entry in songs {
        let excerpt = entry
            .song
            .lyrics
            .as_deref()
            .map(|l| truncate(&strip_tags(l), EXCERPT_CHARS))
            .unwrap_or_default();

        body.push_str(&format!(
            r#"        <div class="card">
            <h3><a href="/songs/{id}">{title}</a></h3>
            <p>{excerpt}</p>
            <p class="muted">by <a href="/songs/user/{owner_id}">{owner}</a>{edit}</p>
        </div>
"#,
            id = escape(&entry.song.guid),
            title = escape(&entry.song.title),
            excerpt = escape(&excerpt),
            owner_id = escape(&entry.owner.guid),
            owner = escape(&entry.owner.display_name),
            edit = edit_link(user, &entry.song),
        ));
    }

    layout("Songs", Some(user), &body)
}

pub fn show_page(user: &CurrentUser, entry: &SongWithOwner) -> String {
    let song = &entry.song;
    let genre = song
        .genre
        .as_deref()
        .map(|g| format!(r#" <span class="badge">{}</span>"#, escape(g)))
        .unwrap_or_default();
    let avatar = entry
        .owner
        .image
        .as_deref()
        .map(|src| format!(r#"<img class="avatar" src="{}" alt=""> "#, escape(src)))
        .unwrap_or_default();
    let full_name = entry
        .owner
        .full_name()
        .map(|name| format!(r#" <span class="muted">({})</span>"#, escape(&name)))
        .unwrap_or_default();

    let body = format!(
        r#"        <h1>{title}{genre}</h1>
        <p class="muted">{date}{edit}</p>
        <pre class="card">{lyrics}</pre>
        <div class="card">
            <p>{avatar}{owner}{full_name}</p>
            <a href="/songs/user/{owner_id}">More from {owner}</a>
        </div>"#,
        title = escape(&song.title),
        genre = genre,
        date = escape(&display_date(&song.created_at)),
        edit = edit_link(user, song),
        lyrics = escape(song.lyrics.as_deref().unwrap_or("")),
        avatar = avatar,
        owner = escape(&entry.owner.display_name),
        full_name = full_name,
        owner_id = escape(&entry.owner.guid),
    );

    layout(&song.title, Some(user), &body)
}

/// Edit link, shown only to the owner
fn edit_link(user: &CurrentUser, song: &Song) -> String {
    if song.is_owned_by(&user.id) {
        format!(r#" · <a href="/songs/edit/{}">Edit</a>"#, escape(&song.guid))
    } else {
        String::new()
    }
}

fn song_form(action: &str, song: Option<&Song>, method: Option<&str>) -> String {
    let title = song.map(|s| s.title.as_str()).unwrap_or("");
    let genre = song.and_then(|s| s.genre.as_deref()).unwrap_or("");
    let lyrics = song.and_then(|s| s.lyrics.as_deref()).unwrap_or("");
    let status = song.map(|s| s.status).unwrap_or_default();

    let override_field = method
        .map(|m| format!(r#"            <input type="hidden" name="_method" value="{}">"#, m))
        .unwrap_or_default();

    let options: String = [SongStatus::Public, SongStatus::Private]
        .iter()
        .map(|s| {
            let selected = if *s == status { " selected" } else { "" };
            format!(
                r#"<option value="{value}"{selected}>{value}</option>"#,
                value = s.as_str(),
                selected = selected
            )
        })
        .collect();

    format!(
        r#"        <form action="{action}" method="POST">
{override_field}
            <label for="title">Title</label>
            <input type="text" id="title" name="title" value="{title}" required>
            <label for="genre">Genre</label>
            <input type="text" id="genre" name="genre" value="{genre}">
            <label for="status">Status</label>
            <select id="status" name="status">{options}</select>
            <label for="lyrics">Lyrics</label>
            <textarea id="lyrics" name="lyrics" rows="12">{lyrics}</textarea>
            <p><button type="submit">Save</button> <a href="/dashboard">Cancel</a></p>
        </form>"#,
        action = action,
        override_field = override_field,
        title = escape(title),
        genre = escape(genre),
        options = options,
        lyrics = escape(lyrics),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use songbook_common::db::User;

    fn user(id: &str) -> CurrentUser {
        CurrentUser {
            id: id.to_string(),
            display_name: "Ann".to_string(),
        }
    }

    fn entry(owner: &str, lyrics: &str) -> SongWithOwner {
        SongWithOwner {
            song: Song {
                guid: "s1".to_string(),
                user_id: owner.to_string(),
                title: "Tom & Jerry".to_string(),
                genre: None,
                lyrics: Some(lyrics.to_string()),
                status: SongStatus::Public,
                created_at: "2024-03-03T10:00:00.000Z".to_string(),
                updated_at: "2024-03-03T10:00:00.000Z".to_string(),
            },
            owner: User {
                guid: owner.to_string(),
                display_name: "Ann".to_string(),
                first_name: None,
                last_name: None,
                image: None,
                created_at: "2024-01-01T00:00:00.000Z".to_string(),
            },
        }
    }

    #[test]
    fn test_edit_link_only_for_owner() {
        let song = entry("u1", "words");
        assert!(show_page(&user("u1"), &song).contains("/songs/edit/s1"));
        assert!(!show_page(&user("u2"), &song).contains("/songs/edit/s1"));
    }

    #[test]
    fn test_show_page_owner_profile() {
        let mut song = entry("u1", "words");
        assert!(!show_page(&user("u2"), &song).contains("<img"));

        song.owner.last_name = Some("Lee".to_string());
        song.owner.image = Some("/img/ann.png".to_string());
        let html = show_page(&user("u2"), &song);
        assert!(html.contains(r#"src="/img/ann.png""#));
        assert!(html.contains("(Lee)"));
    }

    #[test]
    fn test_index_excerpt_is_stripped_and_truncated() {
        let long = format!("<b>{}</b>", "la ".repeat(100));
        let html = index_page(&user("u2"), &[entry("u1", &long)]);
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains("la la"));
        assert!(!html.contains("<b>la"));
        assert!(html.contains("..."));
        assert!(html.contains("/songs/user/u1"));
    }

    #[test]
    fn test_edit_form_prefills_and_overrides_method() {
        let song = entry("u1", "verse").song;
        let html = edit_page(&user("u1"), &song);
        assert!(html.contains(r#"action="/songs/s1""#));
        assert!(html.contains(r#"name="_method" value="PUT""#));
        assert!(html.contains(r#"value="Tom &amp; Jerry""#));
        assert!(html.contains(r#"<option value="public" selected>"#));
    }

    #[test]
    fn test_add_form_is_empty() {
        let html = add_page(&user("u1"));
        assert!(html.contains(r#"action="/songs""#));
        assert!(!html.contains("_method"));
    }
}
