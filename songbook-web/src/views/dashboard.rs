//! Dashboard view

use songbook_common::db::SongWithOwner;
use songbook_common::time::display_date;

use super::{escape, layout};
use crate::api::CurrentUser;

pub fn page(user: &CurrentUser, songs: &[SongWithOwner]) -> String {
    let mut body = format!(
        "        <h1>Welcome, {}</h1>\n        <h2>Your Songs</h2>\n",
        escape(&user.display_name)
    );

    if songs.is_empty() {
        body.push_str(
            r#"        <p>You have not added any songs yet. <a href="/songs/add">Add one</a>.</p>
"#,
        );
        return layout("Dashboard", Some(user), &body);
    }

    body.push_str(
        "        <table>\n            <thead><tr><th>Title</th><th>Date</th><th>Status</th><th></th></tr></thead>\n            <tbody>\n",
    );
    for entry in songs {
        let song = &entry.song;
        let id = escape(&song.guid);
        body.push_str(&format!(
            r#"                <tr>
                    <td><a href="/songs/{id}">{title}</a></td>
                    <td>{date}</td>
                    <td><span class="badge">{status}</span></td>
                    <td>
                        <a href="/songs/edit/{id}">Edit</a>
                        <form class="inline" action="/songs/{id}?_method=DELETE" method="POST">
                            <button type="submit">Delete</button>
                        </form>
                    </td>
                </tr>
"#,
            id = id,
            title = escape(&song.title),
            date = escape(&display_date(&song.created_at)),
            status = song.status,
        ));
    }
    body.push_str("            </tbody>\n        </table>\n");

    layout("Dashboard", Some(user), &body)
}
