//! Landing page for visitors without a session

use super::layout;

pub fn page() -> String {
    layout(
        "Welcome",
        None,
        r#"        <h1>Songbook</h1>
        <p>Share the songs you write. Sign in to see what others have posted.</p>"#,
    )
}
