//! HTML views
//!
//! Each view is a function from data to a complete HTML document. User
//! supplied text always goes through [`escape`].

pub mod dashboard;
pub mod errors;
pub mod landing;
pub mod songs;

use crate::api::CurrentUser;

/// Wrap a page body in the shared document shell
pub(crate) fn layout(title: &str, user: Option<&CurrentUser>, body: &str) -> String {
    let nav = match user {
        Some(user) => format!(
            r#"<nav>
        <a href="/dashboard">Dashboard</a>
        <a href="/songs">Public Songs</a>
        <a href="/songs/add">Add Song</a>
        <span class="who">{}</span>
        <a href="/logout">Logout</a>
    </nav>"#,
            escape(&user.display_name)
        ),
        None => String::from(r#"<nav><a href="/">Songbook</a></nav>"#),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Songbook</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            line-height: 1.6;
            margin: 0;
        }}
        nav {{
            background-color: #2a2a2a;
            border-bottom: 1px solid #3a3a3a;
            padding: 12px 20px;
            display: flex;
            gap: 16px;
        }}
        nav .who {{ margin-left: auto; color: #888; }}
        a {{ color: #4a9eff; }}
        main {{ padding: 20px; }}
        .card {{
            background-color: #2a2a2a;
            border: 1px solid #3a3a3a;
            border-radius: 6px;
            padding: 12px 16px;
            margin-bottom: 12px;
        }}
        .muted {{ color: #888; font-size: 14px; }}
        .badge {{ padding: 2px 8px; border-radius: 10px; background: #3a3a3a; font-size: 12px; }}
        .avatar {{ width: 32px; height: 32px; border-radius: 50%; vertical-align: middle; }}
        form.inline {{ display: inline; }}
        label {{ display: block; margin-top: 10px; }}
        input[type=text], textarea, select {{ width: 100%; max-width: 600px; }}
    </style>
</head>
<body>
    {nav}
    <main>
{body}
    </main>
</body>
</html>"#,
        title = escape(title),
        nav = nav,
        body = body,
    )
}

/// Escape text for HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Remove anything that looks like a markup tag
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Cut `text` to at most `max` characters, at a word boundary when one
/// exists, appending an ellipsis if anything was dropped
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let cut: String = text.chars().take(max).collect();
    let trimmed = match cut.rfind(' ') {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}...", trimmed.trim_end())
}
