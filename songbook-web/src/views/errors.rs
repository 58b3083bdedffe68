//! Error views

use super::layout;

pub fn not_found_page() -> String {
    layout(
        "Not Found",
        None,
        r#"        <h1>404</h1>
        <p>Sorry, that page or song does not exist.</p>
        <p><a href="/dashboard">Back to your dashboard</a></p>"#,
    )
}

pub fn internal_error_page() -> String {
    layout(
        "Server Error",
        None,
        r#"        <h1>500</h1>
        <p>Something went wrong on our end. Please try again.</p>
        <p><a href="/dashboard">Back to your dashboard</a></p>"#,
    )
}
