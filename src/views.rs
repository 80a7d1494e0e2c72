//! Server-rendered HTML pages.
//!
//! Rendering is deliberately minimal; the pages exist to drive the auth
//! and secrets flows, nothing more. User-supplied text is escaped before
//! interpolation.

use axum::response::Html;

/// Escape text for interpolation into HTML.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | Whisperwall</title>\n\
         <style>body{{font-family:sans-serif;max-width:40rem;margin:3rem auto;padding:0 1rem}}\
         .error{{color:#b00020}}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    ))
}

/// Map an `?error=` query code to a user-facing banner, if any.
fn error_banner(code: Option<&str>) -> String {
    let message = match code {
        None => return String::new(),
        Some("invalid_credentials") => "Invalid username or password.",
        Some("username_taken") => "That username is already registered.",
        Some("invalid") => "Usernames are 3\u{2013}32 characters and passwords 8\u{2013}128 characters.",
        Some("google") => "Google sign-in failed. Please try again.",
        Some(_) => "Something went wrong. Please try again.",
    };
    format!("<p class=\"error\">{message}</p>\n")
}

pub fn home() -> Html<String> {
    layout(
        "Home",
        "<h1>Whisperwall</h1>\n\
         <p>Share a secret. Nobody will know it was you.</p>\n\
         <p><a href=\"/login\">Log in</a> or <a href=\"/register\">Register</a></p>",
    )
}

pub fn login(error: Option<&str>) -> Html<String> {
    let body = format!(
        "<h1>Log in</h1>\n{}\
         <form method=\"post\" action=\"/login\">\n\
         <p><label>Username <input type=\"text\" name=\"username\" required></label></p>\n\
         <p><label>Password <input type=\"password\" name=\"password\" required></label></p>\n\
         <p><button type=\"submit\">Log in</button></p>\n\
         </form>\n\
         <p><a href=\"/auth/google\">Sign in with Google</a></p>\n\
         <p>No account? <a href=\"/register\">Register</a></p>",
        error_banner(error)
    );
    layout("Log in", &body)
}

pub fn register(error: Option<&str>) -> Html<String> {
    let body = format!(
        "<h1>Register</h1>\n{}\
         <form method=\"post\" action=\"/register\">\n\
         <p><label>Username <input type=\"text\" name=\"username\" required></label></p>\n\
         <p><label>Password <input type=\"password\" name=\"password\" required></label></p>\n\
         <p><button type=\"submit\">Register</button></p>\n\
         </form>\n\
         <p><a href=\"/auth/google\">Sign in with Google</a></p>\n\
         <p>Already registered? <a href=\"/login\">Log in</a></p>",
        error_banner(error)
    );
    layout("Register", &body)
}

/// The secrets board. Secret text only; owners are never shown.
pub fn secrets(secrets: &[String]) -> Html<String> {
    let items = if secrets.is_empty() {
        "<p>No secrets yet. Be the first.</p>".to_string()
    } else {
        let entries: String = secrets
            .iter()
            .map(|secret| format!("<li>{}</li>\n", escape(secret)))
            .collect();
        format!("<ul>\n{entries}</ul>")
    };

    let body = format!(
        "<h1>Secrets</h1>\n{items}\n\
         <p><a href=\"/submit\">Submit a secret</a> &middot; <a href=\"/logout\">Log out</a></p>"
    );
    layout("Secrets", &body)
}

pub fn submit() -> Html<String> {
    layout(
        "Submit",
        "<h1>Submit a secret</h1>\n\
         <form method=\"post\" action=\"/submit\">\n\
         <p><textarea name=\"secret\" rows=\"4\" cols=\"50\" required></textarea></p>\n\
         <p><button type=\"submit\">Share</button></p>\n\
         </form>\n\
         <p><a href=\"/secrets\">Back to secrets</a></p>",
    )
}
