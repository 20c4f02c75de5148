//! Reusable field validators.
//!
//! Each validator returns `None` when the value passes, or the error message
//! otherwise, so several can be chained with [`Option::or_else`]:
//!
//! ```no_run
//! use formstate::Rule;
//! use formstate::validators::{email_format_error, required_error};
//!
//! let rule = Rule::function(|value, _| {
//!     required_error(value, None).or_else(|| email_format_error(value, None))
//! });
//! # drop(rule);
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// Message returned by [`required_error`] when no custom message is given.
pub const REQUIRED_MESSAGE: &str = "This is a required field";

/// Message returned by [`email_format_error`] when no custom message is given.
pub const EMAIL_MESSAGE: &str = "This is not a valid email address";

// `\s` and `.` spelled out as ECMAScript defines them: Unicode `\s` adds U+0085
// and drops U+FEFF, and `.` would otherwise match `\r`, U+2028 and U+2029.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"^(([^<>()\[\]\\.,;:\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}@"]+"#,
        r#"(\.[^<>()\[\]\\.,;:\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}@"]+)*)"#,
        r#"|("[^\n\r\x{2028}\x{2029}]+"))"#,
        r#"@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    ))
    .expect("email pattern is valid")
});

/// Fail when the value is absent or only whitespace.
pub fn required_error<'a>(
    value: impl Into<Option<&'a str>>,
    message: Option<&str>,
) -> Option<String> {
    match value.into() {
        Some(value) if !value.trim().is_empty() => None,
        _ => Some(message_or(message, REQUIRED_MESSAGE)),
    }
}

/// Fail when the value is not an email address.
///
/// Accepts `local@domain.tld`, a quoted local part (`"john doe"@example.com`)
/// and a bracketed IPv4 domain (`user@[192.168.0.1]`).
pub fn email_format_error(value: &str, message: Option<&str>) -> Option<String> {
    if EMAIL_RE.is_match(value) {
        None
    } else {
        Some(message_or(message, EMAIL_MESSAGE))
    }
}

fn message_or(message: Option<&str>, default: &str) -> String {
    match message {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => default.to_string(),
    }
}
