//! Token-header templates.
//!
//! A template names the header carrying the credential and the shape of its
//! value, e.g. `Private-Token: {token}`. [`NONE`] marks backends that take no
//! credential at all.

use super::HttpHeaders;

/// No credential header.
pub const NONE: &str = "none";
/// GitLab personal access token header.
pub const PRIVATE_TOKEN: &str = "Private-Token: {token}";
/// GitHub / Gogs / Gitea token header.
pub const AUTHORIZATION_TOKEN: &str = "Authorization: token {token}";

const PLACEHOLDER: &str = "{token}";

/// Split a template into header name and value pattern.
///
/// Returns `None` for [`NONE`] and for malformed templates.
#[must_use]
pub fn parse_template(template: &str) -> Option<(&str, &str)> {
    if template == NONE {
        return None;
    }
    let (name, value) = template.split_once(": ")?;
    let name = name.trim();
    if name.is_empty() || !value.contains(PLACEHOLDER) {
        return None;
    }
    Some((name, value))
}

/// Whether `template` is [`NONE`] or a well-formed `Name: ...{token}...` template.
#[must_use]
pub fn is_valid_template(template: &str) -> bool {
    template == NONE || parse_template(template).is_some()
}

/// Build the auth headers for `token` according to `template`.
///
/// Absent or empty tokens produce no header.
#[must_use]
pub fn create_http_headers(template: &str, token: Option<&str>) -> HttpHeaders {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Vec::new();
    };
    match parse_template(template) {
        Some((name, value)) => vec![(name.to_string(), value.replace(PLACEHOLDER, token))],
        None => Vec::new(),
    }
}
