//! Local URL construction and validation.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// RFC 3986 unreserved characters: A-Z a-z 0-9 - . _ ~
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a path segment or query value.
pub(crate) fn encode(value: &str) -> String {
    utf8_percent_encode(value, UNRESERVED).to_string()
}

/// URL of a page view.
pub(crate) fn page_url(id: &str) -> String {
    format!("/page/{}", encode(id))
}

/// URL of a page sub-resource such as `edit` or `database`.
pub(crate) fn page_action_url(id: &str, action: &str) -> String {
    format!("/page/{}/{action}", encode(id))
}

/// Login URL that returns to `next` afterwards.
pub(crate) fn login_url(next: &str) -> String {
    format!("/login?next={}", encode(next))
}

/// Whether `target` is an absolute path on this site.
///
/// Rejects scheme-relative (`//host`) and backslash (`/\host`) forms that
/// browsers treat as off-site.
pub(crate) fn is_local_path(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target.starts_with("/\\")
        && !target.chars().any(char::is_control)
}

/// `target` if it is a local path, otherwise `/`.
pub(crate) fn safe_next(target: Option<&str>) -> &str {
    match target {
        Some(target) if is_local_path(target) => target,
        _ => "/",
    }
}

/// Path part of a `Referer` value, if it points at `host`.
pub(crate) fn referer_path<'a>(referer: &'a str, host: Option<&str>) -> Option<&'a str> {
    if is_local_path(referer) {
        return Some(referer);
    }

    let (_, rest) = referer.split_once("://")?;
    let (authority, path) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, "/"),
    };
    (Some(authority) == host && is_local_path(path)).then_some(path)
}
