//! HTTP request handlers.

pub(crate) mod account;
pub(crate) mod assistant;
pub(crate) mod database;
pub(crate) mod home;
pub(crate) mod pages;
pub(crate) mod settings;

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};

use crate::session::Identity;
use crate::state::AppState;
use crate::templates::{Layout, render_layout};

/// `302 Found` redirect to `location`.
///
/// Locations that are not valid header values fall back to `/`.
pub(crate) fn found(location: &str) -> Response {
    let value = HeaderValue::from_str(location).unwrap_or_else(|_| HeaderValue::from_static("/"));
    (StatusCode::FOUND, [(header::LOCATION, value)]).into_response()
}

/// Wrap a page body in the site layout.
///
/// `active` is the id of the page highlighted in the sidebar.
pub(crate) fn render_page(
    state: &AppState,
    user: Option<&Identity>,
    title: &str,
    active: Option<&str>,
    body: &str,
) -> Html<String> {
    let forest = state.sidebar();
    let layout = Layout {
        title,
        theme: state.settings.get().theme,
        user,
        forest: &forest,
        active,
    };
    Html(render_layout(&layout, body))
}
