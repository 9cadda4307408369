//! Preferences: default model and color theme.

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::{HeaderMap, header};
use axum::response::{Html, Response};
use serde::Deserialize;

use crate::auth::RequireUser;
use crate::handlers::{found, render_page};
use crate::state::AppState;
use crate::templates;
use crate::urls::referer_path;

/// Form body for POST /settings.
#[derive(Deserialize)]
pub(crate) struct SettingsForm {
    #[serde(default)]
    model: String,
}

/// Handle GET /settings.
pub(crate) async fn show(
    State(state): State<Arc<AppState>>,
    RequireUser(user): RequireUser,
) -> Html<String> {
    let selected = state.settings.get().model;
    let body = templates::settings_body(&state.models, &selected);
    render_page(&state, Some(&user), "Settings", None, &body)
}

/// Handle POST /settings.
pub(crate) async fn save(
    State(state): State<Arc<AppState>>,
    RequireUser(_user): RequireUser,
    Form(form): Form<SettingsForm>,
) -> Response {
    if !state.settings.set_model(&form.model) {
        tracing::debug!("Blank model name ignored");
    }
    found("/settings")
}

/// Handle POST /toggle_theme.
///
/// Returns to the referring page when it is on this site.
pub(crate) async fn toggle_theme(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let theme = state.settings.toggle_theme();
    tracing::debug!(theme = theme.as_str(), "Theme toggled");

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok());
    let target = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(|referer| referer_path(referer, host))
        .unwrap_or("/");
    found(target)
}
