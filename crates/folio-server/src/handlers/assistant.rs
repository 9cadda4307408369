//! Assistant chat.

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::response::{Html, Response};
use serde::Deserialize;

use crate::auth::RequireUser;
use crate::handlers::{found, render_page};
use crate::state::AppState;
use crate::templates;

/// Form body for POST /ai.
#[derive(Deserialize)]
pub(crate) struct ChatForm {
    model: Option<String>,
    #[serde(default)]
    message: String,
}

/// Handle GET /ai.
pub(crate) async fn show(
    State(state): State<Arc<AppState>>,
    RequireUser(user): RequireUser,
) -> Html<String> {
    let selected = state.settings.get().model;
    let messages = state.chat.messages();
    let body = templates::assistant_body(&state.models, &selected, &messages);
    render_page(&state, Some(&user), "Assistant", None, &body)
}

/// Handle POST /ai.
///
/// Blank messages are ignored.
pub(crate) async fn send(
    State(state): State<Arc<AppState>>,
    RequireUser(_user): RequireUser,
    Form(form): Form<ChatForm>,
) -> Response {
    let prompt = form.message.trim();
    if !prompt.is_empty() {
        state
            .assistant()
            .converse(&state.chat, form.model.as_deref(), prompt);
    }
    found("/ai")
}
