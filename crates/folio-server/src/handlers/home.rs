//! Home page and search.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

use crate::auth::MaybeUser;
use crate::handlers::render_page;
use crate::state::AppState;
use crate::templates;

/// Query parameters for GET /search.
#[derive(Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Handle GET /.
pub(crate) async fn home(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
) -> Html<String> {
    render_page(&state, user.as_ref(), "Home", None, &templates::home_body())
}

/// Handle GET /search.
pub(crate) async fn search(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<SearchQuery>,
) -> Html<String> {
    let hits = state.workspace.search(&query.q);
    tracing::debug!(query = %query.q, hits = hits.len(), "Search");
    render_page(
        &state,
        user.as_ref(),
        "Search",
        None,
        &templates::search_body(&query.q, &hits),
    )
}
