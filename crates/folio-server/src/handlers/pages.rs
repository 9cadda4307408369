//! Page view, creation, editing, and deletion.

use std::sync::Arc;

use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, Response};
use folio_renderer::render_html;
use serde::Deserialize;

use crate::auth::{MaybeUser, RequireUser};
use crate::error::ServerError;
use crate::handlers::{found, render_page};
use crate::state::AppState;
use crate::templates;
use crate::urls::page_url;

/// Query parameters for GET /page/new.
#[derive(Deserialize)]
pub(crate) struct NewPageQuery {
    parent: Option<String>,
}

/// Form body for POST /page/new.
#[derive(Deserialize)]
pub(crate) struct NewPageForm {
    #[serde(default)]
    title: String,
    parent: Option<String>,
}

/// Form body for POST /page/{id}/edit.
#[derive(Deserialize)]
pub(crate) struct EditPageForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

/// Empty form values mean "no parent".
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Handle GET /page/new.
pub(crate) async fn new_form(
    State(state): State<Arc<AppState>>,
    RequireUser(user): RequireUser,
    Query(query): Query<NewPageQuery>,
) -> Html<String> {
    let parent = non_empty(query.parent.as_deref())
        .and_then(|id| state.workspace.get(id).ok().map(|page| (id, page.title)));
    let body = templates::new_page_body(parent.as_ref().map(|(id, title)| (*id, title.as_str())));
    render_page(&state, Some(&user), "New page", None, &body)
}

/// Handle POST /page/new.
pub(crate) async fn create(
    State(state): State<Arc<AppState>>,
    RequireUser(_user): RequireUser,
    Form(form): Form<NewPageForm>,
) -> Response {
    let id = state
        .workspace
        .create(&form.title, non_empty(form.parent.as_deref()));
    found(&page_url(id.as_str()))
}

/// Handle GET /page/{id}.
pub(crate) async fn view(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<String>,
) -> Result<Html<String>, ServerError> {
    let page = state.workspace.get(&id)?;
    let content = render_html(Some(page.content.as_str()));
    let subpages: Vec<_> = page
        .children
        .iter()
        .filter_map(|child| {
            let title = state.workspace.get(child.as_str()).ok()?.title;
            Some((child.clone(), title))
        })
        .collect();

    let body = templates::page_body(&id, &page.title, &content, &subpages);
    Ok(render_page(&state, user.as_ref(), &page.title, Some(&id), &body))
}

/// Handle GET /page/{id}/edit.
pub(crate) async fn edit_form(
    State(state): State<Arc<AppState>>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Html<String>, ServerError> {
    let page = state.workspace.get(&id)?;
    let body = templates::edit_page_body(&id, &page.title, &page.content);
    Ok(render_page(&state, Some(&user), &page.title, Some(&id), &body))
}

/// Handle POST /page/{id}/edit.
pub(crate) async fn update(
    State(state): State<Arc<AppState>>,
    RequireUser(_user): RequireUser,
    Path(id): Path<String>,
    Form(form): Form<EditPageForm>,
) -> Result<Response, ServerError> {
    state.workspace.update(&id, &form.title, &form.content)?;
    Ok(found(&page_url(&id)))
}

/// Handle GET /page/{id}/delete.
///
/// Only asks for confirmation; deleting needs a POST.
pub(crate) async fn delete_form(
    State(state): State<Arc<AppState>>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Html<String>, ServerError> {
    let page = state.workspace.get(&id)?;
    let body = templates::delete_page_body(&id, &page.title, page.children.len());
    Ok(render_page(&state, Some(&user), &page.title, Some(&id), &body))
}

/// Handle POST /page/{id}/delete.
pub(crate) async fn delete(
    State(state): State<Arc<AppState>>,
    RequireUser(_user): RequireUser,
    Path(id): Path<String>,
) -> Response {
    let removed = state.workspace.delete(&id);
    tracing::info!(page_id = %id, removed, "Deleted pages");
    found("/")
}
