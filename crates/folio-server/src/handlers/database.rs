//! Page database table.

use std::sync::Arc;

use axum::extract::{Form, Path, State};
use axum::response::{Html, Response};
use folio_site::columns;

use crate::auth::RequireUser;
use crate::error::ServerError;
use crate::handlers::{found, render_page};
use crate::state::AppState;
use crate::templates;
use crate::urls::page_action_url;

/// Form field holding the name of an extra column.
const NEW_COLUMN_FIELD: &str = "new_col";
/// Form field holding the value of the extra column.
const NEW_VALUE_FIELD: &str = "new_val";

/// Handle GET /page/{id}/database.
pub(crate) async fn view(
    State(state): State<Arc<AppState>>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Html<String>, ServerError> {
    let page = state.workspace.get(&id)?;
    let columns = columns(&page.database);
    let body = templates::database_body(&id, &page.title, &columns, &page.database);
    Ok(render_page(&state, Some(&user), &page.title, Some(&id), &body))
}

/// Handle POST /page/{id}/database/add.
///
/// Every submitted field except the extra-column pair becomes a cell.
pub(crate) async fn add_row(
    State(state): State<Arc<AppState>>,
    RequireUser(_user): RequireUser,
    Path(id): Path<String>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, ServerError> {
    let mut new_column = "";
    let mut new_value = "";
    let mut cells = Vec::with_capacity(fields.len());
    for (name, value) in &fields {
        match name.as_str() {
            NEW_COLUMN_FIELD => new_column = value.as_str(),
            NEW_VALUE_FIELD => new_value = value.as_str(),
            _ => cells.push((name, value)),
        }
    }

    state
        .workspace
        .add_database_row(&id, cells, Some((new_column, new_value)))?;
    Ok(found(&page_action_url(&id, "database")))
}
