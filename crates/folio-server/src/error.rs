//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use folio_renderer::escape_html;
use folio_site::SiteError;
use folio_storage::PageId;

use crate::handlers::found;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Page not found; answered with a redirect home.
    #[error("Page not found: {0}")]
    PageNotFound(PageId),

    /// Any other workspace failure.
    #[error("Workspace error: {0}")]
    Site(SiteError),
}

impl From<SiteError> for ServerError {
    fn from(err: SiteError) -> Self {
        match err {
            SiteError::NotFound(id) => Self::PageNotFound(id),
            other => Self::Site(other),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match &self {
            Self::PageNotFound(id) => {
                tracing::debug!(page_id = %id, "Unknown page, redirecting home");
                found("/")
            }
            Self::Site(e) => {
                tracing::error!(error = %e, "Request failed");
                let body = format!(
                    "<!DOCTYPE html>\n<title>Error</title>\n\
                     <h1>Something went wrong</h1>\n<p>{}</p>",
                    escape_html(&e.to_string())
                );
                (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
            }
        }
    }
}
