//! Static file serving.
//!
//! Files under the configured static directory are served at `/static/`.
//! A missing directory simply yields 404s.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// URL prefix for static files.
pub(crate) const STATIC_PREFIX: &str = "/static";

/// Create router serving files from `static_dir`.
pub(crate) fn static_router(static_dir: &Path) -> Router<Arc<AppState>> {
    if !static_dir.is_dir() {
        tracing::debug!(path = %static_dir.display(), "Static directory not found");
    }
    Router::new().nest_service(STATIC_PREFIX, ServeDir::new(static_dir))
}
