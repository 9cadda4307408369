//! Request extractors for the logged-in user.
//!
//! Handlers that need a login take [`RequireUser`]; the extractor answers
//! anonymous requests with a redirect to the login page. Handlers that only
//! adapt their output to the user take [`MaybeUser`].

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::uri::PathAndQuery;
use axum::response::Response;

use crate::handlers::found;
use crate::session::{Identity, session_token};
use crate::state::AppState;
use crate::urls::login_url;

/// Identity of a logged-in user; rejects anonymous requests.
pub(crate) struct RequireUser(pub(crate) Identity);

/// Identity of the user, if logged in.
pub(crate) struct MaybeUser(pub(crate) Option<Identity>);

fn current_user(parts: &Parts, state: &AppState) -> Option<Identity> {
    session_token(&parts.headers).and_then(|token| state.sessions.lookup(token))
}

impl FromRequestParts<Arc<AppState>> for RequireUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        current_user(parts, state).map(Self).ok_or_else(|| {
            let target = parts.uri.path_and_query().map_or("/", PathAndQuery::as_str);
            tracing::debug!(path = target, "Login required");
            found(&login_url(target))
        })
    }
}

impl FromRequestParts<Arc<AppState>> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(current_user(parts, state)))
    }
}
