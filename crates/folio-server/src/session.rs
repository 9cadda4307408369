//! In-memory login sessions.
//!
//! Sessions live only as long as the process. The browser holds an opaque
//! token in the `session_id` cookie.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use axum::http::{HeaderMap, header};

/// Name of the session cookie.
pub(crate) const SESSION_COOKIE: &str = "session_id";

/// Proof that a request belongs to a logged-in user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    email: String,
}

impl Identity {
    /// Email the user logged in with.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Token to identity table.
#[derive(Debug, Default)]
pub(crate) struct SessionTable {
    sessions: Mutex<HashMap<String, Identity>>,
}

impl SessionTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Start a session for `email` and return its token.
    pub(crate) fn create(&self, email: &str) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.lock().insert(
            token.clone(),
            Identity {
                email: email.to_owned(),
            },
        );
        tracing::debug!(email, "Session created");
        token
    }

    pub(crate) fn lookup(&self, token: &str) -> Option<Identity> {
        self.lock().get(token).cloned()
    }

    /// End a session. Returns whether it existed.
    pub(crate) fn remove(&self, token: &str) -> bool {
        self.lock().remove(token).is_some()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Identity>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Session token from the request cookies.
pub(crate) fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value storing `token`.
pub(crate) fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value removing the session cookie.
pub(crate) fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
