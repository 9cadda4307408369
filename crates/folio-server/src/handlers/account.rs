//! Signup, login, and logout.
//!
//! There is no credential store: any non-empty email and password log in.
//! Signup only validates the form before sending the user to the login page.

use std::sync::Arc;

use axum::extract::{Form, Query, State};
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use crate::auth::MaybeUser;
use crate::handlers::{found, render_page};
use crate::session::{expired_session_cookie, session_cookie, session_token};
use crate::state::AppState;
use crate::templates;
use crate::urls::safe_next;

const MISSING_CREDENTIALS: &str = "Email and password are required.";
const PASSWORD_MISMATCH: &str = "Passwords do not match.";
const SIGNUP_SUCCESS: &str = "Account created successfully. Please log in.";

/// Form body for POST /signup.
#[derive(Deserialize)]
pub(crate) struct SignupForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm: String,
}

/// Query parameters for GET /login.
#[derive(Deserialize)]
pub(crate) struct LoginQuery {
    next: Option<String>,
    signup: Option<String>,
}

/// Form body for POST /login.
#[derive(Deserialize)]
pub(crate) struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    next: Option<String>,
}

/// Check a signup form, returning the message to show on failure.
fn validate_signup(form: &SignupForm) -> Result<(), &'static str> {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return Err(MISSING_CREDENTIALS);
    }
    if form.password != form.confirm {
        return Err(PASSWORD_MISMATCH);
    }
    Ok(())
}

/// Handle GET /signup.
pub(crate) async fn signup_form(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
) -> Html<String> {
    render_page(&state, user.as_ref(), "Sign up", None, &templates::signup_body(None))
}

/// Handle POST /signup.
pub(crate) async fn signup(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    Form(form): Form<SignupForm>,
) -> Response {
    match validate_signup(&form) {
        Ok(()) => {
            tracing::info!(email = %form.email.trim(), "Signed up");
            found("/login?signup=success")
        }
        Err(message) => {
            let body = templates::signup_body(Some(message));
            render_page(&state, user.as_ref(), "Sign up", None, &body).into_response()
        }
    }
}

/// Handle GET /login.
pub(crate) async fn login_form(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<LoginQuery>,
) -> Html<String> {
    let next = safe_next(query.next.as_deref());
    let notice = (query.signup.as_deref() == Some("success")).then_some(SIGNUP_SUCCESS);
    let body = templates::login_body(next, notice, None);
    render_page(&state, user.as_ref(), "Log in", None, &body)
}

/// Handle POST /login.
///
/// Starts a session and returns to `next` when it is a local path.
pub(crate) async fn login(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    Form(form): Form<LoginForm>,
) -> Response {
    let next = safe_next(form.next.as_deref());
    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        let body = templates::login_body(next, None, Some(MISSING_CREDENTIALS));
        return render_page(&state, user.as_ref(), "Log in", None, &body).into_response();
    }

    let token = state.sessions.create(email);
    tracing::info!(email, "Logged in");
    ([(header::SET_COOKIE, session_cookie(&token))], found(next)).into_response()
}

/// Handle GET /logout.
pub(crate) async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers)
        && state.sessions.remove(token)
    {
        tracing::info!("Logged out");
    }
    ([(header::SET_COOKIE, expired_session_cookie())], found("/login")).into_response()
}
