//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers::{account, assistant, database, home, pages, settings};
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `static_dir` - Directory served under `/static/`
pub(crate) fn create_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    let page_routes = Router::new()
        .route("/page/new", get(pages::new_form).post(pages::create))
        .route("/page/{id}", get(pages::view))
        .route("/page/{id}/edit", get(pages::edit_form).post(pages::update))
        .route("/page/{id}/delete", get(pages::delete_form).post(pages::delete))
        .route("/page/{id}/database", get(database::view))
        .route("/page/{id}/database/add", post(database::add_row));

    let account_routes = Router::new()
        .route("/signup", get(account::signup_form).post(account::signup))
        .route("/login", get(account::login_form).post(account::login))
        .route("/logout", get(account::logout));

    let router = Router::new()
        .route("/", get(home::home))
        .route("/search", get(home::search))
        .route("/settings", get(settings::show).post(settings::save))
        .route("/toggle_theme", post(settings::toggle_theme))
        .route("/ai", get(assistant::show).post(assistant::send))
        .merge(page_routes)
        .merge(account_routes)
        .merge(static_files::static_router(static_dir));

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use folio_site::{SettingsStore, Workspace};
    use folio_storage::{MockRepository, Page, PageId, PageMap, Settings, Theme};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;
    use crate::ServerConfig;

    const FORM: &str = "application/x-www-form-urlencoded";

    fn test_state() -> Arc<AppState> {
        let workspace = Workspace::open(Arc::new(MockRepository::<PageMap>::new())).unwrap();
        let settings = SettingsStore::open(Arc::new(MockRepository::<Settings>::new())).unwrap();
        Arc::new(AppState::new(
            workspace,
            settings,
            ServerConfig::default().models,
        ))
    }

    fn login(state: &AppState) -> String {
        format!("session_id={}", state.sessions.create("ada@example.com"))
    }

    fn home_id(state: &AppState) -> String {
        state
            .workspace
            .snapshot()
            .keys()
            .next()
            .unwrap()
            .to_string()
    }

    async fn send(state: &Arc<AppState>, request: Request<Body>) -> Response {
        create_router(Arc::clone(state), Path::new("missing-static-dir"))
            .oneshot(request)
            .await
            .unwrap()
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post(uri: &str, cookie: Option<&str>, form: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, FORM);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(form.to_owned())).unwrap()
    }

    fn location(response: &Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_home_lists_pages_and_sets_security_headers() {
        let state = test_state();

        let response = send(&state, get("/", None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-frame-options"], "DENY");
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert!(response.headers().contains_key("content-security-policy"));
        let html = body_text(response).await;
        assert!(html.contains(&format!("<a href=\"/page/{}\">Home</a>", home_id(&state))));
    }

    #[tokio::test]
    async fn test_gated_route_redirects_to_login() {
        let state = test_state();

        let response = send(&state, get("/page/new?parent=abc", None)).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/login?next=%2Fpage%2Fnew%3Fparent%3Dabc");
    }

    #[tokio::test]
    async fn test_gated_post_redirects_without_changes() {
        let state = test_state();

        let response = send(&state, post("/page/new", None, "title=Sneaky")).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert!(location(&response).starts_with("/login?next="));
        assert_eq!(state.workspace.len(), 1);
    }

    #[tokio::test]
    async fn test_login_sets_cookie_and_follows_next() {
        let state = test_state();

        let response = send(
            &state,
            post("/login", None, "email=ada%40example.com&password=pw&next=%2Fsettings"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/settings");
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("session_id="));
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_login_rejects_offsite_next() {
        let state = test_state();

        let response = send(
            &state,
            post("/login", None, "email=a&password=b&next=%2F%2Fevil.example"),
        )
        .await;

        assert_eq!(location(&response), "/");
    }

    #[tokio::test]
    async fn test_login_requires_credentials() {
        let state = test_state();

        let response = send(&state, post("/login", None, "email=&password=")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key(header::SET_COOKIE));
        assert!(body_text(response).await.contains("Email and password are required."));
    }

    #[tokio::test]
    async fn test_login_page_shows_signup_notice() {
        let state = test_state();

        let response = send(&state, get("/login?signup=success", None)).await;

        let html = body_text(response).await;
        assert!(html.contains("Account created successfully. Please log in."));
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let state = test_state();

        let mismatch = send(
            &state,
            post("/signup", None, "email=a%40b.c&password=one&confirm=two"),
        )
        .await;
        let ok = send(
            &state,
            post("/signup", None, "email=a%40b.c&password=one&confirm=one"),
        )
        .await;

        assert_eq!(mismatch.status(), StatusCode::OK);
        assert!(body_text(mismatch).await.contains("Passwords do not match."));
        assert_eq!(location(&ok), "/login?signup=success");
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let state = test_state();
        let cookie = login(&state);

        let response = send(&state, get("/logout", Some(&cookie))).await;
        let after = send(&state, get("/settings", Some(&cookie))).await;

        assert_eq!(location(&response), "/login");
        assert!(
            response.headers()[header::SET_COOKIE]
                .to_str()
                .unwrap()
                .contains("Max-Age=0")
        );
        assert!(location(&after).starts_with("/login?next="));
    }

    #[tokio::test]
    async fn test_create_child_page() {
        let state = test_state();
        let cookie = login(&state);
        let parent = home_id(&state);

        let response = send(
            &state,
            post(
                "/page/new",
                Some(&cookie),
                &format!("title=Meeting+notes&parent={parent}"),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FOUND);
        let id = location(&response).trim_start_matches("/page/").to_owned();
        assert_eq!(state.workspace.get(&id).unwrap().title, "Meeting notes");
        assert_eq!(
            state.workspace.get(&parent).unwrap().children,
            vec![PageId::from(id.as_str())]
        );
    }

    #[tokio::test]
    async fn test_view_renders_content() {
        let state = test_state();
        let id = state.workspace.create("Tasks", None);
        state
            .workspace
            .update(id.as_str(), "Tasks", "- [x] <done>\n```\ncode\n```")
            .unwrap();

        let response = send(&state, get(&format!("/page/{id}"), None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("&lt;done&gt;"));
        assert!(!html.contains("<done>"));
        assert!(html.contains("code"));
    }

    #[tokio::test]
    async fn test_unknown_page_redirects_home() {
        let state = test_state();
        let cookie = login(&state);

        let view = send(&state, get("/page/nope", None)).await;
        let edit = send(&state, get("/page/nope/edit", Some(&cookie))).await;
        let database = send(&state, get("/page/nope/database", Some(&cookie))).await;

        assert_eq!(location(&view), "/");
        assert_eq!(location(&edit), "/");
        assert_eq!(location(&database), "/");
    }

    #[tokio::test]
    async fn test_edit_updates_page() {
        let state = test_state();
        let cookie = login(&state);
        let id = home_id(&state);

        let response = send(
            &state,
            post(
                &format!("/page/{id}/edit"),
                Some(&cookie),
                "title=Start&content=Hello+there",
            ),
        )
        .await;

        assert_eq!(location(&response), format!("/page/{id}"));
        let page = state.workspace.get(&id).unwrap();
        assert_eq!(page.title, "Start");
        assert_eq!(page.content, "Hello there");
    }

    #[tokio::test]
    async fn test_delete_removes_subtree() {
        let state = test_state();
        let cookie = login(&state);
        let parent = state.workspace.create("Parent", None);
        state.workspace.create("Child", Some(parent.as_str()));

        let response = send(
            &state,
            post(&format!("/page/{parent}/delete"), Some(&cookie), ""),
        )
        .await;

        assert_eq!(location(&response), "/");
        assert_eq!(state.workspace.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_link_only_asks_for_confirmation() {
        let state = test_state();
        let cookie = login(&state);
        let id = state.workspace.create("Keep me", None);

        let response = send(&state, get(&format!("/page/{id}/delete"), Some(&cookie))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(&format!("<form action=\"/page/{id}/delete\" method=\"post\">")));
        assert!(state.workspace.get(id.as_str()).is_ok());
    }

    #[tokio::test]
    async fn test_cyclic_tree_hides_sidebar_but_renders_page() {
        let pages = PageMap::from([
            (PageId::from("root"), Page::new("Root").with_children(["a"])),
            (PageId::from("a"), Page::new("A").with_children(["b"])),
            (PageId::from("b"), Page::new("B").with_children(["a"])),
        ]);
        let repository = MockRepository::new().with_value(pages);
        let workspace = Workspace::open(Arc::new(repository)).unwrap();
        let settings = SettingsStore::open(Arc::new(MockRepository::<Settings>::new())).unwrap();
        let state = Arc::new(AppState::new(
            workspace,
            settings,
            ServerConfig::default().models,
        ));

        let response = send(&state, get("/page/a", None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<h1>A</h1>"));
        assert!(html.contains("<nav>\n<ul>\n</ul>\n</nav>"));
        assert!(!html.contains("<a href=\"/page/root\""));
    }

    #[tokio::test]
    async fn test_add_database_row() {
        let state = test_state();
        let cookie = login(&state);
        let id = home_id(&state);

        let response = send(
            &state,
            post(
                &format!("/page/{id}/database/add"),
                Some(&cookie),
                "Name=+Ada+&Notes=&new_col=Born&new_val=1815",
            ),
        )
        .await;

        assert_eq!(location(&response), format!("/page/{id}/database"));
        let rows = state.workspace.get(&id).unwrap().database;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Name"], "Ada");
        assert_eq!(rows[0]["Born"], "1815");
        assert!(!rows[0].contains_key("Notes"));
    }

    #[tokio::test]
    async fn test_search() {
        let state = test_state();
        state.workspace.create("Groceries", None);

        let response = send(&state, get("/search?q=grocer", None)).await;

        assert!(body_text(response).await.contains(">Groceries</a>"));
    }

    #[tokio::test]
    async fn test_toggle_theme_follows_same_host_referer() {
        let state = test_state();

        let request = Request::builder()
            .method("POST")
            .uri("/toggle_theme")
            .header(header::HOST, "localhost:8000")
            .header(header::REFERER, "http://localhost:8000/search?q=x")
            .body(Body::empty())
            .unwrap();
        let response = send(&state, request).await;

        assert_eq!(location(&response), "/search?q=x");
        assert_eq!(state.settings.get().theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_toggle_theme_ignores_foreign_referer() {
        let state = test_state();

        let request = Request::builder()
            .method("POST")
            .uri("/toggle_theme")
            .header(header::HOST, "localhost:8000")
            .header(header::REFERER, "https://evil.example/phish")
            .body(Body::empty())
            .unwrap();
        let response = send(&state, request).await;

        assert_eq!(location(&response), "/");
    }

    #[tokio::test]
    async fn test_settings_changes_model() {
        let state = test_state();
        let cookie = login(&state);

        let response = send(&state, post("/settings", Some(&cookie), "model=Claude")).await;

        assert_eq!(location(&response), "/settings");
        assert_eq!(state.settings.get().model, "Claude");
    }

    #[tokio::test]
    async fn test_assistant_conversation() {
        let state = test_state();
        let cookie = login(&state);

        let response = send(
            &state,
            post("/ai", Some(&cookie), "model=GPT-4&message=hello"),
        )
        .await;
        let page = send(&state, get("/ai", Some(&cookie))).await;

        assert_eq!(location(&response), "/ai");
        assert!(
            body_text(page)
                .await
                .contains("Assistant: [Model: GPT-4] You said: hello")
        );
    }

    #[tokio::test]
    async fn test_static_files() {
        let state = test_state();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("style.css"), "body {}").unwrap();

        let response = create_router(Arc::clone(&state), dir.path())
            .oneshot(get("/static/style.css", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "body {}");
    }
}
