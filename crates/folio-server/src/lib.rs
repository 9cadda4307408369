//! HTTP server for the Folio note workspace.
//!
//! This crate serves server-rendered HTML for:
//! - Browsing, searching, and editing the page tree
//! - Page databases
//! - Login sessions, settings, and the assistant chat
//! - Static files from the configured directory
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 8000,
//!         pages_file: PathBuf::from("pages.json"),
//!         settings_file: PathBuf::from("settings.json"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (folio-server)
//!                        │
//!                        ├─► Handlers ──► Workspace / SettingsStore (folio-site)
//!                        │                      │
//!                        │                      └─► JsonFile (folio-storage)
//!                        │
//!                        ├─► Templates ──► render_html (folio-renderer)
//!                        │
//!                        └─► Static files (tower-http)
//! ```

mod app;
mod auth;
mod error;
mod handlers;
mod middleware;
mod session;
mod state;
mod static_files;
mod templates;
mod urls;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use folio_site::{DEFAULT_MAX_DEPTH, SettingsStore, Workspace};
use folio_storage::{JsonFile, PageMap, Repository, Settings};
use state::AppState;

pub use session::Identity;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// JSON file holding the pages.
    pub pages_file: PathBuf,
    /// JSON file holding the settings.
    pub settings_file: PathBuf,
    /// Directory served under `/static/`.
    pub static_dir: PathBuf,
    /// Maximum page tree depth.
    pub max_depth: usize,
    /// Model names offered to the user.
    pub models: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8000,
            pages_file: PathBuf::from("pages.json"),
            settings_file: PathBuf::from("settings.json"),
            static_dir: PathBuf::from("static"),
            max_depth: DEFAULT_MAX_DEPTH,
            models: ["Gemini", "GPT-4", "Claude", "Other"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// Run the server.
///
/// Pages are saved after every change; on shutdown they are saved once more
/// and a failure is reported.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the stores cannot be opened, the server fails to
/// start, or the final save fails.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let pages: Arc<dyn Repository<PageMap>> = Arc::new(JsonFile::new(&config.pages_file));
    let settings: Arc<dyn Repository<Settings>> = Arc::new(JsonFile::new(&config.settings_file));

    let workspace = Workspace::open(pages)?.with_max_depth(config.max_depth);
    let settings = SettingsStore::open(settings)?;
    tracing::info!(
        pages = workspace.len(),
        path = %config.pages_file.display(),
        "Workspace loaded"
    );

    let state = Arc::new(AppState::new(workspace, settings, config.models.clone()));
    let app = app::create_router(Arc::clone(&state), &config.static_dir);

    // Bind and run server
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    match Arc::try_unwrap(state) {
        Ok(state) => state.workspace.close()?,
        Err(_) => tracing::warn!("Requests still in flight, skipping final save"),
    }
    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Folio config.
///
/// # Arguments
///
/// * `config` - Folio configuration
#[must_use]
pub fn server_config_from_folio_config(config: &folio_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        pages_file: config.paths.pages_file(),
        settings_file: config.paths.settings_file(),
        static_dir: config.paths.static_dir.clone(),
        max_depth: config.tree.max_depth,
        models: config.assistant.models.clone(),
    }
}
