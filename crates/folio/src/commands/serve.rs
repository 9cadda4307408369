//! `folio serve` command implementation.

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_server::{run_server, server_config_from_folio_config};

use super::WorkspaceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    #[command(flatten)]
    workspace: WorkspaceArgs,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request and storage logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            data_dir: self.workspace.data_dir,
        };
        let config = Config::load(self.workspace.config.as_deref(), Some(&cli_settings))?;

        std::fs::create_dir_all(&config.paths.data_dir)?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.detail(&format!("Data directory: {}", config.paths.data_dir.display()));
        if config.paths.static_dir.is_dir() {
            output.detail(&format!(
                "Static directory: {}",
                config.paths.static_dir.display()
            ));
        } else {
            output.warning(&format!(
                "Static directory not found: {}",
                config.paths.static_dir.display()
            ));
        }

        let server_config = server_config_from_folio_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        output.success("Server stopped, pages saved");
        Ok(())
    }
}
