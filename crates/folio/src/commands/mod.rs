//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod serve;
pub(crate) mod tree;

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_storage::{JsonFile, PageMap, Repository};

use crate::error::CliError;

pub(crate) use render::RenderArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use tree::TreeArgs;

/// Options shared by commands that read the workspace.
#[derive(Args)]
pub(crate) struct WorkspaceArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding pages.json and settings.json (overrides config).
    #[arg(short, long, env = "FOLIO_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

impl WorkspaceArgs {
    /// Load configuration with the data directory override applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            data_dir: self.data_dir.clone(),
            ..CliSettings::default()
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Read the stored pages without modifying the data directory.
///
/// A missing pages file reads as an empty workspace.
pub(crate) fn load_pages(config: &Config) -> Result<PageMap, CliError> {
    let path = config.paths.pages_file();
    let pages = Repository::<PageMap>::load(&JsonFile::new(&path))?;
    if pages.is_none() {
        tracing::warn!(path = %path.display(), "No pages file found");
    }
    Ok(pages.unwrap_or_default())
}
