//! `folio render` command implementation.

use clap::Args;
use folio_renderer::{render, to_html};
use folio_site::SiteError;
use folio_storage::PageId;

use super::{WorkspaceArgs, load_pages};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Id of the page to render.
    page_id: String,

    /// Print the block stream as JSON instead of HTML.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    workspace: WorkspaceArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the pages cannot be read or the page does not exist.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.workspace.load_config()?;
        let pages = load_pages(&config)?;

        let page = pages
            .get(self.page_id.as_str())
            .ok_or_else(|| SiteError::NotFound(PageId::from(self.page_id.as_str())))?;

        Output::new().result(&render_content(&page.content, self.json)?);
        Ok(())
    }
}

/// Render page content as HTML, or as pretty JSON blocks when `json` is set.
fn render_content(content: &str, json: bool) -> Result<String, CliError> {
    let blocks = render(Some(content));
    if json {
        Ok(serde_json::to_string_pretty(&blocks)?)
    } else {
        Ok(to_html(&blocks))
    }
}
