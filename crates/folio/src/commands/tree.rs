//! `folio tree` command implementation.

use std::fmt::Write;

use clap::Args;
use folio_site::{ForestBuilder, SiteError, TreeNode};

use super::{WorkspaceArgs, load_pages};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    workspace: WorkspaceArgs,

    /// Show page ids next to titles.
    #[arg(long)]
    ids: bool,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error if the pages cannot be read or the tree has a cycle.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.workspace.load_config()?;
        let pages = load_pages(&config)?;

        let forest = ForestBuilder::new(&pages)
            .max_depth(config.tree.max_depth)
            .build()
            .map_err(SiteError::from)?;

        if forest.is_empty() {
            output.warning("No pages");
            return Ok(());
        }
        output.result(outline(&forest, self.ids).trim_end());
        Ok(())
    }
}

/// Render the forest as an indented list, two spaces per level.
fn outline(forest: &[TreeNode], ids: bool) -> String {
    fn walk(nodes: &[TreeNode], depth: usize, ids: bool, out: &mut String) {
        for node in nodes {
            let _ = write!(out, "{:indent$}- {}", "", node.title, indent = depth * 2);
            if ids {
                let _ = write!(out, " ({})", node.id);
            }
            out.push('\n');
            walk(&node.children, depth + 1, ids, out);
        }
    }

    let mut out = String::new();
    walk(forest, 0, ids, &mut out);
    out
}
