//! Application state.
//!
//! Shared state for all request handlers.

use folio_site::{Assistant, ChatHistory, SettingsStore, TreeNode, Workspace};

use crate::session::SessionTable;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page store.
    pub(crate) workspace: Workspace,
    /// Persisted preferences.
    pub(crate) settings: SettingsStore,
    /// Logged-in sessions.
    pub(crate) sessions: SessionTable,
    /// Assistant conversation.
    pub(crate) chat: ChatHistory,
    /// Model names offered on the settings and assistant pages.
    pub(crate) models: Vec<String>,
}

impl AppState {
    pub(crate) fn new(workspace: Workspace, settings: SettingsStore, models: Vec<String>) -> Self {
        Self {
            workspace,
            settings,
            sessions: SessionTable::new(),
            chat: ChatHistory::new(),
            models,
        }
    }

    /// Page tree for the sidebar.
    ///
    /// A cyclic tree is logged and shown as empty so the rest of the page
    /// still renders.
    pub(crate) fn sidebar(&self) -> Vec<TreeNode> {
        self.workspace.forest().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Page tree unavailable");
            Vec::new()
        })
    }

    /// Assistant answering with the configured default model.
    pub(crate) fn assistant(&self) -> Assistant {
        Assistant::new(self.settings.get().model)
    }
}
