//! Path selection flow state.
//!
//! Tracks the modal choose-file-or-folder flow:
//! `Idle -> ChooserOpen -> {FilePicking | FolderPicking} -> ResolvingMetadata -> Idle`.
//! The backend calls themselves are issued by the controller; this state
//! machine only records where the flow is and the single-item summary of the
//! last successful selection.

use serde::Serialize;

use crate::bridge::FileInfo;

/// Which of the two chooser options was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChoice {
    File,
    Folder,
}

/// Where the selection flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStage {
    /// Nothing selection-related going on.
    #[default]
    Idle,
    /// The chooser dialog is open.
    ChooserOpen,
    /// Waiting on the native file picker.
    FilePicking,
    /// Waiting on the native folder picker.
    FolderPicking,
    /// Picker returned a path; waiting on metadata resolution.
    ResolvingMetadata,
}

/// Display summary of the selected path.
///
/// At most one is ever shown; each new selection overwrites the previous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathInfo {
    /// Base name of the file or folder.
    pub name: String,
    /// Whether the selection is a directory.
    pub is_directory: bool,
    /// Human-readable size, preformatted by the backend.
    pub size_display: String,
    /// Backend-reported failure, when metadata resolution went wrong.
    pub error: Option<String>,
}

impl From<FileInfo> for PathInfo {
    fn from(info: FileInfo) -> Self {
        Self {
            name: info.name,
            is_directory: info.is_directory,
            size_display: info.size_display,
            error: info.error,
        }
    }
}

/// Selection flow state machine.
#[derive(Debug, Default)]
pub struct SelectionFlow {
    stage: SelectionStage,
    summary: Option<PathInfo>,
}

impl SelectionFlow {
    /// Create a flow in the idle stage with no summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stage.
    pub fn stage(&self) -> SelectionStage {
        self.stage
    }

    /// Summary of the last successful selection, if any.
    pub fn summary(&self) -> Option<&PathInfo> {
        self.summary.as_ref()
    }

    /// The chooser dialog opened.
    pub fn chooser_opened(&mut self) {
        self.stage = SelectionStage::ChooserOpen;
    }

    /// A chooser option was picked and the native picker is now up.
    pub fn picking(&mut self, choice: SelectionChoice) {
        self.stage = match choice {
            SelectionChoice::File => SelectionStage::FilePicking,
            SelectionChoice::Folder => SelectionStage::FolderPicking,
        };
    }

    /// The native picker returned a non-empty path; metadata is being resolved.
    pub fn resolving(&mut self) {
        self.stage = SelectionStage::ResolvingMetadata;
    }

    /// Metadata resolution succeeded; store the new single-item summary.
    pub fn resolved(&mut self, info: PathInfo) {
        self.summary = Some(info);
        self.stage = SelectionStage::Idle;
    }

    /// Back to idle without touching the summary.
    ///
    /// Used for the silent paths: picker cancelled in the native dialog,
    /// chooser dismissed, or a failure already surfaced through the error
    /// dialog.
    pub fn dismiss(&mut self) {
        self.stage = SelectionStage::Idle;
    }

    /// Clear the summary and go idle.
    pub fn clear(&mut self) {
        self.summary = None;
        self.stage = SelectionStage::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str) -> PathInfo {
        PathInfo {
            name: name.to_string(),
            is_directory: false,
            size_display: "1.0 KB".to_string(),
            error: None,
        }
    }

    #[test]
    fn full_flow_returns_to_idle_with_summary() {
        let mut flow = SelectionFlow::new();
        assert_eq!(flow.stage(), SelectionStage::Idle);

        flow.chooser_opened();
        assert_eq!(flow.stage(), SelectionStage::ChooserOpen);

        flow.picking(SelectionChoice::Folder);
        assert_eq!(flow.stage(), SelectionStage::FolderPicking);

        flow.resolving();
        assert_eq!(flow.stage(), SelectionStage::ResolvingMetadata);

        flow.resolved(info("photos"));
        assert_eq!(flow.stage(), SelectionStage::Idle);
        assert_eq!(flow.summary().unwrap().name, "photos");
    }

    #[test]
    fn dismiss_keeps_previous_summary() {
        let mut flow = SelectionFlow::new();
        flow.resolved(info("a.txt"));

        flow.chooser_opened();
        flow.dismiss();
        assert_eq!(flow.stage(), SelectionStage::Idle);
        assert_eq!(flow.summary().unwrap().name, "a.txt");
    }

    #[test]
    fn new_selection_overwrites_summary() {
        let mut flow = SelectionFlow::new();
        flow.resolved(info("a.txt"));
        flow.resolved(info("b.txt"));
        assert_eq!(flow.summary().unwrap().name, "b.txt");
    }

    #[test]
    fn clear_drops_summary() {
        let mut flow = SelectionFlow::new();
        flow.resolved(info("a.txt"));
        flow.clear();
        assert!(flow.summary().is_none());
        assert_eq!(flow.stage(), SelectionStage::Idle);
    }
}
