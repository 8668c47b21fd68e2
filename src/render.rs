//! Rendering collaborator contract.
//!
//! The controller never touches presentation directly; it calls into this
//! trait and the shell's rendering layer interprets the calls. Tests
//! substitute a recording implementation.

use crate::dialog::{DialogHandle, DialogKind};
use crate::progress::ProgressSnapshot;
use crate::selection::PathInfo;
use crate::session::Page;

/// What the controller needs from the rendering layer.
pub trait Renderer: Send {
    /// Make `page` the visible page.
    fn render_page(&mut self, page: Page);

    /// Update the status line of `page`.
    fn render_status(&mut self, page: Page, text: &str);

    /// Update the progress display of `page`.
    fn render_progress(&mut self, page: Page, snapshot: &ProgressSnapshot);

    /// Replace the selection summary. `None` clears it.
    fn render_selection(&mut self, info: Option<&PathInfo>);

    /// Attach a dialog and its Escape listener; the returned handle owns both.
    fn show_dialog(&mut self, kind: DialogKind) -> DialogHandle;

    /// Detach the dialog node and remove its Escape listener.
    fn close_dialog(&mut self, handle: DialogHandle);
}
