//! Modal dialog management.
//!
//! The controller shows at most one overlay dialog at a time: the file/folder
//! chooser or an error dialog. The rendering layer attaches the dialog and
//! its Escape key listener, and hands back a [`DialogHandle`] describing
//! both. Every closing path (close control, overlay click, Escape, forced
//! close on re-open) routes through [`DialogManager::close`], which returns
//! the handle to the renderer so the listener is always detached.

use crate::render::Renderer;

/// Which overlay dialog is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    /// File-or-folder chooser with exactly two choices.
    Chooser,
    /// Error dialog with a message and a confirm control.
    Error { message: String },
}

impl DialogKind {
    /// Whether this is the chooser dialog.
    pub fn is_chooser(&self) -> bool {
        matches!(self, DialogKind::Chooser)
    }
}

/// Opaque id of the dialog node the renderer attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Opaque id of the keydown listener the renderer installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Live dialog descriptor.
///
/// Owns the keyboard listener it installed; whoever closes the dialog is
/// responsible for handing the descriptor back to the renderer so the
/// listener is removed. Not `Clone` on purpose: there is exactly one owner.
#[derive(Debug, PartialEq, Eq)]
pub struct DialogHandle {
    /// Which dialog this is.
    pub kind: DialogKind,
    /// The attached dialog node.
    pub element: ElementId,
    /// The Escape listener installed on open.
    pub key_listener: ListenerId,
}

/// Keys the dialog layer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Cancels the open dialog.
    Escape,
    /// Anything the dialog layer ignores.
    Other,
}

/// Single-deep stack of overlay dialogs.
#[derive(Debug, Default)]
pub struct DialogManager {
    active: Option<DialogHandle>,
}

impl DialogManager {
    /// Create a manager with no dialog attached.
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Open a dialog, force-closing any dialog already open.
    ///
    /// Last-request-wins: dialogs are never stacked.
    pub fn open(&mut self, renderer: &mut dyn Renderer, kind: DialogKind) {
        if self.active.is_some() {
            tracing::debug!("force-closing previous dialog before open");
            self.close(renderer);
        }
        let handle = renderer.show_dialog(kind);
        self.active = Some(handle);
    }

    /// Close the open dialog, if any.
    ///
    /// Returns the kind that was closed. The handle goes back to the
    /// renderer, which removes the node and detaches the Escape listener.
    pub fn close(&mut self, renderer: &mut dyn Renderer) -> Option<DialogKind> {
        let handle = self.active.take()?;
        let kind = handle.kind.clone();
        renderer.close_dialog(handle);
        Some(kind)
    }

    /// Handle a key press while a dialog may be open.
    ///
    /// Escape closes the dialog; everything else is ignored. Returns the
    /// kind that was closed, if any.
    pub fn handle_key(&mut self, renderer: &mut dyn Renderer, key: Key) -> Option<DialogKind> {
        match key {
            Key::Escape if self.active.is_some() => self.close(renderer),
            _ => None,
        }
    }

    /// Kind of the currently open dialog, if any.
    pub fn active_kind(&self) -> Option<&DialogKind> {
        self.active.as_ref().map(|handle| &handle.kind)
    }

    /// Whether any dialog is attached.
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }
}
