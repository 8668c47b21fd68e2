//! Transfer session controller.
//!
//! Owns the [`Session`] state and drives everything around it: page
//! navigation, transfer commands, the selection flow, dialogs, and the
//! reconciliation of backend-pushed events into UI state. Backend calls are
//! spawned tasks that settle through the [`SessionMessage`] channel; the
//! embedding shell selects over that channel, the bridge event subscription,
//! and user input, feeding each into the matching `handle_*` method.

use tokio::sync::mpsc;
use tokio::time::Duration;

use crate::bridge::{BindingGate, BridgeError, BridgeEvent, FileInfo, RawTransferStats};
use crate::dialog::{DialogKind, DialogManager, Key};
use crate::error::{SessionError, SessionResult};
use crate::progress::{self, ProgressSnapshot};
use crate::render::Renderer;
use crate::selection::{PathInfo, SelectionChoice, SelectionFlow, SelectionStage};

use super::messages::SessionMessage;
use super::{
    InFlightKind, Page, Session, STATUS_COMPLETED, STATUS_READY, STATUS_RECEIVING,
    STATUS_RESTARTING_RECEIVE, STATUS_SENDING, STATUS_STARTING_RECEIVE,
};

/// Delay between requesting a receive restart and issuing it.
const RESTART_DELAY: Duration = Duration::from_millis(500);

/// The session controller.
///
/// Commands return a [`SessionResult`] for observability, but every failure
/// has already been surfaced (status text or error dialog) and logged by the
/// time it is returned; callers are free to ignore it.
pub struct SessionController {
    session: Session,
    gate: BindingGate,
    renderer: Box<dyn Renderer>,
    dialogs: DialogManager,
    selection: SelectionFlow,
    message_tx: mpsc::UnboundedSender<SessionMessage>,
}

impl SessionController {
    /// Create a controller and the settlement channel the shell must drain.
    pub fn new(
        gate: BindingGate,
        renderer: Box<dyn Renderer>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionMessage>) {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let controller = Self {
            session: Session::new(),
            gate,
            renderer,
            dialogs: DialogManager::new(),
            selection: SelectionFlow::new(),
            message_tx,
        };
        (controller, message_rx)
    }

    /// Current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current selection flow state.
    pub fn selection(&self) -> &SelectionFlow {
        &self.selection
    }

    /// Current dialog state.
    pub fn dialogs(&self) -> &DialogManager {
        &self.dialogs
    }

    /// Tear down: stop the gate poller and release any open dialog.
    pub fn shutdown(&mut self) {
        self.dialogs.close(self.renderer.as_mut());
        self.selection.dismiss();
        self.gate.shutdown();
    }

    // ------------------------- navigation -------------------------

    /// Switch the active page.
    ///
    /// Entering Receive auto-starts receive mode (there is no manual start,
    /// only cancel/reset). Entering Send resets the status line to ready but
    /// keeps any previously selected path. Any open dialog is force-closed
    /// so its key listener cannot outlive the page it belongs to.
    pub fn navigate(&mut self, page: Page) {
        let closed = self.dialogs.close(self.renderer.as_mut());
        self.chooser_closed(closed);

        self.session.active_page = page;
        self.renderer.render_page(page);
        tracing::debug!(?page, "navigated");

        match page {
            Page::Home => {}
            Page::Send => {
                self.set_send_status(STATUS_READY.to_string());
            }
            Page::Receive => {
                self.set_receive_status(STATUS_STARTING_RECEIVE.to_string());
                let _ = self.receive();
            }
        }
    }

    // ------------------------- transfer commands -------------------------

    /// Send the selected file or folder.
    pub fn send(&mut self) -> SessionResult<()> {
        // Guard: one backend operation at a time
        if self.session.in_flight.is_some() {
            return Err(self.reject_send(SessionError::OperationInProgress));
        }

        // Guard: a path must have been selected
        let Some(path) = self.session.selected_path.clone() else {
            return Err(self.reject_send(SessionError::NoPathSelected));
        };

        let backend = match self.gate.acquire() {
            Ok(backend) => backend,
            Err(err) => return Err(self.reject_send(err)),
        };

        self.session.in_flight = Some(InFlightKind::Send);
        self.set_send_status(STATUS_SENDING.to_string());
        tracing::info!(path = %path, "send started");

        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = backend.send(&path).await;
            let _ = tx.send(SessionMessage::SendSettled { result });
        });
        Ok(())
    }

    /// Start receive mode.
    pub fn receive(&mut self) -> SessionResult<()> {
        // Guard: one backend operation at a time
        if self.session.in_flight.is_some() {
            return Err(self.reject_receive(SessionError::OperationInProgress));
        }

        let backend = match self.gate.acquire() {
            Ok(backend) => backend,
            Err(err) => return Err(self.reject_receive(err)),
        };

        self.session.in_flight = Some(InFlightKind::Receive);
        self.set_receive_status(STATUS_RECEIVING.to_string());
        tracing::info!("receive started");

        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = backend.receive().await;
            let _ = tx.send(SessionMessage::ReceiveSettled { result });
        });
        Ok(())
    }

    /// Restart receive mode after a fixed delay.
    ///
    /// Only meaningful on the Receive page; a no-op elsewhere. Best-effort:
    /// a failed restart leaves the page as-is and is not retried, the status
    /// line keeps reading as actively receiving.
    pub fn restart_receive(&mut self) -> SessionResult<()> {
        // Guard: only on the Receive page
        if self.session.active_page != Page::Receive {
            tracing::debug!("restart_receive ignored: receive page not active");
            return Ok(());
        }

        // Guard: one backend operation at a time
        if self.session.in_flight.is_some() {
            return Err(self.reject_receive(SessionError::OperationInProgress));
        }

        let backend = match self.gate.acquire() {
            Ok(backend) => backend,
            Err(err) => return Err(self.reject_receive(err)),
        };

        self.session.in_flight = Some(InFlightKind::RestartReceive);
        self.set_receive_status(STATUS_RESTARTING_RECEIVE.to_string());
        tracing::info!("receive restart scheduled");

        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(RESTART_DELAY).await;
            let result = backend.restart_receive().await;
            let _ = tx.send(SessionMessage::RestartSettled { result });
        });
        Ok(())
    }

    /// Reset the send page: clear the selection, status, and progress.
    ///
    /// Idempotent and purely local; an in-flight backend operation is NOT
    /// aborted, only the displayed state resets.
    pub fn reset_send(&mut self) {
        self.session.selected_path = None;
        self.selection.clear();
        self.renderer.render_selection(None);
        self.set_send_status(STATUS_READY.to_string());
        self.reset_progress();
    }

    /// Reset the receive page and restart receive mode.
    ///
    /// Same idempotence contract as [`reset_send`](Self::reset_send); the
    /// follow-up restart is best-effort.
    pub fn reset_receive(&mut self) -> SessionResult<()> {
        self.set_receive_status(STATUS_RESTARTING_RECEIVE.to_string());
        self.reset_progress();
        self.restart_receive()
    }

    /// Pull a stats snapshot from the backend and project it.
    ///
    /// Same routing rule as pushed stats: dropped while Home is active.
    pub fn refresh_stats(&mut self) -> SessionResult<()> {
        let backend = match self.gate.acquire() {
            Ok(backend) => backend,
            Err(err) => {
                tracing::warn!("stats refresh skipped: {}", err);
                return Err(err);
            }
        };

        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = backend.get_stats().await;
            let _ = tx.send(SessionMessage::StatsPulled { result });
        });
        Ok(())
    }

    // ------------------------- selection flow -------------------------

    /// Open the file/folder chooser dialog.
    ///
    /// Only valid on the Send page with nothing in flight.
    pub fn open_chooser(&mut self) -> SessionResult<()> {
        // Guard: chooser belongs to the Send page
        if self.session.active_page != Page::Send {
            tracing::debug!("chooser ignored: send page not active");
            return Ok(());
        }

        // Guard: no selection while an operation is in flight
        if self.session.in_flight.is_some() {
            return Err(self.reject_send(SessionError::OperationInProgress));
        }

        self.dialogs.open(self.renderer.as_mut(), DialogKind::Chooser);
        self.selection.chooser_opened();
        Ok(())
    }

    /// A chooser option was picked: close the chooser, open the native picker.
    pub fn choose(&mut self, choice: SelectionChoice) -> SessionResult<()> {
        // Guard: only meaningful while the chooser is up
        if self.selection.stage() != SelectionStage::ChooserOpen {
            tracing::debug!(?choice, "choice ignored: chooser not open");
            return Ok(());
        }

        self.dialogs.close(self.renderer.as_mut());

        let backend = match self.gate.acquire() {
            Ok(backend) => backend,
            Err(err) => {
                self.selection.dismiss();
                self.show_error(err.user_message());
                return Err(err);
            }
        };

        self.selection.picking(choice);
        tracing::debug!(?choice, "native picker opened");

        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = match choice {
                SelectionChoice::File => backend.select_file().await,
                SelectionChoice::Folder => backend.select_folder().await,
            };
            let _ = tx.send(SessionMessage::PickerSettled { choice, result });
        });
        Ok(())
    }

    /// Dismiss the open dialog (close control or overlay click).
    pub fn dismiss_dialog(&mut self) {
        let closed = self.dialogs.close(self.renderer.as_mut());
        self.chooser_closed(closed);
    }

    /// Route a key press. Escape cancels the open dialog.
    pub fn handle_key(&mut self, key: Key) {
        let closed = self.dialogs.handle_key(self.renderer.as_mut(), key);
        self.chooser_closed(closed);
    }

    // ------------------------- settlement handling -------------------------

    /// Apply a settlement message from a spawned backend call.
    ///
    /// Clearing `in_flight` here is the single authoritative path; the
    /// pushed completion event only touches status text. Clearance is
    /// idempotent, so a settlement racing a reset is harmless.
    pub fn handle_message(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::SendSettled { result } => {
                self.session.in_flight = None;
                match result {
                    Ok(()) => tracing::info!("send settled"),
                    Err(err) => {
                        tracing::error!("send failed: {}", err);
                        self.set_send_status(format!("Send failed: {}", err));
                    }
                }
            }
            SessionMessage::ReceiveSettled { result } => {
                self.session.in_flight = None;
                match result {
                    Ok(()) => tracing::info!("receive settled"),
                    Err(err) => {
                        tracing::error!("receive failed: {}", err);
                        self.set_receive_status(format!("Receive failed: {}", err));
                    }
                }
            }
            SessionMessage::RestartSettled { result } => {
                self.session.in_flight = None;
                match result {
                    Ok(()) => self.set_receive_status(STATUS_RECEIVING.to_string()),
                    Err(err) => {
                        // Best-effort: keep reading as actively receiving.
                        tracing::error!("receive restart failed: {}", err);
                        self.set_receive_status(format!("{}: {}", STATUS_RECEIVING, err));
                    }
                }
            }
            SessionMessage::PickerSettled { choice, result } => {
                self.picker_settled(choice, result);
            }
            SessionMessage::MetadataResolved { path, result } => {
                self.metadata_resolved(path, result);
            }
            SessionMessage::StatsPulled { result } => match result {
                Ok(stats) => self.apply_stats(stats),
                Err(err) => tracing::warn!("stats pull failed: {}", err),
            },
        }
    }

    // ------------------------- pushed events -------------------------

    /// Apply a backend-pushed event.
    ///
    /// Routing is strict: events for a page that is not active are dropped,
    /// never queued.
    pub fn handle_event(&mut self, event: BridgeEvent) {
        match event {
            BridgeEvent::StatusUpdated { status } => match self.session.active_page {
                Page::Send => self.set_send_status(status),
                Page::Receive => self.set_receive_status(status),
                Page::Home => {
                    tracing::trace!("status event dropped: no page listening");
                }
            },
            BridgeEvent::OperationCompleted => match self.session.active_page {
                Page::Send => self.set_send_status(STATUS_COMPLETED.to_string()),
                Page::Receive => self.set_receive_status(STATUS_COMPLETED.to_string()),
                Page::Home => {
                    tracing::trace!("completion event dropped: no page listening");
                }
            },
            BridgeEvent::StatsUpdated { stats } => self.apply_stats(stats),
        }
    }

    // ------------------------- internals -------------------------

    fn picker_settled(&mut self, choice: SelectionChoice, result: Result<String, BridgeError>) {
        match result {
            // User cancelled in the native picker: back to idle, silently.
            Ok(path) if path.is_empty() => {
                tracing::debug!(?choice, "native picker cancelled");
                self.selection.dismiss();
            }
            Ok(path) => {
                let backend = match self.gate.acquire() {
                    Ok(backend) => backend,
                    Err(err) => {
                        self.selection.dismiss();
                        self.show_error(err.user_message());
                        return;
                    }
                };
                self.selection.resolving();

                let tx = self.message_tx.clone();
                tokio::spawn(async move {
                    let result = backend.get_file_info(&path).await;
                    let _ = tx.send(SessionMessage::MetadataResolved { path, result });
                });
            }
            Err(err) => {
                let err = SessionError::OperationFailed(err.to_string());
                tracing::error!(?choice, "selection failed: {}", err);
                self.selection.dismiss();
                self.show_error(err.user_message());
            }
        }
    }

    fn metadata_resolved(&mut self, path: String, result: Result<FileInfo, BridgeError>) {
        let err = match result {
            Ok(info) => match info.error.clone() {
                // A resolved result carrying an error field is a failure.
                Some(reason) => SessionError::FileInfoError(reason),
                None => {
                    let summary = PathInfo::from(info);
                    self.renderer.render_selection(Some(&summary));
                    self.selection.resolved(summary);
                    self.session.selected_path = Some(path.clone());
                    tracing::info!(path = %path, "path selected");
                    return;
                }
            },
            Err(err) => SessionError::FileInfoError(err.to_string()),
        };

        // Failure path: selected_path stays untouched.
        tracing::error!(path = %path, "metadata resolution failed: {}", err);
        self.selection.dismiss();
        self.show_error(err.user_message());
    }

    fn apply_stats(&mut self, stats: RawTransferStats) {
        let page = self.session.active_page;
        if page == Page::Home {
            tracing::trace!("stats dropped: no page listening");
            return;
        }
        let snapshot = progress::project(&stats);
        self.renderer.render_progress(page, &snapshot);
        self.session.last_progress = Some(snapshot);
    }

    fn reset_progress(&mut self) {
        let zero = ProgressSnapshot::zeroed();
        self.renderer.render_progress(Page::Send, &zero);
        self.renderer.render_progress(Page::Receive, &zero);
        self.session.last_progress = Some(zero);
    }

    fn set_send_status(&mut self, text: String) {
        self.renderer.render_status(Page::Send, &text);
        self.session.send_status = text;
    }

    fn set_receive_status(&mut self, text: String) {
        self.renderer.render_status(Page::Receive, &text);
        self.session.receive_status = text;
    }

    /// Surface a rejected send-page command and pass the error through.
    fn reject_send(&mut self, err: SessionError) -> SessionError {
        tracing::warn!("send command rejected: {}", err);
        self.set_send_status(err.user_message());
        err
    }

    /// Surface a rejected receive-page command and pass the error through.
    fn reject_receive(&mut self, err: SessionError) -> SessionError {
        tracing::warn!("receive command rejected: {}", err);
        self.set_receive_status(err.user_message());
        err
    }

    fn show_error(&mut self, message: String) {
        self.dialogs
            .open(self.renderer.as_mut(), DialogKind::Error { message });
    }

    /// Bookkeeping after a dialog closed through a cancel path.
    fn chooser_closed(&mut self, closed: Option<DialogKind>) {
        if let Some(kind) = closed {
            if kind.is_chooser() && self.selection.stage() == SelectionStage::ChooserOpen {
                self.selection.dismiss();
            }
        }
    }
}
