//! Session state for the transfer controller.
//!
//! This module contains the top-level UI state and related types:
//! - [`Page`] - which page is currently active
//! - [`InFlightKind`] - the operation currently in flight, if any
//! - [`Session`] - the single mutable state object
//! - [`SessionMessage`] - settlement messages from spawned backend calls

mod controller;
mod messages;

pub use controller::SessionController;
pub use messages::SessionMessage;

use crate::progress::ProgressSnapshot;

/// Status line shown when a page is idle.
pub const STATUS_READY: &str = "Ready";
/// Status line while a send is in flight.
pub const STATUS_SENDING: &str = "Sending...";
/// Status line while receive mode is active.
pub const STATUS_RECEIVING: &str = "Receiving...";
/// Transitional status while receive mode starts up.
pub const STATUS_STARTING_RECEIVE: &str = "Starting receive...";
/// Transitional status while receive mode restarts.
pub const STATUS_RESTARTING_RECEIVE: &str = "Restarting receive...";
/// Status line set by the backend's completion event.
pub const STATUS_COMPLETED: &str = "Operation complete";

/// The three mutually exclusive top-level pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Landing page with the send/receive entry points.
    #[default]
    Home,
    /// Send page: selection summary, send controls, progress.
    Send,
    /// Receive page: auto-started receive mode, progress.
    Receive,
}

/// Kind of backend operation currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InFlightKind {
    Send,
    Receive,
    RestartReceive,
}

/// Top-level session state.
///
/// Created once at startup, lives for the process lifetime, and is mutated
/// only by the [`SessionController`] - never by the rendering layer.
#[derive(Debug)]
pub struct Session {
    /// The currently active page.
    pub active_page: Page,
    /// Status line of the send page.
    pub send_status: String,
    /// Status line of the receive page.
    pub receive_status: String,
    /// Path chosen through the selection flow. Send-page scoped.
    pub selected_path: Option<String>,
    /// Last projected progress snapshot, replaced wholesale on each event.
    pub last_progress: Option<ProgressSnapshot>,
    /// Mutual-exclusion guard for command issuance.
    pub in_flight: Option<InFlightKind>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh session: home page, ready status, nothing selected or in flight.
    pub fn new() -> Self {
        Self {
            active_page: Page::Home,
            send_status: STATUS_READY.to_string(),
            receive_status: STATUS_READY.to_string(),
            selected_path: None,
            last_progress: None,
            in_flight: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_starts_on_home_with_nothing_pending() {
        let session = Session::new();
        assert_eq!(session.active_page, Page::Home);
        assert_eq!(session.send_status, STATUS_READY);
        assert_eq!(session.receive_status, STATUS_READY);
        assert!(session.selected_path.is_none());
        assert!(session.last_progress.is_none());
        assert!(session.in_flight.is_none());
    }
}
