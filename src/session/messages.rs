//! SessionMessage enum for async settlement within the controller.

use crate::bridge::{BridgeError, FileInfo, RawTransferStats};
use crate::selection::SelectionChoice;

/// Messages received from spawned backend calls.
///
/// Every backend command the controller issues settles by sending one of
/// these back over the controller's message channel; the shell's event loop
/// feeds them to [`SessionController::handle_message`].
///
/// [`SessionController::handle_message`]: super::SessionController::handle_message
#[derive(Debug, Clone)]
pub enum SessionMessage {
    /// The backend send call settled.
    SendSettled { result: Result<(), BridgeError> },
    /// The backend receive call settled.
    ReceiveSettled { result: Result<(), BridgeError> },
    /// The delayed backend restart call settled.
    RestartSettled { result: Result<(), BridgeError> },
    /// A native picker call settled with the chosen path (empty = cancelled).
    PickerSettled {
        choice: SelectionChoice,
        result: Result<String, BridgeError>,
    },
    /// Metadata resolution for a picked path settled.
    MetadataResolved {
        path: String,
        result: Result<FileInfo, BridgeError>,
    },
    /// A pulled stats snapshot arrived.
    StatsPulled {
        result: Result<RawTransferStats, BridgeError>,
    },
}
