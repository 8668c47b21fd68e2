//! Backend command surface exposed through the bridge.
//!
//! The desktop shell binds the backend process into the client over an
//! asynchronous bridge; this trait is the client-side view of that binding.
//! It is object safe so the controller can hold `Arc<dyn BackendCommands>`
//! and tests can substitute a recording mock.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::events::RawTransferStats;

/// Failure of a bridge command call.
///
/// The bridge delivers backend rejections as strings; the controller wraps
/// them into its own error taxonomy before anything user-visible happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeError(pub String);

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BridgeError {}

/// Result of resolving metadata for a selected path.
///
/// Mirrors the wire shape of the backend's file-info response: a present
/// `error` field marks the whole result as a failure even though the call
/// itself resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Base name of the file or folder.
    pub name: String,
    /// Whether the path is a directory.
    pub is_directory: bool,
    /// Human-readable size, preformatted by the backend.
    pub size_display: String,
    /// Backend-reported failure (e.g. permission denied).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Commands the client issues on the backend process.
///
/// All calls are asynchronous and may fail; empty strings from the selection
/// calls mean the user cancelled the native picker, not an error.
#[async_trait]
pub trait BackendCommands: Send + Sync {
    /// Start sending the file or folder at `path`.
    async fn send(&self, path: &str) -> Result<(), BridgeError>;

    /// Start receiving.
    async fn receive(&self) -> Result<(), BridgeError>;

    /// Tear down and restart receive mode.
    async fn restart_receive(&self) -> Result<(), BridgeError>;

    /// Open the native file picker. Empty string if the user cancelled.
    async fn select_file(&self) -> Result<String, BridgeError>;

    /// Open the native folder picker. Empty string if the user cancelled.
    async fn select_folder(&self) -> Result<String, BridgeError>;

    /// Resolve display metadata for a path.
    async fn get_file_info(&self, path: &str) -> Result<FileInfo, BridgeError>;

    /// Pull the current transfer stats snapshot.
    async fn get_stats(&self) -> Result<RawTransferStats, BridgeError>;
}
