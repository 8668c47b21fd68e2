//! Unified error handling for the session controller.
//!
//! Every failure a controller operation can produce is one of the variants
//! here. Backend rejections are wrapped into [`SessionError::OperationFailed`]
//! (or [`SessionError::FileInfoError`] for metadata resolution) and surfaced
//! as status text or an error dialog; nothing propagates as a panic or an
//! unhandled error, and no failure is fatal to the session.

use thiserror::Error;

/// Errors produced by session controller operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The bridge has not published the backend handle yet (or never will).
    #[error("backend binding is not ready")]
    BackendNotReady,

    /// A transfer command was issued while another is still in flight.
    #[error("another operation is already in progress")]
    OperationInProgress,

    /// Send was requested without a selected path.
    #[error("no path selected")]
    NoPathSelected,

    /// A backend command was issued and rejected.
    #[error("operation failed: {0}")]
    OperationFailed(String),

    /// Metadata resolution for a selected path failed.
    #[error("file info error: {0}")]
    FileInfoError(String),
}

impl SessionError {
    /// User-facing message for status text and dialogs.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::BackendNotReady => "Backend not ready".to_string(),
            SessionError::OperationInProgress => {
                "Another operation is already in progress".to_string()
            }
            SessionError::NoPathSelected => "Select a file or folder to send".to_string(),
            SessionError::OperationFailed(reason) => format!("Operation failed: {}", reason),
            SessionError::FileInfoError(reason) => format!("Failed to read file info: {}", reason),
        }
    }

    /// Whether the failure was produced locally, without a backend call.
    ///
    /// Local failures must never reach the backend at all.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            SessionError::BackendNotReady
                | SessionError::OperationInProgress
                | SessionError::NoPathSelected
        )
    }
}

/// Result alias for controller operations.
pub type SessionResult<T> = Result<T, SessionError>;
