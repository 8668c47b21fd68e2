//! Lanbeam session controller core.
//!
//! The client-side state machine of the Lanbeam file-transfer desktop app:
//! page navigation, transfer commands issued over the backend bridge, and
//! reconciliation of backend-pushed progress/status events into UI state.
//! Presentation and the transfer protocol live outside this crate, behind
//! the [`render::Renderer`] and [`bridge::BackendCommands`] traits.

pub mod bridge;
pub mod dialog;
pub mod error;
pub mod progress;
pub mod render;
pub mod selection;
pub mod session;

pub use bridge::{event_channel, BackendCommands, BindingGate, BridgeEvent, BridgeProbe};
pub use error::{SessionError, SessionResult};
pub use session::{Page, SessionController, SessionMessage};
