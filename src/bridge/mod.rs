//! Client-side view of the asynchronous backend bridge.
//!
//! This module contains everything that crosses the process boundary:
//! - [`BackendCommands`] - the command surface the controller invokes
//! - [`BridgeEvent`] - events the backend pushes, and the channel they ride
//! - [`BindingGate`] - resolution and caching of the backend handle

pub mod commands;
pub mod events;
pub mod gate;

pub use commands::{BackendCommands, BridgeError, FileInfo};
pub use events::{event_channel, BridgeEvent, EventPublisher, EventSubscription, RawTransferStats};
pub use gate::{BindingGate, BridgeProbe};
