//! Common test utilities for integration tests.
//!
//! Provides the mock backend, the recording renderer, and helpers for
//! wiring a controller against them. Not every test binary uses every
//! helper.
#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::mpsc::UnboundedReceiver;

use lanbeam::bridge::BindingGate;
use lanbeam::session::{SessionController, SessionMessage};

/// Install a test subscriber so `RUST_LOG` works under `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Controller wired to a ready gate over `backend`, plus the settlement
/// receiver and the shared render log.
pub fn controller_with(
    backend: Arc<MockBackend>,
) -> (
    SessionController,
    UnboundedReceiver<SessionMessage>,
    Arc<StdMutex<RenderLog>>,
) {
    let (renderer, log) = RecordingRenderer::new();
    let gate = BindingGate::ready(backend);
    let (controller, message_rx) = SessionController::new(gate, renderer);
    (controller, message_rx, log)
}

/// Drain exactly one settlement message into the controller.
pub async fn settle_one(
    controller: &mut SessionController,
    message_rx: &mut UnboundedReceiver<SessionMessage>,
) {
    let message = message_rx.recv().await.expect("settlement message");
    controller.handle_message(message);
}

/// Run the whole selection flow so `path` ends up selected.
///
/// Configures the mock picker and metadata results, then drives chooser ->
/// picker -> metadata to settlement. Leaves the controller on the Send page.
pub async fn select_path(
    controller: &mut SessionController,
    message_rx: &mut UnboundedReceiver<SessionMessage>,
    backend: &MockBackend,
    path: &str,
) {
    use lanbeam::selection::SelectionChoice;
    use lanbeam::session::Page;

    backend.set_select_file_result(Ok(path.to_string()));
    controller.navigate(Page::Send);
    controller.open_chooser().expect("open chooser");
    controller.choose(SelectionChoice::File).expect("choose file");
    settle_one(controller, message_rx).await; // picker
    settle_one(controller, message_rx).await; // metadata
    assert_eq!(controller.session().selected_path.as_deref(), Some(path));
}
