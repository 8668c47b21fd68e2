//! Mock backend and recording renderer for integration tests.

use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;

use lanbeam::bridge::{BackendCommands, BridgeError, FileInfo, RawTransferStats};
use lanbeam::dialog::{DialogHandle, DialogKind, ElementId, ListenerId};
use lanbeam::progress::ProgressSnapshot;
use lanbeam::render::Renderer;
use lanbeam::selection::PathInfo;
use lanbeam::session::Page;

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Send(String),
    Receive,
    RestartReceive,
    SelectFile,
    SelectFolder,
    GetFileInfo(String),
    GetStats,
}

/// Call-recording backend with scriptable results.
pub struct MockBackend {
    calls: StdMutex<Vec<BackendCall>>,
    send_result: StdMutex<Result<(), BridgeError>>,
    receive_result: StdMutex<Result<(), BridgeError>>,
    restart_result: StdMutex<Result<(), BridgeError>>,
    select_file_result: StdMutex<Result<String, BridgeError>>,
    select_folder_result: StdMutex<Result<String, BridgeError>>,
    file_info_result: StdMutex<Result<FileInfo, BridgeError>>,
    stats_result: StdMutex<Result<RawTransferStats, BridgeError>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Backend where every call succeeds and pickers return empty (cancelled).
    pub fn new() -> Self {
        Self {
            calls: StdMutex::new(Vec::new()),
            send_result: StdMutex::new(Ok(())),
            receive_result: StdMutex::new(Ok(())),
            restart_result: StdMutex::new(Ok(())),
            select_file_result: StdMutex::new(Ok(String::new())),
            select_folder_result: StdMutex::new(Ok(String::new())),
            file_info_result: StdMutex::new(Ok(file_info("file.txt", false, "1.0 KB"))),
            stats_result: StdMutex::new(Ok(RawTransferStats::default())),
        }
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, call: &BackendCall) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    pub fn set_send_result(&self, result: Result<(), BridgeError>) {
        *self.send_result.lock().unwrap() = result;
    }

    pub fn set_receive_result(&self, result: Result<(), BridgeError>) {
        *self.receive_result.lock().unwrap() = result;
    }

    pub fn set_restart_result(&self, result: Result<(), BridgeError>) {
        *self.restart_result.lock().unwrap() = result;
    }

    pub fn set_select_file_result(&self, result: Result<String, BridgeError>) {
        *self.select_file_result.lock().unwrap() = result;
    }

    pub fn set_select_folder_result(&self, result: Result<String, BridgeError>) {
        *self.select_folder_result.lock().unwrap() = result;
    }

    pub fn set_file_info_result(&self, result: Result<FileInfo, BridgeError>) {
        *self.file_info_result.lock().unwrap() = result;
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BackendCommands for MockBackend {
    async fn send(&self, path: &str) -> Result<(), BridgeError> {
        self.record(BackendCall::Send(path.to_string()));
        self.send_result.lock().unwrap().clone()
    }

    async fn receive(&self) -> Result<(), BridgeError> {
        self.record(BackendCall::Receive);
        self.receive_result.lock().unwrap().clone()
    }

    async fn restart_receive(&self) -> Result<(), BridgeError> {
        self.record(BackendCall::RestartReceive);
        self.restart_result.lock().unwrap().clone()
    }

    async fn select_file(&self) -> Result<String, BridgeError> {
        self.record(BackendCall::SelectFile);
        self.select_file_result.lock().unwrap().clone()
    }

    async fn select_folder(&self) -> Result<String, BridgeError> {
        self.record(BackendCall::SelectFolder);
        self.select_folder_result.lock().unwrap().clone()
    }

    async fn get_file_info(&self, path: &str) -> Result<FileInfo, BridgeError> {
        self.record(BackendCall::GetFileInfo(path.to_string()));
        self.file_info_result.lock().unwrap().clone()
    }

    async fn get_stats(&self) -> Result<RawTransferStats, BridgeError> {
        self.record(BackendCall::GetStats);
        self.stats_result.lock().unwrap().clone()
    }
}

/// Probe for a bridge that never publishes a handle.
pub struct NeverReadyProbe;

impl lanbeam::bridge::BridgeProbe for NeverReadyProbe {
    fn probe(&self) -> Option<Arc<dyn BackendCommands>> {
        None
    }
}

/// Build a `FileInfo` without an error field.
pub fn file_info(name: &str, is_directory: bool, size_display: &str) -> FileInfo {
    FileInfo {
        name: name.to_string(),
        is_directory,
        size_display: size_display.to_string(),
        error: None,
    }
}

/// Everything the recording renderer saw.
#[derive(Debug, Default)]
pub struct RenderLog {
    pub pages: Vec<Page>,
    pub statuses: Vec<(Page, String)>,
    pub progress: Vec<(Page, ProgressSnapshot)>,
    pub selections: Vec<Option<PathInfo>>,
    pub opened_dialogs: Vec<DialogKind>,
    pub attached_dialogs: Vec<ElementId>,
    pub attached_listeners: Vec<ListenerId>,
    next_id: u64,
}

impl RenderLog {
    /// Last status rendered for `page`, if any.
    pub fn last_status(&self, page: Page) -> Option<&str> {
        self.statuses
            .iter()
            .rev()
            .find(|(p, _)| *p == page)
            .map(|(_, text)| text.as_str())
    }

    /// Last progress snapshot rendered for `page`, if any.
    pub fn last_progress(&self, page: Page) -> Option<&ProgressSnapshot> {
        self.progress
            .iter()
            .rev()
            .find(|(p, _)| *p == page)
            .map(|(_, snapshot)| snapshot)
    }

    /// Currently attached dialog nodes.
    pub fn dialog_count(&self) -> usize {
        self.attached_dialogs.len()
    }

    /// Currently attached keydown listeners.
    pub fn listener_count(&self) -> usize {
        self.attached_listeners.len()
    }
}

/// Renderer that records every call into a shared [`RenderLog`].
pub struct RecordingRenderer {
    log: Arc<StdMutex<RenderLog>>,
}

impl RecordingRenderer {
    /// The renderer box plus the shared log to assert on.
    pub fn new() -> (Box<dyn Renderer>, Arc<StdMutex<RenderLog>>) {
        let log = Arc::new(StdMutex::new(RenderLog::default()));
        (Box::new(Self { log: Arc::clone(&log) }), log)
    }
}

impl Renderer for RecordingRenderer {
    fn render_page(&mut self, page: Page) {
        self.log.lock().unwrap().pages.push(page);
    }

    fn render_status(&mut self, page: Page, text: &str) {
        self.log.lock().unwrap().statuses.push((page, text.to_string()));
    }

    fn render_progress(&mut self, page: Page, snapshot: &ProgressSnapshot) {
        self.log.lock().unwrap().progress.push((page, snapshot.clone()));
    }

    fn render_selection(&mut self, info: Option<&PathInfo>) {
        self.log.lock().unwrap().selections.push(info.cloned());
    }

    fn show_dialog(&mut self, kind: DialogKind) -> DialogHandle {
        let mut log = self.log.lock().unwrap();
        log.next_id += 1;
        let element = ElementId(log.next_id);
        let key_listener = ListenerId(log.next_id);
        log.attached_dialogs.push(element);
        log.attached_listeners.push(key_listener);
        log.opened_dialogs.push(kind.clone());
        DialogHandle {
            kind,
            element,
            key_listener,
        }
    }

    fn close_dialog(&mut self, handle: DialogHandle) {
        let mut log = self.log.lock().unwrap();
        log.attached_dialogs.retain(|id| *id != handle.element);
        log.attached_listeners.retain(|id| *id != handle.key_listener);
    }
}
