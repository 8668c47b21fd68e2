//! Progress projection.
//!
//! Pure transform from the backend's raw transfer stats into the
//! display-ready snapshot the rendering layer consumes. Each pushed stats
//! event replaces the previous snapshot wholesale; nothing is merged.

use serde::Serialize;

use crate::bridge::RawTransferStats;

/// Placeholder shown while the backend has no time estimate yet.
pub const ETA_PLACEHOLDER: &str = "computing...";

/// Display-ready projection of one transfer-stats event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    /// Total number of files in the transfer.
    pub total_files: u64,
    /// Files fully transferred so far.
    pub completed_files: u64,
    /// Total payload size in bytes.
    pub total_bytes: u64,
    /// Bytes transferred so far.
    pub transferred_bytes: u64,
    /// Progress clamped to 0–100.
    pub progress_percent: f64,
    /// Progress with one fractional digit, e.g. `"42.5%"`.
    pub percent_text: String,
    /// Speed with one fractional digit, e.g. `"12.5 MB/s"`; `"0 MB/s"` when unknown.
    pub speed_text: String,
    /// Remaining-time estimate, verbatim from the backend, or the placeholder.
    pub eta_text: String,
    /// File currently being transferred.
    pub current_file: Option<String>,
    /// Backend status line for this snapshot.
    pub status_text: Option<String>,
}

impl ProgressSnapshot {
    /// The zero/reset projection: everything back to the initial display.
    ///
    /// Same shape as projecting an all-default raw event, so a reset is
    /// indistinguishable from a real zero snapshot in the rendering layer.
    pub fn zeroed() -> Self {
        project(&RawTransferStats::default())
    }
}

/// Project raw stats into a display-ready snapshot.
pub fn project(raw: &RawTransferStats) -> ProgressSnapshot {
    let progress_percent = raw.progress.unwrap_or(0.0).clamp(0.0, 100.0);

    let speed_text = match raw.current_speed {
        Some(speed) => format!("{:.1} MB/s", speed),
        None => "0 MB/s".to_string(),
    };

    let eta_text = match &raw.estimated_time {
        Some(eta) => eta.clone(),
        None => ETA_PLACEHOLDER.to_string(),
    };

    ProgressSnapshot {
        total_files: raw.total_files,
        completed_files: raw.completed_files,
        total_bytes: raw.total_bytes,
        transferred_bytes: raw.transferred_bytes,
        progress_percent,
        percent_text: format!("{:.1}%", progress_percent),
        speed_text,
        eta_text,
        current_file: raw.current_file.clone(),
        status_text: raw.status.clone(),
    }
}
