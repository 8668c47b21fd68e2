//! Backend binding gate.
//!
//! The desktop shell's bridge publishes the backend handle at some point
//! after startup; until then every command must fail fast instead of
//! blocking. The gate caches the handle on first sight and answers
//! [`acquire`](BindingGate::acquire) without blocking. A background poller
//! retries the probe with backoff until the handle appears or the wait
//! budget runs out, after which the gate is permanently exhausted.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::{SessionError, SessionResult};

use super::commands::BackendCommands;

/// Initial poll interval. Matches the bridge's publication granularity.
const INITIAL_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Backoff ceiling for the poll interval.
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(1600);

/// Total wait budget before the gate gives up permanently.
const WAIT_BUDGET: Duration = Duration::from_secs(30);

/// Checks whether the bridge has published the backend handle yet.
///
/// The probe must be cheap and non-blocking; it is called repeatedly from
/// the poller and once per failed `acquire`.
pub trait BridgeProbe: Send + Sync {
    /// The backend handle, if the bridge has published it.
    fn probe(&self) -> Option<Arc<dyn BackendCommands>>;
}

#[derive(Default)]
struct GateState {
    handle: Option<Arc<dyn BackendCommands>>,
    exhausted: bool,
}

/// Process-scoped holder for the backend handle.
///
/// Constructed once and injected into the controller. The handle is assumed
/// stable for the process lifetime, so the gate never re-checks after the
/// first success.
pub struct BindingGate {
    state: Arc<StdMutex<GateState>>,
    probe: Arc<dyn BridgeProbe>,
    poller: StdMutex<Option<JoinHandle<()>>>,
}

impl BindingGate {
    /// Create a gate over `probe` and start the background poller.
    pub fn new(probe: Arc<dyn BridgeProbe>) -> Self {
        let gate = Self {
            state: Arc::new(StdMutex::new(GateState::default())),
            probe,
            poller: StdMutex::new(None),
        };
        gate.spawn_poller();
        gate
    }

    /// Create a gate that is ready from the start.
    ///
    /// For embeddings where the handle is known at construction (and for
    /// tests); no poller is spawned.
    pub fn ready(handle: Arc<dyn BackendCommands>) -> Self {
        Self {
            state: Arc::new(StdMutex::new(GateState {
                handle: Some(handle),
                exhausted: false,
            })),
            probe: Arc::new(NeverProbe),
            poller: StdMutex::new(None),
        }
    }

    /// Resolve the backend handle without blocking.
    ///
    /// Returns the cached handle if the poller (or an earlier `acquire`)
    /// already found it; otherwise probes once directly, caching on success.
    /// Once the wait budget is exhausted the gate answers `BackendNotReady`
    /// unconditionally.
    pub fn acquire(&self) -> SessionResult<Arc<dyn BackendCommands>> {
        let mut state = self.state.lock().unwrap();
        if let Some(handle) = &state.handle {
            return Ok(Arc::clone(handle));
        }
        if !state.exhausted {
            if let Some(handle) = self.probe.probe() {
                tracing::info!("backend binding resolved on direct probe");
                state.handle = Some(Arc::clone(&handle));
                return Ok(handle);
            }
        }
        Err(SessionError::BackendNotReady)
    }

    /// Whether the handle has been resolved.
    pub fn is_ready(&self) -> bool {
        self.state.lock().unwrap().handle.is_some()
    }

    /// Whether the wait budget ran out before the bridge published a handle.
    pub fn is_exhausted(&self) -> bool {
        self.state.lock().unwrap().exhausted
    }

    /// Cancel the background poller.
    ///
    /// Safe to call at any time; a handle already cached stays cached.
    pub fn shutdown(&self) {
        if let Some(handle) = self.poller.lock().unwrap().take() {
            handle.abort();
        }
    }

    /// Spawn the poller: probe with backoff until the handle appears or the
    /// wait budget is spent, then stop for good.
    fn spawn_poller(&self) {
        // Guard: only spawn if a tokio runtime is available (sync construction in tests)
        let Ok(_handle) = tokio::runtime::Handle::try_current() else {
            return;
        };

        let state = Arc::clone(&self.state);
        let probe = Arc::clone(&self.probe);

        let task = tokio::spawn(async move {
            let mut interval = INITIAL_POLL_INTERVAL;
            let mut waited = Duration::ZERO;

            loop {
                {
                    let mut state = state.lock().unwrap();
                    if state.handle.is_some() {
                        // Resolved by a direct acquire in the meantime.
                        break;
                    }
                    if let Some(handle) = probe.probe() {
                        tracing::info!(waited_ms = waited.as_millis() as u64, "backend binding ready");
                        state.handle = Some(handle);
                        break;
                    }
                    if waited >= WAIT_BUDGET {
                        tracing::warn!(
                            budget_ms = WAIT_BUDGET.as_millis() as u64,
                            "backend binding never appeared, giving up"
                        );
                        state.exhausted = true;
                        break;
                    }
                }

                tokio::time::sleep(interval).await;
                waited += interval;
                interval = (interval * 2).min(MAX_POLL_INTERVAL);
            }
        });

        *self.poller.lock().unwrap() = Some(task);
    }
}

impl Drop for BindingGate {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Probe for gates constructed with a known handle.
struct NeverProbe;

impl BridgeProbe for NeverProbe {
    fn probe(&self) -> Option<Arc<dyn BackendCommands>> {
        None
    }
}
