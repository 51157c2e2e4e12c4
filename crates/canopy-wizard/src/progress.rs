//! Progress reporting for wizard runs.
//!
//! Step lifecycle events are broadcast to any number of subscribers for
//! host UIs that want to observe a run, independently of the textual
//! [`ProgressSink`] updates handed to execute steps.

use crate::records::WizardPhase;
use canopy_abstraction::{ProgressSink, ProgressUpdate};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Progress event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProgressEvent {
    /// A phase has started.
    PhaseStarted {
        /// Phase that started.
        phase: WizardPhase,
        /// Number of steps the phase will consider.
        step_count: usize,
    },
    /// A step has started running.
    StepStarted {
        /// Phase the step belongs to.
        phase: WizardPhase,
        /// Step name.
        step: String,
    },
    /// A step has completed successfully.
    StepCompleted {
        /// Phase the step belongs to.
        phase: WizardPhase,
        /// Step name.
        step: String,
        /// Duration of the step in milliseconds.
        duration_ms: u64,
    },
    /// A step has failed.
    StepFailed {
        /// Phase the step belongs to.
        phase: WizardPhase,
        /// Step name.
        step: String,
        /// Error message.
        error: String,
    },
}

/// Broadcast channel for wizard progress events.
///
/// Sends are lossy: subscribers that lag are disconnected by the runtime
/// and events sent with no subscribers are dropped.
#[derive(Debug, Clone)]
pub struct WizardProgress {
    broadcast_tx: broadcast::Sender<ProgressEvent>,
}

impl WizardProgress {
    /// Creates a new progress broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (broadcast_tx, _) = broadcast::channel(100);
        Self { broadcast_tx }
    }

    /// Subscribes to progress events.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.broadcast_tx.subscribe()
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: ProgressEvent) {
        let _ = self.broadcast_tx.send(event.clone());
        debug!("Progress event: {:?}", event);
    }
}

impl Default for WizardProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress sink that forwards updates to `tracing` at info level.
///
/// Useful for hosts without a progress UI, and as the default sink in
/// headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgressSink;

impl ProgressSink for TracingProgressSink {
    fn report(&self, update: ProgressUpdate) {
        tracing::info!(
            message = update.message.as_deref().unwrap_or(""),
            increment = update.increment,
            "Wizard progress"
        );
    }
}
