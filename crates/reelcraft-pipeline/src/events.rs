//! Run event system for observability.
//!
//! Emits [`RunEvent`]s via a [`tokio::sync::broadcast`] channel so external
//! observers (loggers, progress UIs) can follow a run without coupling to the
//! orchestrator internals.

use serde::{Deserialize, Serialize};

/// Events emitted during a composition run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEvent {
    RunStarted {
        run_id: String,
        target_secs: u32,
        started_at: chrono::DateTime<chrono::Utc>,
    },
    RunCompleted {
        run_id: String,
        duration_ms: u64,
    },
    RunFailed {
        run_id: String,
        error: String,
    },
    StageStarted {
        stage: String,
    },
    StageCompleted {
        stage: String,
        duration_ms: u64,
    },
    GateChecked {
        accepted: bool,
        overall_score: u8,
        verdict: String,
    },
    TimelineRepaired {
        action: String,
    },
    StateChanged {
        state: String,
    },
}

/// Event emitter wrapping a broadcast sender.
#[derive(Clone)]
pub struct EventEmitter {
    sender: tokio::sync::broadcast::Sender<RunEvent>,
}

impl EventEmitter {
    /// Create a new emitter with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = tokio::sync::broadcast::channel(capacity);
        Self { sender }
    }

    /// Emit an event to all current subscribers.
    ///
    /// If there are no active receivers the event is silently dropped.
    pub fn emit(&self, event: RunEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to events. Returns a broadcast receiver.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<RunEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new(64)
    }
}
