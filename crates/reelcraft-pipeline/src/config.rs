//! Run configuration.

use crate::retry::BackoffPolicy;

/// Configuration for a composition run. Passed explicitly into the
/// orchestrator and every component that issues generative calls; there is
/// no process-wide client or configuration state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Attempts per generative call before the run aborts.
    pub max_attempts: usize,
    /// Delay policy between retry attempts.
    pub backoff: BackoffPolicy,
    /// Analysis segments included in the tail-extension repair prompt.
    pub extend_segment_sample: usize,
    /// Analysis segments included in the punch-up prompt.
    pub punch_up_segment_sample: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: BackoffPolicy::default(),
            extend_segment_sample: 5,
            punch_up_segment_sample: 8,
        }
    }
}
