//! The timeline repair state machine.
//!
//! A timeline candidate moves through a fixed set of states; the orchestrator
//! records every transition and an illegal one is an internal error, never a
//! silent skip. The punch-up branch re-enters `ConstraintChecked`, which
//! bounds the run to exactly one repair cycle by construction: after a
//! punch-up the only path out of `LengthReconciled` that was not already
//! taken is `Final`.

use reelcraft_types::{ReelcraftError, Result};

/// States a timeline candidate passes through on its way to acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineState {
    /// Direct generative output, unchecked.
    Draft,
    /// Structural and temporal invariants enforced.
    ConstraintChecked,
    /// Covered duration reconciled against the target.
    LengthReconciled,
    /// Engagement evaluation attached.
    Evaluated,
    /// Quality gate passed.
    Accepted,
    /// Gate rejected; a directed rewrite replaced the timeline.
    PunchedUp,
    /// Terminal. The composition is immutable from here.
    Final,
}

impl TimelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineState::Draft => "draft",
            TimelineState::ConstraintChecked => "constraint_checked",
            TimelineState::LengthReconciled => "length_reconciled",
            TimelineState::Evaluated => "evaluated",
            TimelineState::Accepted => "accepted",
            TimelineState::PunchedUp => "punched_up",
            TimelineState::Final => "final",
        }
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition(&self, next: TimelineState) -> bool {
        use TimelineState::*;
        matches!(
            (*self, next),
            (Draft, ConstraintChecked)
                | (ConstraintChecked, LengthReconciled)
                | (LengthReconciled, Evaluated)
                | (LengthReconciled, Final)
                | (Evaluated, Accepted)
                | (Evaluated, PunchedUp)
                | (Accepted, Final)
                | (PunchedUp, ConstraintChecked)
        )
    }

    /// Transition to `next`, erroring on an illegal move.
    pub fn advance(self, next: TimelineState) -> Result<TimelineState> {
        if self.can_transition(next) {
            Ok(next)
        } else {
            Err(ReelcraftError::InvalidState {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == TimelineState::Final
    }
}

impl std::fmt::Display for TimelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
