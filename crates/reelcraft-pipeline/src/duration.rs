//! Duration planning: split a target total into act budgets.

use serde::{Deserialize, Serialize};

/// Second budgets for the three acts of the composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationSplit {
    pub opening_sec: i64,
    pub development_sec: i64,
    pub closing_sec: i64,
}

impl DurationSplit {
    pub fn total(&self) -> i64 {
        self.opening_sec + self.development_sec + self.closing_sec
    }
}

/// Split `total` seconds into opening/development/closing budgets at a
/// 20/60/20 ratio, with floors of 2s for the outer acts and 5s for the
/// middle, then fold any rounding residual into the development budget so
/// the sum is exact.
///
/// For very small totals the floors exceed `total` and the residual
/// correction pushes `development_sec` below its floor (possibly negative).
/// The split is best-effort in that range and never errors; the exact-sum
/// guarantee holds for every `total >= 1`.
pub fn split_duration(total: u32) -> DurationSplit {
    let total = i64::from(total);
    let fifth = (total as f64 * 0.2).round() as i64;
    let opening = fifth.max(2);
    let closing = fifth.max(2);
    let mut development = (total - opening - closing).max(5);

    let diff = total - (opening + development + closing);
    if diff != 0 {
        development += diff;
    }

    DurationSplit {
        opening_sec: opening,
        development_sec: development,
        closing_sec: closing,
    }
}
