// SPDX-License-Identifier: MPL-2.0
//! Flip timing.

use crate::config::{
    DEFAULT_FLIP_MS, DEFAULT_INTER_PHASE_GAP_MS, DEFAULT_SETTLE_MS, MAX_FLIP_MS,
    MAX_INTER_PHASE_GAP_MS, MAX_SETTLE_MS, MIN_FLIP_MS, MIN_INTER_PHASE_GAP_MS, MIN_SETTLE_MS,
};
use std::time::Duration;

/// Durations that drive every flip sequence.
///
/// Only three values are stored; the padding before a delayed phase and the
/// full cycle are derived so their ratios to the flip always hold.
///
/// # Example
///
/// ```
/// use folio_flip::gallery::FlipTiming;
/// use std::time::Duration;
///
/// let timing = FlipTiming::default();
/// assert_eq!(timing.padding(), Duration::from_millis(450));
/// assert_eq!(timing.full_cycle(), Duration::from_millis(850));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipTiming {
    flip: Duration,
    inter_phase_gap: Duration,
    settle: Duration,
}

impl FlipTiming {
    /// Creates a timing from milliseconds, clamping each value to its range.
    #[must_use]
    pub fn from_millis(flip_ms: u64, inter_phase_gap_ms: u64, settle_ms: u64) -> Self {
        Self {
            flip: Duration::from_millis(flip_ms.clamp(MIN_FLIP_MS, MAX_FLIP_MS)),
            inter_phase_gap: Duration::from_millis(
                inter_phase_gap_ms.clamp(MIN_INTER_PHASE_GAP_MS, MAX_INTER_PHASE_GAP_MS),
            ),
            settle: Duration::from_millis(settle_ms.clamp(MIN_SETTLE_MS, MAX_SETTLE_MS)),
        }
    }

    /// Time a single flip animation takes.
    #[must_use]
    pub fn flip(self) -> Duration {
        self.flip
    }

    #[must_use]
    pub fn inter_phase_gap(self) -> Duration {
        self.inter_phase_gap
    }

    /// Delay after the last flip completes before the grid accepts input.
    #[must_use]
    pub fn settle(self) -> Duration {
        self.settle
    }

    /// Delay before the second phase of a sequence starts.
    #[must_use]
    pub fn padding(self) -> Duration {
        self.flip + self.inter_phase_gap
    }

    /// Worst-case time from a toggle until every flip it started has ended.
    #[must_use]
    pub fn full_cycle(self) -> Duration {
        self.flip * 2 + self.inter_phase_gap
    }
}

impl Default for FlipTiming {
    fn default() -> Self {
        Self::from_millis(DEFAULT_FLIP_MS, DEFAULT_INTER_PHASE_GAP_MS, DEFAULT_SETTLE_MS)
    }
}
