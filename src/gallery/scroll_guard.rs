// SPDX-License-Identifier: MPL-2.0
//! Closes the open tile once the page has scrolled far enough away from it.
//!
//! The guard is polled on a fixed interval. It compares the current scroll
//! offset with the offset recorded when the tile opened and forces a close
//! past the threshold. After forcing a close it stays quiet for a full flip
//! cycle so one scroll gesture never closes twice.

use super::orchestrator::{Orchestrator, ToggleOutcome};
use crate::config::{
    DEFAULT_SCROLL_POLL_SECS, DEFAULT_SCROLL_THRESHOLD, MAX_SCROLL_POLL_SECS,
    MAX_SCROLL_THRESHOLD, MIN_SCROLL_POLL_SECS, MIN_SCROLL_THRESHOLD,
};
use crate::error::Result;
use std::time::{Duration, Instant};

/// Threshold and polling interval for the scroll guard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPolicy {
    threshold: f32,
    poll: Duration,
}

impl ScrollPolicy {
    /// Creates a policy, clamping both values to their valid ranges.
    ///
    /// A non-finite threshold falls back to the default.
    #[must_use]
    pub fn new(threshold: f32, poll_secs: u64) -> Self {
        let threshold = if threshold.is_finite() {
            threshold
        } else {
            DEFAULT_SCROLL_THRESHOLD
        };
        Self {
            threshold: threshold.clamp(MIN_SCROLL_THRESHOLD, MAX_SCROLL_THRESHOLD),
            poll: Duration::from_secs(poll_secs.clamp(MIN_SCROLL_POLL_SECS, MAX_SCROLL_POLL_SECS)),
        }
    }

    #[must_use]
    pub fn threshold(self) -> f32 {
        self.threshold
    }

    #[must_use]
    pub fn poll_interval(self) -> Duration {
        self.poll
    }
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD, DEFAULT_SCROLL_POLL_SECS)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScrollGuard {
    policy: ScrollPolicy,
    anchor: Option<f32>,
    suppressed_until: Option<Instant>,
}

impl ScrollGuard {
    #[must_use]
    pub fn new(policy: ScrollPolicy) -> Self {
        Self {
            policy,
            anchor: None,
            suppressed_until: None,
        }
    }

    #[must_use]
    pub fn policy(&self) -> ScrollPolicy {
        self.policy
    }

    /// Records the scroll offset at the moment a tile opened.
    pub fn on_open(&mut self, position: f32) {
        self.anchor = Some(position);
    }

    /// Whether a forced close is still being held back.
    #[must_use]
    pub fn is_suppressed(&self, now: Instant) -> bool {
        self.suppressed_until.is_some_and(|until| now < until)
    }

    /// Checks the current scroll offset and force-closes the open tile when
    /// it has moved past the threshold.
    ///
    /// Returns the toggle outcome when a close was forced.
    pub fn sample(
        &mut self,
        orchestrator: &mut Orchestrator,
        position: f32,
        now: Instant,
    ) -> Result<Option<ToggleOutcome>> {
        if !self.is_suppressed(now) {
            self.suppressed_until = None;
        }

        let Some(active) = orchestrator.active() else {
            self.anchor = None;
            return Ok(None);
        };

        // A tile opened without on_open: anchor at the first sample.
        let anchor = *self.anchor.get_or_insert(position);

        if self.suppressed_until.is_some() || orchestrator.is_transforming() {
            return Ok(None);
        }

        if (position - anchor).abs() <= self.policy.threshold {
            return Ok(None);
        }

        self.suppressed_until = Some(now + orchestrator.timing().full_cycle());
        let outcome = orchestrator.toggle(active.row, active.piece, true, now)?;
        tracing::info!(
            row = active.row,
            piece = active.piece,
            delta = position - anchor,
            "scrolled away from open tile, closing"
        );
        Ok(Some(outcome))
    }
}
