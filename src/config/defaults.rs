// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Flip timing**: Flip animation, inter-phase gap and settle delays
//! - **Scroll guard**: Distance threshold and polling interval
//! - **Layout**: Columns per row and window-width breakpoints

// ==========================================================================
// Flip Timing Defaults
// ==========================================================================

/// Duration of a single flip animation (in milliseconds).
/// Must match the flip transition of the rendered tile.
pub const DEFAULT_FLIP_MS: u64 = 400;

/// Minimum flip duration (in milliseconds).
pub const MIN_FLIP_MS: u64 = 50;

/// Maximum flip duration (in milliseconds).
pub const MAX_FLIP_MS: u64 = 5_000;

/// Gap between the two phases of a flip sequence (in milliseconds).
pub const DEFAULT_INTER_PHASE_GAP_MS: u64 = 50;

/// Minimum inter-phase gap (in milliseconds).
pub const MIN_INTER_PHASE_GAP_MS: u64 = 0;

/// Maximum inter-phase gap (in milliseconds).
pub const MAX_INTER_PHASE_GAP_MS: u64 = 2_000;

/// Delay after the last flip before new toggles are accepted (in milliseconds).
pub const DEFAULT_SETTLE_MS: u64 = 50;

/// Minimum settle delay (in milliseconds).
pub const MIN_SETTLE_MS: u64 = 0;

/// Maximum settle delay (in milliseconds).
pub const MAX_SETTLE_MS: u64 = 1_000;

/// Interval of the animation tick driving the orchestrator (in milliseconds).
pub const ANIMATION_TICK_MS: u64 = 16;

// ==========================================================================
// Scroll Guard Defaults
// ==========================================================================

/// Scroll distance from the open tile that forces it closed.
pub const DEFAULT_SCROLL_THRESHOLD: f32 = 250.0;

/// Minimum scroll threshold.
pub const MIN_SCROLL_THRESHOLD: f32 = 1.0;

/// Maximum scroll threshold.
pub const MAX_SCROLL_THRESHOLD: f32 = 10_000.0;

/// Scroll position polling interval (in seconds).
pub const DEFAULT_SCROLL_POLL_SECS: u64 = 1;

/// Minimum polling interval (in seconds).
pub const MIN_SCROLL_POLL_SECS: u64 = 1;

/// Maximum polling interval (in seconds).
pub const MAX_SCROLL_POLL_SECS: u64 = 10;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Tiles per row on wide windows.
pub const DEFAULT_COLUMNS: usize = 3;

/// Minimum columns per row.
pub const MIN_COLUMNS: usize = 1;

/// Maximum columns per row.
pub const MAX_COLUMNS: usize = 3;

/// Windows narrower than this present one tile per row.
pub const MOBILE_MAX_WIDTH: f32 = 640.0;

/// Windows narrower than this present at most two tiles per row.
pub const TWO_COLUMN_MAX_WIDTH: f32 = 1024.0;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Flip timing validation
    assert!(MIN_FLIP_MS > 0);
    assert!(MIN_FLIP_MS <= DEFAULT_FLIP_MS);
    assert!(MAX_FLIP_MS >= DEFAULT_FLIP_MS);
    assert!(MIN_INTER_PHASE_GAP_MS <= DEFAULT_INTER_PHASE_GAP_MS);
    assert!(MAX_INTER_PHASE_GAP_MS >= DEFAULT_INTER_PHASE_GAP_MS);
    assert!(MIN_SETTLE_MS <= DEFAULT_SETTLE_MS);
    assert!(MAX_SETTLE_MS >= DEFAULT_SETTLE_MS);
    assert!(ANIMATION_TICK_MS < DEFAULT_FLIP_MS);

    // Scroll guard validation
    assert!(MIN_SCROLL_THRESHOLD > 0.0);
    assert!(MIN_SCROLL_THRESHOLD <= DEFAULT_SCROLL_THRESHOLD);
    assert!(MAX_SCROLL_THRESHOLD >= DEFAULT_SCROLL_THRESHOLD);
    assert!(MIN_SCROLL_POLL_SECS > 0);
    assert!(MIN_SCROLL_POLL_SECS <= DEFAULT_SCROLL_POLL_SECS);
    assert!(MAX_SCROLL_POLL_SECS >= DEFAULT_SCROLL_POLL_SECS);

    // Layout validation
    assert!(MIN_COLUMNS >= 1);
    assert!(MAX_COLUMNS <= 3);
    assert!(DEFAULT_COLUMNS >= MIN_COLUMNS);
    assert!(DEFAULT_COLUMNS <= MAX_COLUMNS);
    assert!(MOBILE_MAX_WIDTH < TWO_COLUMN_MAX_WIDTH);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_defaults_are_valid() {
        assert_eq!(DEFAULT_FLIP_MS, 400);
        assert_eq!(DEFAULT_INTER_PHASE_GAP_MS, 50);
        assert_eq!(DEFAULT_SETTLE_MS, 50);
    }

    #[test]
    fn scroll_defaults_are_valid() {
        assert_eq!(DEFAULT_SCROLL_THRESHOLD, 250.0);
        assert_eq!(DEFAULT_SCROLL_POLL_SECS, 1);
    }

    #[test]
    fn layout_defaults_are_valid() {
        assert_eq!(DEFAULT_COLUMNS, 3);
        assert!(MOBILE_MAX_WIDTH > 0.0);
    }
}
