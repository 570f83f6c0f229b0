// SPDX-License-Identifier: MPL-2.0
//! Columns-per-row layouts.
//!
//! Every gallery keeps three layouts side by side (one, two and three tiles
//! per row). The window width decides which one is presented.

use crate::config::{MOBILE_MAX_WIDTH, TWO_COLUMN_MAX_WIDTH};
use std::fmt;

/// Number of tiles per row for a layout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Columns {
    One,
    Two,
    #[default]
    Three,
}

impl Columns {
    /// All supported layouts, narrowest first.
    pub const ALL: [Columns; 3] = [Columns::One, Columns::Two, Columns::Three];

    /// Largest supported columns-per-row value.
    pub const MAX: usize = 3;

    /// Returns the tile count per row.
    #[must_use]
    pub fn count(self) -> usize {
        match self {
            Columns::One => 1,
            Columns::Two => 2,
            Columns::Three => 3,
        }
    }

    /// Converts a raw count, returning `None` for unsupported values.
    #[must_use]
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(Columns::One),
            2 => Some(Columns::Two),
            3 => Some(Columns::Three),
            _ => None,
        }
    }

    /// Position of this layout in [`Columns::ALL`].
    #[must_use]
    pub fn slot(self) -> usize {
        self.count() - 1
    }

    /// Key used to label the layout (`ppr_1`, `ppr_2`, `ppr_3`).
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Columns::One => "ppr_1",
            Columns::Two => "ppr_2",
            Columns::Three => "ppr_3",
        }
    }

    /// Picks the layout to present for a window width, never exceeding
    /// the configured desktop layout.
    #[must_use]
    pub fn for_width(width: f32, desktop: Columns) -> Columns {
        let fitted = if width < MOBILE_MAX_WIDTH {
            Columns::One
        } else if width < TWO_COLUMN_MAX_WIDTH {
            Columns::Two
        } else {
            Columns::Three
        };
        fitted.min(desktop)
    }
}

impl fmt::Display for Columns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} per row", self.count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_round_trips_through_from_count() {
        for columns in Columns::ALL {
            assert_eq!(Columns::from_count(columns.count()), Some(columns));
        }
        assert_eq!(Columns::from_count(0), None);
        assert_eq!(Columns::from_count(4), None);
    }

    #[test]
    fn slots_index_all_in_order() {
        for (i, columns) in Columns::ALL.iter().enumerate() {
            assert_eq!(columns.slot(), i);
        }
    }

    #[test]
    fn width_breakpoints_select_layout() {
        assert_eq!(Columns::for_width(320.0, Columns::Three), Columns::One);
        assert_eq!(Columns::for_width(800.0, Columns::Three), Columns::Two);
        assert_eq!(Columns::for_width(1600.0, Columns::Three), Columns::Three);
    }

    #[test]
    fn desktop_setting_caps_wide_windows() {
        assert_eq!(Columns::for_width(1600.0, Columns::Two), Columns::Two);
        assert_eq!(Columns::for_width(320.0, Columns::Two), Columns::One);
    }

    #[test]
    fn keys_match_layout() {
        assert_eq!(Columns::One.key(), "ppr_1");
        assert_eq!(Columns::Three.key(), "ppr_3");
    }
}
