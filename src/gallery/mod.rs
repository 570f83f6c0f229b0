// SPDX-License-Identifier: MPL-2.0
//! Gallery model and flip orchestration.
//!
//! # Modules
//!
//! - [`item`]: items as delivered by the data source and their per-layout placement
//! - [`columns`]: the one, two and three columns-per-row layouts
//! - [`neighbors`]: which secondary images neighbor tiles reveal
//! - [`rows`]: row building and per-tile [`Toggle`] state
//! - [`timing`]: flip durations
//! - [`timeline`]: deadline-ordered step queue
//! - [`orchestrator`]: the flip state machine
//! - [`scroll_guard`]: closes the open tile after scrolling away

pub mod columns;
pub mod item;
pub mod neighbors;
pub mod orchestrator;
pub mod rows;
pub mod scroll_guard;
pub mod timeline;
pub mod timing;

pub use columns::Columns;
pub use item::{ImageRef, Item, Piece, RowPosition};
pub use neighbors::NeighborImages;
pub use orchestrator::{
    ActiveTile, Direction, IgnoreReason, Orchestrator, Phase, Role, ToggleOutcome, Transition,
};
pub use rows::{build_rows, Grid, Layouts, Row, Toggle};
pub use scroll_guard::{ScrollGuard, ScrollPolicy};
pub use timing::FlipTiming;
