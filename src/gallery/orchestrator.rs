// SPDX-License-Identifier: MPL-2.0
//! Flip orchestration for the gallery grid.
//!
//! The [`Orchestrator`] owns every row and toggle of the three layouts and is
//! the only code that mutates them. A toggle request opens or closes the
//! active tile of the presented layout:
//!
//! - **open**: the clicked tile flips to its description right away, the
//!   other tiles of its row flip to a neighbor image after
//!   [`FlipTiming::padding`], and every other row fades out;
//! - **close**: the neighbor tiles flip back right away, the active tile
//!   flips back after the padding, other rows fade back in immediately and
//!   the active coordinates clear after [`FlipTiming::full_cycle`].
//!
//! Timed work is queued on a [`Timeline`] and runs when the owner calls
//! [`Orchestrator::advance`]. While any flip is in flight the grid is busy
//! and further toggles are ignored; it becomes idle again once as many flips
//! have completed as the row has tiles, plus [`FlipTiming::settle`].

use super::columns::Columns;
use super::item::ImageRef;
use super::neighbors;
use super::rows::{Grid, Layouts, Row, Toggle};
use super::timeline::Timeline;
use super::timing::FlipTiming;
use super::Item;
use crate::config::GalleryConfig;
use crate::error::{GridError, Result};
use std::time::Instant;

/// Direction of a flip relative to the active tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Open,
    Close,
}

/// Whether a flip concerns the active tile or one of its row neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Active,
    Neighbor,
}

/// One of the four tile flips a toggle can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub direction: Direction,
    pub role: Role,
}

impl Transition {
    pub const ACTIVATE: Self = Self::new(Direction::Open, Role::Active);
    pub const REVEAL_NEIGHBOR: Self = Self::new(Direction::Open, Role::Neighbor);
    pub const DEACTIVATE: Self = Self::new(Direction::Close, Role::Active);
    pub const RESTORE_NEIGHBOR: Self = Self::new(Direction::Close, Role::Neighbor);

    const fn new(direction: Direction, role: Role) -> Self {
        Self { direction, role }
    }

    /// Whether this flip waits for the padding before it starts.
    ///
    /// The second phase of a sequence is the one that moves away from
    /// the active tile's current face last: neighbors when opening, the
    /// active tile when closing.
    fn is_delayed(self) -> bool {
        matches!(
            (self.direction, self.role),
            (Direction::Open, Role::Neighbor) | (Direction::Close, Role::Active)
        )
    }

    /// Flag changes applied just before the tile flips.
    fn before_flip(self, toggle: &mut Toggle, active_piece: usize) {
        match (self.direction, self.role) {
            (Direction::Open, Role::Active) => {
                toggle.show_more_active = true;
                toggle.description_active = true;
            }
            (Direction::Open, Role::Neighbor) => {
                if let Some(hidden) = toggle.hide_back_neighbor_image.get_mut(active_piece) {
                    *hidden = false;
                }
                toggle.description_active = false;
                toggle.not_flippable = true;
            }
            (Direction::Close, Role::Neighbor) => {
                toggle.description_active = false;
                toggle.not_flippable = false;
            }
            (Direction::Close, Role::Active) => {}
        }
    }

    /// Flag changes applied once the flip animation has ended.
    fn after_flip(self, toggle: &mut Toggle, active_piece: usize) {
        match (self.direction, self.role) {
            (Direction::Close, Role::Neighbor) => {
                if let Some(hidden) = toggle.hide_back_neighbor_image.get_mut(active_piece) {
                    *hidden = true;
                }
            }
            (Direction::Close, Role::Active) => {
                toggle.show_more_active = false;
                toggle.description_active = false;
            }
            (Direction::Open, _) => {}
        }
    }
}

/// Coordinates of the open tile in the presented layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveTile {
    pub row: usize,
    pub piece: usize,
}

/// Coarse state of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No flip in flight; toggles are accepted.
    Idle,
    /// A toggle is in flight; further toggles are ignored.
    Transforming(Direction),
}

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Opened(ActiveTile),
    Closing(ActiveTile),
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A previous toggle has not settled yet.
    Transforming,
    /// The request targets the open tile without forcing a close.
    ActiveTile,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    BeginFlip {
        row: usize,
        piece: usize,
        active_piece: usize,
        transition: Transition,
    },
    EndFlip {
        row: usize,
        piece: usize,
        active_piece: usize,
        transition: Transition,
    },
    CloseReset {
        row: usize,
    },
    Settle,
}

/// Owner and sole mutator of the gallery's toggle state.
#[derive(Debug)]
pub struct Orchestrator {
    timing: FlipTiming,
    layouts: Layouts,
    presented: Columns,
    active: Option<ActiveTile>,
    direction: Option<Direction>,
    is_transforming: bool,
    flips_started: usize,
    flips_completed: usize,
    timeline: Timeline<Step>,
}

impl Orchestrator {
    /// Builds all layouts from `items` and presents the configured one.
    #[must_use]
    pub fn new(items: &[Item], config: &GalleryConfig) -> Self {
        Self {
            timing: config.timing,
            layouts: Layouts::new(items),
            presented: config.columns,
            active: None,
            direction: None,
            is_transforming: false,
            flips_started: 0,
            flips_completed: 0,
            timeline: Timeline::new(),
        }
    }

    #[must_use]
    pub fn timing(&self) -> FlipTiming {
        self.timing
    }

    /// Layout currently presented.
    #[must_use]
    pub fn columns(&self) -> Columns {
        self.presented
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.layouts.get(self.presented)
    }

    /// Grid of any layout, presented or not.
    #[must_use]
    pub fn layout(&self, columns: Columns) -> &Grid {
        self.layouts.get(columns)
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        self.grid().rows()
    }

    pub fn row(&self, row: usize) -> Result<&Row> {
        let rows = self.rows().len();
        Ok(self
            .grid()
            .row(row)
            .ok_or(GridError::RowOutOfRange { row, rows })?)
    }

    pub fn toggle_state(&self, row: usize, piece: usize) -> Result<&Toggle> {
        self.grid().check(row, piece)?;
        let columns = self.presented.count();
        Ok(self
            .row(row)?
            .toggle(piece)
            .ok_or(GridError::PieceOutOfRange { piece, columns })?)
    }

    #[must_use]
    pub fn active(&self) -> Option<ActiveTile> {
        self.active
    }

    #[must_use]
    pub fn is_transforming(&self) -> bool {
        self.is_transforming
    }

    #[must_use]
    pub fn state(&self) -> Phase {
        match (self.is_transforming, self.direction) {
            (true, Some(direction)) => Phase::Transforming(direction),
            (true, None) => Phase::Transforming(Direction::Open),
            (false, _) => Phase::Idle,
        }
    }

    /// Deadline of the next queued step, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timeline.next_deadline()
    }

    /// Whether any queued step or flip is still pending.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        self.is_transforming || !self.timeline.is_empty()
    }

    /// Neighbor image currently revealed on the back face of a tile.
    pub fn back_face(&self, row: usize, piece: usize) -> Result<Option<&ImageRef>> {
        let toggle = self.toggle_state(row, piece)?;
        let row = self.row(row)?;
        let shown = (0..self.presented.count())
            .filter(|&open| !toggle.hide_back_neighbor_image(open))
            .find_map(|open| {
                let slot = neighbors::slot_for(piece, open)?;
                row.piece(open)?.neighbors.get(slot)
            });
        Ok(shown)
    }

    /// Opens or closes a tile of the presented layout.
    ///
    /// - While a toggle is in flight, nothing happens.
    /// - With no open tile, `(row, piece)` opens.
    /// - With an open tile, any other tile or `force_close` closes it;
    ///   the open tile itself is ignored.
    ///
    /// Coordinates outside the presented grid are rejected before any state
    /// is looked at.
    pub fn toggle(
        &mut self,
        row: usize,
        piece: usize,
        force_close: bool,
        now: Instant,
    ) -> Result<ToggleOutcome> {
        self.grid().check(row, piece)?;

        if self.is_transforming {
            tracing::trace!(row, piece, "toggle ignored while transforming");
            return Ok(ToggleOutcome::Ignored(IgnoreReason::Transforming));
        }

        match self.active {
            None => self.open(ActiveTile { row, piece }, now),
            Some(active) if !force_close && active == (ActiveTile { row, piece }) => {
                tracing::trace!(row, piece, "toggle on open tile ignored");
                Ok(ToggleOutcome::Ignored(IgnoreReason::ActiveTile))
            }
            Some(active) => self.close(active, now),
        }
    }

    /// Runs every step due at or before `now`.
    ///
    /// Each step runs at its own deadline, so the result does not depend on
    /// how often `advance` is called.
    pub fn advance(&mut self, now: Instant) -> Result<()> {
        while let Some((due, step)) = self.timeline.pop_due(now) {
            self.run(step, due)?;
        }
        Ok(())
    }

    /// Flips the hover help on the front face of a tile.
    ///
    /// Tiles that are currently not flippable keep their state.
    pub fn set_front_hover(&mut self, row: usize, piece: usize, hovered: bool) -> Result<()> {
        let toggle = self.layouts.get_mut(self.presented).toggle_mut(row, piece)?;
        if !toggle.not_flippable && !toggle.show_more_active {
            toggle.front_hover = hovered;
        }
        Ok(())
    }

    /// Switches the presented layout.
    ///
    /// Any open tile or in-flight flip of the layout being left is dropped
    /// and its toggles are restored, so every layout that is not presented
    /// holds default state. Returns whether the layout changed.
    pub fn select_layout(&mut self, columns: Columns) -> bool {
        if columns == self.presented {
            return false;
        }

        if self.active.is_some() || self.has_pending_work() {
            tracing::debug!(from = %self.presented, to = %columns, "layout switch resets open tile");
            self.timeline.clear();
            self.layouts.get_mut(self.presented).reset();
            self.active = None;
            self.direction = None;
            self.is_transforming = false;
            self.flips_started = 0;
            self.flips_completed = 0;
        }

        tracing::debug!(columns = %columns, "presenting layout");
        self.presented = columns;
        true
    }

    fn open(&mut self, active: ActiveTile, now: Instant) -> Result<ToggleOutcome> {
        tracing::debug!(row = active.row, piece = active.piece, "opening tile");
        self.active = Some(active);
        self.direction = Some(Direction::Open);
        self.layouts.get_mut(self.presented).row_mut(active.row)?.active_row = true;

        self.launch(active.row, active.piece, active.piece, Transition::ACTIVATE, now)?;
        for piece in other_pieces(self.presented, active.piece) {
            self.launch(active.row, piece, active.piece, Transition::REVEAL_NEIGHBOR, now)?;
        }

        self.set_other_rows(active.row, true);
        Ok(ToggleOutcome::Opened(active))
    }

    fn close(&mut self, active: ActiveTile, now: Instant) -> Result<ToggleOutcome> {
        tracing::debug!(row = active.row, piece = active.piece, "closing tile");
        self.direction = Some(Direction::Close);

        for piece in other_pieces(self.presented, active.piece) {
            self.launch(active.row, piece, active.piece, Transition::RESTORE_NEIGHBOR, now)?;
        }
        self.launch(active.row, active.piece, active.piece, Transition::DEACTIVATE, now)?;

        self.set_other_rows(active.row, false);
        self.timeline
            .schedule(now + self.timing.full_cycle(), Step::CloseReset { row: active.row });
        Ok(ToggleOutcome::Closing(active))
    }

    /// Fades (or unfades) every row except `active_row`.
    fn set_other_rows(&mut self, active_row: usize, faded: bool) {
        let grid = self.layouts.get_mut(self.presented);
        for (_, row) in grid.rows_mut().enumerate().filter(|(i, _)| *i != active_row) {
            for toggle in row.toggles_mut() {
                toggle.fade = faded;
                toggle.not_flippable = faded;
            }
        }
    }

    /// Counts a flip as started and either begins it or queues its start.
    fn launch(
        &mut self,
        row: usize,
        piece: usize,
        active_piece: usize,
        transition: Transition,
        now: Instant,
    ) -> Result<()> {
        if self.flips_started == 0 {
            self.is_transforming = true;
        }
        if self.flips_started < self.presented.count() {
            self.flips_started += 1;
        }

        if transition.is_delayed() {
            self.timeline.schedule(
                now + self.timing.padding(),
                Step::BeginFlip {
                    row,
                    piece,
                    active_piece,
                    transition,
                },
            );
            Ok(())
        } else {
            self.begin_flip(row, piece, active_piece, transition, now)
        }
    }

    fn begin_flip(
        &mut self,
        row: usize,
        piece: usize,
        active_piece: usize,
        transition: Transition,
        now: Instant,
    ) -> Result<()> {
        let toggle = self.layouts.get_mut(self.presented).toggle_mut(row, piece)?;
        transition.before_flip(toggle, active_piece);
        toggle.transforming = true;
        toggle.transform = !toggle.transform;
        toggle.front_hover = false;

        self.timeline.schedule(
            now + self.timing.flip(),
            Step::EndFlip {
                row,
                piece,
                active_piece,
                transition,
            },
        );
        Ok(())
    }

    fn run(&mut self, step: Step, now: Instant) -> Result<()> {
        match step {
            Step::BeginFlip {
                row,
                piece,
                active_piece,
                transition,
            } => self.begin_flip(row, piece, active_piece, transition, now),
            Step::EndFlip {
                row,
                piece,
                active_piece,
                transition,
            } => {
                let toggle = self.layouts.get_mut(self.presented).toggle_mut(row, piece)?;
                toggle.transforming = false;
                transition.after_flip(toggle, active_piece);
                self.complete_flip(now);
                Ok(())
            }
            Step::CloseReset { row } => {
                self.layouts.get_mut(self.presented).row_mut(row)?.active_row = false;
                self.active = None;
                tracing::debug!(row, "tile closed");
                Ok(())
            }
            Step::Settle => {
                self.flips_started = 0;
                self.flips_completed = 0;
                self.is_transforming = false;
                self.direction = None;
                tracing::debug!("flips settled");
                Ok(())
            }
        }
    }

    /// Counts a finished flip; the last one of a row schedules the settle.
    fn complete_flip(&mut self, now: Instant) {
        self.flips_completed += 1;
        if self.flips_completed == self.presented.count() {
            self.timeline.schedule(now + self.timing.settle(), Step::Settle);
        }
    }
}

/// Pieces of a row other than the active one.
fn other_pieces(columns: Columns, active_piece: usize) -> impl Iterator<Item = usize> {
    (0..columns.count()).filter(move |&piece| piece != active_piece)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::item::ImageRef;
    use std::time::Duration;

    fn items(count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| {
                Item::new(
                    format!("item {i}"),
                    vec![
                        ImageRef::new(format!("p{i}")),
                        ImageRef::new(format!("s{i}a")),
                        ImageRef::new(format!("s{i}b")),
                    ],
                )
            })
            .collect()
    }

    fn orchestrator(count: usize, columns: Columns) -> Orchestrator {
        let config = GalleryConfig {
            columns,
            ..GalleryConfig::default()
        };
        Orchestrator::new(&items(count), &config)
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn toggle_at(o: &Orchestrator, row: usize, piece: usize) -> Toggle {
        o.toggle_state(row, piece).unwrap().clone()
    }

    fn description_count(o: &Orchestrator) -> usize {
        o.rows()
            .iter()
            .flat_map(Row::toggles)
            .filter(|t| t.description_active())
            .count()
    }

    #[test]
    fn new_orchestrator_is_idle() {
        let o = orchestrator(6, Columns::Three);
        assert_eq!(o.state(), Phase::Idle);
        assert!(o.active().is_none());
        assert!(!o.is_transforming());
        assert!(o.next_deadline().is_none());
        assert_eq!(o.rows().len(), 2);
    }

    #[test]
    fn open_marks_active_tile_and_fades_other_rows() {
        let mut o = orchestrator(6, Columns::Three);
        let t0 = Instant::now();

        let outcome = o.toggle(0, 1, false, t0).unwrap();
        assert_eq!(outcome, ToggleOutcome::Opened(ActiveTile { row: 0, piece: 1 }));
        assert_eq!(o.state(), Phase::Transforming(Direction::Open));
        assert!(o.row(0).unwrap().active_row());

        let active = toggle_at(&o, 0, 1);
        assert!(active.description_active());
        assert!(active.show_more_active());
        assert!(active.transforming());
        assert!(active.transform());

        for piece in 0..3 {
            let t = toggle_at(&o, 1, piece);
            assert!(t.fade());
            assert!(t.not_flippable());
        }

        // Neighbors have not started flipping yet.
        assert!(!toggle_at(&o, 0, 0).transform());
        assert!(!toggle_at(&o, 0, 2).transform());
    }

    #[test]
    fn neighbors_flip_after_padding() {
        let mut o = orchestrator(6, Columns::Three);
        let t0 = Instant::now();
        o.toggle(0, 1, false, t0).unwrap();

        o.advance(t0 + ms(449)).unwrap();
        assert!(!toggle_at(&o, 0, 0).transform());
        assert!(!toggle_at(&o, 0, 1).transforming());

        o.advance(t0 + ms(450)).unwrap();
        let left = toggle_at(&o, 0, 0);
        assert!(left.transform());
        assert!(left.transforming());
        assert!(left.not_flippable());
        assert!(!left.hide_back_neighbor_image(1));
    }

    #[test]
    fn open_settles_after_full_cycle() {
        let mut o = orchestrator(6, Columns::Three);
        let t0 = Instant::now();
        o.toggle(0, 1, false, t0).unwrap();

        o.advance(t0 + ms(850)).unwrap();
        assert!(o.is_transforming());
        assert!(!toggle_at(&o, 0, 0).transforming());

        o.advance(t0 + ms(900)).unwrap();
        assert_eq!(o.state(), Phase::Idle);
        assert_eq!(o.active(), Some(ActiveTile { row: 0, piece: 1 }));
        assert_eq!(description_count(&o), 1);
        assert!(o.next_deadline().is_none());
    }

    #[test]
    fn back_face_uses_center_tie_break() {
        let mut o = orchestrator(6, Columns::Three);
        let t0 = Instant::now();
        o.toggle(0, 1, false, t0).unwrap();
        o.advance(t0 + ms(900)).unwrap();

        assert_eq!(o.back_face(0, 0).unwrap().map(ImageRef::as_str), Some("s0a"));
        assert_eq!(o.back_face(0, 2).unwrap().map(ImageRef::as_str), Some("s2b"));
        assert_eq!(o.back_face(0, 1).unwrap(), None);
        assert_eq!(o.back_face(1, 0).unwrap(), None);
    }

    #[test]
    fn toggle_while_transforming_is_ignored() {
        let mut o = orchestrator(6, Columns::Three);
        let t0 = Instant::now();
        o.toggle(0, 1, false, t0).unwrap();

        let before = o.rows().to_vec();
        let outcome = o.toggle(1, 2, false, t0 + ms(100)).unwrap();
        assert_eq!(outcome, ToggleOutcome::Ignored(IgnoreReason::Transforming));
        assert_eq!(o.active(), Some(ActiveTile { row: 0, piece: 1 }));
        assert_eq!(o.rows(), &before[..]);

        let outcome = o.toggle(0, 1, true, t0 + ms(100)).unwrap();
        assert_eq!(outcome, ToggleOutcome::Ignored(IgnoreReason::Transforming));
    }

    #[test]
    fn toggle_on_open_tile_is_ignored() {
        let mut o = orchestrator(6, Columns::Three);
        let t0 = Instant::now();
        o.toggle(0, 1, false, t0).unwrap();
        o.advance(t0 + ms(900)).unwrap();

        let outcome = o.toggle(0, 1, false, t0 + ms(1000)).unwrap();
        assert_eq!(outcome, ToggleOutcome::Ignored(IgnoreReason::ActiveTile));
        assert_eq!(o.state(), Phase::Idle);
    }

    #[test]
    fn close_sequence_restores_initial_state() {
        let mut o = orchestrator(6, Columns::Three);
        let pristine = o.rows().to_vec();
        let t0 = Instant::now();
        o.toggle(0, 1, false, t0).unwrap();
        o.advance(t0 + ms(900)).unwrap();

        let t1 = t0 + ms(1000);
        let outcome = o.toggle(1, 0, false, t1).unwrap();
        assert_eq!(outcome, ToggleOutcome::Closing(ActiveTile { row: 0, piece: 1 }));
        assert_eq!(o.state(), Phase::Transforming(Direction::Close));

        // Other rows unfade at once, neighbors flip back at once.
        assert!(!toggle_at(&o, 1, 0).fade());
        assert!(!toggle_at(&o, 1, 0).not_flippable());
        let left = toggle_at(&o, 0, 0);
        assert!(!left.transform());
        assert!(!left.not_flippable());
        assert!(!left.hide_back_neighbor_image(1));

        // Overlay hides once the neighbor flip ends.
        o.advance(t1 + ms(400)).unwrap();
        assert!(toggle_at(&o, 0, 0).hide_back_neighbor_image(1));
        assert!(toggle_at(&o, 0, 1).description_active());

        // Active tile flips at padding, clears at full cycle.
        o.advance(t1 + ms(450)).unwrap();
        assert!(toggle_at(&o, 0, 1).transforming());
        o.advance(t1 + ms(850)).unwrap();
        assert!(!toggle_at(&o, 0, 1).description_active());
        assert!(o.active().is_none());
        assert!(!o.row(0).unwrap().active_row());

        o.advance(t1 + ms(900)).unwrap();
        assert_eq!(o.state(), Phase::Idle);
        assert_eq!(o.rows(), &pristine[..]);
    }

    #[test]
    fn force_close_on_open_tile_closes() {
        let mut o = orchestrator(6, Columns::Three);
        let t0 = Instant::now();
        o.toggle(0, 2, false, t0).unwrap();
        o.advance(t0 + ms(900)).unwrap();

        let outcome = o.toggle(0, 2, true, t0 + ms(1000)).unwrap();
        assert_eq!(outcome, ToggleOutcome::Closing(ActiveTile { row: 0, piece: 2 }));
    }

    #[test]
    fn advance_in_one_jump_matches_fine_ticks() {
        let t0 = Instant::now();
        let mut coarse = orchestrator(6, Columns::Three);
        let mut fine = orchestrator(6, Columns::Three);
        coarse.toggle(1, 0, false, t0).unwrap();
        fine.toggle(1, 0, false, t0).unwrap();

        coarse.advance(t0 + ms(2000)).unwrap();
        for step in 0..=200 {
            fine.advance(t0 + ms(step * 10)).unwrap();
        }

        assert_eq!(coarse.rows(), fine.rows());
        assert_eq!(coarse.state(), Phase::Idle);
        assert_eq!(fine.state(), Phase::Idle);
    }

    #[test]
    fn out_of_range_coordinates_fail_fast() {
        let mut o = orchestrator(6, Columns::Three);
        let t0 = Instant::now();
        assert!(matches!(
            o.toggle(2, 0, false, t0),
            Err(crate::error::Error::Grid(GridError::RowOutOfRange { row: 2, rows: 2 }))
        ));
        assert!(matches!(
            o.toggle(0, 3, false, t0),
            Err(crate::error::Error::Grid(GridError::PieceOutOfRange { .. }))
        ));
        assert_eq!(o.state(), Phase::Idle);
        assert!(o.active().is_none());
    }

    #[test]
    fn two_column_layout_flips_single_neighbor() {
        let mut o = orchestrator(4, Columns::Two);
        let t0 = Instant::now();
        o.toggle(1, 1, false, t0).unwrap();
        o.advance(t0 + ms(900)).unwrap();

        assert_eq!(o.state(), Phase::Idle);
        assert_eq!(o.back_face(1, 0).unwrap().map(ImageRef::as_str), Some("s2a"));
        assert!(toggle_at(&o, 0, 0).fade());
    }

    #[test]
    fn single_column_layout_settles_after_one_flip() {
        let mut o = orchestrator(3, Columns::One);
        let t0 = Instant::now();
        o.toggle(1, 0, false, t0).unwrap();

        o.advance(t0 + ms(400)).unwrap();
        assert!(o.is_transforming());
        o.advance(t0 + ms(450)).unwrap();
        assert_eq!(o.state(), Phase::Idle);
        assert!(toggle_at(&o, 0, 0).fade());
        assert!(toggle_at(&o, 2, 0).fade());
    }

    #[test]
    fn hover_is_ignored_on_faded_tiles() {
        let mut o = orchestrator(6, Columns::Three);
        o.set_front_hover(1, 0, true).unwrap();
        assert!(toggle_at(&o, 1, 0).front_hover());

        let t0 = Instant::now();
        o.toggle(0, 0, false, t0).unwrap();
        o.set_front_hover(1, 1, true).unwrap();
        assert!(!toggle_at(&o, 1, 1).front_hover());
    }

    #[test]
    fn flipping_clears_hover_help() {
        let mut o = orchestrator(6, Columns::Three);
        o.set_front_hover(0, 0, true).unwrap();
        o.toggle(0, 0, false, Instant::now()).unwrap();
        assert!(!toggle_at(&o, 0, 0).front_hover());
    }

    #[test]
    fn layout_switch_mid_flight_resets_left_layout() {
        let mut o = orchestrator(6, Columns::Three);
        let t0 = Instant::now();
        o.toggle(0, 1, false, t0).unwrap();

        assert!(o.select_layout(Columns::Two));
        assert_eq!(o.columns(), Columns::Two);
        assert_eq!(o.state(), Phase::Idle);
        assert!(o.active().is_none());
        assert!(o.next_deadline().is_none());
        assert_eq!(
            o.layout(Columns::Three),
            &Grid::new(&items(6), Columns::Three)
        );

        // The new layout accepts input right away.
        let outcome = o.toggle(2, 1, false, t0 + ms(10)).unwrap();
        assert!(matches!(outcome, ToggleOutcome::Opened(_)));
    }

    #[test]
    fn selecting_same_layout_is_a_no_op() {
        let mut o = orchestrator(6, Columns::Three);
        o.toggle(0, 1, false, Instant::now()).unwrap();
        assert!(!o.select_layout(Columns::Three));
        assert!(o.active().is_some());
    }
}
