// SPDX-License-Identifier: MPL-2.0
//! Row building and per-tile toggle state.
//!
//! [`build_rows`] splits the item sequence into complete rows for one
//! layout. Items that do not fill a last row are left out of that layout.
//! [`Layouts`] keeps the three layouts built from the same items, each with
//! its own pieces and toggles.

use super::columns::Columns;
use super::item::{Item, Piece};
use super::neighbors;
use crate::error::GridError;

/// Visual state flags for one tile.
///
/// Only the flip orchestrator writes these; the rendering layer reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub(crate) transform: bool,
    pub(crate) transforming: bool,
    pub(crate) front_hover: bool,
    pub(crate) description_active: bool,
    pub(crate) not_flippable: bool,
    pub(crate) show_more_active: bool,
    pub(crate) fade: bool,
    /// Indexed by the open piece whose neighbor image this tile may show.
    pub(crate) hide_back_neighbor_image: Vec<bool>,
    pub(crate) hide_front_neighbor_image: Vec<bool>,
}

impl Toggle {
    /// Default toggle for a tile in a row of `columns` tiles: every flag is
    /// off and every neighbor image is hidden.
    #[must_use]
    pub fn new(columns: Columns) -> Self {
        Self {
            transform: false,
            transforming: false,
            front_hover: false,
            description_active: false,
            not_flippable: false,
            show_more_active: false,
            fade: false,
            hide_back_neighbor_image: vec![true; columns.count()],
            hide_front_neighbor_image: vec![true; columns.count()],
        }
    }

    /// Whether the tile is turned to its back face.
    #[must_use]
    pub fn transform(&self) -> bool {
        self.transform
    }

    /// Whether a flip animation is running on this tile.
    #[must_use]
    pub fn transforming(&self) -> bool {
        self.transforming
    }

    #[must_use]
    pub fn front_hover(&self) -> bool {
        self.front_hover
    }

    #[must_use]
    pub fn description_active(&self) -> bool {
        self.description_active
    }

    #[must_use]
    pub fn not_flippable(&self) -> bool {
        self.not_flippable
    }

    #[must_use]
    pub fn show_more_active(&self) -> bool {
        self.show_more_active
    }

    #[must_use]
    pub fn fade(&self) -> bool {
        self.fade
    }

    /// Whether the back-face neighbor image for open piece `k` is hidden.
    /// Out-of-range slots read as hidden.
    #[must_use]
    pub fn hide_back_neighbor_image(&self, k: usize) -> bool {
        self.hide_back_neighbor_image.get(k).copied().unwrap_or(true)
    }

    #[must_use]
    pub fn hide_front_neighbor_image(&self, k: usize) -> bool {
        self.hide_front_neighbor_image.get(k).copied().unwrap_or(true)
    }
}

/// A complete row: exactly `columns` pieces, one toggle per piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pieces: Vec<Piece>,
    toggles: Vec<Toggle>,
    pub(crate) active_row: bool,
}

impl Row {
    fn new(pieces: Vec<Piece>, columns: Columns) -> Self {
        let toggles = (0..pieces.len()).map(|_| Toggle::new(columns)).collect();
        Self {
            pieces,
            toggles,
            active_row: false,
        }
    }

    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[must_use]
    pub fn toggles(&self) -> &[Toggle] {
        &self.toggles
    }

    #[must_use]
    pub fn piece(&self, index: usize) -> Option<&Piece> {
        self.pieces.get(index)
    }

    #[must_use]
    pub fn toggle(&self, index: usize) -> Option<&Toggle> {
        self.toggles.get(index)
    }

    /// Whether this row holds the open tile.
    #[must_use]
    pub fn active_row(&self) -> bool {
        self.active_row
    }

    pub(crate) fn toggles_mut(&mut self) -> &mut [Toggle] {
        &mut self.toggles
    }
}

/// Splits `items` into complete rows of `columns` pieces.
///
/// Produces `items.len() / columns` rows; the remainder is dropped.
#[must_use]
pub fn build_rows(items: &[Item], columns: Columns) -> Vec<Row> {
    let pieces: Vec<Piece> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let (position, neighbors) = neighbors::resolve(items, index, columns);
            Piece {
                index,
                item: item.clone(),
                position,
                neighbors,
            }
        })
        .collect();

    pieces
        .chunks_exact(columns.count())
        .map(|chunk| Row::new(chunk.to_vec(), columns))
        .collect()
}

/// Rows of one layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    columns: Columns,
    rows: Vec<Row>,
}

impl Grid {
    #[must_use]
    pub fn new(items: &[Item], columns: Columns) -> Self {
        Self {
            columns,
            rows: build_rows(items, columns),
        }
    }

    #[must_use]
    pub fn columns(&self) -> Columns {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Checks that `(row, piece)` addresses a tile of this grid.
    pub fn check(&self, row: usize, piece: usize) -> Result<(), GridError> {
        if row >= self.rows.len() {
            return Err(GridError::RowOutOfRange {
                row,
                rows: self.rows.len(),
            });
        }
        if piece >= self.columns.count() {
            return Err(GridError::PieceOutOfRange {
                piece,
                columns: self.columns.count(),
            });
        }
        Ok(())
    }

    pub(crate) fn row_mut(&mut self, index: usize) -> Result<&mut Row, GridError> {
        let rows = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or(GridError::RowOutOfRange { row: index, rows })
    }

    pub(crate) fn toggle_mut(&mut self, row: usize, piece: usize) -> Result<&mut Toggle, GridError> {
        self.check(row, piece)?;
        let columns = self.columns.count();
        self.row_mut(row)?
            .toggles
            .get_mut(piece)
            .ok_or(GridError::PieceOutOfRange { piece, columns })
    }

    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut Row> {
        self.rows.iter_mut()
    }

    /// Restores every toggle and row flag to its default.
    pub(crate) fn reset(&mut self) {
        let columns = self.columns;
        for row in &mut self.rows {
            row.active_row = false;
            for toggle in &mut row.toggles {
                *toggle = Toggle::new(columns);
            }
        }
    }
}

/// The three layouts built from one item sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Layouts {
    grids: [Grid; 3],
}

impl Layouts {
    #[must_use]
    pub fn new(items: &[Item]) -> Self {
        Self {
            grids: Columns::ALL.map(|columns| Grid::new(items, columns)),
        }
    }

    #[must_use]
    pub fn get(&self, columns: Columns) -> &Grid {
        &self.grids[columns.slot()]
    }

    pub(crate) fn get_mut(&mut self, columns: Columns) -> &mut Grid {
        &mut self.grids[columns.slot()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::item::{ImageRef, RowPosition};

    fn items(count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| {
                Item::new(
                    format!("item {i}"),
                    vec![ImageRef::new(format!("p{i}")), ImageRef::new(format!("s{i}a"))],
                )
            })
            .collect()
    }

    #[test]
    fn row_count_is_floor_of_items_over_columns() {
        for count in 0..10 {
            let items = items(count);
            for columns in Columns::ALL {
                let rows = build_rows(&items, columns);
                assert_eq!(rows.len(), count / columns.count());
                assert!(rows.iter().all(|r| r.pieces().len() == columns.count()));
                assert!(rows.iter().all(|r| r.toggles().len() == columns.count()));
            }
        }
    }

    #[test]
    fn remainder_items_are_dropped() {
        let items = items(8);
        let rows = build_rows(&items, Columns::Three);
        let placed: Vec<usize> = rows
            .iter()
            .flat_map(|r| r.pieces().iter().map(|p| p.index))
            .collect();
        assert_eq!(placed, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn default_toggles_hide_neighbor_images() {
        let toggle = Toggle::new(Columns::Three);
        assert!(!toggle.transform());
        assert!(!toggle.transforming());
        assert!(!toggle.front_hover());
        assert!(!toggle.description_active());
        assert!(!toggle.not_flippable());
        assert!(!toggle.show_more_active());
        assert!(!toggle.fade());
        for k in 0..3 {
            assert!(toggle.hide_back_neighbor_image(k));
            assert!(toggle.hide_front_neighbor_image(k));
        }
    }

    #[test]
    fn rows_start_inactive() {
        let rows = build_rows(&items(6), Columns::Three);
        assert!(rows.iter().all(|r| !r.active_row()));
    }

    #[test]
    fn pieces_carry_layout_positions() {
        let rows = build_rows(&items(6), Columns::Three);
        let positions: Vec<RowPosition> = rows[1].pieces().iter().map(|p| p.position).collect();
        assert_eq!(
            positions,
            vec![RowPosition::Left, RowPosition::Center, RowPosition::Right]
        );
    }

    #[test]
    fn layouts_are_independent_copies() {
        let source = items(6);
        let mut layouts = Layouts::new(&source);
        layouts
            .get_mut(Columns::Three)
            .toggle_mut(0, 0)
            .unwrap()
            .fade = true;

        assert!(layouts.get(Columns::Three).row(0).unwrap().toggle(0).unwrap().fade());
        assert!(!layouts.get(Columns::Two).row(0).unwrap().toggle(0).unwrap().fade());
        assert!(!layouts.get(Columns::One).row(0).unwrap().toggle(0).unwrap().fade());
        assert_eq!(source.len(), 6);
        assert_eq!(layouts.get(Columns::One).rows().len(), 6);
    }

    #[test]
    fn check_rejects_out_of_range_coordinates() {
        let grid = Grid::new(&items(6), Columns::Three);
        assert!(grid.check(1, 2).is_ok());
        assert_eq!(
            grid.check(2, 0),
            Err(GridError::RowOutOfRange { row: 2, rows: 2 })
        );
        assert_eq!(
            grid.check(0, 3),
            Err(GridError::PieceOutOfRange {
                piece: 3,
                columns: 3
            })
        );
    }

    #[test]
    fn reset_restores_defaults() {
        let mut grid = Grid::new(&items(3), Columns::Three);
        grid.row_mut(0).unwrap().active_row = true;
        grid.toggle_mut(0, 1).unwrap().hide_back_neighbor_image[0] = false;
        grid.reset();
        assert_eq!(grid, Grid::new(&items(3), Columns::Three));
    }
}
