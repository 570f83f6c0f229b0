// SPDX-License-Identifier: MPL-2.0
//! Neighbor image resolution.
//!
//! While a tile is open, the other tiles of its row flip to show one of
//! their own secondary images. Which secondary image each neighbor shows
//! depends on the open tile's position in the row:
//!
//! | layout | position | slot 0             | slot 1             |
//! |--------|----------|--------------------|--------------------|
//! | 3      | left     | `i+1`, secondary 0 | `i+2`, secondary 0 |
//! | 3      | center   | `i-1`, secondary 0 | `i+1`, secondary 1 |
//! | 3      | right    | `i-2`, secondary 1 | `i-1`, secondary 1 |
//! | 2      | left     | `i+1`, secondary 0 |                    |
//! | 2      | right    | `i-1`, secondary 0 |                    |
//!
//! Slots are ordered like the neighbor tiles themselves (ascending piece
//! index, skipping the open tile). Missing items or missing secondary
//! images leave the slot empty.

use super::columns::Columns;
use super::item::{ImageRef, Item, RowPosition};

/// Maximum number of neighbor slots (three tiles per row minus the open one).
pub const MAX_NEIGHBORS: usize = Columns::MAX - 1;

/// Neighbor images of one item for one layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborImages {
    slots: [Option<ImageRef>; MAX_NEIGHBORS],
}

impl NeighborImages {
    /// Returns the image for a neighbor slot.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&ImageRef> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Iterates over the resolved images, skipping empty slots.
    pub fn iter(&self) -> impl Iterator<Item = &ImageRef> {
        self.slots.iter().flatten()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Maps a piece to the neighbor slot it occupies relative to the open piece.
///
/// Returns `None` when `piece` is the open piece itself.
#[must_use]
pub fn slot_for(piece: usize, open_piece: usize) -> Option<usize> {
    use std::cmp::Ordering;
    match piece.cmp(&open_piece) {
        Ordering::Less => Some(piece),
        Ordering::Equal => None,
        Ordering::Greater => Some(piece - 1),
    }
}

/// Row position of the item at `index` for a layout.
///
/// A single-column layout has no neighbors and centers its only tile.
#[must_use]
pub fn position_of(index: usize, columns: Columns) -> RowPosition {
    match (columns, index % columns.count()) {
        (Columns::One, _) => RowPosition::Center,
        (_, 0) => RowPosition::Left,
        (Columns::Three, 1) => RowPosition::Center,
        _ => RowPosition::Right,
    }
}

/// Resolves the row position and neighbor images of `items[index]`.
#[must_use]
pub fn resolve(items: &[Item], index: usize, columns: Columns) -> (RowPosition, NeighborImages) {
    let position = position_of(index, columns);

    // (offset from index, secondary image) per slot
    let table: [Option<(isize, usize)>; MAX_NEIGHBORS] = match (columns, position) {
        (Columns::One, _) => [None, None],
        (Columns::Two, RowPosition::Left) => [Some((1, 0)), None],
        (Columns::Two, _) => [Some((-1, 0)), None],
        (Columns::Three, RowPosition::Left) => [Some((1, 0)), Some((2, 0))],
        (Columns::Three, RowPosition::Center) => [Some((-1, 0)), Some((1, 1))],
        (Columns::Three, RowPosition::Right) => [Some((-2, 1)), Some((-1, 1))],
    };

    let mut neighbors = NeighborImages::default();
    for (slot, entry) in table.into_iter().enumerate() {
        neighbors.slots[slot] = entry.and_then(|(offset, secondary)| {
            let neighbor = index.checked_add_signed(offset)?;
            items.get(neighbor)?.secondary_image(secondary).cloned()
        });
    }

    (position, neighbors)
}
