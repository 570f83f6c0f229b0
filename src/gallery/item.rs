// SPDX-License-Identifier: MPL-2.0
//! Portfolio items and their layout-dependent placement.
//!
//! An [`Item`] is what the data source delivers: an ordered list of image
//! references plus display text. A [`Piece`] is an item placed in a specific
//! columns-per-row layout, carrying its row position and the secondary
//! images its row neighbors show while it is open.

use super::neighbors::NeighborImages;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to an image, either a filesystem path or an `http(s)` URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the reference must be fetched over HTTP.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One portfolio piece as delivered by the data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Ordered images; the first one is the primary image.
    pub images: Vec<ImageRef>,
}

impl Item {
    pub fn new(title: impl Into<String>, images: Vec<ImageRef>) -> Self {
        Self {
            title: title.into(),
            body: String::new(),
            images,
        }
    }

    #[must_use]
    pub fn primary_image(&self) -> Option<&ImageRef> {
        self.images.first()
    }

    /// Returns the `k`-th secondary image (the image at position `k + 1`).
    #[must_use]
    pub fn secondary_image(&self, k: usize) -> Option<&ImageRef> {
        self.images.get(k + 1)
    }
}

/// Horizontal position of a piece within its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPosition {
    Left,
    Center,
    Right,
}

impl fmt::Display for RowPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RowPosition::Left => "left",
            RowPosition::Center => "center",
            RowPosition::Right => "right",
        };
        f.write_str(label)
    }
}

/// An item placed in one layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    /// Index of the item in the source sequence.
    pub index: usize,
    pub item: Item,
    pub position: RowPosition,
    pub neighbors: NeighborImages,
}

impl Piece {
    #[must_use]
    pub fn primary_image(&self) -> Option<&ImageRef> {
        self.item.primary_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_and_secondary_images_follow_order() {
        let item = Item::new("a", vec!["p.jpg".into(), "s0.jpg".into(), "s1.jpg".into()]);
        assert_eq!(item.primary_image().map(ImageRef::as_str), Some("p.jpg"));
        assert_eq!(item.secondary_image(0).map(ImageRef::as_str), Some("s0.jpg"));
        assert_eq!(item.secondary_image(1).map(ImageRef::as_str), Some("s1.jpg"));
        assert!(item.secondary_image(2).is_none());
    }

    #[test]
    fn remote_refs_are_detected_by_scheme() {
        assert!(ImageRef::from("https://example.com/a.jpg").is_remote());
        assert!(ImageRef::from("http://example.com/a.jpg").is_remote());
        assert!(!ImageRef::from("images/a.jpg").is_remote());
    }

    #[test]
    fn row_position_serializes_lowercase() {
        assert_eq!(RowPosition::Center.to_string(), "center");
        let json = serde_json::to_string(&RowPosition::Right).unwrap();
        assert_eq!(json, "\"right\"");
    }
}
