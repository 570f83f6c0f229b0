// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::gallery::Item;
use crate::source::preload::{LoadedImage, PreloadReport};
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// The portfolio document was fetched and decoded (or not).
    Loaded(Result<Vec<Item>, Error>),
    /// Another primary image finished preloading.
    PreloadProgress { loaded: usize, total: usize },
    /// The primary image preload settled.
    Preloaded(Result<PreloadReport, Error>),
    /// A secondary image finished loading in the background.
    ImageLoaded(Result<LoadedImage, Error>),
    /// A tile was clicked, or its close button pressed when `force_close` is set.
    Toggle {
        row: usize,
        piece: usize,
        force_close: bool,
    },
    /// The cursor entered or left a tile's front face.
    Hover {
        row: usize,
        piece: usize,
        hovered: bool,
    },
    /// Animation tick while flips are pending.
    Tick(Instant),
    /// Scroll guard sampling tick while a tile is open.
    ScrollPoll(Instant),
    /// Vertical scroll offset of the gallery, in logical pixels.
    Scrolled(f32),
    WindowResized(iced::Size),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Portfolio source (path or URL). Takes precedence over `[gallery] source`.
    pub source: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `FOLIO_FLIP_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Columns per row on wide windows. Takes precedence over `[gallery] columns`.
    pub columns: Option<usize>,
}
