// SPDX-License-Identifier: MPL-2.0
//! Primary image preloading.
//!
//! Each image is read (from disk or over HTTP) and its header decoded for
//! dimensions. The first failure rejects the whole preload; outcomes that
//! arrive after it are dropped.

use super::http_client;
use crate::error::{Result, SourceError};
use crate::gallery::ImageRef;
use futures_util::{stream, StreamExt, TryStreamExt};
use image_rs::ImageReader;
use std::io::Cursor;

/// Number of images fetched concurrently.
const CONCURRENCY: usize = 4;

/// Lifecycle of a preload run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreloadState {
    #[default]
    Pending,
    Loading { loaded: usize, total: usize },
    Resolved,
    Rejected(SourceError),
}

impl PreloadState {
    /// Completion in percent, 100 once resolved.
    #[must_use]
    pub fn percent(&self) -> u8 {
        match self {
            PreloadState::Pending | PreloadState::Rejected(_) => 0,
            PreloadState::Loading { loaded, total } => percent(*loaded, *total),
            PreloadState::Resolved => 100,
        }
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, PreloadState::Resolved | PreloadState::Rejected(_))
    }
}

/// A successfully loaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub image: ImageRef,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// Result of a resolved preload, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreloadReport {
    pub images: Vec<LoadedImage>,
}

impl PreloadReport {
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

fn percent(loaded: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((loaded.min(total) * 100) / total) as u8
}

/// Preloads `images`, calling `progress` with `(loaded, total)` after each
/// one finishes.
pub async fn preload_images(
    images: Vec<ImageRef>,
    mut progress: impl FnMut(usize, usize) + Send,
) -> Result<PreloadReport> {
    let total = images.len();
    tracing::debug!(total, "preloading images");

    let mut slots: Vec<Option<LoadedImage>> = vec![None; total];
    let mut loaded = 0;
    let mut results = stream::iter(images.into_iter().enumerate())
        .map(|(index, image)| async move { load_image(image).await.map(|img| (index, img)) })
        .buffer_unordered(CONCURRENCY);

    while let Some((index, image)) = results.try_next().await? {
        slots[index] = Some(image);
        loaded += 1;
        progress(loaded, total);
    }

    let images: Vec<LoadedImage> = slots.into_iter().flatten().collect();
    tracing::info!(count = images.len(), "preload resolved");
    Ok(PreloadReport { images })
}

/// Loads one image and reads its dimensions.
pub async fn load_image(image: ImageRef) -> Result<LoadedImage> {
    let bytes = read_bytes(&image).await.map_err(|e| preload_error(&image, e))?;
    let (width, height) = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(|e| preload_error(&image, e))?
        .into_dimensions()
        .map_err(|e| preload_error(&image, e))?;

    Ok(LoadedImage {
        image,
        width,
        height,
        bytes,
    })
}

async fn read_bytes(image: &ImageRef) -> std::result::Result<Vec<u8>, String> {
    if image.is_remote() {
        let client = http_client().map_err(|e| e.to_string())?;
        let response = client
            .get(image.as_str())
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err(format!("HTTP status: {}", response.status()));
        }
        let bytes = response.bytes().await.map_err(|e| e.to_string())?;
        Ok(bytes.to_vec())
    } else {
        tokio::fs::read(image.as_str()).await.map_err(|e| e.to_string())
    }
}

fn preload_error(image: &ImageRef, reason: impl ToString) -> SourceError {
    let err = SourceError::Preload {
        image: image.to_string(),
        reason: reason.to_string(),
    };
    tracing::warn!(error = %err, "preload rejected");
    err
}
