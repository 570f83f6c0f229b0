// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Each tile renders one face at a time, chosen from its toggle flags:
//! the description while it is the open tile, a neighbor's secondary image
//! while a neighbor is open, and the primary image otherwise.

use super::{LoadState, Message};
use crate::gallery::{ImageRef, Orchestrator, Piece, Toggle};
use crate::source::preload::PreloadState;
use iced::widget::{
    button, column, container, image, mouse_area, row, scrollable, text, Column, Row, Space,
};
use iced::{Alignment, ContentFit, Element, Length};
use std::collections::HashMap;

/// Opacity of tiles in rows other than the open one.
const FADED_OPACITY: f32 = 0.35;
const TILE_SPACING: f32 = 4.0;
const STATUS_TEXT_SIZE: f32 = 14.0;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub gallery: Option<&'a Orchestrator>,
    pub load_state: &'a LoadState,
    pub preload: &'a PreloadState,
    pub images: &'a HashMap<ImageRef, image::Handle>,
    pub tile_height: f32,
    pub warning: Option<&'a str>,
}

/// Renders the gallery, or the status line when there is nothing to show.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let body: Element<'_, Message> = match (ctx.load_state, ctx.gallery) {
        (LoadState::Ready, Some(gallery)) if !gallery.grid().is_empty() => view_grid(&ctx, gallery),
        (LoadState::Ready, _) => centered(text("This portfolio has no complete rows.")),
        (LoadState::Loading, _) => centered(text("Loading portfolio...")),
        (LoadState::Failed(reason), _) => centered(text(format!("Initialization failed: {reason}"))),
    };

    let mut page = Column::new().push(body);
    if let Some(status) = status_line(ctx.preload, ctx.warning) {
        page = page.push(
            container(text(status).size(STATUS_TEXT_SIZE))
                .padding(6)
                .width(Length::Fill),
        );
    }

    container(page.width(Length::Fill).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn status_line(preload: &PreloadState, warning: Option<&str>) -> Option<String> {
    let preload = match preload {
        PreloadState::Loading { .. } => Some(format!("Loading images {}%", preload.percent())),
        PreloadState::Rejected(err) => Some(err.to_string()),
        PreloadState::Pending | PreloadState::Resolved => None,
    };
    match (preload, warning) {
        (Some(p), Some(w)) => Some(format!("{p} | {w}")),
        (p, w) => p.or_else(|| w.map(str::to_string)),
    }
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

fn view_grid<'a>(ctx: &ViewContext<'a>, gallery: &'a Orchestrator) -> Element<'a, Message> {
    let rows = gallery.rows().iter().enumerate().map(|(r, grid_row)| {
        let tiles = grid_row
            .pieces()
            .iter()
            .zip(grid_row.toggles())
            .enumerate()
            .map(|(p, (piece, toggle))| {
                let back = gallery.back_face(r, p).ok().flatten();
                view_tile(ctx, (r, p), piece, toggle, back)
            });
        Row::with_children(tiles)
            .spacing(TILE_SPACING)
            .width(Length::Fill)
            .into()
    });

    scrollable(
        Column::with_children(rows)
            .spacing(TILE_SPACING)
            .padding(TILE_SPACING),
    )
    .on_scroll(|viewport| Message::Scrolled(viewport.absolute_offset().y))
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn view_tile<'a>(
    ctx: &ViewContext<'a>,
    (r, p): (usize, usize),
    piece: &'a Piece,
    toggle: &Toggle,
    back: Option<&'a ImageRef>,
) -> Element<'a, Message> {
    let opacity = if toggle.fade() { FADED_OPACITY } else { 1.0 };

    let face: Element<'a, Message> = if toggle.transform() && toggle.description_active() {
        view_description(r, p, piece)
    } else if toggle.transform() {
        match back {
            Some(image) => view_image(ctx, image, opacity),
            None => Space::new().width(Length::Fill).height(Length::Fill).into(),
        }
    } else {
        let front = match piece.primary_image() {
            Some(image) => view_image(ctx, image, opacity),
            None => centered(text(piece.item.title.as_str())),
        };
        if toggle.front_hover() && !toggle.not_flippable() {
            column![front, text(piece.item.title.as_str()).size(STATUS_TEXT_SIZE)].into()
        } else {
            front
        }
    };

    let tile = container(face)
        .width(Length::FillPortion(1))
        .height(Length::Fixed(ctx.tile_height))
        .clip(true);

    // Faded and revealed tiles still take clicks: they close the open tile.
    let area = mouse_area(tile).on_press(Message::Toggle {
        row: r,
        piece: p,
        force_close: false,
    });

    if toggle.not_flippable() {
        return area.into();
    }

    area.on_enter(Message::Hover {
        row: r,
        piece: p,
        hovered: true,
    })
    .on_exit(Message::Hover {
        row: r,
        piece: p,
        hovered: false,
    })
    .into()
}

fn view_description<'a>(r: usize, p: usize, piece: &'a Piece) -> Element<'a, Message> {
    let close = button(text("Close")).on_press(Message::Toggle {
        row: r,
        piece: p,
        force_close: true,
    });

    column![
        row![text(piece.item.title.as_str()).size(20), Space::new().width(Length::Fill), close]
            .align_y(Alignment::Center),
        scrollable(text(piece.item.body.as_str())).height(Length::Fill),
    ]
    .spacing(8)
    .padding(12)
    .into()
}

fn view_image<'a>(ctx: &ViewContext<'a>, reference: &ImageRef, opacity: f32) -> Element<'a, Message> {
    let handle = match ctx.images.get(reference) {
        Some(handle) => handle.clone(),
        None if !reference.is_remote() => image::Handle::from_path(reference.as_str()),
        None => return centered(text("...")),
    };

    image(handle)
        .width(Length::Fill)
        .height(Length::Fill)
        .content_fit(ContentFit::Cover)
        .opacity(opacity)
        .into()
}
