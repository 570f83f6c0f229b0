// SPDX-License-Identifier: MPL-2.0
//! Timers and window events driving the gallery.

use super::Message;
use crate::config::ANIMATION_TICK_MS;
use crate::gallery::{Orchestrator, ScrollPolicy};
use iced::{time, window, Subscription};
use std::time::Duration;

/// Ticks the flip timeline while any step is queued.
pub fn create_tick_subscription(gallery: Option<&Orchestrator>) -> Subscription<Message> {
    if gallery.is_some_and(Orchestrator::has_pending_work) {
        time::every(Duration::from_millis(ANIMATION_TICK_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

/// Samples the scroll position while a tile is open.
pub fn create_scroll_guard_subscription(
    gallery: Option<&Orchestrator>,
    policy: ScrollPolicy,
) -> Subscription<Message> {
    if gallery.is_some_and(|g| g.active().is_some()) {
        time::every(policy.poll_interval()).map(Message::ScrollPoll)
    } else {
        Subscription::none()
    }
}

/// Reports window resizes so the layout can follow the width.
pub fn create_resize_subscription() -> Subscription<Message> {
    window::resize_events().map(|(_id, size)| Message::WindowResized(size))
}
