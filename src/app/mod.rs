// SPDX-License-Identifier: MPL-2.0
//! Application root state and the iced event loop around the gallery.
//!
//! `App` owns the flip orchestrator and translates window events, clicks and
//! timer ticks into orchestrator calls. Loading happens in two stages: the
//! portfolio document builds the grid, then primary images preload in the
//! background while the grid is already interactive.

mod message;
pub mod paths;
mod subscription;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, GalleryConfig, Theme};
use crate::error::{Error, SourceError};
use crate::gallery::{Columns, ImageRef, Item, Orchestrator, ScrollGuard, ToggleOutcome};
use crate::source::preload::{self, LoadedImage, PreloadState};
use crate::source::Source;
use iced::futures::Stream;
use iced::widget::image;
use iced::{window, Element, Subscription, Task};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1200;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 360;

const APP_NAME: &str = "FolioFlip";

/// Portfolio loading progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    /// No rows will be shown; holds the reason.
    Failed(String),
}

/// Root Iced application state.
pub struct App {
    config: GalleryConfig,
    gallery: Option<Orchestrator>,
    load_state: LoadState,
    preload: PreloadState,
    images: HashMap<ImageRef, image::Handle>,
    scroll_guard: ScrollGuard,
    scroll_offset: f32,
    window_width: f32,
    config_warning: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("load_state", &self.load_state)
            .field("preload", &self.preload)
            .field("active", &self.gallery.as_ref().and_then(Orchestrator::active))
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || App::new(boot_state.borrow_mut().take().unwrap_or_default());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self::with_config(GalleryConfig::default())
    }
}

impl App {
    /// Creates an idle application for `config`; nothing is fetched.
    fn with_config(config: GalleryConfig) -> Self {
        Self {
            scroll_guard: ScrollGuard::new(config.scroll),
            config,
            gallery: None,
            load_state: LoadState::Loading,
            preload: PreloadState::Pending,
            images: HashMap::new(),
            scroll_offset: 0.0,
            window_width: WINDOW_DEFAULT_WIDTH as f32,
            config_warning: None,
        }
    }

    /// Loads the configuration and starts fetching the portfolio.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (persisted, config_warning) = config::load();
        let mut config = GalleryConfig::from(&persisted);

        if let Some(count) = flags.columns {
            match Columns::from_count(count) {
                Some(columns) => config.columns = columns,
                None => tracing::warn!(count, "ignoring unsupported --columns value"),
            }
        }
        if flags.source.is_some() {
            config.source = flags.source;
        }

        let mut app = Self::with_config(config);
        app.config_warning = config_warning;

        let Some(source) = app.config.source.as_deref().map(Source::parse) else {
            tracing::error!("no portfolio source configured");
            app.load_state = LoadState::Failed(
                "no portfolio source; pass --source or set [gallery] source".to_string(),
            );
            return (app, Task::none());
        };

        tracing::info!(%source, columns = %app.config.columns, "fetching portfolio");
        let task = Task::perform(async move { source.fetch().await }, Message::Loaded);
        (app, task)
    }

    fn title(&self) -> String {
        match (&self.load_state, &self.preload) {
            (LoadState::Ready, PreloadState::Loading { .. }) => {
                format!("{APP_NAME} - {}%", self.preload.percent())
            }
            _ => APP_NAME.to_string(),
        }
    }

    fn theme(&self) -> iced::Theme {
        match self.config.theme {
            Theme::Blt => iced::Theme::Light,
            Theme::Mk => iced::Theme::Dark,
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let gallery = self.gallery.as_ref();
        Subscription::batch([
            subscription::create_tick_subscription(gallery),
            subscription::create_scroll_guard_subscription(gallery, self.config.scroll),
            subscription::create_resize_subscription(),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(result) => self.handle_loaded(result),
            Message::PreloadProgress { loaded, total } => {
                if !self.preload.is_settled() {
                    tracing::trace!(loaded, total, "preload progress");
                    self.preload = PreloadState::Loading { loaded, total };
                }
                Task::none()
            }
            Message::Preloaded(result) => {
                self.handle_preloaded(result);
                Task::none()
            }
            Message::ImageLoaded(result) => {
                match result {
                    Ok(loaded) => self.insert_image(loaded),
                    Err(err) => tracing::warn!(error = %err, "secondary image unavailable"),
                }
                Task::none()
            }
            Message::Toggle {
                row,
                piece,
                force_close,
            } => {
                self.handle_toggle(row, piece, force_close, Instant::now());
                Task::none()
            }
            Message::Hover {
                row,
                piece,
                hovered,
            } => {
                if let Some(gallery) = self.gallery.as_mut() {
                    if let Err(err) = gallery.set_front_hover(row, piece, hovered) {
                        tracing::warn!(error = %err, "hover on unknown tile");
                    }
                }
                Task::none()
            }
            Message::Tick(now) => {
                if let Some(gallery) = self.gallery.as_mut() {
                    if let Err(err) = gallery.advance(now) {
                        tracing::error!(error = %err, "flip step failed");
                    }
                }
                Task::none()
            }
            Message::ScrollPoll(now) => {
                if let Some(gallery) = self.gallery.as_mut() {
                    if let Err(err) = self.scroll_guard.sample(gallery, self.scroll_offset, now) {
                        tracing::error!(error = %err, "scroll guard failed");
                    }
                }
                Task::none()
            }
            Message::Scrolled(offset) => {
                self.scroll_offset = offset;
                Task::none()
            }
            Message::WindowResized(size) => {
                self.window_width = size.width;
                let columns = self.responsive_columns();
                if let Some(gallery) = self.gallery.as_mut() {
                    gallery.select_layout(columns);
                }
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            gallery: self.gallery.as_ref(),
            load_state: &self.load_state,
            preload: &self.preload,
            images: &self.images,
            tile_height: self.tile_height(),
            warning: self.config_warning.as_deref(),
        })
    }

    fn responsive_columns(&self) -> Columns {
        Columns::for_width(self.window_width, self.config.columns)
    }

    fn tile_height(&self) -> f32 {
        let columns = self
            .gallery
            .as_ref()
            .map_or(self.config.columns, Orchestrator::columns);
        self.window_width / columns.count() as f32 * self.config.image_ratio.height_factor()
    }

    fn handle_loaded(&mut self, result: Result<Vec<Item>, Error>) -> Task<Message> {
        let items = match result {
            Ok(items) => items,
            Err(err) => {
                match &err {
                    Error::Source(source) => {
                        tracing::error!(kind = source.kind(), error = %source, "portfolio unavailable");
                    }
                    other => tracing::error!(error = %other, "portfolio unavailable"),
                }
                self.load_state = LoadState::Failed(err.to_string());
                return Task::none();
            }
        };

        let mut gallery = Orchestrator::new(&items, &self.config);
        gallery.select_layout(self.responsive_columns());
        self.gallery = Some(gallery);
        self.load_state = LoadState::Ready;

        let primaries: Vec<ImageRef> = items
            .iter()
            .filter_map(Item::primary_image)
            .cloned()
            .collect();
        let secondaries: Vec<ImageRef> = items
            .iter()
            .flat_map(|item| item.images.iter().skip(1))
            .cloned()
            .collect();

        self.preload = PreloadState::Loading {
            loaded: 0,
            total: primaries.len(),
        };

        let preload_task = Task::stream(preload_messages(primaries));
        let secondary_tasks = secondaries
            .into_iter()
            .map(|image| Task::perform(preload::load_image(image), Message::ImageLoaded));

        Task::batch(std::iter::once(preload_task).chain(secondary_tasks))
    }

    /// A rejected preload leaves the gallery empty, like a failed fetch.
    fn handle_preloaded(&mut self, result: Result<preload::PreloadReport, Error>) {
        match result {
            Ok(report) => {
                for loaded in report.images {
                    self.insert_image(loaded);
                }
                self.preload = PreloadState::Resolved;
            }
            Err(err) => {
                let source = match err {
                    Error::Source(source) => source,
                    other => SourceError::Preload {
                        image: String::new(),
                        reason: other.to_string(),
                    },
                };
                tracing::error!(kind = source.kind(), error = %source, "initialization failed");
                self.gallery = None;
                self.load_state = LoadState::Failed(source.to_string());
                self.preload = PreloadState::Rejected(source);
            }
        }
    }

    fn insert_image(&mut self, loaded: LoadedImage) {
        self.images
            .insert(loaded.image, image::Handle::from_bytes(loaded.bytes));
    }

    fn handle_toggle(&mut self, row: usize, piece: usize, force_close: bool, now: Instant) {
        let Some(gallery) = self.gallery.as_mut() else {
            return;
        };
        match gallery.toggle(row, piece, force_close, now) {
            Ok(ToggleOutcome::Opened(_)) => self.scroll_guard.on_open(self.scroll_offset),
            Ok(outcome) => tracing::trace!(?outcome, "toggle"),
            Err(err) => tracing::warn!(error = %err, "toggle on unknown tile"),
        }
    }
}

/// Runs the primary image preload, yielding a progress message per loaded
/// image and a final [`Message::Preloaded`].
fn preload_messages(images: Vec<ImageRef>) -> impl Stream<Item = Message> + Send + 'static {
    use iced::futures::channel::{mpsc, oneshot};
    use iced::futures::stream;
    use iced::futures::StreamExt;

    type PreloadResult = Result<preload::PreloadReport, Error>;

    enum PreloadPhase {
        Start(Vec<ImageRef>),
        ReceivingProgress {
            progress_rx: mpsc::Receiver<(usize, usize)>,
            result_rx: oneshot::Receiver<PreloadResult>,
        },
        Completed,
    }

    stream::unfold(PreloadPhase::Start(images), |phase| async move {
        match phase {
            PreloadPhase::Start(images) => {
                let total = images.len();
                let (mut progress_tx, progress_rx) = mpsc::channel::<(usize, usize)>(100);
                let (result_tx, result_rx) = oneshot::channel::<PreloadResult>();

                tokio::spawn(async move {
                    let result = preload::preload_images(images, |loaded, total| {
                        let _ = progress_tx.try_send((loaded, total));
                    })
                    .await;
                    // progress_tx was moved into the callback and is dropped by now
                    let _ = result_tx.send(result);
                });

                Some((
                    Message::PreloadProgress { loaded: 0, total },
                    PreloadPhase::ReceivingProgress {
                        progress_rx,
                        result_rx,
                    },
                ))
            }
            PreloadPhase::ReceivingProgress {
                mut progress_rx,
                result_rx,
            } => match progress_rx.next().await {
                Some((loaded, total)) => Some((
                    Message::PreloadProgress { loaded, total },
                    PreloadPhase::ReceivingProgress {
                        progress_rx,
                        result_rx,
                    },
                )),
                None => {
                    let result = result_rx.await.unwrap_or_else(|_| {
                        Err(SourceError::Preload {
                            image: String::new(),
                            reason: "preload task cancelled".to_string(),
                        }
                        .into())
                    });
                    Some((Message::Preloaded(result), PreloadPhase::Completed))
                }
            },
            PreloadPhase::Completed => None,
        }
    })
}
