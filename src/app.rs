//! Startup sequence and the interactive controller.
//!
//! ## Startup
//!
//! ```text
//! load sources ──► decode slices ──► sections ──► filter bar + carousel + details
//!      │                 │                              │
//!      └── error ────────┴──► error banner, stop        └──► hide loading, arm timers
//! ```
//!
//! Every slice is decoded before the first region is written, so a failed
//! startup leaves all section regions untouched and shows only the banner.
//!
//! ## Running
//!
//! [`App`] owns all mutable state: the filter, the carousel, the timer
//! queue, and the render target. It is driven by two calls:
//!
//! - [`App::run_until`] fires due timer jobs in due-time order;
//! - [`App::handle`] catches up on timers, then applies one input [`Event`].
//!
//! Each job or event fully completes (state change plus region rewrite)
//! before the next one runs.

use crate::carousel::{AutoAdvance, CarouselEngine, Direction, Swipe};
use crate::config::AppConfig;
use crate::details::render_details;
use crate::filter::{Category, PortfolioFilter};
use crate::labels;
use crate::loader::{self, Fetch, LoadError};
use crate::schedule::{Debounce, Job, Throttle, TimerId, Timers};
use crate::sections::render_sections;
use crate::target::{Region, RenderTarget};
use crate::types::{Configuration, Project, RenderError};
use maud::html;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

/// Regions that fade in on the first scroll-reveal pass.
const REVEALED: [Region; 3] = [Region::Skills, Region::ProfileInfo, Region::ContactButtons];

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl BootstrapError {
    /// The user-facing message shown in place of the page.
    pub fn banner(&self) -> &'static str {
        match self {
            Self::Load(_) => labels::LOAD_FAILED,
            Self::Render(_) => labels::INIT_FAILED,
        }
    }
}

/// A failed startup: the error plus the target, which now shows the banner.
#[derive(Debug)]
pub struct BootFailure<T> {
    pub error: BootstrapError,
    pub target: T,
}

/// Keys the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    #[serde(other)]
    Other,
}

/// User input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A filter button; no category (or the sentinel label) means "all".
    Filter {
        #[serde(default)]
        category: Option<String>,
    },
    /// A navigation dot, by one-based slide number.
    Dot { slide: NonZeroUsize },
    /// The prev/next arrow buttons.
    Arrow { direction: Direction },
    /// A key press anywhere on the page.
    Key { key: Key },
    PointerEnter,
    PointerLeave,
    TouchStart { x: f64 },
    TouchEnd { x: f64 },
    Resize,
    Scroll,
}

pub struct App<T> {
    target: T,
    configuration: Configuration,
    filter: PortfolioFilter,
    carousel: CarouselEngine,
    auto: AutoAdvance,
    swipe: Swipe,
    timers: Timers,
    resize: Debounce,
    scroll: Throttle,
    revealed: bool,
    now: Duration,
}

/// Load the configuration and render the page into `target`.
///
/// On failure the target is handed back showing the error banner.
pub fn bootstrap<T: RenderTarget>(
    settings: &AppConfig,
    fetcher: &dyn Fetch,
    mut target: T,
) -> Result<App<T>, BootFailure<T>> {
    let loaded = loader::load(fetcher, &settings.sources)
        .map_err(BootstrapError::from)
        .and_then(|configuration| {
            let content = configuration.decode()?;
            Ok((configuration, content))
        });

    match loaded {
        Ok((configuration, content)) => {
            render_sections(&content, &mut target);
            let app = App::start(settings, configuration, content.portfolio, target);
            info!(projects = app.filter.portfolio().len(), "site initialized");
            Ok(app)
        }
        Err(error) => {
            error!(%error, "site initialization failed");
            show_error(&mut target, error.banner());
            Err(BootFailure { error, target })
        }
    }
}

/// Replace the loading indicator with a readable error.
pub fn show_error(target: &mut impl RenderTarget, message: &str) {
    target.replace(
        Region::Loading,
        html! {
            div.error-message {
                p { (message) }
            }
        },
    );
    target.set_class(Region::Loading, "error", true);
    target.set_visible(Region::Loading, true);
}

impl<T: RenderTarget> App<T> {
    fn start(
        settings: &AppConfig,
        configuration: Configuration,
        portfolio: Vec<Project>,
        target: T,
    ) -> Self {
        let viewport = &settings.viewport;
        let mut app = Self {
            target,
            configuration,
            carousel: CarouselEngine::new(portfolio.clone()),
            filter: PortfolioFilter::new(portfolio),
            auto: AutoAdvance::new(settings.carousel.interval()),
            swipe: Swipe::new(settings.carousel.swipe_threshold_px),
            timers: Timers::new(),
            resize: Debounce::new(
                Job::ResizeSettled,
                Duration::from_millis(viewport.resize_debounce_ms),
            ),
            scroll: Throttle::new(
                Job::ScrollReopen,
                Duration::from_millis(viewport.scroll_throttle_ms),
            ),
            revealed: false,
            now: Duration::ZERO,
        };

        app.render_portfolio();
        app.target.set_visible(Region::Loading, false);
        app.target.set_class(Region::MainContainer, "loaded", true);
        app.auto.arm(&mut app.timers, app.carousel.len(), app.now);
        app.timers.set_timeout(
            Job::InitialReveal,
            Duration::from_millis(viewport.reveal_delay_ms),
            app.now,
        );
        app
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn filter(&self) -> &PortfolioFilter {
        &self.filter
    }

    pub fn carousel(&self) -> &CarouselEngine {
        &self.carousel
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.auto.is_armed()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    // ------------------------------------------------------------------------
    // Driving
    // ------------------------------------------------------------------------

    /// Fire every timer job due at or before `now`, oldest first.
    ///
    /// Time never moves backwards; an earlier `now` only runs nothing.
    pub fn run_until(&mut self, now: Duration) {
        let now = now.max(self.now);
        while let Some((id, job, due)) = self.timers.pop_due(now) {
            self.now = due;
            self.run_job(id, job);
        }
        self.now = now;
    }

    /// Catch up on timers, then apply `event` at time `now`.
    pub fn handle(&mut self, now: Duration, event: Event) {
        self.run_until(now);
        debug!(?event, at_ms = self.now.as_millis() as u64, "event");
        match event {
            Event::Filter { category } => {
                let category = category
                    .as_deref()
                    .map_or(Category::All, Category::from_label);
                self.select(category);
            }
            Event::Dot { slide } => {
                self.carousel.jump_to(slide);
                self.show_slide();
            }
            Event::Arrow { direction } => self.step(direction),
            Event::Key { key } => match key {
                Key::ArrowLeft => self.step(Direction::Prev),
                Key::ArrowRight => self.step(Direction::Next),
                Key::Other => {}
            },
            Event::PointerEnter => self.auto.cancel(&mut self.timers),
            Event::PointerLeave => self.auto.arm(&mut self.timers, self.carousel.len(), self.now),
            Event::TouchStart { x } => self.swipe.start(x),
            Event::TouchEnd { x } => {
                if let Some(direction) = self.swipe.end(x) {
                    self.step(direction);
                }
            }
            Event::Resize => self.resize.call(&mut self.timers, self.now),
            Event::Scroll => {
                if self.scroll.try_call(&mut self.timers, self.now) {
                    self.reveal();
                }
            }
        }
    }

    fn run_job(&mut self, id: TimerId, job: Job) {
        match job {
            Job::AutoAdvance => {
                if self.auto.owns(id) {
                    self.step(Direction::Next);
                }
            }
            Job::ResizeSettled => {
                self.resize.fired(id);
                debug!("viewport resize settled");
            }
            Job::ScrollReopen => self.scroll.reopen(),
            Job::InitialReveal => self.reveal(),
        }
    }

    // ------------------------------------------------------------------------
    // State transitions
    // ------------------------------------------------------------------------

    /// Activate a filter category: new slide set, back to slide 0, timer restarted.
    pub fn select(&mut self, category: Category) {
        let subset = self.filter.select(category);
        self.carousel.load(subset);
        self.target.replace(Region::PortfolioFilter, self.filter.render());
        self.show_slide();
        self.auto.arm(&mut self.timers, self.carousel.len(), self.now);
    }

    fn step(&mut self, direction: Direction) {
        if self.carousel.advance(direction).is_some() {
            self.show_slide();
        }
    }

    /// Rewrite the carousel region and the detail panel for the active index.
    fn show_slide(&mut self) {
        self.target.replace(Region::Carousel, self.carousel.render());
        if let Some(details) = render_details(self.carousel.current()) {
            self.target.replace(Region::ProjectDetails, details);
        }
    }

    fn render_portfolio(&mut self) {
        if self.filter.portfolio().is_empty() {
            self.target.replace(Region::Carousel, self.carousel.render());
            return;
        }
        self.target.replace(Region::PortfolioFilter, self.filter.render());
        self.show_slide();
    }

    fn reveal(&mut self) {
        if self.revealed {
            return;
        }
        self.revealed = true;
        for region in REVEALED {
            self.target.set_class(region, "animated", true);
        }
        debug!("scroll reveal applied");
    }
}
