//! The project carousel.
//!
//! [`CarouselEngine`] owns the slide set (the currently filtered projects)
//! and the active index. Its transitions:
//!
//! ```text
//! load(projects)   slides := projects, index := 0
//! advance(Next)    index := index + 1, wrapping to 0 past the end
//! advance(Prev)    index := index - 1, wrapping to the last slide below 0
//! jump_to(n)       index := n - 1 (no clamping; out of range shows nothing active)
//! ```
//!
//! Advancing an empty carousel is a no-op. The engine renders the whole
//! region (slides, arrows, dots) with the active index baked in; callers
//! replace the region wholesale after every transition.
//!
//! [`AutoAdvance`] is the single owned handle to the repeating advance
//! timer, and [`Swipe`] turns touch start/end positions into directions.

use crate::labels;
use crate::media::media_content;
use crate::schedule::{Job, TimerId, Timers};
use crate::types::Project;
use maud::{Markup, html};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::time::Duration;
use tracing::debug;

/// Step direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    fn sign(self) -> i8 {
        match self {
            Direction::Prev => -1,
            Direction::Next => 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CarouselEngine {
    slides: Vec<Project>,
    index: usize,
}

impl CarouselEngine {
    pub fn new(slides: Vec<Project>) -> Self {
        Self { slides, index: 0 }
    }

    /// Replace the slide set and start over at the first slide.
    pub fn load(&mut self, slides: Vec<Project>) {
        self.slides = slides;
        self.index = 0;
    }

    pub fn slides(&self) -> &[Project] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Project on the active slide, if the index points at one.
    pub fn current(&self) -> Option<&Project> {
        self.slides.get(self.index)
    }

    /// Step one slide. Returns the new index, or `None` when there are no slides.
    pub fn advance(&mut self, direction: Direction) -> Option<usize> {
        let count = self.slides.len();
        if count == 0 {
            return None;
        }
        let next = match direction {
            Direction::Next => self.index.saturating_add(1),
            Direction::Prev => self.index.checked_sub(1).unwrap_or(count - 1),
        };
        self.index = if next >= count { 0 } else { next };
        debug!(direction = direction.sign(), index = self.index, count, "carousel advanced");
        Some(self.index)
    }

    /// Show the given one-based slide number.
    pub fn jump_to(&mut self, slide: NonZeroUsize) {
        self.index = slide.get() - 1;
        debug!(index = self.index, count = self.slides.len(), "carousel jumped");
    }

    /// Slides, arrows, and navigation dots, with the active index marked.
    ///
    /// An empty slide set renders the "no projects" notice instead.
    pub fn render(&self) -> Markup {
        if self.slides.is_empty() {
            return html! { p { (labels::NO_PROJECTS) } };
        }
        html! {
            @for (i, project) in self.slides.iter().enumerate() {
                div.carousel-slide.active[i == self.index] {
                    (media_content(project.media_url()))
                    div.slide-overlay {
                        div.slide-content {
                            h3.project-title { (project.title) }
                        }
                    }
                }
            }
            button.carousel-arrow.prev type="button" data-direction="prev" { "‹" }
            button.carousel-arrow.next type="button" data-direction="next" { "›" }
            div.carousel-nav {
                @for i in 0..self.slides.len() {
                    div.nav-dot.active[i == self.index] data-slide=(i + 1) {}
                }
            }
        }
    }
}

/// Owned handle to the auto-advance timer. At most one is ever live.
#[derive(Debug, Clone)]
pub struct AutoAdvance {
    period: Duration,
    handle: Option<TimerId>,
}

impl AutoAdvance {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    /// Cancel any running timer, then start a new one if there is more than
    /// one slide to cycle through.
    pub fn arm(&mut self, timers: &mut Timers, slides: usize, now: Duration) {
        self.cancel(timers);
        if slides > 1 {
            self.handle = Some(timers.set_interval(Job::AutoAdvance, self.period, now));
            debug!(slides, period_ms = self.period.as_millis() as u64, "auto-advance armed");
        }
    }

    pub fn cancel(&mut self, timers: &mut Timers) {
        if let Some(id) = self.handle.take() {
            timers.cancel(id);
            debug!("auto-advance cancelled");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Whether `id` is the timer this handle owns.
    pub fn owns(&self, id: TimerId) -> bool {
        self.handle == Some(id)
    }
}

/// Horizontal swipe detection.
#[derive(Debug, Clone, Default)]
pub struct Swipe {
    threshold: f64,
    start_x: f64,
}

impl Swipe {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: 0.0,
        }
    }

    pub fn start(&mut self, x: f64) {
        self.start_x = x;
    }

    /// Finish a gesture. A leftward swipe (start right of end) moves to the
    /// next slide; gestures not longer than the threshold are ignored.
    pub fn end(&mut self, x: f64) -> Option<Direction> {
        let diff = self.start_x - x;
        if diff.abs() <= self.threshold {
            return None;
        }
        Some(if diff > 0.0 {
            Direction::Next
        } else {
            Direction::Prev
        })
    }
}
