//! # Folio
//!
//! A data-driven personal portfolio page. Everything the visitor sees comes
//! from a handful of JSON documents: site metadata, the profile card, social
//! links, a skills table, contact buttons, and a portfolio of projects shown
//! in a filterable, auto-advancing carousel.
//!
//! # Architecture
//!
//! ```text
//! 1. Load      sources   →  Configuration   (fetch in parallel, shallow merge)
//! 2. Decode    Configuration → SiteContent  (typed slices, all-or-nothing)
//! 3. Render    SiteContent → RenderTarget   (static sections, filter bar, carousel)
//! 4. Run       events + timers → region rewrites
//! ```
//!
//! Rendering never reads the page back. Every update overwrites a named
//! region wholesale through the [`target::RenderTarget`] trait, so the same
//! controller drives the in-memory [`target::Document`] used by the CLI and
//! the tests.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`loader`] | Fetches the source documents and merges them into one [`types::Configuration`] |
//! | [`types`] | The merged configuration and its decoded slices (`SiteMeta`, `PersonalInfo`, `Project`, …) |
//! | [`target`] | Region ids, the `RenderTarget` write surface, and the in-memory `Document` |
//! | [`sections`] | Static sections: metadata, profile card, social links, skills, contact buttons |
//! | [`filter`] | Category list and subset selection |
//! | [`carousel`] | Slide index transitions, auto-advance handle, swipe detection |
//! | [`details`] | Detail panel for the active project |
//! | [`media`] | Extension-based media classification (video, image, placeholder) |
//! | [`schedule`] | Virtual-clock timer queue with debounce and throttle |
//! | [`app`] | Startup sequence and the event-driven controller |
//! | [`replay`] | Runs a timestamped JSON event script through the controller |
//! | [`config`] | `folio.toml` loading, validation, and merging over stock defaults |
//! | [`labels`] | User-facing strings |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Virtual Time
//!
//! Auto-advance, resize debounce and scroll throttle all run on
//! [`schedule::Timers`], a queue keyed by virtual time rather than a wall
//! clock. The controller is single-threaded and every job runs to completion
//! before the next, which makes interleavings of user input and timer ticks
//! reproducible in tests and in `folio replay`.
//!
//! ## One Timer Handle
//!
//! The carousel's repeating timer lives behind [`carousel::AutoAdvance`].
//! Arming always cancels the previous timer first, so filter changes and
//! pointer-leave events can never stack two intervals.
//!
//! ## Escaping
//!
//! Markup is built with [Maud](https://maud.lambda.xyz/), which escapes every
//! interpolated value. The only pre-escaped content is a non-image avatar,
//! which is inline markup (usually an emoji) by contract.

pub mod app;
pub mod carousel;
pub mod config;
pub mod details;
pub mod filter;
pub mod labels;
pub mod loader;
pub mod media;
pub mod output;
pub mod replay;
pub mod schedule;
pub mod sections;
pub mod target;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
