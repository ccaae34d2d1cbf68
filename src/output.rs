//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Sources
//!     config/config.json
//!     config/manifest.json
//!     config/portfolio.json
//!
//! Sections
//!     site_config
//!     personal_info
//!     skills (2 categories)
//!
//! Portfolio (3 projects)
//! 001 Storefront [Web]
//! 002 Regression Bot [Automation]
//! 003 CLI Kit
//!
//! Categories
//!     全部 (3)
//!     Web (1)
//!     Automation (1)
//! ```
//!
//! ## Render
//!
//! One block per written region, in page order. Markup is printed on one
//! line; attributes, classes and visibility follow as indented context.
//!
//! ```text
//! #html
//!     lang="zh-TW"
//! #loading
//!     hidden
//! #carousel-container
//!     <div class="carousel-slide active">…
//! ```
//!
//! ## Replay
//!
//! ```text
//!     100ms  key ArrowRight       slide 2/5  Regression Bot  auto
//!     200ms  pointer enter        slide 2/5  Regression Bot
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns lines) for testability and
//! a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::app::{Event, Key};
use crate::carousel::Direction;
use crate::filter::{Category, PortfolioFilter};
use crate::replay::Frame;
use crate::target::{Document, RegionState};
use crate::types::{Configuration, SiteContent};

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

// ============================================================================
// Check
// ============================================================================

/// Inventory of a loaded configuration: sources, sections, projects, categories.
pub fn format_check_output(
    sources: &[String],
    configuration: &Configuration,
    content: &SiteContent,
) -> Vec<String> {
    let mut lines = vec!["Sources".to_string()];
    for source in sources {
        lines.push(format!("{}{}", indent(1), source));
    }

    lines.push(String::new());
    lines.push("Sections".to_string());
    for key in configuration.keys() {
        let detail = match key {
            "skills" => content
                .skills
                .as_ref()
                .map(|s| format!(" ({})", plural(s.len(), "category"))),
            "social_links" => content
                .social_links
                .as_ref()
                .map(|s| format!(" ({})", plural(s.len(), "link"))),
            _ => None,
        };
        lines.push(format!("{}{}{}", indent(1), key, detail.unwrap_or_default()));
    }

    lines.push(String::new());
    lines.push(format!(
        "Portfolio ({})",
        plural(content.portfolio.len(), "project")
    ));
    for (i, project) in content.portfolio.iter().enumerate() {
        match project.category() {
            Some(category) => lines.push(format!(
                "{} {} [{}]",
                format_index(i + 1),
                project.title,
                category
            )),
            None => lines.push(format!("{} {}", format_index(i + 1), project.title)),
        }
    }

    if !content.portfolio.is_empty() {
        let filter = PortfolioFilter::new(content.portfolio.clone());
        lines.push(String::new());
        lines.push("Categories".to_string());
        for category in filter.categories() {
            let members = content
                .portfolio
                .iter()
                .filter(|p| category.matches(p))
                .count();
            lines.push(format!("{}{} ({})", indent(1), category.label(), members));
        }
    }

    lines
}

pub fn print_check_output(sources: &[String], configuration: &Configuration, content: &SiteContent) {
    for line in format_check_output(sources, configuration, content) {
        println!("{}", line);
    }
}

// ============================================================================
// Render
// ============================================================================

fn region_lines(state: &RegionState) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(markup) = &state.markup {
        lines.push(format!("{}{}", indent(1), markup));
    }
    for (name, value) in &state.attributes {
        lines.push(format!("{}{}=\"{}\"", indent(1), name, value));
    }
    if !state.classes.is_empty() {
        let classes: Vec<&str> = state.classes.iter().map(String::as_str).collect();
        lines.push(format!("{}class: {}", indent(1), classes.join(" ")));
    }
    if state.hidden {
        lines.push(format!("{}hidden", indent(1)));
    }
    lines
}

/// Every region the document holds state for, in page order.
pub fn format_document(document: &Document) -> Vec<String> {
    let mut lines = Vec::new();
    for (region, state) in document.regions() {
        lines.push(format!("#{}", region.id()));
        lines.extend(region_lines(state));
    }
    lines
}

pub fn print_document(document: &Document) {
    for line in format_document(document) {
        println!("{}", line);
    }
}

// ============================================================================
// Replay
// ============================================================================

/// Short human description of an input event.
pub fn describe_event(event: &Event) -> String {
    match event {
        Event::Filter { category } => {
            let category = category
                .as_deref()
                .map_or(Category::All, Category::from_label);
            format!("filter {}", category.label())
        }
        Event::Dot { slide } => format!("dot {}", slide),
        Event::Arrow { direction } => match direction {
            Direction::Prev => "arrow prev".to_string(),
            Direction::Next => "arrow next".to_string(),
        },
        Event::Key { key } => match key {
            Key::ArrowLeft => "key ArrowLeft".to_string(),
            Key::ArrowRight => "key ArrowRight".to_string(),
            Key::Other => "key (other)".to_string(),
        },
        Event::PointerEnter => "pointer enter".to_string(),
        Event::PointerLeave => "pointer leave".to_string(),
        Event::TouchStart { x } => format!("touch start x={}", x),
        Event::TouchEnd { x } => format!("touch end x={}", x),
        Event::Resize => "resize".to_string(),
        Event::Scroll => "scroll".to_string(),
    }
}

/// One line per replay step.
///
/// ```text
///    9000ms  filter Automation    slide 1/2  Regression Bot  auto
///    9500ms  dot 7                slide 7/2  (none)
///       0ms  filter Nothing       no slides
/// ```
pub fn format_frame(frame: &Frame) -> String {
    let head = format!("{:>7}ms  {:<20}", frame.at_ms, describe_event(&frame.event));
    if frame.slides == 0 {
        return format!("{}no slides", head);
    }
    let title = frame.title.as_deref().unwrap_or("(none)");
    let mut line = format!(
        "{}slide {}/{}  {}",
        head,
        frame.index + 1,
        frame.slides,
        title
    );
    if frame.auto_advancing {
        line.push_str("  auto");
    }
    line
}

pub fn print_frames(frames: &[Frame]) {
    for frame in frames {
        println!("{}", format_frame(frame));
    }
}
