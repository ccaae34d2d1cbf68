//! Event-script replay.
//!
//! A script is a JSON list of timestamped input events:
//!
//! ```json
//! [
//!   { "at_ms": 0,    "event": { "type": "pointer_enter" } },
//!   { "at_ms": 1200, "event": { "type": "key", "key": "ArrowRight" } },
//!   { "at_ms": 2000, "event": { "type": "filter", "category": "Web" } },
//!   { "at_ms": 9000, "event": { "type": "touch_start", "x": 320 } },
//!   { "at_ms": 9100, "event": { "type": "touch_end", "x": 200 } }
//! ]
//! ```
//!
//! Timestamps must not decrease. Timer jobs (auto-advance, debounce,
//! throttle) fire between steps exactly as they would have in real time.

use crate::app::{App, Event};
use crate::target::RenderTarget;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("step at {at_ms}ms comes after a step at {previous_ms}ms")]
    OutOfOrder { at_ms: u64, previous_ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    pub event: Event,
}

/// Controller state after one step.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub at_ms: u64,
    pub event: Event,
    /// Active slide index (may be out of range after a dot jump).
    pub index: usize,
    pub slides: usize,
    /// Title of the active project, when the index points at one.
    pub title: Option<String>,
    pub auto_advancing: bool,
}

/// Parse and order-check a script.
pub fn parse_script(json: &str) -> Result<Vec<Step>, ReplayError> {
    let steps: Vec<Step> = serde_json::from_str(json)?;
    for pair in steps.windows(2) {
        if pair[1].at_ms < pair[0].at_ms {
            return Err(ReplayError::OutOfOrder {
                at_ms: pair[1].at_ms,
                previous_ms: pair[0].at_ms,
            });
        }
    }
    Ok(steps)
}

/// Apply every step in order, recording a frame after each.
pub fn replay<T: RenderTarget>(app: &mut App<T>, steps: Vec<Step>) -> Vec<Frame> {
    steps
        .into_iter()
        .map(|step| {
            app.handle(Duration::from_millis(step.at_ms), step.event.clone());
            let carousel = app.carousel();
            Frame {
                at_ms: step.at_ms,
                event: step.event,
                index: carousel.index(),
                slides: carousel.len(),
                title: carousel.current().map(|p| p.title.clone()),
                auto_advancing: app.is_auto_advancing(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::bootstrap;
    use crate::config::AppConfig;
    use crate::target::Document;
    use crate::test_helpers::sample_fetcher;

    #[test]
    fn parse_rejects_decreasing_timestamps() {
        let json = r#"[
            { "at_ms": 100, "event": { "type": "resize" } },
            { "at_ms": 50, "event": { "type": "resize" } }
        ]"#;
        let err = parse_script(json).unwrap_err();
        assert!(matches!(err, ReplayError::OutOfOrder { at_ms: 50, previous_ms: 100 }));
    }

    #[test]
    fn parse_rejects_unknown_event_type() {
        let json = r#"[{ "at_ms": 0, "event": { "type": "double_click" } }]"#;
        assert!(matches!(parse_script(json), Err(ReplayError::Json(_))));
    }

    #[test]
    fn replay_records_a_frame_per_step() {
        let Ok(mut app) = bootstrap(&AppConfig::default(), &sample_fetcher(), Document::new())
        else {
            panic!("bootstrap failed");
        };
        let steps = parse_script(
            r#"[
                { "at_ms": 100, "event": { "type": "key", "key": "ArrowRight" } },
                { "at_ms": 200, "event": { "type": "pointer_enter" } },
                { "at_ms": 9000, "event": { "type": "filter", "category": "Automation" } },
                { "at_ms": 14000, "event": { "type": "pointer_enter" } }
            ]"#,
        )
        .unwrap();

        let frames = replay(&mut app, steps);
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0].index, 1);
        assert!(!frames[1].auto_advancing);
        // Hovering held the carousel still until the filter re-armed it.
        assert_eq!(frames[2].index, 0);
        assert_eq!(frames[2].slides, 2);
        assert!(frames[2].auto_advancing);
        // One auto-advance at 14000 before the pointer entered again.
        assert_eq!(frames[3].index, 1);
        assert!(!frames[3].auto_advancing);
    }
}
