//! Slide media.
//!
//! A project's media URL is classified by its file extension (the text
//! after the last `.`, lowercased):
//!
//! | Extension | Rendering |
//! |-----------|-----------|
//! | mp4 webm ogg avi mov wmv flv m4v | looping, muted, autoplaying `<video>` |
//! | jpg jpeg png gif webp svg bmp | background-image block |
//! | anything else | `<img>` that swaps itself for a placeholder if it fails to load |
//! | no URL | textual placeholder |
//!
//! Load failures never escape the slide: the video and unknown-format
//! fragments carry an `onerror` handler that replaces the element.

use crate::labels;
use maud::{Markup, html};

const VIDEO_EXTENSIONS: [&str; 8] = ["mp4", "webm", "ogg", "avi", "mov", "wmv", "flv", "m4v"];
const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp"];

const FILL_STYLE: &str = "width: 100%; height: 100%; object-fit: cover;";

/// How a media URL will be presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Video { mime: String },
    Image,
    Unknown { extension: String },
    Missing,
}

/// Lowercased text after the last `.`; the whole URL when there is no dot.
pub fn extension(url: &str) -> String {
    url.rsplit('.').next().unwrap_or(url).to_lowercase()
}

pub fn classify(url: Option<&str>) -> MediaKind {
    let Some(url) = url.filter(|u| !u.is_empty()) else {
        return MediaKind::Missing;
    };
    let ext = extension(url);
    if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        let subtype = match ext.as_str() {
            "mov" => "quicktime",
            "m4v" => "mp4",
            other => other,
        };
        MediaKind::Video {
            mime: format!("video/{subtype}"),
        }
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Image
    } else {
        MediaKind::Unknown { extension: ext }
    }
}

/// `onerror` handler replacing the element with a placeholder showing `message`.
///
/// Only alphanumerics (plus a few path separators) survive into the handler so a
/// hostile URL cannot break out of the inline script string.
fn placeholder_on_error(message: &str) -> String {
    let safe: String = message
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | ':' | '-' | '_' | '/'))
        .collect();
    format!(r#"this.outerHTML='<div class="slide-placeholder">{safe}</div>'"#)
}

/// Quote a URL for use inside CSS `url('…')`.
fn css_url(url: &str) -> String {
    url.replace('\\', "%5C").replace('\'', "%27")
}

/// Markup for a slide's media, per [`classify`].
pub fn media_content(url: Option<&str>) -> Markup {
    match (classify(url), url) {
        (MediaKind::Video { mime }, Some(url)) => {
            let message = format!("{}: {}", labels::VIDEO_FAILED, url);
            html! {
                video.slide-video autoplay muted loop playsinline style=(FILL_STYLE)
                    onerror=(placeholder_on_error(&message)) {
                    source src=(url) type=(mime);
                    (labels::VIDEO_UNSUPPORTED)
                }
            }
        }
        (MediaKind::Image, Some(url)) => {
            let style = format!(
                "width: 100%; height: 100%; background-image: url('{}'); background-size: cover; background-position: center; background-repeat: no-repeat;",
                css_url(url)
            );
            html! { div.slide-image style=(style) {} }
        }
        (MediaKind::Unknown { extension }, Some(url)) => {
            let message = format!("{}: .{}", labels::MEDIA_FORMAT_FAILED, extension);
            html! {
                img.slide-unknown src=(url) alt=(labels::MEDIA_ALT) style=(FILL_STYLE)
                    onerror=(placeholder_on_error(&message));
            }
        }
        _ => html! { div.slide-placeholder { (labels::NO_MEDIA) } },
    }
}
