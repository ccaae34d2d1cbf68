//! Detail panel for the project on the active slide.

use crate::labels;
use crate::types::{Project, non_empty};
use maud::{Markup, html};

/// Render the detail panel, or `None` when no project is active.
pub fn render_details(project: Option<&Project>) -> Option<Markup> {
    let project = project?;
    let category = project.category();
    let date = non_empty(&project.date);
    let github = non_empty(&project.github_url);
    let demo = non_empty(&project.demo_url);

    Some(html! {
        div.project-header {
            h4 {
                (project.title)
                @if let Some(url) = github {
                    " "
                    a.slide-link href=(url) target="_blank" rel="noopener" { (labels::GITHUB) }
                }
                @if let Some(url) = demo {
                    " "
                    a.slide-link href=(url) target="_blank" rel="noopener" { (labels::DEMO) }
                }
            }
        }
        @if category.is_some() || date.is_some() {
            div.project-meta {
                @if let Some(category) = category {
                    span { (labels::CATEGORY_PREFIX) (category) }
                }
                @if let Some(date) = date {
                    span { (labels::DATE_PREFIX) (date) }
                }
            }
        }
        p { (project.body().unwrap_or_default()) }
        @if !project.technologies.is_empty() {
            div.project-tech {
                @for tech in &project.technologies {
                    span.tech-tag { (tech) }
                }
            }
        }
    })
}
