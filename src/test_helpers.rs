//! Shared test utilities.
//!
//! Provides project builders, an in-memory [`Fetch`] implementation, and a
//! ready-made three-document site.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let fetcher = MemoryFetcher::new()
//!     .with("config.json", r#"{ "portfolio": [] }"#)
//!     .with_status("manifest.json", 404);
//!
//! let app = bootstrap(&AppConfig::default(), &sample_fetcher(), Document::new());
//! ```

use crate::loader::{Fetch, Response};
use crate::types::Project;
use std::collections::HashMap;
use std::io;

// =========================================================================
// Builders
// =========================================================================

pub fn project(title: &str, category: &str) -> Project {
    Project {
        title: title.to_string(),
        category: Some(category.to_string()),
        ..Default::default()
    }
}

pub fn uncategorized(title: &str) -> Project {
    Project {
        title: title.to_string(),
        ..Default::default()
    }
}

/// `Project 1` … `Project n`, alternating between two categories.
pub fn numbered_projects(n: usize) -> Vec<Project> {
    (1..=n)
        .map(|i| project(&format!("Project {i}"), if i % 2 == 0 { "Even" } else { "Odd" }))
        .collect()
}

/// Count non-overlapping occurrences of `needle` in `haystack`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

// =========================================================================
// In-memory fetcher
// =========================================================================

#[derive(Debug, Clone)]
enum Entry {
    Respond(Response),
    Fail,
}

/// Serves canned responses. Unknown locations answer 404.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    entries: HashMap<String, Entry>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, location: &str, body: &str) -> Self {
        self.entries
            .insert(location.to_string(), Entry::Respond(Response::ok(body)));
        self
    }

    pub fn with_status(mut self, location: &str, status: u16) -> Self {
        self.entries.insert(
            location.to_string(),
            Entry::Respond(Response {
                status,
                body: String::new(),
            }),
        );
        self
    }

    /// The request itself fails, like a rejected network fetch.
    pub fn with_failure(mut self, location: &str) -> Self {
        self.entries.insert(location.to_string(), Entry::Fail);
        self
    }
}

impl Fetch for MemoryFetcher {
    fn fetch(&self, location: &str) -> io::Result<Response> {
        match self.entries.get(location) {
            Some(Entry::Respond(response)) => Ok(response.clone()),
            Some(Entry::Fail) => Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "fetch rejected",
            )),
            None => Ok(Response {
                status: 404,
                body: String::new(),
            }),
        }
    }
}

// =========================================================================
// Sample site
// =========================================================================

pub const SAMPLE_CONFIG: &str = r#"{
    "personal_info": {
        "name": "Lin Wei",
        "title": "QA Engineer\nTest Automation",
        "avatar": "./images/avatar.png",
        "location": "Taipei",
        "experience": "8 years"
    },
    "social_links": {
        "github": "https://github.com/linwei",
        "linkedin": "https://www.linkedin.com/in/linwei",
        "twitter": ""
    },
    "skills": {
        "programming": ["Python", "TypeScript"],
        "tools": ["Playwright", "Selenium"],
        "types": []
    },
    "contact": {
        "email": "lin@example.com",
        "resume": "./files/resume.pdf"
    }
}"#;

pub const SAMPLE_MANIFEST: &str = r#"{
    "site_config": {
        "title": "Lin Wei | Portfolio",
        "description": "Test automation work",
        "keywords": "qa, automation",
        "author": "Lin Wei",
        "language": "zh-TW"
    }
}"#;

pub const SAMPLE_PORTFOLIO: &str = r#"{
    "portfolio": [
        { "title": "Storefront", "category": "Web", "media": "media/store.mp4",
          "description": "Shop", "technologies": ["React"] },
        { "title": "Regression Bot", "category": "Automation", "image": "media/bot.png",
          "description": "Nightly runs", "detailed_description": "Runs every suite nightly",
          "github_url": "https://github.com/linwei/bot" },
        { "title": "Landing", "category": "Web", "media": "media/landing.webp" },
        { "title": "Load Rig", "category": "Automation", "media": "media/rig.mov", "date": "2023-11" },
        { "title": "CLI Kit", "category": "Tooling" }
    ]
}"#;

/// The sample site under the default three source locations.
pub fn sample_fetcher() -> MemoryFetcher {
    MemoryFetcher::new()
        .with("config/config.json", SAMPLE_CONFIG)
        .with("config/manifest.json", SAMPLE_MANIFEST)
        .with("config/portfolio.json", SAMPLE_PORTFOLIO)
}
