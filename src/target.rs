//! The rendering target.
//!
//! The page shell exposes a fixed set of named regions. Renderers never
//! read markup back; they overwrite a region's content wholesale, set an
//! attribute, toggle a class, or show/hide a region. [`RenderTarget`] is
//! that write-only surface, and [`Document`] is the in-memory
//! implementation used by the CLI and the tests.

use maud::Markup;
use std::collections::{BTreeMap, BTreeSet};

/// A named region of the page shell, addressed by its stable element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// The document root; carries the `lang` attribute.
    Html,
    SiteTitle,
    SiteDescription,
    SiteKeywords,
    SiteAuthor,
    Loading,
    MainContainer,
    ProfileAvatar,
    ProfileName,
    ProfileTitle,
    ProfileInfo,
    SocialLinks,
    Skills,
    ContactButtons,
    PortfolioFilter,
    Carousel,
    ProjectDetails,
}

impl Region {
    pub const ALL: [Region; 17] = [
        Region::Html,
        Region::SiteTitle,
        Region::SiteDescription,
        Region::SiteKeywords,
        Region::SiteAuthor,
        Region::Loading,
        Region::MainContainer,
        Region::ProfileAvatar,
        Region::ProfileName,
        Region::ProfileTitle,
        Region::ProfileInfo,
        Region::SocialLinks,
        Region::Skills,
        Region::ContactButtons,
        Region::PortfolioFilter,
        Region::Carousel,
        Region::ProjectDetails,
    ];

    /// Regions that hold site content (everything except the shell chrome).
    pub const SECTIONS: [Region; 15] = [
        Region::Html,
        Region::SiteTitle,
        Region::SiteDescription,
        Region::SiteKeywords,
        Region::SiteAuthor,
        Region::ProfileAvatar,
        Region::ProfileName,
        Region::ProfileTitle,
        Region::ProfileInfo,
        Region::SocialLinks,
        Region::Skills,
        Region::ContactButtons,
        Region::PortfolioFilter,
        Region::Carousel,
        Region::ProjectDetails,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Region::Html => "html",
            Region::SiteTitle => "site-title",
            Region::SiteDescription => "site-description",
            Region::SiteKeywords => "site-keywords",
            Region::SiteAuthor => "site-author",
            Region::Loading => "loading",
            Region::MainContainer => "main-container",
            Region::ProfileAvatar => "profile-avatar",
            Region::ProfileName => "profile-name",
            Region::ProfileTitle => "profile-title",
            Region::ProfileInfo => "profile-info",
            Region::SocialLinks => "social-links",
            Region::Skills => "skills-section",
            Region::ContactButtons => "contact-buttons",
            Region::PortfolioFilter => "portfolio-filter",
            Region::Carousel => "carousel-container",
            Region::ProjectDetails => "project-details",
        }
    }

    pub fn from_id(id: &str) -> Option<Region> {
        Region::ALL.into_iter().find(|r| r.id() == id)
    }
}

/// Write-only access to the page shell.
pub trait RenderTarget {
    /// Replace the region's content wholesale.
    fn replace(&mut self, region: Region, markup: Markup);
    fn set_attribute(&mut self, region: Region, name: &str, value: &str);
    fn set_class(&mut self, region: Region, class: &str, on: bool);
    fn set_visible(&mut self, region: Region, visible: bool);
}

/// Recorded state of one region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionState {
    /// `None` until the region's content is first replaced.
    pub markup: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub hidden: bool,
    /// Number of wholesale content replacements.
    pub writes: usize,
}

impl RegionState {
    /// Whether anything has been written into the region.
    pub fn is_touched(&self) -> bool {
        self.markup.is_some() || !self.attributes.is_empty()
    }
}

/// In-memory page shell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    regions: BTreeMap<Region, RegionState>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self, region: Region) -> Option<&RegionState> {
        self.regions.get(&region)
    }

    pub fn markup(&self, region: Region) -> Option<&str> {
        self.region(region).and_then(|r| r.markup.as_deref())
    }

    pub fn attribute(&self, region: Region, name: &str) -> Option<&str> {
        self.region(region)
            .and_then(|r| r.attributes.get(name))
            .map(String::as_str)
    }

    pub fn has_class(&self, region: Region, class: &str) -> bool {
        self.region(region).is_some_and(|r| r.classes.contains(class))
    }

    pub fn is_hidden(&self, region: Region) -> bool {
        self.region(region).is_some_and(|r| r.hidden)
    }

    pub fn is_touched(&self, region: Region) -> bool {
        self.region(region).is_some_and(RegionState::is_touched)
    }

    /// Regions in declaration order, with their state.
    pub fn regions(&self) -> impl Iterator<Item = (Region, &RegionState)> {
        self.regions.iter().map(|(r, s)| (*r, s))
    }

    fn entry(&mut self, region: Region) -> &mut RegionState {
        self.regions.entry(region).or_default()
    }
}

impl RenderTarget for Document {
    fn replace(&mut self, region: Region, markup: Markup) {
        let state = self.entry(region);
        state.markup = Some(markup.into_string());
        state.writes += 1;
    }

    fn set_attribute(&mut self, region: Region, name: &str, value: &str) {
        self.entry(region)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_class(&mut self, region: Region, class: &str, on: bool) {
        let classes = &mut self.entry(region).classes;
        if on {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        self.entry(region).hidden = !visible;
    }
}
