//! Portfolio filtering.
//!
//! The filter bar offers the synthetic "all" category followed by every
//! distinct `category` in the portfolio, in first-occurrence order.
//! Selecting a category replaces the active subset wholesale; the
//! carousel is then reloaded from that subset (see [`crate::app`]).
//!
//! Projects without a category only ever appear under "all".

use crate::labels;
use crate::types::Project;
use maud::{Markup, html};
use tracing::debug;

/// A filter choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// No restriction.
    All,
    Named(String),
}

impl Category {
    /// Interpret a filter-button label. The sentinel label selects [`Category::All`].
    pub fn from_label(label: &str) -> Self {
        if label == labels::ALL_CATEGORIES {
            Self::All
        } else {
            Self::Named(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => labels::ALL_CATEGORIES,
            Self::Named(name) => name,
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => project.category() == Some(name.as_str()),
        }
    }
}

/// The full portfolio plus the currently selected category.
#[derive(Debug, Clone)]
pub struct PortfolioFilter {
    portfolio: Vec<Project>,
    active: Category,
}

impl PortfolioFilter {
    pub fn new(portfolio: Vec<Project>) -> Self {
        Self {
            portfolio,
            active: Category::All,
        }
    }

    pub fn portfolio(&self) -> &[Project] {
        &self.portfolio
    }

    pub fn active(&self) -> &Category {
        &self.active
    }

    /// `All`, then each distinct project category in first-occurrence order.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = vec![Category::All];
        for name in self.portfolio.iter().filter_map(Project::category) {
            let category = Category::Named(name.to_string());
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }

    /// Make `category` active and return the matching projects, in portfolio order.
    pub fn select(&mut self, category: Category) -> Vec<Project> {
        let subset: Vec<Project> = self
            .portfolio
            .iter()
            .filter(|p| category.matches(p))
            .cloned()
            .collect();
        debug!(category = category.label(), matched = subset.len(), "filter selected");
        self.active = category;
        subset
    }

    /// Filter bar with exactly one button marked active.
    pub fn render(&self) -> Markup {
        html! {
            @for category in self.categories() {
                button.filter-btn.active[category == self.active]
                    type="button"
                    data-category=(category.label()) {
                    (category.label())
                }
            }
        }
    }
}
