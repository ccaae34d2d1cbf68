//! Portfolio data model.
//!
//! [`Configuration`] is the merged JSON document exactly as the sources
//! provided it: a map of top-level keys, kept raw so that a malformed
//! section only fails when it is decoded. [`SiteContent`] is the decoded
//! view every renderer reads from. Decoding happens once, up front, so a
//! shape error is reported before any region of the page is written.
//!
//! Absent (or `null`) top-level keys mean "no content for this section".

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("section `{section}` has an unexpected shape: {source}")]
    Shape {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// The merged configuration document. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    fields: Map<String, Value>,
}

impl Configuration {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Raw value of a top-level key. `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    fn slice<T: DeserializeOwned>(&self, section: &'static str) -> Result<Option<T>, RenderError> {
        self.get(section)
            .map(|v| {
                T::deserialize(v).map_err(|source| RenderError::Shape { section, source })
            })
            .transpose()
    }

    /// Decode every section this site knows how to render.
    pub fn decode(&self) -> Result<SiteContent, RenderError> {
        Ok(SiteContent {
            site: self.slice("site_config")?,
            personal: self.slice("personal_info")?,
            social_links: self.slice("social_links")?,
            skills: self.slice("skills")?,
            contact: self.slice("contact")?,
            portfolio: self.slice("portfolio")?.unwrap_or_default(),
        })
    }
}

/// Decoded configuration slices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteContent {
    pub site: Option<SiteMeta>,
    pub personal: Option<PersonalInfo>,
    /// Platform name → URL, in document order. Values stay raw so falsy
    /// entries (empty string, `false`, `null`) can be skipped.
    pub social_links: Option<Map<String, Value>>,
    /// Category key → list of skill labels, in document order.
    pub skills: Option<Map<String, Value>>,
    pub contact: Option<Contact>,
    pub portfolio: Vec<Project>,
}

/// `site_config`: document metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
}

/// `personal_info`: the profile card.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub title: Option<String>,
    /// Image path/URL, or literal inline markup such as an emoji.
    pub avatar: Option<String>,
    pub location: Option<String>,
    pub experience: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

/// `contact`: the call-to-action buttons.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: Option<String>,
    pub resume: Option<String>,
}

/// One portfolio entry.
///
/// Field types are loose: any scalar is shown as text, falsy values count
/// as missing, and a `technologies` value that is not a list is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "lenient_title")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub detailed_description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub media: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub demo_url: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub github_url: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub technologies: Vec<String>,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(truthy_text(&Value::deserialize(deserializer)?))
}

fn lenient_title<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Entries of a list as text, skipping null; anything but a list is empty.
fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
        .collect())
}

impl Project {
    /// `media` wins over the older `image` field; empty strings count as missing.
    pub fn media_url(&self) -> Option<&str> {
        non_empty(&self.media).or_else(|| non_empty(&self.image))
    }

    /// Long-form description when present, else the short one.
    pub fn body(&self) -> Option<&str> {
        non_empty(&self.detailed_description).or_else(|| non_empty(&self.description))
    }

    pub fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// JavaScript-style truthiness for raw values, rendered as display text.
///
/// `null`, `false`, `0` and `""` yield `None`.
pub(crate) fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
