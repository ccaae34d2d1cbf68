//! Configuration loading.
//!
//! Retrieves every configured JSON source, then merges them into one
//! [`Configuration`]. Retrieval is behind the [`Fetch`] trait so the same
//! pipeline runs against the filesystem ([`FsFetcher`]) or an in-memory
//! table in tests.
//!
//! ## Merge Rules
//!
//! Sources are overlaid in order, top-level key by top-level key (shallow):
//!
//! ```text
//! config.json     { site_config, personal_info, skills }
//! manifest.json   { site_config }                ← replaces site_config wholesale
//! portfolio.json  [ {project}, {project} ]       ← bare list = portfolio
//! ```
//!
//! A document that is a bare list is treated as `{ "portfolio": [...] }`;
//! a `{ "portfolio": [...] }` wrapper needs no special handling.
//!
//! ## Failure
//!
//! Any source answering with a non-success status, failing to be read, or
//! holding malformed JSON fails the whole load. There is no retry.

use crate::types::Configuration;
use rayon::prelude::*;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to fetch {location}: {source}")]
    Fetch {
        location: String,
        #[source]
        source: io::Error,
    },
    #[error("{location} answered with status {status}")]
    Status { location: String, status: u16 },
    #[error("malformed JSON in {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{location} is neither a JSON object nor a JSON list")]
    Shape { location: String },
}

impl LoadError {
    /// Whether the failure is malformed content rather than retrieval.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Shape { .. })
    }
}

/// A retrieved resource: a status code and its body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieves one resource by location.
///
/// `Err` is a transport failure; a reachable resource that is missing
/// reports a non-success [`Response::status`] instead.
pub trait Fetch: Sync {
    fn fetch(&self, location: &str) -> io::Result<Response>;
}

/// Reads sources from files under a site root.
///
/// Missing files answer 404, like a static file server would.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Fetch for FsFetcher {
    fn fetch(&self, location: &str) -> io::Result<Response> {
        let path = self.root.join(location.trim_start_matches("./"));
        match fs::read_to_string(&path) {
            Ok(body) => Ok(Response::ok(body)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Response {
                status: 404,
                body: String::new(),
            }),
            Err(e) => Err(e),
        }
    }
}

/// Retrieve and parse a single source.
fn fetch_document(fetcher: &dyn Fetch, location: &str) -> Result<Value, LoadError> {
    let response = fetcher
        .fetch(location)
        .map_err(|source| LoadError::Fetch {
            location: location.to_string(),
            source,
        })?;
    if !response.is_success() {
        return Err(LoadError::Status {
            location: location.to_string(),
            status: response.status,
        });
    }
    let value = serde_json::from_str(&response.body).map_err(|source| LoadError::Parse {
        location: location.to_string(),
        source,
    })?;
    debug!(location, "fetched configuration source");
    Ok(value)
}

/// Overlay `documents` in order into a single configuration.
pub fn merge_documents(
    documents: Vec<(String, Value)>,
) -> Result<Configuration, LoadError> {
    let mut fields = Map::new();
    for (location, document) in documents {
        match document {
            Value::Object(map) => {
                for (key, value) in map {
                    fields.insert(key, value);
                }
            }
            Value::Array(list) => {
                fields.insert("portfolio".to_string(), Value::Array(list));
            }
            _ => return Err(LoadError::Shape { location }),
        }
    }
    Ok(Configuration::new(fields))
}

/// Fetch every source (in parallel) and merge them in the given order.
///
/// All sources are requested even if one fails; the first failure in
/// source order is reported.
pub fn load(fetcher: &dyn Fetch, sources: &[String]) -> Result<Configuration, LoadError> {
    let documents = sources
        .par_iter()
        .map(|location| fetch_document(fetcher, location).map(|doc| (location.clone(), doc)))
        .collect::<Vec<_>>()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;
    merge_documents(documents)
}
