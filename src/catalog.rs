//! Catalog loading and the core data model.
//!
//! The catalog is one JSON document — the single source of truth for the whole
//! site:
//!
//! ```text
//! {
//!   "site_name": "Review Catalog",
//!   "works": [
//!     {
//!       "id": "abc00123",
//!       "title": "...",
//!       "description": "...",
//!       "release_date": "2026-05-01",
//!       "official_url": "https://...",
//!       "hero_image": "https://.../cover.jpg",
//!       "tags": ["drama"],
//!       "actresses": ["Yui Aoi"]
//!     }
//!   ]
//! }
//! ```
//!
//! ## Loading policy
//!
//! - A missing file is fatal ([`CatalogError::NotFound`]) — there is nothing
//!   to build from.
//! - A document that parses but has the wrong shape (top level not an object,
//!   `works` not an array) is coerced to an *empty* catalog. Upstream data is
//!   fetched from a third-party API and occasionally arrives half-broken; an
//!   empty site beats a dead pipeline.
//! - Records are forgiving: missing `tags`/`actresses` become empty lists,
//!   and a record without a non-empty `id` is dropped here, silently. Every
//!   `Work` past this point has an id.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Site name used when the document does not carry one.
pub const DEFAULT_SITE_NAME: &str = "Catalog";

/// One catalog item — a media/product record.
///
/// All display fields are opaque strings; the pipeline never interprets them
/// beyond sorting on `release_date` (lexicographic, which works for
/// `YYYY-MM-DD` style dates).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Work {
    /// Unique, non-empty within the catalog. Records without one are dropped
    /// at load time.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Sortable date-like string. May be empty; empty dates sort after all
    /// dated works in newest-first listings.
    pub release_date: String,
    pub official_url: String,
    /// Cover image URL, if the upstream listing had one.
    pub hero_image: Option<String>,
    /// Genre labels, in upstream order.
    pub tags: Vec<String>,
    /// Performer names, in upstream order.
    pub actresses: Vec<String>,
}

/// The loaded catalog: site name plus works in document order.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub site_name: String,
    pub works: Vec<Work>,
}

/// Load and shape-check the catalog document at `path`.
pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    Ok(from_value(value))
}

/// Coerce a parsed JSON value into a catalog.
///
/// Wrong-shaped documents degrade to an empty catalog rather than failing:
/// the loader's only hard requirements are "file exists" and "file is JSON".
fn from_value(value: serde_json::Value) -> Catalog {
    let serde_json::Value::Object(doc) = value else {
        return Catalog {
            site_name: DEFAULT_SITE_NAME.to_string(),
            works: Vec::new(),
        };
    };

    let site_name = doc
        .get("site_name")
        .and_then(serde_json::Value::as_str)
        .unwrap_or(DEFAULT_SITE_NAME)
        .to_string();

    let works = match doc.get("works") {
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| serde_json::from_value::<Work>(item.clone()).ok())
            .filter(|w| !w.id.is_empty())
            .collect(),
        _ => Vec::new(),
    };

    Catalog { site_name, works }
}

/// Newest-first ordering on `release_date`.
///
/// Descending lexicographic comparison; the empty string is the smallest
/// value, so undated works land after every dated one. Callers rely on sort
/// stability to keep catalog order among equal dates.
pub fn newest_first(a: &Work, b: &Work) -> Ordering {
    b.release_date.cmp(&a.release_date)
}
