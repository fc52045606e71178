//! Search payload projection.
//!
//! The client-side search page filters a reduced JSON copy of the catalog.
//! Each record keeps only what the search UI needs — id, title, date, cover,
//! link, performers, tags. `description` is deliberately absent: it is the
//! largest field and the search box never matches on it.
//!
//! The caller hands works in newest-first order, so the exported array is
//! already date-sorted and the client renders it as-is.

use crate::catalog::Work;
use serde::{Deserialize, Serialize};

/// Reduced per-work projection exported as `assets/works_index.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRecord {
    pub id: String,
    pub title: String,
    pub release_date: String,
    pub hero_image: Option<String>,
    pub official_url: String,
    pub actresses: Vec<String>,
    pub tags: Vec<String>,
}

impl From<&Work> for SearchRecord {
    fn from(work: &Work) -> Self {
        Self {
            id: work.id.clone(),
            title: work.title.clone(),
            release_date: work.release_date.clone(),
            hero_image: work.hero_image.clone(),
            official_url: work.official_url.clone(),
            actresses: work.actresses.clone(),
            tags: work.tags.clone(),
        }
    }
}

/// Project `works` into search records, preserving order.
///
/// The loader already drops id-less records; the filter here is a defensive
/// re-check so the exported index can never contain an unlinkable entry.
pub fn project(works: &[Work]) -> Vec<SearchRecord> {
    works
        .iter()
        .filter(|w| !w.id.is_empty())
        .map(SearchRecord::from)
        .collect()
}

/// Serialize records as pretty-printed UTF-8 JSON.
///
/// serde_json leaves non-ASCII characters unescaped, so performer and tag
/// names stay readable in the payload.
pub fn to_json(records: &[SearchRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}
