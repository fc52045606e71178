//! Secondary index construction.
//!
//! One linear pass over the catalog buckets every work under each performer it
//! lists and each tag it carries. The result is an immutable snapshot: the
//! emitter (and the relation resolver) read from it, nothing mutates it after
//! construction. Building everything up front, before any page is emitted,
//! is a hard ordering requirement of the pipeline, not a style choice.
//!
//! Buckets hold positions into the works slice the indexes were built from,
//! in catalog order. `BTreeMap` keys double as the sorted, duplicate-free key
//! lists that drive per-key page emission deterministically.

use crate::catalog::Work;
use std::collections::BTreeMap;

/// Immutable secondary indexes over a works slice.
///
/// Bucket values are positions into that slice; resolve them against the same
/// slice the indexes were built from.
#[derive(Debug, Default)]
pub struct CatalogIndexes {
    by_performer: BTreeMap<String, Vec<usize>>,
    by_genre: BTreeMap<String, Vec<usize>>,
    by_id: BTreeMap<String, usize>,
}

impl CatalogIndexes {
    /// Performer names, lexicographically sorted, no duplicates.
    pub fn performer_keys(&self) -> impl Iterator<Item = &str> {
        self.by_performer.keys().map(String::as_str)
    }

    /// Tag names, lexicographically sorted, no duplicates.
    pub fn genre_keys(&self) -> impl Iterator<Item = &str> {
        self.by_genre.keys().map(String::as_str)
    }

    /// Positions of the works listing `name`, in catalog order.
    /// Unknown names yield an empty slice.
    pub fn performer_works(&self, name: &str) -> &[usize] {
        self.by_performer.get(name).map_or(&[], Vec::as_slice)
    }

    /// Positions of the works tagged `name`, in catalog order.
    pub fn genre_works(&self, name: &str) -> &[usize] {
        self.by_genre.get(name).map_or(&[], Vec::as_slice)
    }

    /// Position of the work with the given id.
    pub fn work_by_id(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn performer_count(&self) -> usize {
        self.by_performer.len()
    }

    pub fn genre_count(&self) -> usize {
        self.by_genre.len()
    }
}

/// Build performer and genre indexes over `works` in one pass.
///
/// Bucket creation on first sight; within a bucket, works keep the relative
/// order they have in `works`.
pub fn build_indexes(works: &[Work]) -> CatalogIndexes {
    let mut indexes = CatalogIndexes::default();

    for (pos, work) in works.iter().enumerate() {
        for name in &work.actresses {
            indexes
                .by_performer
                .entry(name.clone())
                .or_default()
                .push(pos);
        }
        for tag in &work.tags {
            indexes.by_genre.entry(tag.clone()).or_default().push(pos);
        }
        indexes.by_id.insert(work.id.clone(), pos);
    }

    indexes
}
