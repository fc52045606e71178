//! # Workshelf
//!
//! A minimal static site generator for media catalogs. One JSON document is
//! the source of truth: works (title, release date, genres, performers) go
//! in, a fully static, cross-linked HTML site plus a client-searchable JSON
//! index come out.
//!
//! # Architecture: Derive, Then Emit
//!
//! Every build is a one-shot batch transform in two phases:
//!
//! ```text
//! 1. Derive   works.json  →  indexes, relations, pages, search records
//! 2. Emit     derived     →  dist/  (HTML tree + assets)
//! ```
//!
//! All derived structures are completed before the first page is written.
//! That ordering is structural, not stylistic: page emission fans out (in
//! parallel) over indexes that are immutable by the time it starts, so no
//! page can ever observe a half-built index, and concurrent writers only
//! ever touch disjoint paths keyed by id, slug, or page number.
//!
//! There is no persisted intermediate state. Indexes are rebuilt from
//! scratch on every run, and re-running on identical input reproduces a
//! byte-identical output tree.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Loads and shape-checks the source JSON; the `Work` model |
//! | [`index`] | Builds performer and genre indexes in one pass |
//! | [`related`] | Resolves shared-performer "related works" per work |
//! | [`paginate`] | Partitions the catalog into fixed-size listing pages |
//! | [`search`] | Projects the reduced search payload |
//! | [`slug`] | Sanitizes display names into path segments |
//! | [`render`] | The template boundary: capability trait + page data model |
//! | [`templates`] | Default Maud implementation of the template set |
//! | [`emit`] | Orchestrates derivation and writes the output tree |
//! | [`config`] | Optional `config.toml` loading and validation |
//! | [`output`] | CLI reporting — tree-style display of build results |
//!
//! # Design Decisions
//!
//! ## Templates Behind a Trait
//!
//! The emitter renders through a [`render::Render`] capability rather than
//! calling a template engine directly. The pipeline's testable logic —
//! indexing, relation resolution, pagination, projection — never touches
//! markup, and the engine can be swapped (or faked in tests) without
//! touching the pipeline. The stock implementation uses
//! [Maud](https://maud.lambda.xyz/): compile-time checked HTML, auto-escaped
//! interpolation, no template directory to ship.
//!
//! ## Resilient Loading
//!
//! Upstream catalog data comes from a third-party listing API and sometimes
//! arrives half-broken. A missing document is fatal; a wrong-shaped one
//! degrades to an empty catalog; a bad record is skipped. Per-record
//! anomalies (no id, no performers, no relations) are ordinary data, handled
//! by omission, never by exception.
//!
//! ## Forever Output
//!
//! The generated site is plain HTML, one stylesheet, and one small vanilla
//! JavaScript file for search. No runtime, no framework, no server — drop
//! `dist/` on any static host and it works, indefinitely.

pub mod catalog;
pub mod config;
pub mod emit;
pub mod index;
pub mod output;
pub mod paginate;
pub mod related;
pub mod render;
pub mod search;
pub mod slug;
pub mod templates;

#[cfg(test)]
pub(crate) mod test_helpers;
