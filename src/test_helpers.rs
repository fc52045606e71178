//! Shared test utilities for the workshelf test suite.
//!
//! Catalog fixtures are built in code — a work is four values, so helpers
//! keep test bodies down to the data that matters.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::{ids, work};
//!
//! let works = vec![
//!     work("a", "2026-01-01", &["Yui"], &["drama"]),
//!     work("b", "2026-01-02", &["Yui"], &[]),
//! ];
//! assert_eq!(ids(&works.iter().collect::<Vec<_>>()), vec!["a", "b"]);
//! ```

use crate::catalog::Work;

/// Build a work from the fields the pipeline actually branches on.
/// Title defaults to `Work <id>`; everything else stays empty.
pub fn work(id: &str, release_date: &str, actresses: &[&str], tags: &[&str]) -> Work {
    Work {
        id: id.to_string(),
        title: if id.is_empty() {
            String::new()
        } else {
            format!("Work {id}")
        },
        release_date: release_date.to_string(),
        actresses: actresses.iter().map(|s| s.to_string()).collect(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        ..Work::default()
    }
}

/// Ids of a resolved work list, in order.
pub fn ids<'a>(works: &[&'a Work]) -> Vec<&'a str> {
    works.iter().map(|w| w.id.as_str()).collect()
}
