//! Related-works resolution.
//!
//! Two works are related when they share at least one performer. Resolution is
//! deliberately two-phase:
//!
//! 1. **Collect**: walk the work's own performer list in order; for each
//!    performer, walk that performer's pre-built bucket in catalog order. The
//!    first occurrence of a candidate id wins, later duplicates are dropped,
//!    and the work itself is never a candidate.
//! 2. **Order**: stable-sort the collected candidates newest-first, then
//!    truncate to the limit.
//!
//! The phases must not be fused. A sort-as-you-collect variant breaks ties
//! differently once two candidates share a release date, and downstream pages
//! are byte-compared across runs.

use crate::catalog::{Work, newest_first};
use crate::index::CatalogIndexes;
use std::collections::HashSet;

/// Default number of related works shown on a work page.
pub const DEFAULT_RELATED_LIMIT: usize = 12;

/// Resolve up to `limit` works sharing a performer with `work`, newest first.
///
/// `indexes` must have been built over `works`. A work with no performers has
/// no relations: an empty result, not an error.
pub fn related<'a>(
    work: &Work,
    works: &'a [Work],
    indexes: &CatalogIndexes,
    limit: usize,
) -> Vec<&'a Work> {
    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(work.id.as_str());

    let mut candidates: Vec<&Work> = Vec::new();
    for name in &work.actresses {
        for &pos in indexes.performer_works(name) {
            let other = &works[pos];
            if seen.insert(other.id.as_str()) {
                candidates.push(other);
            }
        }
    }

    candidates.sort_by(|a, b| newest_first(a, b));
    candidates.truncate(limit);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_indexes;
    use crate::test_helpers::{ids, work};

    #[test]
    fn shares_at_least_one_performer() {
        let works = vec![
            work("a", "2026-01-01", &["Yui"], &[]),
            work("b", "2026-01-02", &["Yui"], &[]),
            work("c", "2026-01-03", &["Rin"], &[]),
        ];
        let idx = build_indexes(&works);
        let rel = related(&works[0], &works, &idx, DEFAULT_RELATED_LIMIT);
        assert_eq!(ids(&rel), vec!["b"]);
    }

    #[test]
    fn never_includes_itself() {
        let works = vec![
            work("a", "2026-01-01", &["Yui"], &[]),
            work("b", "2026-01-02", &["Yui"], &[]),
        ];
        let idx = build_indexes(&works);
        for w in &works {
            let rel = related(w, &works, &idx, DEFAULT_RELATED_LIMIT);
            assert!(rel.iter().all(|r| r.id != w.id));
        }
    }

    #[test]
    fn no_performers_means_no_relations() {
        let works = vec![
            work("a", "2026-01-01", &[], &["drama"]),
            work("b", "2026-01-02", &[], &["drama"]),
        ];
        let idx = build_indexes(&works);
        assert!(related(&works[0], &works, &idx, DEFAULT_RELATED_LIMIT).is_empty());
    }

    #[test]
    fn shared_tag_alone_does_not_relate() {
        let works = vec![
            work("a", "2026-01-01", &["Yui"], &["drama"]),
            work("b", "2026-01-02", &["Rin"], &["drama"]),
        ];
        let idx = build_indexes(&works);
        assert!(related(&works[0], &works, &idx, DEFAULT_RELATED_LIMIT).is_empty());
    }

    #[test]
    fn co_starring_candidate_appears_once() {
        // "b" shares both performers with "a" and must not be listed twice.
        let works = vec![
            work("a", "2026-01-01", &["Yui", "Rin"], &[]),
            work("b", "2026-01-02", &["Yui", "Rin"], &[]),
            work("c", "2026-01-03", &["Rin"], &[]),
        ];
        let idx = build_indexes(&works);
        let rel = related(&works[0], &works, &idx, DEFAULT_RELATED_LIMIT);
        assert_eq!(ids(&rel), vec!["c", "b"]);
    }

    #[test]
    fn ordered_newest_first() {
        let works = vec![
            work("a", "2026-01-01", &["Yui"], &[]),
            work("old", "2020-01-01", &["Yui"], &[]),
            work("new", "2026-06-01", &["Yui"], &[]),
            work("mid", "2023-01-01", &["Yui"], &[]),
        ];
        let idx = build_indexes(&works);
        let rel = related(&works[0], &works, &idx, DEFAULT_RELATED_LIMIT);
        assert_eq!(ids(&rel), vec!["new", "mid", "old"]);
    }

    #[test]
    fn undated_candidates_sort_last() {
        let works = vec![
            work("a", "2026-01-01", &["Yui"], &[]),
            work("undated", "", &["Yui"], &[]),
            work("dated", "2021-01-01", &["Yui"], &[]),
        ];
        let idx = build_indexes(&works);
        let rel = related(&works[0], &works, &idx, DEFAULT_RELATED_LIMIT);
        assert_eq!(ids(&rel), vec!["dated", "undated"]);
    }

    #[test]
    fn truncates_after_sorting() {
        // The newest candidate is discovered last; a truncate-while-collecting
        // implementation would cut it off.
        let works = vec![
            work("a", "2026-01-01", &["Yui", "Rin"], &[]),
            work("old1", "2020-01-01", &["Yui"], &[]),
            work("old2", "2020-02-01", &["Yui"], &[]),
            work("newest", "2026-06-01", &["Rin"], &[]),
        ];
        let idx = build_indexes(&works);
        let rel = related(&works[0], &works, &idx, 2);
        assert_eq!(ids(&rel), vec!["newest", "old2"]);
    }

    #[test]
    fn respects_limit() {
        let mut works = vec![work("a", "2026-01-01", &["Yui"], &[])];
        for n in 0..20 {
            works.push(work(
                &format!("w{n}"),
                &format!("2025-01-{:02}", n + 1),
                &["Yui"],
                &[],
            ));
        }
        let idx = build_indexes(&works);
        assert_eq!(related(&works[0], &works, &idx, 12).len(), 12);
        assert_eq!(related(&works[0], &works, &idx, 0).len(), 0);
    }

    #[test]
    fn date_ties_keep_first_seen_order() {
        // Stable sort: equal dates preserve phase-1 discovery order, which
        // follows the work's own performer list.
        let works = vec![
            work("a", "2026-01-01", &["Rin", "Yui"], &[]),
            work("via-yui", "2025-01-01", &["Yui"], &[]),
            work("via-rin", "2025-01-01", &["Rin"], &[]),
        ];
        let idx = build_indexes(&works);
        let rel = related(&works[0], &works, &idx, DEFAULT_RELATED_LIMIT);
        assert_eq!(ids(&rel), vec!["via-rin", "via-yui"]);
    }
}
