//! Fixed-size pagination of the full catalog listing.
//!
//! Pages are 1-indexed slices of the newest-first works list. The site always
//! has at least one listing page: an empty catalog paginates to a single empty
//! page rather than zero pages, so `pages/1/` exists unconditionally.

use crate::catalog::Work;

/// Default number of works per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// One listing page: a contiguous slice of the sorted catalog plus its
/// neighbor links.
#[derive(Debug)]
pub struct Page<'a> {
    /// 1-based page number.
    pub number: usize,
    pub works: &'a [Work],
    /// Previous page number, absent on page 1.
    pub prev: Option<usize>,
    /// Next page number, absent on the last page.
    pub next: Option<usize>,
}

/// Partition `works` (already sorted newest-first by the caller) into pages of
/// `page_size`.
pub fn paginate(works: &[Work], page_size: usize) -> Vec<Page<'_>> {
    debug_assert!(page_size > 0, "page_size is validated by config");
    let total = works.len().div_ceil(page_size).max(1);

    (1..=total)
        .map(|number| {
            let start = (number - 1) * page_size;
            let end = (start + page_size).min(works.len());
            Page {
                number,
                // Page 1 of an empty catalog has no backing range.
                works: if start < end { &works[start..end] } else { &[] },
                prev: (number > 1).then(|| number - 1),
                next: (number < total).then(|| number + 1),
            }
        })
        .collect()
}
