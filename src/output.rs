//! CLI output formatting.
//!
//! Output is information-centric: every work is shown by title and positional
//! index, with ids, dates, and key memberships as indented context lines.
//! Each report has a pure `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout.
//!
//! ## Check
//!
//! ```text
//! Catalog: Review Catalog
//! Works
//! 001 Some Title (2026-02-20)
//!     Source: bbb002
//!     Actresses: Rin
//!     Genres: comedy, drama
//!
//! 3 works, 2 actresses, 2 genres
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Works (3) → works/<id>/
//! Actresses (2) → actresses/<slug>/
//! Genres (2) → genres/<slug>/
//! Catalog (1 page) → pages/<n>/
//! Search → search/ + assets/works_index.json
//! ```

use crate::catalog::Catalog;
use crate::emit::EmitSummary;
use crate::index::CatalogIndexes;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Pluralize a count: `1 work`, `2 works`, `2 actresses`.
fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Format the `check` report: the catalog inventory without building.
pub fn format_check_output(catalog: &Catalog, indexes: &CatalogIndexes) -> Vec<String> {
    let mut lines = vec![format!("Catalog: {}", catalog.site_name)];

    if !catalog.works.is_empty() {
        lines.push("Works".to_string());
    }
    for (pos, work) in catalog.works.iter().enumerate() {
        let title = if work.title.is_empty() {
            format!("({})", work.id)
        } else {
            work.title.clone()
        };
        let header = if work.release_date.is_empty() {
            format!("{} {}", format_index(pos + 1), title)
        } else {
            format!("{} {} ({})", format_index(pos + 1), title, work.release_date)
        };
        lines.push(header);
        lines.push(format!("    Source: {}", work.id));
        if !work.actresses.is_empty() {
            lines.push(format!("    Actresses: {}", work.actresses.join(", ")));
        }
        if !work.tags.is_empty() {
            lines.push(format!("    Genres: {}", work.tags.join(", ")));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{}, {}, {}",
        count(catalog.works.len(), "work", "works"),
        count(indexes.performer_count(), "actress", "actresses"),
        count(indexes.genre_count(), "genre", "genres")
    ));
    lines
}

pub fn print_check_output(catalog: &Catalog, indexes: &CatalogIndexes) {
    for line in format_check_output(catalog, indexes) {
        println!("{line}");
    }
}

/// Format the `build` report from the emit summary.
pub fn format_emit_output(summary: &EmitSummary) -> Vec<String> {
    vec![
        "Home → index.html".to_string(),
        format!("Works ({}) → works/<id>/", summary.works),
        format!("Actresses ({}) → actresses/<slug>/", summary.performers),
        format!("Genres ({}) → genres/<slug>/", summary.genres),
        format!(
            "Catalog ({}) → pages/<n>/",
            count(summary.listing_pages, "page", "pages")
        ),
        "Search → search/ + assets/works_index.json".to_string(),
        String::new(),
        format!(
            "Generated {} for {}",
            count(summary.works, "work page", "work pages"),
            summary.site_name
        ),
    ]
}

pub fn print_emit_output(summary: &EmitSummary) {
    for line in format_emit_output(summary) {
        println!("{line}");
    }
}
