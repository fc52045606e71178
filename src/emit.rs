//! Site emission: the pipeline orchestrator.
//!
//! Emission runs in two strictly ordered phases:
//!
//! 1. **Derive**: establish the newest-first catalog order, build the
//!    performer/genre indexes, paginate, and project the search records.
//!    Nothing is written yet.
//! 2. **Fan out**: write the output tree. Every derived structure is complete
//!    before the first page renders, so no page can observe a half-built
//!    index. Per-work pages are written in parallel; every emitted path is
//!    keyed by a unique id, slug, or page number, so writers never collide.
//!
//! ## Output tree
//!
//! ```text
//! dist/
//! ├── index.html                     # Home: newest works, capped
//! ├── works/<id>/index.html          # One per work, with related works
//! ├── actresses/index.html           # Alphabetical performer index
//! ├── actresses/<slug>/index.html    # One listing per performer
//! ├── genres/index.html              # Alphabetical genre index
//! ├── genres/<slug>/index.html       # One listing per genre
//! ├── pages/<n>/index.html           # Paginated full catalog, n from 1
//! ├── search/index.html              # Client-side search
//! └── assets/
//!     ├── style.css                  # Shared stylesheet
//!     └── works_index.json           # Search payload
//! ```
//!
//! Re-running on identical input reproduces the tree byte-for-byte. A run
//! that fails midway leaves what it wrote; there is no rollback, re-running
//! is the recovery.

use crate::catalog::{newest_first, Catalog, Work};
use crate::config::SiteConfig;
use crate::index::{build_indexes, CatalogIndexes};
use crate::paginate::paginate;
use crate::related::related;
use crate::render::{
    render_with_fallback, Depth, KeyEntry, KeyIndexData, ListingData, NavPaths, PageBody,
    PageData, PagerData, Render, RenderError, WorkData, TPL_KEY_INDEX, TPL_LISTING, TPL_SEARCH,
    TPL_WORK,
};
use crate::search;
use crate::slug::slugify;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

const CSS_STATIC: &str = include_str!("../static/style.css");

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Template error: {0}")]
    Render(#[from] RenderError),
}

/// What a build produced, for CLI reporting.
#[derive(Debug)]
pub struct EmitSummary {
    pub site_name: String,
    pub works: usize,
    pub performers: usize,
    pub genres: usize,
    pub listing_pages: usize,
}

/// Emit the complete site for `catalog` into `output_dir`.
pub fn emit_site(
    catalog: &Catalog,
    renderer: &dyn Render,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<EmitSummary, EmitError> {
    // Phase 1: derive. The sorted order established here is the catalog order
    // every downstream structure sees, making the output independent of the
    // document's input order.
    let mut works = catalog.works.clone();
    works.sort_by(newest_first);

    let indexes = build_indexes(&works);
    let pages = paginate(&works, config.listing.page_size);
    let records = search::project(&works);

    let site_name = catalog.site_name.as_str();

    // Phase 2: fan out.
    write_file(&output_dir.join("assets/style.css"), CSS_STATIC)?;
    write_file(
        &output_dir.join("assets/works_index.json"),
        &search::to_json(&records)?,
    )?;

    emit_home(site_name, &works, renderer, config, output_dir)?;
    emit_work_pages(site_name, &works, &indexes, renderer, config, output_dir)?;
    emit_key_pages(
        site_name,
        &works,
        &indexes,
        renderer,
        config,
        output_dir,
        KeySection::Actresses,
    )?;
    emit_key_pages(
        site_name,
        &works,
        &indexes,
        renderer,
        config,
        output_dir,
        KeySection::Genres,
    )?;
    emit_catalog_pages(site_name, &pages, renderer, output_dir)?;
    emit_search_page(site_name, renderer, output_dir)?;

    Ok(EmitSummary {
        site_name: site_name.to_string(),
        works: works.len(),
        performers: indexes.performer_count(),
        genres: indexes.genre_count(),
        listing_pages: pages.len(),
    })
}

/// Emit only the search payload (`assets/works_index.json`).
pub fn emit_search_index(catalog: &Catalog, output_dir: &Path) -> Result<usize, EmitError> {
    let mut works = catalog.works.clone();
    works.sort_by(newest_first);
    let records = search::project(&works);
    write_file(
        &output_dir.join("assets/works_index.json"),
        &search::to_json(&records)?,
    )?;
    Ok(records.len())
}

// ============================================================================
// Per-section emitters
// ============================================================================

fn emit_home(
    site_name: &str,
    works: &[Work],
    renderer: &dyn Render,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<(), EmitError> {
    let cap = config.home.max_works;
    let shown: Vec<&Work> = works.iter().take(cap).collect();
    let notice = (works.len() > cap).then(|| {
        format!(
            "Showing the {} newest of {} works. The full catalog is under All works.",
            shown.len(),
            works.len()
        )
    });

    let data = PageData {
        site_name,
        paths: NavPaths::at(Depth::Root),
        body: PageBody::Listing(ListingData {
            heading: "Latest works".to_string(),
            works: shown,
            notice,
            pager: None,
        }),
    };
    let html = render_with_fallback(renderer, TPL_LISTING, None, &data)?;
    write_file(&output_dir.join("index.html"), &html)
}

/// One page per work, written in parallel. All reads (indexes, relations) are
/// resolved against structures completed in phase 1; each writer's path is
/// keyed by the work's unique id.
fn emit_work_pages(
    site_name: &str,
    works: &[Work],
    indexes: &CatalogIndexes,
    renderer: &dyn Render,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<(), EmitError> {
    works.par_iter().try_for_each(|work| {
        let data = PageData {
            site_name,
            paths: NavPaths::at(Depth::Two),
            body: PageBody::Work(WorkData {
                work,
                related: related(work, works, indexes, config.related.limit),
            }),
        };
        let html = render_with_fallback(renderer, TPL_WORK, None, &data)?;
        write_file(
            &output_dir.join("works").join(&work.id).join("index.html"),
            &html,
        )
    })
}

enum KeySection {
    Actresses,
    Genres,
}

impl KeySection {
    fn dir(&self) -> &'static str {
        match self {
            KeySection::Actresses => "actresses",
            KeySection::Genres => "genres",
        }
    }

    fn index_title(&self) -> &'static str {
        match self {
            KeySection::Actresses => "Actresses",
            KeySection::Genres => "Genres",
        }
    }

    fn index_description(&self) -> &'static str {
        match self {
            KeySection::Actresses => "Works grouped by actress.",
            KeySection::Genres => "Works grouped by genre.",
        }
    }
}

/// Emit one alphabetical key index plus one listing page per key.
fn emit_key_pages(
    site_name: &str,
    works: &[Work],
    indexes: &CatalogIndexes,
    renderer: &dyn Render,
    config: &SiteConfig,
    output_dir: &Path,
    section: KeySection,
) -> Result<(), EmitError> {
    let keys: Vec<&str> = match section {
        KeySection::Actresses => indexes.performer_keys().collect(),
        KeySection::Genres => indexes.genre_keys().collect(),
    };
    // Empty string in config means "no fallback".
    let fallback = config
        .templates
        .list_fallback
        .as_deref()
        .filter(|name| !name.is_empty());

    let entries = keys
        .iter()
        .map(|key| KeyEntry {
            name: (*key).to_string(),
            href: format!("./{}/", slugify(key)),
        })
        .collect();

    let index_data = PageData {
        site_name,
        paths: NavPaths::at(Depth::One),
        body: PageBody::KeyIndex(KeyIndexData {
            title: section.index_title().to_string(),
            description: section.index_description().to_string(),
            entries,
        }),
    };
    let html = render_with_fallback(renderer, TPL_KEY_INDEX, fallback, &index_data)?;
    write_file(&output_dir.join(section.dir()).join("index.html"), &html)?;

    for key in keys {
        let bucket = match section {
            KeySection::Actresses => indexes.performer_works(key),
            KeySection::Genres => indexes.genre_works(key),
        };
        let data = PageData {
            site_name,
            paths: NavPaths::at(Depth::Two),
            body: PageBody::Listing(ListingData {
                heading: key.to_string(),
                works: bucket.iter().map(|&pos| &works[pos]).collect(),
                notice: None,
                pager: None,
            }),
        };
        let html = render_with_fallback(renderer, TPL_LISTING, None, &data)?;
        write_file(
            &output_dir
                .join(section.dir())
                .join(slugify(key))
                .join("index.html"),
            &html,
        )?;
    }

    Ok(())
}

fn emit_catalog_pages(
    site_name: &str,
    pages: &[crate::paginate::Page<'_>],
    renderer: &dyn Render,
    output_dir: &Path,
) -> Result<(), EmitError> {
    let total = pages.len();
    for page in pages {
        let data = PageData {
            site_name,
            paths: NavPaths::at(Depth::Two),
            body: PageBody::Listing(ListingData {
                heading: format!("All works (page {} of {})", page.number, total),
                works: page.works.iter().collect(),
                notice: None,
                pager: Some(PagerData {
                    number: page.number,
                    total,
                    prev: page.prev,
                    next: page.next,
                }),
            }),
        };
        let html = render_with_fallback(renderer, TPL_LISTING, None, &data)?;
        write_file(
            &output_dir
                .join("pages")
                .join(page.number.to_string())
                .join("index.html"),
            &html,
        )?;
    }
    Ok(())
}

fn emit_search_page(
    site_name: &str,
    renderer: &dyn Render,
    output_dir: &Path,
) -> Result<(), EmitError> {
    let data = PageData {
        site_name,
        paths: NavPaths::at(Depth::One),
        body: PageBody::Search,
    };
    let html = render_with_fallback(renderer, TPL_SEARCH, None, &data)?;
    write_file(&output_dir.join("search").join("index.html"), &html)
}

fn write_file(path: &Path, content: &str) -> Result<(), EmitError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::Templates;
    use crate::test_helpers::work;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample_catalog() -> Catalog {
        Catalog {
            site_name: "Review Catalog".to_string(),
            works: vec![
                work("aaa001", "2026-01-10", &["Aoi Yui", "Rin"], &["drama"]),
                work("bbb002", "2026-02-20", &["Rin"], &["comedy", "drama"]),
                work("ccc003", "", &[], &[]),
            ],
        }
    }

    fn build(catalog: &Catalog, out: &Path) -> EmitSummary {
        emit_site(catalog, &Templates, &SiteConfig::default(), out).unwrap()
    }

    /// Collect every file below `root` as (relative path, bytes).
    fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        let mut files = BTreeMap::new();
        collect_files(root, root, &mut files);
        files
    }

    fn collect_files(root: &Path, dir: &Path, files: &mut BTreeMap<PathBuf, Vec<u8>>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                collect_files(root, &path, files);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_path_buf();
                files.insert(rel, fs::read(&path).unwrap());
            }
        }
    }

    #[test]
    fn emits_the_full_tree() {
        let tmp = TempDir::new().unwrap();
        let summary = build(&sample_catalog(), tmp.path());

        for expected in [
            "index.html",
            "works/aaa001/index.html",
            "works/bbb002/index.html",
            "works/ccc003/index.html",
            "actresses/index.html",
            "actresses/Aoi_Yui/index.html",
            "actresses/Rin/index.html",
            "genres/index.html",
            "genres/drama/index.html",
            "genres/comedy/index.html",
            "pages/1/index.html",
            "search/index.html",
            "assets/works_index.json",
            "assets/style.css",
        ] {
            assert!(tmp.path().join(expected).exists(), "missing {expected}");
        }

        assert_eq!(summary.works, 3);
        assert_eq!(summary.performers, 2);
        assert_eq!(summary.genres, 2);
        assert_eq!(summary.listing_pages, 1);
    }

    #[test]
    fn rerun_is_byte_identical() {
        let catalog = sample_catalog();
        let tmp = TempDir::new().unwrap();

        build(&catalog, tmp.path());
        let first = snapshot(tmp.path());
        build(&catalog, tmp.path());
        let second = snapshot(tmp.path());

        assert_eq!(first, second);
    }

    #[test]
    fn output_independent_of_input_order() {
        let catalog = sample_catalog();
        let mut reversed = catalog.clone();
        reversed.works.reverse();

        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        build(&catalog, a.path());
        build(&reversed, b.path());

        assert_eq!(snapshot(a.path()), snapshot(b.path()));
    }

    #[test]
    fn empty_catalog_still_has_one_listing_page() {
        let catalog = Catalog {
            site_name: "Empty".to_string(),
            works: vec![],
        };
        let tmp = TempDir::new().unwrap();
        let summary = build(&catalog, tmp.path());

        assert!(tmp.path().join("pages/1/index.html").exists());
        assert!(tmp.path().join("index.html").exists());
        assert_eq!(summary.listing_pages, 1);
        assert!(!tmp.path().join("works").exists());
    }

    #[test]
    fn home_page_capped_with_notice() {
        let works = (0..12)
            .map(|n| {
                work(
                    &format!("w{n:02}"),
                    &format!("2026-01-{:02}", n + 1),
                    &[],
                    &[],
                )
            })
            .collect();
        let catalog = Catalog {
            site_name: "Big".to_string(),
            works,
        };
        let mut config = SiteConfig::default();
        config.home.max_works = 5;

        let tmp = TempDir::new().unwrap();
        emit_site(&catalog, &Templates, &config, tmp.path()).unwrap();

        let home = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(home.contains("Showing the 5 newest of 12 works"));
        // Newest on the page, oldest capped away.
        assert!(home.contains("works/w11/"));
        assert!(!home.contains("works/w00/"));
    }

    #[test]
    fn work_page_carries_related_links() {
        let tmp = TempDir::new().unwrap();
        build(&sample_catalog(), tmp.path());

        let page = fs::read_to_string(tmp.path().join("works/aaa001/index.html")).unwrap();
        // bbb002 shares Rin with aaa001.
        assert!(page.contains("Related works"));
        assert!(page.contains("../../works/bbb002/"));

        let loner = fs::read_to_string(tmp.path().join("works/ccc003/index.html")).unwrap();
        assert!(!loner.contains("Related works"));
    }

    #[test]
    fn performer_bucket_lists_only_its_works() {
        let tmp = TempDir::new().unwrap();
        build(&sample_catalog(), tmp.path());

        let page = fs::read_to_string(tmp.path().join("actresses/Aoi_Yui/index.html")).unwrap();
        assert!(page.contains("works/aaa001/"));
        assert!(!page.contains("works/bbb002/"));
    }

    #[test]
    fn search_payload_lacks_descriptions() {
        let mut catalog = sample_catalog();
        catalog.works[0].description = "secret plot details".to_string();
        let tmp = TempDir::new().unwrap();
        build(&catalog, tmp.path());

        let json = fs::read_to_string(tmp.path().join("assets/works_index.json")).unwrap();
        assert!(!json.contains("secret plot details"));
        let parsed: Vec<search::SearchRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 3);
        // Newest first.
        assert_eq!(parsed[0].id, "bbb002");
    }

    #[test]
    fn paginated_catalog_splits_and_links() {
        let works = (0..7)
            .map(|n| {
                work(
                    &format!("w{n}"),
                    &format!("2026-01-{:02}", n + 1),
                    &[],
                    &[],
                )
            })
            .collect();
        let catalog = Catalog {
            site_name: "Paged".to_string(),
            works,
        };
        let mut config = SiteConfig::default();
        config.listing.page_size = 3;

        let tmp = TempDir::new().unwrap();
        let summary = emit_site(&catalog, &Templates, &config, tmp.path()).unwrap();
        assert_eq!(summary.listing_pages, 3);

        let page2 = fs::read_to_string(tmp.path().join("pages/2/index.html")).unwrap();
        assert!(page2.contains("Page 2 of 3"));
        assert!(page2.contains("../../pages/1/"));
        assert!(page2.contains("../../pages/3/"));
        assert!(!tmp.path().join("pages/4").exists());
    }

    // ------------------------------------------------------------------
    // Template fallback behavior
    // ------------------------------------------------------------------

    /// A renderer whose key-index template is missing, as if the template set
    /// shipped without `list`.
    struct NoListTemplates;

    impl Render for NoListTemplates {
        fn render(&self, template: &str, data: &PageData) -> Result<String, RenderError> {
            if template == TPL_KEY_INDEX {
                return Err(RenderError::UnknownTemplate(template.to_string()));
            }
            Templates.render(template, data)
        }
    }

    #[test]
    fn missing_list_template_falls_back_to_listing() {
        let tmp = TempDir::new().unwrap();
        let result = emit_site(
            &sample_catalog(),
            &NoListTemplates,
            &SiteConfig::default(),
            tmp.path(),
        );
        assert!(result.is_ok());
        assert!(tmp.path().join("actresses/index.html").exists());
    }

    #[test]
    fn missing_list_template_without_fallback_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        // Empty string is the config spelling for "no fallback".
        config.templates.list_fallback = Some(String::new());

        let result = emit_site(&sample_catalog(), &NoListTemplates, &config, tmp.path());
        assert!(matches!(
            result,
            Err(EmitError::Render(RenderError::UnknownTemplate(name))) if name == "list"
        ));
    }
}
