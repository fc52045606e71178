//! The template boundary.
//!
//! HTML rendering is a capability injected into the emitter: a [`Render`]
//! implementation maps a template name plus a [`PageData`] record to text.
//! The core pipeline (indexing, relations, pagination, projection) never
//! touches markup, so all of it is unit-testable without a template engine —
//! and the engine is swappable without touching the pipeline.
//!
//! [`templates::Templates`](crate::templates::Templates) is the default
//! implementation.
//!
//! ## Template names
//!
//! | Name     | Renders                               |
//! |----------|---------------------------------------|
//! | `index`  | a work listing (home, buckets, pages) |
//! | `page`   | one work's detail page                |
//! | `list`   | an alphabetical key index             |
//! | `search` | the search landing page               |
//!
//! An unknown name is a resolution failure. The emitter may configure a
//! fallback for the key-index template (stock config falls back to `index`,
//! which renders the page chrome with an empty grid); see
//! [`render_with_fallback`].

use crate::catalog::Work;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}

/// Template name for work listings (home page, buckets, catalog pages).
pub const TPL_LISTING: &str = "index";
/// Template name for a single work's detail page.
pub const TPL_WORK: &str = "page";
/// Template name for the alphabetical performer/genre indexes.
pub const TPL_KEY_INDEX: &str = "list";
/// Template name for the search landing page.
pub const TPL_SEARCH: &str = "search";

/// Rendering capability. `Sync` because the emitter fans page rendering out
/// across threads.
pub trait Render: Sync {
    fn render(&self, template: &str, data: &PageData) -> Result<String, RenderError>;
}

/// Render `template`, substituting `fallback` if the primary name does not
/// resolve.
///
/// A fallback that is itself unresolvable propagates the *primary* failure —
/// the caller asked for `template`, and that is the name worth reporting.
pub fn render_with_fallback(
    renderer: &dyn Render,
    template: &str,
    fallback: Option<&str>,
    data: &PageData,
) -> Result<String, RenderError> {
    match renderer.render(template, data) {
        Ok(html) => Ok(html),
        Err(primary) => {
            if let Some(name) = fallback
                && let Ok(html) = renderer.render(name, data)
            {
                return Ok(html);
            }
            Err(primary)
        }
    }
}

// ============================================================================
// Output nesting depth and relative paths
// ============================================================================

/// Nesting depth of an output page below the site root.
///
/// Every emitted path is at one of three depths: `index.html` (root),
/// `actresses/index.html` (one), `works/<id>/index.html` (two). The relative
/// prefix reaching back to the root is a pure function of this depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    Root,
    One,
    Two,
}

impl Depth {
    /// Relative prefix from a page at this depth back to the output root.
    pub fn prefix(self) -> &'static str {
        match self {
            Depth::Root => "",
            Depth::One => "../",
            Depth::Two => "../../",
        }
    }
}

/// Relative links injected into every rendered page, computed from the page's
/// output depth. Never hand-built at a call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavPaths {
    /// Shared stylesheet.
    pub css: String,
    /// Site home.
    pub home: String,
    /// Prefix for `works/<id>/` links.
    pub works: String,
    /// Performer index root.
    pub actresses: String,
    /// Genre index root.
    pub genres: String,
    /// Paginated catalog root.
    pub pages: String,
    /// Search landing page.
    pub search: String,
    /// Search payload, fetched by the search page script.
    pub search_index: String,
}

impl NavPaths {
    pub fn at(depth: Depth) -> Self {
        let p = depth.prefix();
        Self {
            css: format!("{p}assets/style.css"),
            home: if depth == Depth::Root {
                "./".to_string()
            } else {
                p.to_string()
            },
            works: format!("{p}works/"),
            actresses: format!("{p}actresses/"),
            genres: format!("{p}genres/"),
            pages: format!("{p}pages/"),
            search: format!("{p}search/"),
            search_index: format!("{p}assets/works_index.json"),
        }
    }
}

// ============================================================================
// Page data model
// ============================================================================

/// Everything a template needs to render one page.
#[derive(Debug)]
pub struct PageData<'a> {
    pub site_name: &'a str,
    pub paths: NavPaths,
    pub body: PageBody<'a>,
}

/// The page-specific payload.
#[derive(Debug)]
pub enum PageBody<'a> {
    /// A grid of works: home page, performer/genre buckets, catalog pages.
    Listing(ListingData<'a>),
    /// One work's detail page.
    Work(WorkData<'a>),
    /// Alphabetical index of performer or genre keys.
    KeyIndex(KeyIndexData),
    /// The search landing page; its data is the fetched JSON payload.
    Search,
}

#[derive(Debug)]
pub struct ListingData<'a> {
    /// Page heading; the home page uses the site name.
    pub heading: String,
    pub works: Vec<&'a Work>,
    /// Shown when the listing was truncated (home-page cap).
    pub notice: Option<String>,
    /// Present on paginated catalog pages only.
    pub pager: Option<PagerData>,
}

/// Neighbor navigation for one catalog page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerData {
    pub number: usize,
    pub total: usize,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

#[derive(Debug)]
pub struct WorkData<'a> {
    pub work: &'a Work,
    /// Resolved related works, newest first.
    pub related: Vec<&'a Work>,
}

#[derive(Debug)]
pub struct KeyIndexData {
    pub title: String,
    pub description: String,
    /// One entry per key, in sorted key order.
    pub entries: Vec<KeyEntry>,
}

/// A key-index entry: display name plus its slugified relative href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    pub name: String,
    pub href: String,
}
