//! Default HTML templates, implemented with Maud.
//!
//! This is the stock [`Render`] implementation behind the template boundary.
//! Maud gives compile-time checked, auto-escaped HTML with no runtime template
//! directory. Malformed markup is a build error and interpolated catalog
//! data cannot inject tags.
//!
//! Templates are tolerant of the body payload the way a lookup-based engine
//! is tolerant of missing variables: a template handed a body it does not
//! understand renders its chrome with an empty main section. That is what
//! makes the key-index → listing fallback workable rather than a crash.

use crate::catalog::Work;
use crate::render::{
    KeyIndexData, ListingData, PageBody, PageData, Render, RenderError, WorkData, TPL_KEY_INDEX,
    TPL_LISTING, TPL_SEARCH, TPL_WORK,
};
use crate::slug::slugify;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const SEARCH_JS: &str = include_str!("../static/search.js");

/// The stock template set.
pub struct Templates;

impl Render for Templates {
    fn render(&self, template: &str, data: &PageData) -> Result<String, RenderError> {
        let markup = match template {
            TPL_LISTING => listing_page(data),
            TPL_WORK => work_page(data),
            TPL_KEY_INDEX => key_index_page(data),
            TPL_SEARCH => search_page(data),
            other => return Err(RenderError::UnknownTemplate(other.to_string())),
        };
        Ok(markup.into_string())
    }
}

// ============================================================================
// Document chrome
// ============================================================================

fn base_document(title: &str, data: &PageData, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href=(data.paths.css);
            }
            body {
                (site_header(data))
                (content)
            }
        }
    }
}

fn site_header(data: &PageData) -> Markup {
    let paths = &data.paths;
    html! {
        header.site-header {
            a.site-name href=(paths.home) { (data.site_name) }
            nav.site-nav {
                ul {
                    li { a href=(paths.home) { "Home" } }
                    li { a href={ (paths.pages) "1/" } { "All works" } }
                    li { a href=(paths.actresses) { "Actresses" } }
                    li { a href=(paths.genres) { "Genres" } }
                    li { a href=(paths.search) { "Search" } }
                }
            }
        }
    }
}

/// One work in a listing grid.
fn work_card(work: &Work, works_prefix: &str) -> Markup {
    html! {
        a.work-card href={ (works_prefix) (work.id) "/" } {
            @if let Some(hero) = &work.hero_image {
                img src=(hero) alt=(work.title) loading="lazy";
            }
            span.work-title { (work.title) }
            @if !work.release_date.is_empty() {
                span.work-date { (work.release_date) }
            }
        }
    }
}

fn work_grid(works: &[&Work], works_prefix: &str) -> Markup {
    html! {
        div.work-grid {
            @for work in works {
                (work_card(work, works_prefix))
            }
        }
    }
}

// ============================================================================
// Page templates
// ============================================================================

/// `index`: a grid of works (home page, performer/genre buckets, catalog pages).
fn listing_page(data: &PageData) -> Markup {
    let body: Option<&ListingData> = match &data.body {
        PageBody::Listing(listing) => Some(listing),
        _ => None,
    };

    let title = body.map_or(data.site_name, |l| l.heading.as_str());

    let content = html! {
        main.listing-page {
            @if let Some(listing) = body {
                h1 { (listing.heading) }
                @if let Some(notice) = &listing.notice {
                    p.listing-notice { (notice) }
                }
                (work_grid(&listing.works, &data.paths.works))
                @if let Some(pager) = &listing.pager {
                    nav.pager {
                        @if let Some(prev) = pager.prev {
                            a.pager-prev href={ (data.paths.pages) (prev) "/" } { "← Newer" }
                        }
                        span.pager-status { "Page " (pager.number) " of " (pager.total) }
                        @if let Some(next) = pager.next {
                            a.pager-next href={ (data.paths.pages) (next) "/" } { "Older →" }
                        }
                    }
                }
            }
        }
    };

    base_document(title, data, content)
}

/// `page`: one work's detail page.
fn work_page(data: &PageData) -> Markup {
    let body = match &data.body {
        PageBody::Work(work_data) => Some(work_data),
        _ => None,
    };

    let title = body.map_or(data.site_name, |w| w.work.title.as_str());

    let content = html! {
        main.work-page {
            @if let Some(WorkData { work, related }) = body {
                article.work-detail {
                    h1 { (work.title) }
                    @if let Some(hero) = &work.hero_image {
                        img.work-hero src=(hero) alt=(work.title);
                    }
                    dl.work-meta {
                        @if !work.release_date.is_empty() {
                            dt { "Released" }
                            dd { (work.release_date) }
                        }
                        @if !work.actresses.is_empty() {
                            dt { "Actresses" }
                            dd {
                                ul.name-list {
                                    @for name in &work.actresses {
                                        li {
                                            a href={ (data.paths.actresses) (slugify(name)) "/" } { (name) }
                                        }
                                    }
                                }
                            }
                        }
                        @if !work.tags.is_empty() {
                            dt { "Genres" }
                            dd {
                                ul.name-list {
                                    @for tag in &work.tags {
                                        li {
                                            a href={ (data.paths.genres) (slugify(tag)) "/" } { (tag) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    @if !work.description.is_empty() {
                        p.work-description { (work.description) }
                    }
                    @if !work.official_url.is_empty() {
                        p.work-official {
                            a href=(work.official_url) rel="noopener" { "Official page" }
                        }
                    }
                }
                @if !related.is_empty() {
                    section.related-works {
                        h2 { "Related works" }
                        (work_grid(related, &data.paths.works))
                    }
                }
            }
        }
    };

    base_document(title, data, content)
}

/// `list`: alphabetical index of performer or genre keys.
fn key_index_page(data: &PageData) -> Markup {
    let body = match &data.body {
        PageBody::KeyIndex(index) => Some(index),
        _ => None,
    };

    let title = body.map_or(data.site_name, |k| k.title.as_str());

    let content = html! {
        main.key-index-page {
            @if let Some(KeyIndexData { title, description, entries }) = body {
                h1 { (title) }
                p.key-index-description { (description) }
                ul.key-index {
                    @for entry in entries {
                        li { a href=(entry.href) { (entry.name) } }
                    }
                }
            }
        }
    };

    base_document(title, data, content)
}

/// `search`: the search landing page; filtering happens client-side against
/// the exported JSON payload.
fn search_page(data: &PageData) -> Markup {
    let content = html! {
        main.search-page {
            h1 { "Search" }
            div id="search-app" data-index=(data.paths.search_index) data-works=(data.paths.works) {
                input id="search-box" type="search" placeholder="Title, actress, or genre";
                p id="search-count" {}
                div id="search-results" class="work-grid" {}
            }
            script { (PreEscaped(SEARCH_JS)) }
        }
    };

    base_document("Search", data, content)
}
