//! Watchlist page parsing.
//!
//! Letterboxd has served two poster markups over time. Both are read on every
//! page and merged, so either (or a mix during a rollout) parses the same way.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use watchlist_core::Reference;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// `<li class="poster-container"><div class="film-poster" data-film-slug=..>`
static LEGACY_POSTER: LazyLock<Selector> =
    LazyLock::new(|| selector("li.poster-container div.film-poster"));

/// `<div class="react-component" data-item-slug=.. data-target-link=..>`
static COMPONENT: LazyLock<Selector> = LazyLock::new(|| selector("div.react-component"));

static IMG: LazyLock<Selector> = LazyLock::new(|| selector("img"));

static NEXT_LINK: LazyLock<Selector> = LazyLock::new(|| selector("a.next"));

/// The films found on one watchlist page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistPage {
    /// References in page order, unique by slug.
    pub references: Vec<Reference>,
    /// Whether the page links to a following page.
    pub has_next: bool,
}

/// Parse one page of watchlist HTML with both markup strategies.
pub fn parse_watchlist_page(html: &str) -> WatchlistPage {
    let document = Html::parse_document(html);

    let mut seen = HashSet::new();
    let references = legacy_in(&document)
        .into_iter()
        .chain(component_in(&document))
        .filter(|r| seen.insert(r.slug.clone()))
        .collect();

    let has_next = document.select(&NEXT_LINK).next().is_some();

    WatchlistPage {
        references,
        has_next,
    }
}

/// Extract references using the legacy poster-container markup only.
pub fn legacy_references(html: &str) -> Vec<Reference> {
    legacy_in(&Html::parse_document(html))
}

/// Extract references using the react-component markup only.
pub fn component_references(html: &str) -> Vec<Reference> {
    component_in(&Html::parse_document(html))
}

fn legacy_in(document: &Html) -> Vec<Reference> {
    document
        .select(&LEGACY_POSTER)
        .filter_map(|poster| {
            let slug = non_blank(poster.value().attr("data-film-slug"))?;
            let title = img_alt(&poster).unwrap_or(slug);
            Some(Reference::new(slug, title))
        })
        .collect()
}

fn component_in(document: &Html) -> Vec<Reference> {
    document
        .select(&COMPONENT)
        .filter_map(|node| {
            let attrs = node.value();
            let slug = non_blank(attrs.attr("data-item-slug"))
                .or_else(|| attrs.attr("data-target-link").and_then(slug_from_link))?;
            let title = img_alt(&node)
                .or_else(|| non_blank(attrs.attr("data-item-name")))
                .unwrap_or(slug);
            Some(Reference::new(slug, title))
        })
        .collect()
}

/// Pull `<slug>` out of a `/film/<slug>/` link.
fn slug_from_link(link: &str) -> Option<&str> {
    let mut segments = link.split('/').filter(|s| !s.is_empty());
    segments.find(|s| *s == "film")?;
    non_blank(segments.next())
}

fn img_alt<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    element
        .select(&IMG)
        .next()
        .and_then(|img| non_blank(img.value().attr("alt")))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "tests/parse_tests.rs"]
mod tests;
