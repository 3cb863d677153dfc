//! Page parsing and navbox link extraction
//!
//! Pages on MediaWiki sites cross-reference each other through a navigation
//! box: a `<table class="navbox">`. Only links found inside that table are
//! worth following; the rest of the page is chrome and article prose.
//!
//! The HTML engine sits behind the [`PageParser`] trait so the crawler core
//! never touches `scraper` types directly and the engine is swappable.

use scraper::{Html, Selector};
use std::collections::HashSet;

/// What the crawler needs from a fetched page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from `<title>`), if any
    pub title: Option<String>,

    /// Raw href strings found inside the navigation box. Empty when the
    /// page has no navbox.
    pub navbox_links: HashSet<String>,
}

/// The narrow capability the crawler requires of an HTML engine.
pub trait PageParser: Send + Sync {
    /// Parses a page body into the title and navbox link set.
    ///
    /// A document missing its `head` or `body` element is a parse error;
    /// the engine treats that as a recoverable per-page failure.
    fn parse(&self, html: &str) -> Result<ParsedPage, String>;
}

/// Default [`PageParser`] backed by the `scraper` crate.
pub struct NavboxExtractor;

impl PageParser for NavboxExtractor {
    fn parse(&self, html: &str) -> Result<ParsedPage, String> {
        let document = Html::parse_document(html);

        ensure_present(&document, "head")?;
        ensure_present(&document, "body")?;

        Ok(ParsedPage {
            title: extract_title(&document),
            navbox_links: navbox_links(&document),
        })
    }
}

fn ensure_present(document: &Html, element: &str) -> Result<(), String> {
    let selector = Selector::parse(element).map_err(|e| e.to_string())?;
    if document.select(&selector).next().is_none() {
        return Err(format!("Missing HTML {element} element"));
    }
    Ok(())
}

/// Extracts the page title from the document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects raw hrefs from `<a>` and `<link>` elements inside the first
/// table whose class is exactly `navbox`, skipping subgroup containers
/// (class `nowraplinks navbox-subgroup`).
fn navbox_links(document: &Html) -> HashSet<String> {
    let mut links = HashSet::new();

    let Ok(table_selector) = Selector::parse("table") else {
        return links;
    };
    let Ok(link_selector) = Selector::parse("a[href], link[href]") else {
        return links;
    };

    let Some(navbox) = document
        .select(&table_selector)
        .find(|table| table.value().attr("class") == Some("navbox"))
    else {
        return links;
    };

    for element in navbox.select(&link_selector) {
        if element.value().attr("class") == Some("nowraplinks navbox-subgroup") {
            continue;
        }
        if let Some(href) = element.value().attr("href") {
            links.insert(href.to_string());
        }
    }

    links
}
