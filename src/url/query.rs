//! Query-component extraction from raw hrefs
//!
//! Hrefs scraped from wiki markup carry their query glued onto the final
//! path segment, sometimes with the `?` percent-encoded as `%3F`. These
//! helpers split that apart without requiring the href to be a parseable
//! URL on its own.

/// Extracts the query component of a raw href.
///
/// The query is the text after the first `?` (or its percent-encoded form
/// `%3F`) within the final path segment. An href without either marker has
/// no query.
///
/// # Examples
///
/// ```
/// use navcrawl::url::query::query_of;
///
/// assert_eq!(query_of("/page?id=5"), Some("id=5"));
/// assert_eq!(query_of("/page%3Fid=5"), Some("id=5"));
/// assert_eq!(query_of("/a?x=1/page"), None);
/// assert_eq!(query_of("/page"), None);
/// ```
pub fn query_of(href: &str) -> Option<&str> {
    let segment = final_segment(href);
    if segment.contains('?') {
        segment.split('?').nth(1)
    } else if segment.contains("%3F") {
        segment.split("%3F").nth(1)
    } else {
        None
    }
}

/// Splits a query string into `(name, value)` pairs.
///
/// Parameters are separated by `&`; each splits on its first `=` into a
/// name and an optional value.
pub fn query_items(query: &str) -> Vec<(&str, Option<&str>)> {
    query
        .split('&')
        .map(|item| {
            let mut parts = item.split('=');
            (parts.next().unwrap_or_default(), parts.next())
        })
        .collect()
}

/// Removes the query suffix from the final path segment of an href,
/// leaving the bare path.
pub fn strip_query(href: &str) -> String {
    match href.rfind('/') {
        Some(idx) => {
            let (head, segment) = href.split_at(idx + 1);
            format!("{}{}", head, bare_segment(segment))
        }
        None => bare_segment(href).to_string(),
    }
}

fn final_segment(href: &str) -> &str {
    href.rsplit('/').next().unwrap_or(href)
}

fn bare_segment(segment: &str) -> &str {
    if let Some(idx) = segment.find("%3F") {
        &segment[..idx]
    } else if let Some(idx) = segment.find('?') {
        &segment[..idx]
    } else {
        segment
    }
}
