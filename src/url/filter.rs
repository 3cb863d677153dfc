//! Candidate link filtering
//!
//! A href survives when no robots disallow spec forbids it, it contains no
//! denylisted substring, and it can be rebuilt onto the seed's components.
//! Because accepted URLs are always constructed from the base URL's
//! components, every URL this module produces carries the seed host.

use crate::robots::{DisallowSpec, RuleState};
use crate::url::query::{query_items, query_of, strip_query};
use url::Url;

/// Substrings that flag a link as wiki chrome not worth visiting,
/// independent of robots.txt (MediaWiki conventions).
pub const LINK_DENYLIST: [&str; 3] = ["redlink", "index.php", "Template:"];

/// Decides whether a candidate href may be enqueued, and builds the URL.
///
/// Rejections: empty href; `DisallowedAll`; rules still `Unknown` or
/// `NotFound` (nothing is accepted before, or without, a usable robots
/// verdict); any disallow spec forbidding the href; a denylisted substring.
///
/// On acceptance the href is forced to start with `/`, its query suffix is
/// split off the path, and both are set on a copy of `base`'s components.
pub fn resolve(base: &Url, href: &str, rules: &RuleState) -> Option<Url> {
    if href.is_empty() || *rules == RuleState::DisallowedAll {
        return None;
    }

    match rules {
        RuleState::DisallowedSome(specs) => {
            if specs.iter().any(|spec| forbids(spec, href)) {
                return None;
            }
        }
        RuleState::AllowedAll => {}
        _ => return None,
    }

    if LINK_DENYLIST.iter().any(|needle| href.contains(needle)) {
        return None;
    }

    let href = if href.starts_with('/') {
        href.to_string()
    } else {
        format!("/{href}")
    };

    let mut url = base.clone();
    url.set_path(&strip_query(&href));
    url.set_query(query_of(&href));
    Some(url)
}

/// Whether one disallow spec forbids the href.
fn forbids(spec: &DisallowSpec, href: &str) -> bool {
    match spec {
        DisallowSpec::Path(path) => match path.strip_suffix('*') {
            Some(prefix) => href.contains(prefix),
            None => href == path,
        },
        DisallowSpec::AnyQuery(key) => query_contains(href, key, None),
        DisallowSpec::ValuedQuery(key, value) => query_contains(href, key, Some(value)),
    }
}

/// Whether the href's query carries `key` (with `value`, when given).
///
/// A href with no query component never matches. Spec keys may carry one
/// leading `?` or `&` left over from the robots pattern; it is stripped
/// here.
fn query_contains(href: &str, key: &str, value: Option<&str>) -> bool {
    let Some(query) = query_of(href) else {
        return false;
    };

    let key = key
        .strip_prefix('&')
        .or_else(|| key.strip_prefix('?'))
        .unwrap_or(key);

    let items = query_items(query);
    match value {
        None => items.iter().any(|(name, _)| *name == key),
        Some(value) => items
            .iter()
            .any(|(name, item_value)| *name == key && *item_value == Some(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://example.com/wiki/Start").unwrap()
    }

    fn some(specs: Vec<DisallowSpec>) -> RuleState {
        RuleState::DisallowedSome(specs)
    }

    #[test]
    fn empty_href_rejected() {
        assert_eq!(resolve(&base(), "", &RuleState::AllowedAll), None);
    }

    #[test]
    fn disallowed_all_rejects_everything() {
        assert_eq!(resolve(&base(), "/wiki/Page", &RuleState::DisallowedAll), None);
    }

    #[test]
    fn unknown_and_not_found_reject() {
        assert_eq!(resolve(&base(), "/wiki/Page", &RuleState::Unknown), None);
        assert_eq!(resolve(&base(), "/wiki/Page", &RuleState::NotFound), None);
    }

    #[test]
    fn allowed_all_builds_on_base_host() {
        let url = resolve(&base(), "/wiki/Page", &RuleState::AllowedAll).unwrap();
        assert_eq!(url.as_str(), "http://example.com/wiki/Page");
    }

    #[test]
    fn relative_href_gets_leading_slash() {
        let url = resolve(&base(), "wiki/Page", &RuleState::AllowedAll).unwrap();
        assert_eq!(url.path(), "/wiki/Page");
    }

    #[test]
    fn query_suffix_moves_into_query_component() {
        let url = resolve(&base(), "/wiki/Page?id=5", &RuleState::AllowedAll).unwrap();
        assert_eq!(url.path(), "/wiki/Page");
        assert_eq!(url.query(), Some("id=5"));
    }

    #[test]
    fn encoded_query_suffix_moves_into_query_component() {
        let url = resolve(&base(), "/wiki/Page%3Fid=5", &RuleState::AllowedAll).unwrap();
        assert_eq!(url.path(), "/wiki/Page");
        assert_eq!(url.query(), Some("id=5"));
    }

    #[test]
    fn denylisted_substrings_rejected() {
        let rules = RuleState::AllowedAll;
        assert_eq!(resolve(&base(), "/index.php?title=X", &rules), None);
        assert_eq!(resolve(&base(), "/wiki/Template:Navbox", &rules), None);
        assert_eq!(resolve(&base(), "/wiki/Page?redlink=1", &rules), None);
    }

    #[test]
    fn wildcard_path_spec_forbids_substring() {
        let rules = some(vec![DisallowSpec::Path("/foo*".to_string())]);
        assert_eq!(resolve(&base(), "/foobar", &rules), None);
        assert_eq!(resolve(&base(), "/a/foo/b", &rules), None);
        assert!(resolve(&base(), "/bar", &rules).is_some());
    }

    #[test]
    fn exact_path_spec_forbids_only_exact_match() {
        let rules = some(vec![DisallowSpec::Path("/foo".to_string())]);
        assert_eq!(resolve(&base(), "/foo", &rules), None);
        assert!(resolve(&base(), "/foobar", &rules).is_some());
    }

    #[test]
    fn any_query_spec_forbids_any_value() {
        let rules = some(vec![DisallowSpec::AnyQuery("id".to_string())]);
        assert_eq!(resolve(&base(), "/page?id=5", &rules), None);
        assert_eq!(resolve(&base(), "/page?id=anything", &rules), None);
        assert!(resolve(&base(), "/page?other=5", &rules).is_some());
        assert!(resolve(&base(), "/page", &rules).is_some());
    }

    #[test]
    fn valued_query_spec_forbids_exact_pair() {
        let rules = some(vec![DisallowSpec::ValuedQuery(
            "id".to_string(),
            "5".to_string(),
        )]);
        assert_eq!(resolve(&base(), "/page?id=5", &rules), None);
        assert!(resolve(&base(), "/page?id=6", &rules).is_some());
    }

    #[test]
    fn query_spec_key_prefix_is_stripped() {
        // Keys derived from patterns like `/*?s=*` keep their `?` until
        // match time.
        let rules = some(vec![DisallowSpec::AnyQuery("?s".to_string())]);
        assert_eq!(resolve(&base(), "/page?s=term", &rules), None);
        assert!(resolve(&base(), "/page?q=term", &rules).is_some());
    }

    #[test]
    fn one_forbidding_spec_rejects_despite_others_passing() {
        let rules = some(vec![
            DisallowSpec::Path("/private".to_string()),
            DisallowSpec::AnyQuery("action".to_string()),
        ]);
        assert_eq!(resolve(&base(), "/wiki/Page?action=edit", &rules), None);
        assert!(resolve(&base(), "/wiki/Page", &rules).is_some());
    }

    #[test]
    fn empty_spec_list_forbids_nothing() {
        let rules = some(vec![]);
        assert!(resolve(&base(), "/wiki/Page", &rules).is_some());
    }

    #[test]
    fn resolve_is_deterministic() {
        let rules = some(vec![DisallowSpec::Path("/foo".to_string())]);
        let first = resolve(&base(), "/wiki/Page?id=1", &rules);
        let second = resolve(&base(), "/wiki/Page?id=1", &rules);
        assert_eq!(first, second);
    }
}
