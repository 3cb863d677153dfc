//! Robots.txt rule derivation
//!
//! The raw text is scanned line by line into `User-agent:` records, each
//! collecting the `Disallow:` entries that follow it. Records are then
//! applied in file order: every record whose agent equals our own name or
//! `*` overwrites the running state, so the last matching record in the
//! file wins. That precedence is deliberate and covered by tests.

use crate::robots::{DisallowSpec, RuleState};
use regex::Regex;
use std::sync::OnceLock;

/// Matches disallow entries of the query-pattern form, e.g. `/*?s=*` or
/// `/*&action=edit`.
fn query_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/\*(&|\?)?\w*=[\w\d*]*").expect("pattern is valid"))
}

/// One `User-agent:` record with its collected `Disallow:` entries
#[derive(Debug)]
struct Record {
    agent: String,
    entries: Vec<String>,
}

/// Derives the crawler's rule state from robots.txt lines.
///
/// `lines` is the non-empty lines of the robots.txt body; `own_agent` is the
/// bare crawler name ([`crate::config::AGENT_NAME`]), not the full
/// `User-Agent` header value. Returns [`RuleState::NotFound`] when no record
/// matches either `own_agent` or `*`.
pub fn parse_rules(lines: &[&str], own_agent: &str) -> RuleState {
    let mut state = RuleState::NotFound;

    for record in group_records(lines) {
        if record.agent == own_agent || record.agent == "*" {
            state = rule_for_record(&record.entries);
        }
    }

    state
}

/// Groups lines into records, in file order.
///
/// Lines containing `#` are dropped. A case-insensitive `User-agent:`
/// prefix opens a record; case-insensitive `Disallow:` lines accumulate
/// into the open record. Anything else is ignored.
fn group_records(lines: &[&str]) -> Vec<Record> {
    let mut records = Vec::new();
    let mut current: Option<Record> = None;

    for line in lines {
        if line.contains('#') {
            continue;
        }

        if let Some(agent) = directive_value(line, "user-agent:") {
            if let Some(record) = current.take() {
                records.push(record);
            }
            current = Some(Record {
                agent,
                entries: Vec::new(),
            });
        } else if let Some(entry) = directive_value(line, "disallow:") {
            if let Some(record) = current.as_mut() {
                // disallow paths never legitimately contain spaces
                record.entries.push(entry.replace(' ', ""));
            }
        }
    }

    if let Some(record) = current {
        records.push(record);
    }

    records
}

/// Returns the text after `directive` if `line` starts with it
/// (case-insensitive), trimmed of surrounding spaces.
fn directive_value(line: &str, directive: &str) -> Option<String> {
    let trimmed = line.trim_start();
    match trimmed.get(..directive.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(directive) => {
            Some(trimmed[directive.len()..].trim().to_string())
        }
        _ => None,
    }
}

/// Converts one record's disallow entries into a rule.
///
/// First entry `/` means the whole site is off limits; an empty first entry
/// means everything is allowed; otherwise every entry becomes a
/// [`DisallowSpec`]. A record with no entries yields an empty
/// `DisallowedSome`, which forbids nothing.
fn rule_for_record(entries: &[String]) -> RuleState {
    match entries.first() {
        Some(first) if first == "/" => RuleState::DisallowedAll,
        Some(first) if first.is_empty() => RuleState::AllowedAll,
        _ => RuleState::DisallowedSome(entries.iter().map(|e| spec_for_entry(e)).collect()),
    }
}

/// Classifies one disallow entry as a path or query-pattern spec.
fn spec_for_entry(entry: &str) -> DisallowSpec {
    if !query_pattern().is_match(entry) {
        return DisallowSpec::Path(entry.to_string());
    }

    let stripped = entry.trim_start_matches('/');
    let mut parts = stripped.split('=');
    let raw_key = parts.next().unwrap_or_default();
    let value = parts.next().unwrap_or_default();
    let key = raw_key.strip_prefix('*').unwrap_or(raw_key);

    if value == "*" {
        DisallowSpec::AnyQuery(key.to_string())
    } else {
        DisallowSpec::ValuedQuery(key.to_string(), value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_disallow_means_allowed_all() {
        let lines = ["User-agent: *", "Disallow: "];
        assert_eq!(parse_rules(&lines, "navcrawl"), RuleState::AllowedAll);
    }

    #[test]
    fn root_disallow_means_disallowed_all() {
        let lines = ["User-agent: *", "Disallow: /"];
        assert_eq!(parse_rules(&lines, "navcrawl"), RuleState::DisallowedAll);
    }

    #[test]
    fn later_specific_record_overrides_wildcard() {
        let lines = [
            "User-agent: *",
            "Disallow: /private",
            "User-agent: navcrawl",
            "Disallow: /",
        ];
        assert_eq!(parse_rules(&lines, "navcrawl"), RuleState::DisallowedAll);
    }

    #[test]
    fn later_wildcard_record_overrides_specific() {
        // Last matching record wins even when it is the wildcard one.
        let lines = [
            "User-agent: navcrawl",
            "Disallow: /",
            "User-agent: *",
            "Disallow: ",
        ];
        assert_eq!(parse_rules(&lines, "navcrawl"), RuleState::AllowedAll);
    }

    #[test]
    fn unrelated_agent_record_is_ignored() {
        let lines = ["User-agent: OtherBot", "Disallow: /"];
        assert_eq!(parse_rules(&lines, "navcrawl"), RuleState::NotFound);
    }

    #[test]
    fn no_records_means_not_found() {
        let lines = ["Sitemap: http://example.com/sitemap.xml"];
        assert_eq!(parse_rules(&lines, "navcrawl"), RuleState::NotFound);
    }

    #[test]
    fn comment_lines_are_dropped() {
        let lines = [
            "# robots for example.com",
            "User-agent: *",
            "Disallow: /private # keep out",
        ];
        // The commented disallow line is dropped entirely, leaving a record
        // with no entries.
        assert_eq!(
            parse_rules(&lines, "navcrawl"),
            RuleState::DisallowedSome(vec![])
        );
    }

    #[test]
    fn directive_match_is_case_insensitive() {
        let lines = ["USER-AGENT: *", "disallow: /secret"];
        assert_eq!(
            parse_rules(&lines, "navcrawl"),
            RuleState::DisallowedSome(vec![DisallowSpec::Path("/secret".to_string())])
        );
    }

    #[test]
    fn path_entries_become_path_specs() {
        let lines = ["User-agent: *", "Disallow: /private", "Disallow: /tmp*"];
        assert_eq!(
            parse_rules(&lines, "navcrawl"),
            RuleState::DisallowedSome(vec![
                DisallowSpec::Path("/private".to_string()),
                DisallowSpec::Path("/tmp*".to_string()),
            ])
        );
    }

    #[test]
    fn any_value_query_entry_becomes_any_query() {
        let lines = ["User-agent: *", "Disallow: /*?s=*"];
        assert_eq!(
            parse_rules(&lines, "navcrawl"),
            RuleState::DisallowedSome(vec![DisallowSpec::AnyQuery("?s".to_string())])
        );
    }

    #[test]
    fn exact_value_query_entry_becomes_valued_query() {
        let lines = ["User-agent: *", "Disallow: /*&action=edit"];
        assert_eq!(
            parse_rules(&lines, "navcrawl"),
            RuleState::DisallowedSome(vec![DisallowSpec::ValuedQuery(
                "&action".to_string(),
                "edit".to_string()
            )])
        );
    }

    #[test]
    fn disallow_spaces_are_removed() {
        let lines = ["User-agent: *", "Disallow: /pri vate"];
        assert_eq!(
            parse_rules(&lines, "navcrawl"),
            RuleState::DisallowedSome(vec![DisallowSpec::Path("/private".to_string())])
        );
    }

    #[test]
    fn final_record_is_not_lost() {
        // The trailing record has no User-agent line after it; it must
        // still be applied.
        let lines = ["User-agent: navcrawl", "Disallow: /admin"];
        assert_eq!(
            parse_rules(&lines, "navcrawl"),
            RuleState::DisallowedSome(vec![DisallowSpec::Path("/admin".to_string())])
        );
    }
}
