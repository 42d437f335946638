// bzexclude - core/rules.rs
//
// Reading and writing `excludefname_rule` elements as text.
//
// The rules file is never round-tripped through an XML tree. Elements are
// located with regular expressions and new ones are serialised by hand, so
// everything else in the file (comments, spacing, unknown elements) is left
// exactly as the backup client wrote it.

use crate::core::model::{DisplayEntry, ExclusionRule, Platform, RuleAttribute};
use crate::util::constants::RULE_ELEMENT;
use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::OnceLock;

/// Matches one rule element with its attribute list in group 1.
fn element_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"<excludefname_rule\b((?:\s+[A-Za-z_][\w.:-]*\s*=\s*(?:"[^"]*"|'[^']*'))*)\s*/?>"#,
        )
        .expect("element_regex: invalid regex")
    })
}

/// Matches one `name="value"` (or single-quoted) attribute.
fn attribute_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([A-Za-z_][\w.:-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("attribute_regex: invalid regex")
    })
}

fn entity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"&(#x[0-9A-Fa-f]+|#[0-9]+|amp|lt|gt|quot|apos);")
            .expect("entity_regex: invalid regex")
    })
}

// =============================================================================
// Parsing
// =============================================================================

/// A rule element found on one line of the rules file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLine {
    /// 1-based line number.
    pub number: usize,
    /// Byte range of the whole line, terminator included.
    pub span: Range<usize>,
    pub rule: ExclusionRule,
}

/// Walk `content` line by line and yield the first uncommented rule element
/// on each line.
///
/// This is the only place rules are located: the display list and removal
/// both go through it, so whatever is shown can also be deleted. An element
/// must sit on a single line. Anything after an unclosed `<!--` is comment.
pub fn rule_lines(content: &str) -> impl Iterator<Item = RuleLine> + '_ {
    let mut in_comment = false;
    let mut offset = 0;
    content
        .split_inclusive('\n')
        .enumerate()
        .filter_map(move |(idx, line)| {
            let start = offset;
            offset += line.len();
            let visible = strip_comments(line, &mut in_comment);
            parse_rule_line(&visible).map(|rule| RuleLine {
                number: idx + 1,
                span: start..offset,
                rule,
            })
        })
}

/// Parse every rule element in `content`, in document order.
///
/// Commented-out rules are skipped. Attributes not part of the rule schema
/// are ignored and missing ones stay at the wildcard.
pub fn parse_rules(content: &str) -> Vec<ExclusionRule> {
    rule_lines(content).map(|found| found.rule).collect()
}

/// Parse the first rule element on a single line, if there is one.
pub fn parse_rule_line(line: &str) -> Option<ExclusionRule> {
    if !line.contains(RULE_ELEMENT) {
        return None;
    }
    element_regex()
        .captures(line)
        .map(|caps| rule_from_attributes(caps.get(1).map_or("", |m| m.as_str())))
}

/// The parts of `line` outside XML comments. `in_comment` carries an open
/// `<!--` over to the next line.
fn strip_comments(line: &str, in_comment: &mut bool) -> String {
    let mut visible = String::new();
    let mut rest = line;
    loop {
        if *in_comment {
            match rest.find("-->") {
                Some(end) => {
                    rest = &rest[end + 3..];
                    *in_comment = false;
                }
                None => return visible,
            }
        } else {
            match rest.find("<!--") {
                Some(start) => {
                    visible.push_str(&rest[..start]);
                    rest = &rest[start + 4..];
                    *in_comment = true;
                }
                None => {
                    visible.push_str(rest);
                    return visible;
                }
            }
        }
    }
}

fn rule_from_attributes(attrs: &str) -> ExclusionRule {
    let mut rule = ExclusionRule::default();
    for caps in attribute_regex().captures_iter(attrs) {
        let Some(attr) = RuleAttribute::from_name(&caps[1]) else {
            tracing::trace!(name = &caps[1], "Ignoring unknown rule attribute");
            continue;
        };
        let raw = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map_or("", |m| m.as_str());
        rule.set(attr, unescape(raw));
    }
    rule
}

/// Rules for `platform` that have something to show, numbered from 1.
pub fn display_entries(rules: &[ExclusionRule], platform: Platform) -> Vec<DisplayEntry> {
    rules
        .iter()
        .filter(|r| r.applies_to(platform))
        .filter_map(ExclusionRule::display_text)
        .enumerate()
        .map(|(i, text)| DisplayEntry { number: i + 1, text })
        .collect()
}

// =============================================================================
// Serialisation
// =============================================================================

impl ExclusionRule {
    /// Serialise as a self-closing element with all attributes in schema order.
    pub fn to_xml(&self) -> String {
        let mut out = format!("<{RULE_ELEMENT}");
        for attr in RuleAttribute::all() {
            out.push_str(&format!(" {}=\"{}\"", attr.name(), escape(self.get(*attr))));
        }
        out.push_str(" />");
        out
    }
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Resolve the predefined XML entities and numeric character references.
/// Anything unrecognised is kept verbatim.
pub fn unescape(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    entity_regex()
        .replace_all(value, |caps: &Captures<'_>| {
            let body = &caps[1];
            let resolved = match body {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ if body.starts_with("#x") => {
                    u32::from_str_radix(&body[2..], 16).ok().and_then(char::from_u32)
                }
                _ => body[1..].parse::<u32>().ok().and_then(char::from_u32),
            };
            resolved.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::PathKind;

    const SAMPLE: &str = r#"<bzexclusions>
<excludefname_rule plat="win" osVers="*"  ruleIsOptional="f" skipFirstCharThenStartsWith=":\$Recycle.Bin\" contains_1="*" contains_2="*" doesNotContain="*" endsWith="*" hasFileExtension="*" />
<excludefname_rule plat="mac" osVers="*"  ruleIsOptional="f" skipFirstCharThenStartsWith="*" contains_1="/private/var/" contains_2="*" doesNotContain="*" endsWith="*" hasFileExtension="*" />
<excludefname_rule plat="win" osVers="*"  ruleIsOptional="t" skipFirstCharThenStartsWith="*" contains_1="*" contains_2="*" doesNotContain="*" endsWith="*" hasFileExtension="*" />
<!-- <excludefname_rule plat="win" osVers="*" ruleIsOptional="t" skipFirstCharThenStartsWith="*" contains_1="C:\Old" contains_2="*" doesNotContain="*" endsWith="*" hasFileExtension="*" /> -->
<excludefname_rule plat="win" osVers="*"  ruleIsOptional="t" skipFirstCharThenStartsWith="*" contains_1="C:\Users\me\AppData" contains_2="*" doesNotContain="*" endsWith="*" hasFileExtension="tmp" />
</bzexclusions>
"#;

    #[test]
    fn test_parse_rules_in_document_order() {
        let rules = parse_rules(SAMPLE);
        assert_eq!(rules.len(), 4, "commented rule must be skipped");
        assert_eq!(rules[0].skip_first_char_then_starts_with, ":\\$Recycle.Bin\\");
        assert_eq!(rules[1].plat, "mac");
        assert_eq!(rules[3].has_file_extension, "tmp");
    }

    #[test]
    fn test_display_entries_filters_platform_and_wildcards() {
        let rules = parse_rules(SAMPLE);
        let entries = display_entries(&rules, Platform::Windows);
        let texts: Vec<_> = entries.iter().map(|e| e.label()).collect();
        assert_eq!(
            texts,
            vec![
                "1. Starts With: :\\$Recycle.Bin\\".to_string(),
                "2. Path:  C:\\Users\\me\\AppData  |  File Extension:  tmp".to_string(),
            ]
        );

        let mac = display_entries(&rules, Platform::Mac);
        assert_eq!(mac.len(), 1);
        assert_eq!(mac[0].text, "Path:  /private/var/");
    }

    #[test]
    fn test_missing_attributes_are_wildcards() {
        let rule = parse_rule_line(r#"<excludefname_rule plat="mac" contains_1="/tmp" />"#)
            .expect("rule on line");
        assert_eq!(rule.contains_1, "/tmp");
        assert_eq!(rule.ends_with, "*");
        assert_eq!(rule.display_text().unwrap(), "Path:  /tmp");
    }

    #[test]
    fn test_single_quotes_and_unknown_attributes() {
        let rule = parse_rule_line(
            "  <excludefname_rule plat='win' extra=\"x\" contains_2='node_modules'/>",
        )
        .unwrap();
        assert_eq!(rule.plat, "win");
        assert_eq!(rule.contains_2, "node_modules");
    }

    #[test]
    fn test_rule_lines_numbers_and_spans() {
        let found: Vec<_> = rule_lines(SAMPLE).collect();
        assert_eq!(found.len(), 4);
        assert_eq!(found[0].number, 2);
        assert_eq!(found[3].number, 6, "line 5 is commented out");
        assert!(SAMPLE[found[1].span.clone()].contains("/private/var/"));
        assert!(SAMPLE[found[1].span.clone()].ends_with('\n'));
    }

    #[test]
    fn test_split_element_is_not_listed() {
        let content = "<bzexclusions>\n<excludefname_rule plat=\"mac\"\n    contains_1=\"/a\" />\n</bzexclusions>\n";
        assert!(parse_rules(content).is_empty());
    }

    #[test]
    fn test_unclosed_comment_hides_the_rest() {
        let content = "<!-- note\n<excludefname_rule plat=\"mac\" contains_1=\"/a\" />\n";
        assert!(parse_rules(content).is_empty());
    }

    #[test]
    fn test_comment_spanning_lines() {
        let content = "<!--\n<excludefname_rule plat=\"mac\" contains_1=\"/old\" />\n-->\n\
<excludefname_rule plat=\"mac\" contains_1=\"/new\" />\n";
        let rules = parse_rules(content);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].contains_1, "/new");
    }

    #[test]
    fn test_line_without_rule() {
        assert_eq!(parse_rule_line("<bzexclusions>"), None);
        assert_eq!(parse_rule_line("excludefname_rule mentioned in text"), None);
    }

    #[test]
    fn test_to_xml_attribute_order() {
        let rule = ExclusionRule::for_path("/Users/me/a.log", PathKind::File, Platform::Mac);
        assert_eq!(
            rule.to_xml(),
            r#"<excludefname_rule plat="mac" osVers="*" ruleIsOptional="t" skipFirstCharThenStartsWith="*" contains_1="/Users/me/a.log" contains_2="*" doesNotContain="*" endsWith="a.log" hasFileExtension="log" />"#
        );
    }

    #[test]
    fn test_special_characters_survive_serialisation() {
        let rule = ExclusionRule::for_path(
            "/Users/me/Tom & \"Jerry\" <1>",
            PathKind::Folder,
            Platform::Mac,
        );
        let xml = rule.to_xml();
        assert!(xml.contains("Tom &amp; &quot;Jerry&quot; &lt;1&gt;"));
        let parsed = parse_rule_line(&xml).unwrap();
        assert_eq!(parsed, rule);
    }

    #[test]
    fn test_unescape_numeric_and_unknown() {
        assert_eq!(unescape("a&#65;&#x42;c"), "aABc");
        assert_eq!(unescape("&apos;x&apos;"), "'x'");
        assert_eq!(unescape("&nbsp;"), "&nbsp;");
        assert_eq!(unescape("&#xFFFFFFFF;"), "&#xFFFFFFFF;");
    }
}
