// bzexclude - core/splice.rs
//
// Text-level edits of the rules file: splice a new rule in before the
// closing tag, or delete the line of an existing one.
//
// Both functions are pure (string in, string out); reading and writing the
// file is the platform layer's job.

use crate::core::model::ExclusionRule;
use crate::core::rules::rule_lines;
use crate::util::constants::CLOSING_TAG;
use crate::util::error::RuleError;

/// Insert `rule` on its own line immediately before the last
/// `</bzexclusions>` in `content`.
///
/// The file's line ending style (LF or CRLF) is kept. When the closing tag
/// is indented, the rule goes in at the start of that line so the tag keeps
/// its indentation.
pub fn insert_rule(content: &str, rule: &ExclusionRule) -> Result<String, RuleError> {
    let pos = content
        .rfind(CLOSING_TAG)
        .ok_or(RuleError::ClosingTagNotFound { tag: CLOSING_TAG })?;

    let newline = line_ending(content);
    let element = rule.to_xml();
    let line_start = content[..pos].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &content[line_start..pos];

    let mut out = String::with_capacity(content.len() + element.len() + 2 * newline.len());
    if prefix.trim().is_empty() {
        out.push_str(&content[..line_start]);
        out.push_str(&element);
        out.push_str(newline);
        out.push_str(&content[line_start..]);
    } else {
        // Something else shares the closing tag's line; break it so the new
        // rule still gets a line of its own.
        out.push_str(&content[..pos]);
        out.push_str(newline);
        out.push_str(&element);
        out.push_str(newline);
        out.push_str(&content[pos..]);
    }
    Ok(out)
}

/// Delete the first line whose rule renders to `selected`.
///
/// Every line holding an `excludefname_rule` element is re-rendered with
/// [`ExclusionRule::display_text`] and compared with the selection; the
/// platform is not considered. Returns the new content and the 1-based
/// number of the removed line.
///
/// Rules that render identically cannot be told apart: the earliest one in
/// the file is the one removed.
pub fn remove_rule(content: &str, selected: &str) -> Result<(String, usize), RuleError> {
    let found = rule_lines(content)
        .find(|found| {
            found
                .rule
                .display_text()
                .is_some_and(|text| text == selected)
        })
        .ok_or_else(|| RuleError::SelectionNotFound {
            selected: selected.to_string(),
        })?;

    let mut out = String::with_capacity(content.len() - found.span.len());
    out.push_str(&content[..found.span.start]);
    out.push_str(&content[found.span.end..]);
    Ok((out, found.number))
}

/// `"\r\n"` if the content uses Windows line endings, else `"\n"`.
fn line_ending(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{PathKind, Platform};
    use crate::core::rules::{display_entries, parse_rules};

    const BASE: &str = "<bzexclusions>\n\
<excludefname_rule plat=\"mac\" osVers=\"*\" ruleIsOptional=\"t\" skipFirstCharThenStartsWith=\"*\" contains_1=\"/tmp/a\" contains_2=\"*\" doesNotContain=\"*\" endsWith=\"*\" hasFileExtension=\"*\" />\n\
<excludefname_rule plat=\"mac\" osVers=\"*\" ruleIsOptional=\"t\" skipFirstCharThenStartsWith=\"*\" contains_1=\"/tmp/b\" contains_2=\"*\" doesNotContain=\"*\" endsWith=\"*\" hasFileExtension=\"*\" />\n\
</bzexclusions>\n";

    fn folder(path: &str) -> ExclusionRule {
        ExclusionRule::for_path(path, PathKind::Folder, Platform::Mac)
    }

    #[test]
    fn test_insert_before_closing_tag() {
        let out = insert_rule(BASE, &folder("/tmp/c")).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[3].contains("contains_1=\"/tmp/c\""));
        assert_eq!(lines[4], "</bzexclusions>");

        let entries = display_entries(&parse_rules(&out), Platform::Mac);
        assert_eq!(entries.last().unwrap().text, "Path:  /tmp/c");
    }

    #[test]
    fn test_insert_without_closing_tag_fails() {
        let err = insert_rule("<bzexclusions>\n", &folder("/x")).unwrap_err();
        assert_eq!(
            err,
            RuleError::ClosingTagNotFound {
                tag: "</bzexclusions>"
            }
        );
    }

    #[test]
    fn test_insert_uses_last_closing_tag() {
        let content = "<!-- </bzexclusions> -->\n<bzexclusions>\n</bzexclusions>";
        let out = insert_rule(content, &folder("/x")).unwrap();
        assert!(out.starts_with("<!-- </bzexclusions> -->\n<bzexclusions>\n<excludefname_rule"));
        assert!(out.ends_with("/>\n</bzexclusions>"));
    }

    #[test]
    fn test_insert_keeps_indentation_and_crlf() {
        let content = "<bzexclusions>\r\n  </bzexclusions>\r\n";
        let out = insert_rule(content, &folder("/x")).unwrap();
        assert!(out.contains("/>\r\n  </bzexclusions>\r\n"));
        assert!(out.starts_with("<bzexclusions>\r\n<excludefname_rule"));
    }

    #[test]
    fn test_insert_breaks_shared_line() {
        let content = "<bzexclusions></bzexclusions>";
        let out = insert_rule(content, &folder("/x")).unwrap();
        assert_eq!(out.lines().count(), 3);
        assert!(out.lines().nth(1).unwrap().starts_with("<excludefname_rule"));
    }

    #[test]
    fn test_remove_matching_line() {
        let (out, line) = remove_rule(BASE, "Path:  /tmp/b").unwrap();
        assert_eq!(line, 3);
        assert!(!out.contains("/tmp/b"));
        assert!(out.contains("/tmp/a"));
        assert!(out.ends_with("</bzexclusions>\n"));
    }

    #[test]
    fn test_remove_unknown_selection_fails() {
        let err = remove_rule(BASE, "Path:  /nowhere").unwrap_err();
        assert!(matches!(err, RuleError::SelectionNotFound { .. }));
    }

    #[test]
    fn test_remove_duplicate_takes_first() {
        let doubled = insert_rule(BASE, &folder("/tmp/a")).unwrap();
        let (out, line) = remove_rule(&doubled, "Path:  /tmp/a").unwrap();
        assert_eq!(line, 2);
        assert_eq!(out.matches("/tmp/a").count(), 1);
        assert!(out.find("/tmp/b").unwrap() < out.find("/tmp/a").unwrap());
    }

    #[test]
    fn test_remove_skips_commented_rule() {
        let content = "<bzexclusions>\n\
<!-- <excludefname_rule plat=\"mac\" contains_1=\"/tmp/a\" /> -->\n\
<excludefname_rule plat=\"mac\" contains_1=\"/tmp/a\" />\n\
</bzexclusions>\n";
        let (out, line) = remove_rule(content, "Path:  /tmp/a").unwrap();
        assert_eq!(line, 3);
        assert!(out.contains("<!-- <excludefname_rule"));
    }

    #[test]
    fn test_remove_skips_multiline_comment() {
        let content = "<!--\n<excludefname_rule plat=\"mac\" contains_1=\"/a\" />\n-->\n\
<excludefname_rule plat=\"mac\" contains_1=\"/a\" />\n";
        let (_, line) = remove_rule(content, "Path:  /a").unwrap();
        assert_eq!(line, 4);
    }

    #[test]
    fn test_every_listed_entry_can_be_removed() {
        let shapes = [
            "<bzexclusions>\n<excludefname_rule plat=\"mac\"\n    contains_1=\"/a\" />\n</bzexclusions>\n",
            "<!-- note\n<excludefname_rule plat=\"mac\" contains_1=\"/a\" />\n",
            BASE,
        ];
        for content in shapes {
            for entry in display_entries(&parse_rules(content), Platform::Mac) {
                assert!(
                    remove_rule(content, &entry.text).is_ok(),
                    "listed but not removable: {entry:?} in {content:?}"
                );
            }
        }
    }

    #[test]
    fn test_split_element_is_neither_listed_nor_removed() {
        let content = "<excludefname_rule plat=\"mac\"\n    contains_1=\"/a\" />\n";
        assert!(display_entries(&parse_rules(content), Platform::Mac).is_empty());
        assert!(matches!(
            remove_rule(content, "Path:  /a"),
            Err(RuleError::SelectionNotFound { .. })
        ));
    }

    #[test]
    fn test_remove_ignores_platform() {
        let content = "<excludefname_rule plat=\"win\" contains_1=\"/shared\" />\n\
<excludefname_rule plat=\"mac\" contains_1=\"/shared\" />\n";
        let (out, line) = remove_rule(content, "Path:  /shared").unwrap();
        assert_eq!(line, 1);
        assert!(out.contains("plat=\"mac\""));
    }

    #[test]
    fn test_added_rule_can_be_removed() {
        let rule = ExclusionRule::for_path(
            "C:\\Users\\me\\notes.txt",
            PathKind::File,
            Platform::Windows,
        );
        let added = insert_rule(BASE, &rule).unwrap();
        let text = rule.display_text().unwrap();
        let (out, _) = remove_rule(&added, &text).unwrap();
        assert_eq!(out, BASE);
    }
}
