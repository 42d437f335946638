// bzexclude - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants::{DISPLAY_SEPARATOR, RULE_IS_OPTIONAL, WILDCARD};
use serde::Serialize;
use std::fmt;

// =============================================================================
// Platform
// =============================================================================

/// Platform a rule applies to, stored in the `plat` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Mac,
}

impl Platform {
    /// Value of the `plat` attribute for this platform.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Windows => "win",
            Self::Mac => "mac",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Mac => "macOS",
        }
    }

    /// Parse a `plat` tag (case-insensitive).
    pub fn from_tag(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "win" | "windows" => Some(Self::Windows),
            "mac" | "macos" => Some(Self::Mac),
            _ => None,
        }
    }

    /// The platform of the running OS, or `None` where the backup client
    /// does not run.
    pub fn current() -> Option<Self> {
        if cfg!(target_os = "windows") {
            Some(Self::Windows)
        } else if cfg!(target_os = "macos") {
            Some(Self::Mac)
        } else {
            None
        }
    }

    /// Rewrite a picked path into the form the backup client expects.
    /// File dialogs may hand back forward slashes on Windows.
    pub fn normalise_path(&self, path: &str) -> String {
        match self {
            Self::Windows => path.replace('/', "\\"),
            Self::Mac => path.to_string(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// =============================================================================
// Rule attributes
// =============================================================================

/// The fixed attribute set of an `excludefname_rule` element, in the order
/// they are written to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleAttribute {
    Plat,
    OsVers,
    RuleIsOptional,
    SkipFirstCharThenStartsWith,
    Contains1,
    Contains2,
    DoesNotContain,
    EndsWith,
    HasFileExtension,
}

impl RuleAttribute {
    /// Serialisation order.
    pub fn all() -> &'static [RuleAttribute] {
        &[
            Self::Plat,
            Self::OsVers,
            Self::RuleIsOptional,
            Self::SkipFirstCharThenStartsWith,
            Self::Contains1,
            Self::Contains2,
            Self::DoesNotContain,
            Self::EndsWith,
            Self::HasFileExtension,
        ]
    }

    /// Attributes that make up the display string, in display order,
    /// paired with their labels.
    pub fn displayed() -> &'static [(RuleAttribute, &'static str)] {
        &[
            (Self::SkipFirstCharThenStartsWith, "Starts With: "),
            (Self::Contains1, "Path:  "),
            (Self::Contains2, "Contains:  "),
            (Self::EndsWith, "Ends With:  "),
            (Self::HasFileExtension, "File Extension:  "),
        ]
    }

    /// XML attribute name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plat => "plat",
            Self::OsVers => "osVers",
            Self::RuleIsOptional => "ruleIsOptional",
            Self::SkipFirstCharThenStartsWith => "skipFirstCharThenStartsWith",
            Self::Contains1 => "contains_1",
            Self::Contains2 => "contains_2",
            Self::DoesNotContain => "doesNotContain",
            Self::EndsWith => "endsWith",
            Self::HasFileExtension => "hasFileExtension",
        }
    }

    /// Look up an attribute by its XML name (exact match).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|a| a.name() == name)
    }
}

// =============================================================================
// Exclusion rule
// =============================================================================

/// Whether a picked path is a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Folder,
}

/// One `excludefname_rule` element.
///
/// Every attribute is a raw string so rules for other platforms or with
/// values this tool never writes survive a parse unchanged. `"*"` means
/// unconstrained; attributes missing from the file parse as `"*"`.
///
/// A rule has no identity besides its attribute values and its position in
/// the file. Two rules with equal display strings are indistinguishable to
/// removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExclusionRule {
    #[serde(rename = "plat")]
    pub plat: String,
    #[serde(rename = "osVers")]
    pub os_vers: String,
    #[serde(rename = "ruleIsOptional")]
    pub rule_is_optional: String,
    #[serde(rename = "skipFirstCharThenStartsWith")]
    pub skip_first_char_then_starts_with: String,
    #[serde(rename = "contains_1")]
    pub contains_1: String,
    #[serde(rename = "contains_2")]
    pub contains_2: String,
    #[serde(rename = "doesNotContain")]
    pub does_not_contain: String,
    #[serde(rename = "endsWith")]
    pub ends_with: String,
    #[serde(rename = "hasFileExtension")]
    pub has_file_extension: String,
}

impl Default for ExclusionRule {
    fn default() -> Self {
        Self {
            plat: WILDCARD.to_string(),
            os_vers: WILDCARD.to_string(),
            rule_is_optional: WILDCARD.to_string(),
            skip_first_char_then_starts_with: WILDCARD.to_string(),
            contains_1: WILDCARD.to_string(),
            contains_2: WILDCARD.to_string(),
            does_not_contain: WILDCARD.to_string(),
            ends_with: WILDCARD.to_string(),
            has_file_extension: WILDCARD.to_string(),
        }
    }
}

impl ExclusionRule {
    /// Build the rule for a path picked by the user.
    ///
    /// `path` is expected to be already normalised for `platform`.
    /// For files, `endsWith` is the file name and `hasFileExtension` the
    /// extension without its dot (`*` when there is none).
    pub fn for_path(path: &str, kind: PathKind, platform: Platform) -> Self {
        let mut rule = Self {
            plat: platform.tag().to_string(),
            rule_is_optional: RULE_IS_OPTIONAL.to_string(),
            contains_1: path.to_string(),
            ..Self::default()
        };

        if kind == PathKind::File {
            let name = file_name_of(path);
            if !name.is_empty() {
                rule.ends_with = name.to_string();
            }
            if let Some(ext) = extension_of(name) {
                rule.has_file_extension = ext.to_string();
            }
        }

        rule
    }

    /// Value of `attr`.
    pub fn get(&self, attr: RuleAttribute) -> &str {
        match attr {
            RuleAttribute::Plat => &self.plat,
            RuleAttribute::OsVers => &self.os_vers,
            RuleAttribute::RuleIsOptional => &self.rule_is_optional,
            RuleAttribute::SkipFirstCharThenStartsWith => &self.skip_first_char_then_starts_with,
            RuleAttribute::Contains1 => &self.contains_1,
            RuleAttribute::Contains2 => &self.contains_2,
            RuleAttribute::DoesNotContain => &self.does_not_contain,
            RuleAttribute::EndsWith => &self.ends_with,
            RuleAttribute::HasFileExtension => &self.has_file_extension,
        }
    }

    /// Overwrite `attr`.
    pub fn set(&mut self, attr: RuleAttribute, value: String) {
        let slot = match attr {
            RuleAttribute::Plat => &mut self.plat,
            RuleAttribute::OsVers => &mut self.os_vers,
            RuleAttribute::RuleIsOptional => &mut self.rule_is_optional,
            RuleAttribute::SkipFirstCharThenStartsWith => {
                &mut self.skip_first_char_then_starts_with
            }
            RuleAttribute::Contains1 => &mut self.contains_1,
            RuleAttribute::Contains2 => &mut self.contains_2,
            RuleAttribute::DoesNotContain => &mut self.does_not_contain,
            RuleAttribute::EndsWith => &mut self.ends_with,
            RuleAttribute::HasFileExtension => &mut self.has_file_extension,
        };
        *slot = value;
    }

    /// Whether the rule's `plat` attribute names `platform`.
    pub fn applies_to(&self, platform: Platform) -> bool {
        self.plat == platform.tag()
    }

    /// Render the display string, e.g. `Path:  C:\Temp  |  Ends With:  a.txt`.
    ///
    /// Returns `None` when every displayed attribute is the wildcard.
    /// Removal matches on this exact string, so the list view and the
    /// removal path must both go through here.
    pub fn display_text(&self) -> Option<String> {
        let parts: Vec<String> = RuleAttribute::displayed()
            .iter()
            .filter_map(|(attr, label)| {
                let value = self.get(*attr);
                (value != WILDCARD).then(|| format!("{label}{value}"))
            })
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(DISPLAY_SEPARATOR))
        }
    }
}

// =============================================================================
// Display entry
// =============================================================================

/// One row of the exclusion list as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayEntry {
    /// 1-based position in the displayed list.
    pub number: usize,

    /// Display string of the rule (see [`ExclusionRule::display_text`]).
    pub text: String,
}

impl DisplayEntry {
    /// Row label, e.g. `3. Path:  /Users/me/tmp`.
    pub fn label(&self) -> String {
        format!("{}. {}", self.number, self.text)
    }
}

// =============================================================================
// Path helpers
// =============================================================================

/// Last component of `path`, splitting on both `/` and `\` so Windows paths
/// are handled on any host.
pub fn file_name_of(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rfind(['/', '\\']) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Extension of a file name without the dot.
///
/// A leading dot (dotfiles) or a trailing dot does not start an extension.
pub fn extension_of(name: &str) -> Option<&str> {
    let idx = name.rfind('.')?;
    if idx == 0 || idx + 1 == name.len() {
        return None;
    }
    Some(&name[idx + 1..])
}

// =============================================================================
// Tests
// =============================================================================
