// bzexclude - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Backblaze Exclusion Manager";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "bzexclude";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Rules file schema
// =============================================================================

/// Element name of a single exclusion rule.
pub const RULE_ELEMENT: &str = "excludefname_rule";

/// Closing tag of the rule list. New rules are spliced in before the last
/// occurrence of this marker.
pub const CLOSING_TAG: &str = "</bzexclusions>";

/// Attribute value meaning "unconstrained".
pub const WILDCARD: &str = "*";

/// `ruleIsOptional` value written for rules created by this tool.
pub const RULE_IS_OPTIONAL: &str = "t";

/// Separator placed between the parts of a rule's display string.
pub const DISPLAY_SEPARATOR: &str = "  |  ";

/// Default rules file location on Windows.
pub const WINDOWS_RULES_PATH: &str =
    "C:/ProgramData/Backblaze/bzdata/bzexcluderules_editable.xml";

/// Default rules file location on macOS.
pub const MAC_RULES_PATH: &str = "/Library/Backblaze.bzpkg/bzdata/bzexcluderules_editable.xml";

/// Maximum rules file size accepted for editing. The real file is a few KB;
/// anything far larger is almost certainly the wrong file.
pub const MAX_RULES_FILE_SIZE: u64 = 8 * 1024 * 1024; // 8 MB

// =============================================================================
// Backups
// =============================================================================

/// Infix between the original path and the timestamp of a backup copy.
pub const BACKUP_INFIX: &str = "_bak";

/// chrono format of the backup timestamp (ddmmyyHHMMSS, local time).
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%d%m%y%H%M%S";

// =============================================================================
// UI defaults
// =============================================================================

/// Default body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum configurable font size.
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum configurable font size.
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Initial window size.
pub const WINDOW_SIZE: [f32; 2] = [1200.0, 800.0];

/// Minimum window size.
pub const MIN_WINDOW_SIZE: [f32; 2] = [640.0, 400.0];

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// File names
// =============================================================================

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Suffix of the temporary file used for atomic writes of the rules file.
pub const TEMP_FILE_SUFFIX: &str = ".tmp";
