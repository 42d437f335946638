// bzexclude - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every error keeps its causal chain
// for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all bzexclude operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum ExclusionError {
    /// Rule text manipulation failed.
    Rule(RuleError),

    /// Backup copy failed.
    Backup(BackupError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for ExclusionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule(e) => write!(f, "{e}"),
            Self::Backup(e) => write!(f, "Backup error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ExclusionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rule(e) => Some(e),
            Self::Backup(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Rule errors
// ---------------------------------------------------------------------------

/// Errors produced while editing the rule list text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The closing-tag marker used as the insertion anchor is missing.
    ClosingTagNotFound { tag: &'static str },

    /// No rule line renders to the selected display string.
    SelectionNotFound { selected: String },

    /// The picked path is empty after normalisation.
    EmptyPath,

    /// The rules file is larger than the editor accepts.
    FileTooLarge { size: u64, max_size: u64 },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClosingTagNotFound { tag } => {
                write!(f, "Could not find closing tag {tag} in XML file")
            }
            Self::SelectionNotFound { selected } => {
                write!(f, "No rule in the file matches the selection '{selected}'")
            }
            Self::EmptyPath => write!(f, "Cannot create a rule from an empty path"),
            Self::FileTooLarge { size, max_size } => write!(
                f,
                "Rules file is {size} bytes, exceeds maximum of {max_size} bytes"
            ),
        }
    }
}

impl std::error::Error for RuleError {}

impl From<RuleError> for ExclusionError {
    fn from(e: RuleError) -> Self {
        Self::Rule(e)
    }
}

// ---------------------------------------------------------------------------
// Backup errors
// ---------------------------------------------------------------------------

/// Errors related to taking a backup copy of the rules file.
#[derive(Debug)]
pub enum BackupError {
    /// The file to back up does not exist.
    SourceNotFound { path: PathBuf },

    /// A file already exists at the backup destination.
    AlreadyExists { path: PathBuf },

    /// Copying failed.
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

impl fmt::Display for BackupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceNotFound { path } => {
                write!(f, "File to back up '{}' does not exist", path.display())
            }
            Self::AlreadyExists { path } => write!(
                f,
                "Backup '{}' already exists. Wait a second and try again.",
                path.display()
            ),
            Self::Copy { from, to, source } => write!(
                f,
                "Failed to copy '{}' to '{}': {source}",
                from.display(),
                to.display()
            ),
        }
    }
}

impl std::error::Error for BackupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Copy { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<BackupError> for ExclusionError {
    fn from(e: BackupError) -> Self {
        Self::Backup(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration and startup resolution.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// The running OS has no rules file and no platform was given.
    UnsupportedPlatform { os: &'static str },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::UnsupportedPlatform { os } => write!(
                f,
                "This app is designed for Windows and Mac platforms only. {os} is not \
                 supported. Pass --platform win|mac to edit a copy of the file."
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for bzexclude results.
pub type Result<T> = std::result::Result<T, ExclusionError>;
