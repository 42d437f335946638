// bzexclude - platform/config.rs
//
// Platform-specific paths, the default rules file location, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::Platform;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for bzexclude configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/bzexclude/ or %APPDATA%\bzexclude\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }
}

/// Where the backup client keeps its editable exclusion rules.
pub fn default_rules_path(platform: Platform) -> PathBuf {
    match platform {
        Platform::Windows => PathBuf::from(constants::WINDOWS_RULES_PATH),
        Platform::Mac => PathBuf::from(constants::MAC_RULES_PATH),
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[exclusions]` section.
    pub exclusions: ExclusionsSection,
    /// `[backup]` section.
    pub backup: BackupSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[exclusions]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExclusionsSection {
    /// Rules file to edit instead of the platform default.
    pub file: Option<String>,
    /// Platform tag: "win" or "mac".
    pub platform: Option<String>,
}

/// `[backup]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct BackupSection {
    /// Directory for backup copies (empty = next to the rules file).
    pub directory: Option<String>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Exclusions --
    /// Rules file override.
    pub rules_file: Option<PathBuf>,
    /// Platform override.
    pub platform: Option<Platform>,

    // -- Backup --
    /// Backup directory (None = beside the rules file).
    pub backup_dir: Option<PathBuf>,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Body font size in points.
    pub font_size: f32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rules_file: None,
            platform: None,
            backup_dir: None,
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with a warning;
/// the application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.clone(),
                source: e,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: config_path.clone(),
                source: e,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let (config, validation_warnings) = validate(raw);
    warnings.extend(validation_warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Check each field of the raw config, accumulating all problems.
fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings = Vec::new();

    // -- Exclusions: file --
    if let Some(file) = raw.exclusions.file.filter(|f| !f.trim().is_empty()) {
        config.rules_file = Some(PathBuf::from(file));
    }

    // -- Exclusions: platform --
    if let Some(ref tag) = raw.exclusions.platform {
        match Platform::from_tag(tag) {
            Some(p) => config.platform = Some(p),
            None => warnings.push(
                ConfigError::ValueOutOfRange {
                    field: "[exclusions] platform".to_string(),
                    value: tag.clone(),
                    expected: "\"win\" or \"mac\"; detecting from the OS instead".to_string(),
                }
                .to_string(),
            ),
        }
    }

    // -- Backup: directory --
    if let Some(dir) = raw.backup.directory.filter(|d| !d.trim().is_empty()) {
        config.backup_dir = Some(PathBuf::from(dir));
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => warnings.push(format!(
                "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
            )),
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(format!(
                "[ui] font_size = {size} is out of range ({}-{}). Using default ({}).",
                constants::MIN_FONT_SIZE,
                constants::MAX_FONT_SIZE,
                constants::DEFAULT_FONT_SIZE,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    (config, warnings)
}

/// Pick the rules file and platform to edit.
///
/// Priority for each: CLI flag > config.toml > the running OS. The rules
/// file defaults to the backup client's location for the chosen platform.
pub fn resolve_target(
    cli_file: Option<&Path>,
    cli_platform: Option<Platform>,
    config: &AppConfig,
) -> Result<(PathBuf, Platform), ConfigError> {
    let platform = cli_platform
        .or(config.platform)
        .or_else(Platform::current)
        .ok_or(ConfigError::UnsupportedPlatform {
            os: std::env::consts::OS,
        })?;

    let path = cli_file
        .map(Path::to_path_buf)
        .or_else(|| config.rules_file.clone())
        .unwrap_or_else(|| default_rules_path(platform));

    Ok((path, platform))
}
