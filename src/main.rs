// bzexclude - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Rules file and platform resolution
// 4. Headless listing (--list) or eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::ui::...` etc.
pub use bzexclude::app;
pub use bzexclude::core;
pub use bzexclude::platform;
pub use bzexclude::ui;
pub use bzexclude::util;

use crate::core::model::Platform;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Backblaze Exclusion Manager - view, add, and remove file and folder
/// exclusions in bzexcluderules_editable.xml.
#[derive(Parser, Debug)]
#[command(name = "bzexclude", version, about)]
struct Cli {
    /// Rules file to edit (defaults to the Backblaze location for the platform).
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Platform whose rules are shown and written: win or mac.
    #[arg(short = 'p', long = "platform", value_parser = parse_platform)]
    platform: Option<Platform>,

    /// Print the exclusion list to stdout and exit without opening a window.
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// With --list, print JSON instead of numbered lines.
    #[arg(long = "json", requires = "list")]
    json: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn parse_platform(s: &str) -> Result<Platform, String> {
    Platform::from_tag(s).ok_or_else(|| format!("unknown platform '{s}', expected win or mac"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "bzexclude starting"
    );
    for w in &config_warnings {
        tracing::warn!(warning = %w, "Config warning");
    }

    let (rules_path, platform) =
        match platform::config::resolve_target(cli.file.as_deref(), cli.platform, &config) {
            Ok(target) => target,
            Err(e) => {
                tracing::error!(error = %e, "Cannot determine which rules file to edit");
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        };

    tracing::info!(
        path = %rules_path.display(),
        platform = %platform,
        "Rules file resolved"
    );

    let editor =
        app::exclusions::ExclusionFile::new(rules_path, platform, config.backup_dir.clone());

    if cli.list {
        return print_list(&editor, cli.json);
    }

    let mut state = app::state::AppState::new(editor, cli.debug);
    state.warnings = config_warnings;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size(util::constants::WINDOW_SIZE)
            .with_min_inner_size(util::constants::MIN_WINDOW_SIZE),
        ..Default::default()
    };

    let dark_mode = config.dark_mode;
    let font_size = config.font_size;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            ui::theme::apply(&cc.egui_ctx, dark_mode, font_size);
            Ok(Box::new(gui::ExclusionEditorApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch {} GUI: {e}", util::constants::APP_NAME);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Headless `--list`: numbered lines, or a JSON array with `--json`.
fn print_list(editor: &app::exclusions::ExclusionFile, json: bool) -> ExitCode {
    let entries = match editor.load() {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading existing entries: {e}");
            return ExitCode::FAILURE;
        }
    };

    match app::exclusions::format_listing(&entries, json) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: failed to serialise entries: {e}");
            ExitCode::FAILURE
        }
    }
}
