//! Scribe - a code editor in the terminal.
//!
//! # Usage
//!
//! ```bash
//! scribe main.rs --language rust
//! scribe --font "14px Menlo" --blink-ms 600 notes.js
//! scribe --language rust --save
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use scribe::app::App;
use scribe::config::{
    ConfigFlags, EditorConfig, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use scribe::perf;

/// A code editor in the terminal
#[derive(Parser, Debug)]
#[command(name = "scribe", version, about, long_about = None)]
struct Cli {
    /// File to edit; starts empty when it does not exist
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Language used for syntax highlighting
    #[arg(long)]
    language: Option<String>,

    /// Font size and family, e.g. "13px Menlo, monospace"
    #[arg(long)]
    font: Option<String>,

    /// Caret blink period in milliseconds
    #[arg(long, value_name = "MS")]
    blink_ms: Option<u64>,

    /// Window for double and triple clicks in milliseconds
    #[arg(long, value_name = "MS")]
    click_ms: Option<u64>,

    /// Record timing scopes in the render debug log
    #[arg(long)]
    perf: bool,

    /// Write render debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    // stderr shares the tty with the editor, so only warnings go there.
    // Perf timings are written to the render debug log instead.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os("SCRIBE_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        tracing::warn!(
            path = %render_debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            %err,
            "failed to initialize render debug log"
        );
    }
    if effective.perf && !perf::is_debug_log_enabled() {
        tracing::warn!("--perf timings need --render-debug-log to be recorded");
    }

    if let Some(font) = &effective.font
        && scribe::ui::style::Font::parse(font).is_none()
    {
        tracing::warn!(font, "unrecognized font, using the default");
    }

    let mut app = App::new(cli.file).with_config(EditorConfig::from_flags(&effective));
    app.run().context("Application error")
}
