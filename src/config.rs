use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::ui::metrics::ColumnModel;
use crate::ui::style::{Font, Palette};

/// Default caret blink period.
pub const DEFAULT_BLINK_MS: u64 = 500;
/// Default multi-click window.
pub const DEFAULT_CLICK_MS: u64 = 400;

/// Flags that can be persisted in a config file or passed on the command line.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigFlags {
    pub perf: bool,
    pub language: Option<String>,
    pub font: Option<String>,
    pub blink_ms: Option<u64>,
    pub click_ms: Option<u64>,
    pub render_debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; `other` wins for valued options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            perf: self.perf || other.perf,
            language: other.language.clone().or_else(|| self.language.clone()),
            font: other.font.clone().or_else(|| self.font.clone()),
            blink_ms: other.blink_ms.or(self.blink_ms),
            click_ms: other.click_ms.or(self.click_ms),
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
        }
    }
}

/// Runtime settings for one editor instance.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Space around the text area, in CSS pixels.
    pub padding: f32,
    /// Row height as a multiple of the measured glyph height.
    pub line_height_factor: f32,
    pub font: Font,
    pub caret_width: f32,
    pub blink_ms: u64,
    pub click_ms: u64,
    /// Language handed to the lexer.
    pub language: String,
    /// Extra rows drawn above and below the visible ones.
    pub overscan: usize,
    pub palette: Palette,
    /// Cells per character; terminals give wide glyphs two.
    pub columns: ColumnModel,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            padding: 10.0,
            line_height_factor: 1.1,
            font: Font::default(),
            caret_width: 2.0,
            blink_ms: DEFAULT_BLINK_MS,
            click_ms: DEFAULT_CLICK_MS,
            language: "javascript".to_string(),
            overscan: 1,
            palette: Palette::default(),
            columns: ColumnModel::Chars,
        }
    }
}

impl EditorConfig {
    /// Defaults with any flag overrides applied. An unparseable font is
    /// ignored.
    pub fn from_flags(flags: &ConfigFlags) -> Self {
        let mut config = Self::default();
        if let Some(language) = &flags.language {
            config.language.clone_from(language);
        }
        if let Some(font) = flags.font.as_deref().and_then(Font::parse) {
            config.font = font;
        }
        if let Some(blink_ms) = flags.blink_ms {
            config.blink_ms = blink_ms;
        }
        if let Some(click_ms) = flags.click_ms {
            config.click_ms = click_ms;
        }
        config
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("scribe").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("scribe")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("scribe").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("scribe").join("config");
        }
    }

    PathBuf::from(".scriberc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".scriberc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(tokenize_line)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Split a config line into tokens. A `--font` value keeps its spaces.
fn tokenize_line(line: &str) -> Vec<String> {
    if let Some(value) = line.strip_prefix("--font ") {
        return vec!["--font".to_string(), value.trim().to_string()];
    }
    line.split_whitespace().map(ToOwned::to_owned).collect()
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# scribe defaults (saved with --save)".to_string());
    if let Some(language) = &flags.language {
        lines.push(format!("--language {language}"));
    }
    if let Some(font) = &flags.font {
        lines.push(format!("--font {font}"));
    }
    if let Some(blink_ms) = flags.blink_ms {
        lines.push(format!("--blink-ms {blink_ms}"));
    }
    if let Some(click_ms) = flags.click_ms {
        lines.push(format!("--click-ms {click_ms}"));
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.render_debug_log {
        lines.push(format!("--render-debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        let takes_value = matches!(
            name,
            "--language" | "--font" | "--blink-ms" | "--click-ms" | "--render-debug-log"
        );
        let value = if takes_value && inline.is_none() {
            let next = tokens.get(i + 1).map(String::as_str);
            if next.is_some() {
                i += 1;
            }
            next
        } else {
            inline
        };

        match (name, value) {
            ("--perf", _) => flags.perf = true,
            ("--language", Some(v)) => flags.language = Some(v.to_string()),
            ("--font", Some(v)) => flags.font = Some(v.to_string()),
            ("--blink-ms", Some(v)) => flags.blink_ms = v.parse().ok(),
            ("--click-ms", Some(v)) => flags.click_ms = v.parse().ok(),
            ("--render-debug-log", Some(v)) => flags.render_debug_log = Some(PathBuf::from(v)),
            _ => {}
        }
        i += 1;
    }
    flags
}
