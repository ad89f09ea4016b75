//! Saved default flags.
//!
//! Config files hold ordinary command-line flags, so `bean --save` can
//! persist whatever was passed. A global file is merged with a local
//! `.beanrc`, and the command line is merged over both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::render::{HeaderStyle, ListGap, RenderOptions};

const APP_DIR: &str = "bean";
const LOCAL_FILE: &str = ".beanrc";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub width: Option<usize>,
    pub header_style: Option<HeaderStyle>,
    pub list_gap: Option<ListGap>,
    pub wrap_lists: bool,
    pub watch: bool,
    pub perf: bool,
    pub render_debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: options from `other` win, booleans are OR-ed.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            width: other.width.or(self.width),
            header_style: other.header_style.or(self.header_style),
            list_gap: other.list_gap.or(self.list_gap),
            wrap_lists: self.wrap_lists || other.wrap_lists,
            watch: self.watch || other.watch,
            perf: self.perf || other.perf,
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
        }
    }

    /// Build render options, asking `detect_width` only when no width was set.
    pub fn render_options(&self, detect_width: impl FnOnce() -> usize) -> RenderOptions {
        let width = self.width.filter(|&w| w > 0).unwrap_or_else(detect_width);
        RenderOptions::with_width(width)
            .header_style(self.header_style.unwrap_or_default())
            .list_gap(self.list_gap.unwrap_or_default())
            .wrap_list_items(self.wrap_lists)
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR).join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR)
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR).join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join(APP_DIR).join("config");
        }
    }

    PathBuf::from(LOCAL_FILE)
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE)
}

/// Load flags from `path`; a missing file yields defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
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
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to `path`, one flag per line.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# bean defaults (saved with --save)".to_string()];
    if let Some(width) = flags.width {
        lines.push(format!("--width {width}"));
    }
    if let Some(style) = flags.header_style {
        lines.push(format!("--header-style {}", header_style_name(style)));
    }
    if let Some(gap) = flags.list_gap {
        lines.push(format!("--list-gap {}", list_gap_name(gap)));
    }
    if flags.wrap_lists {
        lines.push("--wrap-lists".to_string());
    }
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.render_debug_log {
        lines.push(format!("--render-debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove the config file at `path` if present.
///
/// # Errors
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of `tokens`, ignoring everything else.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };

        match name {
            "--wrap-lists" => flags.wrap_lists = true,
            "--watch" => flags.watch = true,
            "--perf" => flags.perf = true,
            "-w" | "--width" | "--header-style" | "--list-gap" | "--render-debug-log" => {
                let value = match inline_value {
                    Some(value) => Some(value),
                    None => {
                        i += 1;
                        tokens.get(i).map(String::as_str)
                    }
                };
                if let Some(value) = value {
                    apply_value(&mut flags, name, value);
                }
            }
            _ => {}
        }
        i += 1;
    }
    flags
}

fn apply_value(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "-w" | "--width" => flags.width = value.parse().ok(),
        "--header-style" => flags.header_style = parse_header_style(value),
        "--list-gap" => flags.list_gap = parse_list_gap(value),
        "--render-debug-log" => flags.render_debug_log = Some(PathBuf::from(value)),
        _ => {}
    }
}

fn parse_header_style(s: &str) -> Option<HeaderStyle> {
    match s {
        "underline" => Some(HeaderStyle::Underline),
        "flanked" => Some(HeaderStyle::Flanked),
        _ => None,
    }
}

const fn header_style_name(style: HeaderStyle) -> &'static str {
    match style {
        HeaderStyle::Underline => "underline",
        HeaderStyle::Flanked => "flanked",
    }
}

fn parse_list_gap(s: &str) -> Option<ListGap> {
    match s {
        "preserve" => Some(ListGap::Preserve),
        "collapse" => Some(ListGap::Collapse),
        _ => None,
    }
}

const fn list_gap_name(gap: ListGap) -> &'static str {
    match gap {
        ListGap::Preserve => "preserve",
        ListGap::Collapse => "collapse",
    }
}
