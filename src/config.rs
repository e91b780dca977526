use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::sections::SectionId;

/// What the preview pane shows.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PreviewMode {
    /// The composed Markdown source
    #[default]
    Markdown,
    /// The HTML produced by the renderer
    Html,
}

impl PreviewMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Markdown => Self::Html,
            Self::Html => Self::Markdown,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub hide: Vec<SectionId>,
    pub output_dir: Option<PathBuf>,
    pub preview: Option<PreviewMode>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        let mut hide = self.hide.clone();
        for id in &other.hide {
            if !hide.contains(id) {
                hide.push(*id);
            }
        }
        Self {
            hide,
            output_dir: other.output_dir.clone().or_else(|| self.output_dir.clone()),
            preview: other.preview.or(self.preview),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("readme-composer").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("readme-composer")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("readme-composer").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("readme-composer")
                .join("config");
        }
    }

    PathBuf::from(".readmecomposerrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".readmecomposerrc")
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
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Split one config line into a flag and its value.
///
/// A line holds a single flag. Everything after the flag name is the value,
/// so paths may contain spaces.
fn line_tokens(line: &str) -> Vec<String> {
    let name_end = line.find(char::is_whitespace).unwrap_or(line.len());
    if line[..name_end].contains('=') {
        return vec![line.to_string()];
    }
    match line.split_once(char::is_whitespace) {
        Some((name, value)) => vec![name.to_string(), value.trim().to_string()],
        None => vec![line.to_string()],
    }
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# readme-composer defaults (saved with --save)".to_string());
    for id in &flags.hide {
        lines.push(format!("--hide={id}"));
    }
    if let Some(dir) = &flags.output_dir {
        lines.push(format!("--output-dir={}", dir.display()));
    }
    if let Some(preview) = flags.preview {
        lines.push(format!("--preview={}", preview.as_str()));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file={}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
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

/// Extract the persistable flags from a token list.
///
/// Tokens that are not flags (or that this parser does not persist, such as
/// `--set`) are skipped, so raw `argv` can be passed directly.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value.to_string())),
            _ => (token.as_str(), None),
        };
        let takes_value = matches!(name, "--hide" | "--output-dir" | "--preview" | "--log-file");
        if !takes_value {
            i += 1;
            continue;
        }
        let value = if let Some(value) = inline_value {
            value
        } else if let Some(next) = tokens.get(i + 1) {
            i += 1;
            next.clone()
        } else {
            break;
        };
        match name {
            "--hide" => match SectionId::from_key(&value) {
                Ok(id) if !flags.hide.contains(&id) => flags.hide.push(id),
                Ok(_) => {}
                Err(err) => tracing::warn!("ignoring --hide: {err}"),
            },
            "--output-dir" => flags.output_dir = Some(PathBuf::from(value)),
            "--preview" => flags.preview = parse_preview(&value),
            "--log-file" => flags.log_file = Some(PathBuf::from(value)),
            _ => {}
        }
        i += 1;
    }
    flags
}

fn parse_preview(s: &str) -> Option<PreviewMode> {
    match s {
        "markdown" => Some(PreviewMode::Markdown),
        "html" => Some(PreviewMode::Html),
        _ => None,
    }
}
