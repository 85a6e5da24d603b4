//! Site configuration module.
//!
//! Handles loading and validating the optional `config.toml` in the project
//! root. Every key is optional: a missing file, or a sparse one, falls back to
//! the stock defaults, which reproduce the plain `markdown/ → dist/` build.
//!
//! ## Project Layout
//!
//! ```text
//! project/
//! ├── config.toml        # Optional, all keys have defaults
//! ├── styles.css         # Copied to dist/ when present
//! ├── markdown/          # Source notes (any nesting) and images
//! │   ├── intro.md
//! │   └── VGC/
//! │       └── pics/
//! └── dist/              # Generated site
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! markdown_dir = "markdown"   # Source directory, relative to the project root
//! output_dir = "dist"         # Output directory, relative to the project root
//! stylesheet = "styles.css"   # Copied into the output root if it exists
//! pics_dir = "VGC/pics"       # Target directory for ![[name]] embeds
//!
//! [site]
//! title = "宝可梦VGC入门学习"
//! lang = "zh-CN"
//! footer = "Powered by Markdown & GitHub Pages"
//!
//! [markdown]
//! breaks = true               # Single newlines become <br />
//!
//! [headers]                   # For the static server, never used by the build
//! X-Content-Type-Options = "nosniff"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Markdown source directory, relative to the project root.
    pub markdown_dir: String,
    /// Output directory, relative to the project root.
    pub output_dir: String,
    /// Stylesheet copied into the output root as `styles.css`.
    pub stylesheet: String,
    /// Directory (relative to the output root) that `![[name]]` embeds point into.
    pub pics_dir: String,
    /// Page text and external resources.
    pub site: SiteSettings,
    /// Markdown rendering options.
    pub markdown: MarkdownConfig,
    /// Response headers for whatever static server hosts the output.
    pub headers: BTreeMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            markdown_dir: "markdown".to_string(),
            output_dir: "dist".to_string(),
            stylesheet: "styles.css".to_string(),
            pics_dir: "VGC/pics".to_string(),
            site: SiteSettings::default(),
            markdown: MarkdownConfig::default(),
            headers: default_headers(),
        }
    }
}

fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "Cache-Control".to_string(),
            "public, max-age=31536000, immutable".to_string(),
        ),
        ("X-Content-Type-Options".to_string(), "nosniff".to_string()),
    ])
}

impl SiteConfig {
    /// Validate that the directory settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("markdown_dir", &self.markdown_dir),
            ("output_dir", &self.output_dir),
            ("pics_dir", &self.pics_dir),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        // The asset mirror walks the whole source tree, so an output inside it
        // would be copied into itself on the next build.
        if normalize(&self.output_dir).starts_with(normalize(&self.markdown_dir)) {
            return Err(ConfigError::Validation(format!(
                "output_dir {:?} must not be inside markdown_dir {:?}",
                self.output_dir, self.markdown_dir
            )));
        }
        Ok(())
    }
}

/// Lexically resolve `.` and `..` components of a configured path.
fn normalize(path: &str) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Text and external resources baked into every page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// Heading of the index hero.
    pub title: String,
    /// Line under the index heading.
    pub subtitle: String,
    /// `lang` attribute of the `<html>` element.
    pub lang: String,
    /// Text of the logo link in the navigation bar.
    pub logo: String,
    /// Label of the home link; also the index page `<title>`.
    pub home_label: String,
    /// Footer caption.
    pub footer: String,
    pub search_placeholder: String,
    pub read_more: String,
    pub back_to_home: String,
    /// Shown on the index page when there are no documents.
    pub empty_message: String,
    /// External stylesheet for highlighted code blocks.
    pub highlight_stylesheet: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: "宝可梦VGC入门学习".to_string(),
            subtitle: "Video Game Championships 双打对战学习指南".to_string(),
            lang: "zh-CN".to_string(),
            logo: "🎮 宝可梦VGC入门学习".to_string(),
            home_label: "首页".to_string(),
            footer: "Powered by Markdown & GitHub Pages".to_string(),
            search_placeholder: "搜索 frontmatter...".to_string(),
            read_more: "阅读更多 →".to_string(),
            back_to_home: "← 返回首页".to_string(),
            empty_message: "暂无文章，请在 markdown 目录添加 .md 文件".to_string(),
            highlight_stylesheet:
                "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/styles/github-dark.min.css"
                    .to_string(),
        }
    }
}

/// Markdown rendering options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Render single newlines inside a paragraph as `<br />`.
    pub breaks: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { breaks: true }
    }
}

/// Load `config.toml` from the project root.
///
/// Returns the stock defaults when the file does not exist. Missing keys take
/// their defaults, unknown keys are an error, and the result is validated.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    parse_config(&content)
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Render the static-server headers as `Name: value` lines.
pub fn format_headers(headers: &BTreeMap<String, String>) -> Vec<String> {
    headers
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect()
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# vgc-site configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Markdown source directory, relative to the project root.
markdown_dir = "markdown"

# Output directory, relative to the project root.
output_dir = "dist"

# Stylesheet copied to <output_dir>/styles.css when it exists.
stylesheet = "styles.css"

# Where ![[name]] embeds point, relative to the output root.
pics_dir = "VGC/pics"

# ---------------------------------------------------------------------------
# Page text
# ---------------------------------------------------------------------------
[site]
title = "宝可梦VGC入门学习"
subtitle = "Video Game Championships 双打对战学习指南"
lang = "zh-CN"
logo = "🎮 宝可梦VGC入门学习"
home_label = "首页"
footer = "Powered by Markdown & GitHub Pages"
search_placeholder = "搜索 frontmatter..."
read_more = "阅读更多 →"
back_to_home = "← 返回首页"
empty_message = "暂无文章，请在 markdown 目录添加 .md 文件"

# Stylesheet for highlighted code blocks.
highlight_stylesheet = "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/styles/github-dark.min.css"

# ---------------------------------------------------------------------------
# Markdown
# ---------------------------------------------------------------------------
[markdown]
# Render single newlines inside a paragraph as <br />.
breaks = true

# ---------------------------------------------------------------------------
# Static server headers (printed by `vgc-site headers`, not used by the build)
# ---------------------------------------------------------------------------
[headers]
Cache-Control = "public, max-age=31536000, immutable"
X-Content-Type-Options = "nosniff"
"##
}
