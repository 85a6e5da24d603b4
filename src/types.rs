//! Shared types passed between the collector, the renderer and the builder.

use chrono::{NaiveDate, Utc};
use std::path::PathBuf;

/// Front-matter mapping, key order preserved as written.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// One source Markdown file, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Front-matter `title`, or the file stem
    pub title: String,
    /// Front-matter `date`, or the file's modification date
    pub date: NaiveDate,
    /// Front-matter `description`, or the first 150 characters of the body
    pub description: String,
    /// Slash-separated path of the generated page, relative to the output root
    pub output_path: String,
    /// Markdown text with the front-matter removed
    pub body: String,
    /// The untouched front-matter, searched client-side on the index page
    pub metadata: Metadata,
    /// Directory of the source file relative to the source root (`.` at top level)
    pub category: String,
    /// Front-matter `format` tag
    pub format: Option<String>,
    /// Source file relative to the source root
    pub source_path: PathBuf,
}

impl Document {
    /// Number of directories the output page sits below the output root.
    pub fn depth(&self) -> usize {
        output_depth(&self.output_path)
    }

    /// Date as displayed on pages, `YYYY-MM-DD`.
    pub fn display_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Depth of a slash-separated output path: its segment count minus one.
pub fn output_depth(output_path: &str) -> usize {
    output_path.split('/').count() - 1
}

/// `../` repeated `depth` times; empty at the output root.
pub fn relative_prefix(depth: usize) -> String {
    "../".repeat(depth)
}

/// Values fixed once per build and threaded into every rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Cache-busting token appended to the stylesheet URL.
    pub version: String,
}

impl BuildContext {
    /// Context for a build starting now; the token is the epoch time in milliseconds.
    pub fn now() -> Self {
        Self::with_version(Utc::now().timestamp_millis().to_string())
    }

    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_counts_directories() {
        assert_eq!(output_depth("intro.html"), 0);
        assert_eq!(output_depth("teams/rain.html"), 1);
        assert_eq!(output_depth("a/b/c.html"), 2);
    }

    #[test]
    fn relative_prefix_repeats() {
        assert_eq!(relative_prefix(0), "");
        assert_eq!(relative_prefix(2), "../../");
    }

    #[test]
    fn build_context_now_is_numeric() {
        let ctx = BuildContext::now();
        assert!(ctx.version.parse::<i64>().unwrap() > 0);
    }
}
