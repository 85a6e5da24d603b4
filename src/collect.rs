//! Document collection.
//!
//! Walks the Markdown source tree and turns every `*.md` file into a
//! [`Document`]. Each field falls back independently when its front-matter key
//! is missing:
//!
//! | Field | Front-matter key | Fallback |
//! |-------|------------------|----------|
//! | title | `title` | file stem |
//! | date | `date` | file modification date (UTC) |
//! | description | `description` | first 150 characters of the body |
//! | format | `format` | none |
//!
//! The category is the directory part of the relative source path (`.` for
//! files at the top level), and the output path replaces `.md` with `.html`
//! using `/` separators.
//!
//! ## Ordering
//!
//! Files are enumerated by file name so the build is deterministic, then
//! stable-sorted by date (oldest first). Documents sharing a date keep their
//! enumeration order.
//!
//! ## Validation
//!
//! - A `date` that is not a calendar date or timestamp is an error.
//! - Two documents may not produce the same output path.
//! - A top-level `index.md` is rejected because `index.html` is the generated index.

use crate::front_matter::{self, FrontMatterError};
use crate::types::{Document, Metadata};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

const MARKDOWN_EXTENSION: &str = ".md";
const DESCRIPTION_CHARS: usize = 150;
pub const INDEX_PAGE: &str = "index.html";

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Front matter error in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },
    #[error("Unrecognized date {value:?} in {path}")]
    InvalidDate { path: PathBuf, value: String },
    #[error("{first} and {second} both produce {output}")]
    DuplicateOutput {
        first: PathBuf,
        second: PathBuf,
        output: String,
    },
    #[error("{0} would overwrite the generated index page")]
    ReservedOutput(PathBuf),
}

/// Collect every Markdown document under `source_dir`, oldest first.
///
/// A missing `source_dir` yields no documents.
pub fn collect(source_dir: &Path) -> Result<Vec<Document>, CollectError> {
    if !source_dir.exists() {
        return Ok(Vec::new());
    }

    let mut documents = Vec::new();
    for path in markdown_files(source_dir)? {
        tracing::debug!(path = %path.display(), "collect document");
        documents.push(read_document(source_dir, &path)?);
    }

    check_output_paths(&documents)?;
    documents.sort_by_key(|doc| doc.date);
    Ok(documents)
}

fn markdown_files(source_dir: &Path) -> Result<Vec<PathBuf>, CollectError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(source_dir)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        let is_markdown = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(MARKDOWN_EXTENSION));
        if entry.file_type().is_file() && is_markdown {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Read one file and derive its document fields.
fn read_document(source_dir: &Path, path: &Path) -> Result<Document, CollectError> {
    let content = fs::read_to_string(path)?;
    let rel_path = path.strip_prefix(source_dir).unwrap_or(path).to_path_buf();

    let (metadata, body) =
        front_matter::parse(&content).map_err(|source| CollectError::FrontMatter {
            path: rel_path.clone(),
            source,
        })?;

    let title = metadata_text(&metadata, "title").unwrap_or_else(|| file_stem(path));

    let date = match metadata.get("date").filter(|v| !v.is_null()) {
        Some(value) => {
            let text = value_text(value);
            parse_date(&text).ok_or_else(|| CollectError::InvalidDate {
                path: rel_path.clone(),
                value: text,
            })?
        }
        None => modified_date(path)?,
    };

    let description =
        metadata_text(&metadata, "description").unwrap_or_else(|| excerpt(body));
    let format = metadata_text(&metadata, "format");

    Ok(Document {
        title,
        date,
        description,
        output_path: output_path(&rel_path),
        body: body.to_string(),
        category: category(&rel_path),
        format,
        metadata,
        source_path: rel_path,
    })
}

/// Text of a metadata value; `null` and empty strings count as absent.
fn metadata_text(metadata: &Metadata, key: &str) -> Option<String> {
    metadata
        .get(key)
        .filter(|v| !v.is_null())
        .map(value_text)
        .filter(|s| !s.is_empty())
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn file_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    name.strip_suffix(MARKDOWN_EXTENSION)
        .map(str::to_string)
        .unwrap_or(name)
}

/// Parse a front-matter date into a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to UTC), and
/// `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` without an offset.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.with_timezone(&Utc).date_naive());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|datetime| datetime.date())
}

fn modified_date(path: &Path) -> Result<NaiveDate, CollectError> {
    let modified = fs::metadata(path)?.modified()?;
    Ok(DateTime::<Utc>::from(modified).date_naive())
}

/// First 150 characters of the body, newlines flattened to spaces.
fn excerpt(body: &str) -> String {
    body.chars()
        .take(DESCRIPTION_CHARS)
        .collect::<String>()
        .replace('\n', " ")
}

/// Relative source path → slash-separated `.html` output path.
pub fn output_path(rel_path: &Path) -> String {
    let slashed = slash_path(rel_path);
    match slashed.strip_suffix(MARKDOWN_EXTENSION) {
        Some(stem) => format!("{stem}.html"),
        None => slashed,
    }
}

/// Directory part of the relative source path, `.` at the top level.
pub fn category(rel_path: &Path) -> String {
    match rel_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => slash_path(parent),
        _ => ".".to_string(),
    }
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn check_output_paths(documents: &[Document]) -> Result<(), CollectError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for doc in documents {
        if doc.output_path == INDEX_PAGE {
            return Err(CollectError::ReservedOutput(doc.source_path.clone()));
        }
        if !seen.insert(&doc.output_path) {
            let first = documents
                .iter()
                .find(|d| d.output_path == doc.output_path)
                .map(|d| d.source_path.clone())
                .unwrap_or_default();
            return Err(CollectError::DuplicateOutput {
                first,
                second: doc.source_path.clone(),
                output: doc.output_path.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use serde_json::json;

    #[test]
    fn missing_source_dir_yields_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let docs = collect(&tmp.path().join("markdown")).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn metadata_fields_are_used() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "rain.md",
            "---\ntitle: Rain Teams\ndate: 2024-03-01\ndescription: Pelipper cores\nformat: Reg F\n---\nBody",
        );

        let docs = collect(tmp.path()).unwrap();
        let doc = find_document(&docs, "Rain Teams");
        assert_eq!(doc.display_date(), "2024-03-01");
        assert_eq!(doc.description, "Pelipper cores");
        assert_eq!(doc.format.as_deref(), Some("Reg F"));
        assert_eq!(doc.body, "Body");
        assert_eq!(doc.output_path, "rain.html");
        assert_eq!(doc.category, ".");
    }

    #[test]
    fn metadata_is_kept_verbatim() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "a.md",
            "---\ntitle: A\ndate: 2024-01-01\npokemon: [Incineroar, Rillaboom]\n---\n",
        );
        let docs = collect(tmp.path()).unwrap();
        let keys: Vec<&str> = docs[0].metadata.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "date", "pokemon"]);
        assert_eq!(docs[0].metadata["pokemon"], json!(["Incineroar", "Rillaboom"]));
    }

    #[test]
    fn defaults_apply_independently() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_file(tmp.path(), "speed-tiers.md", "---\ndate: 2024-02-02\n---\nLine one\nLine two");

        let docs = collect(tmp.path()).unwrap();
        let doc = &docs[0];
        assert_eq!(doc.title, "speed-tiers");
        assert_eq!(doc.display_date(), "2024-02-02");
        assert_eq!(doc.description, "Line one Line two");
        assert!(doc.format.is_none());
        assert!(doc.metadata.get("title").is_none());
    }

    #[test]
    fn missing_date_uses_modification_time() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_file(tmp.path(), "note.md", "Just text");

        let docs = collect(tmp.path()).unwrap();
        let today = Utc::now().date_naive();
        let diff = (today - docs[0].date).num_days().abs();
        assert!(diff <= 1, "expected a date near today, got {}", docs[0].date);
    }

    #[test]
    fn description_truncates_to_150_chars() {
        let tmp = tempfile::TempDir::new().unwrap();
        let body = "é".repeat(200);
        write_file(tmp.path(), "long.md", &format!("---\ndate: 2024-01-01\n---\n{body}"));

        let docs = collect(tmp.path()).unwrap();
        assert_eq!(docs[0].description.chars().count(), 150);
    }

    #[test]
    fn empty_title_falls_back_to_stem() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_file(tmp.path(), "blank.md", "---\ntitle: \"\"\ndate: 2024-01-01\n---\n");
        let docs = collect(tmp.path()).unwrap();
        assert_eq!(docs[0].title, "blank");
    }

    #[test]
    fn nested_documents_get_category_and_output_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_file(tmp.path(), "teams/sun/core.md", "---\ndate: 2024-01-01\n---\nx");

        let docs = collect(tmp.path()).unwrap();
        assert_eq!(docs[0].category, "teams/sun");
        assert_eq!(docs[0].output_path, "teams/sun/core.html");
        assert_eq!(docs[0].depth(), 2);
    }

    #[test]
    fn non_markdown_files_are_ignored() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_file(tmp.path(), "notes.txt", "text");
        write_file(tmp.path(), "README.markdown", "text");
        write_file(tmp.path(), "a.md", "---\ndate: 2024-01-01\n---\n");

        let docs = collect(tmp.path()).unwrap();
        assert_eq!(document_titles(&docs), vec!["a"]);
    }

    #[test]
    fn sorted_by_ascending_date() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_file(tmp.path(), "a.md", "---\ntitle: Late\ndate: 2024-05-01\n---\n");
        write_file(tmp.path(), "b.md", "---\ntitle: Early\ndate: 2023-12-31\n---\n");
        write_file(tmp.path(), "c/d.md", "---\ntitle: Middle\ndate: 2024-02-29\n---\n");

        let docs = collect(tmp.path()).unwrap();
        assert_eq!(document_titles(&docs), vec!["Early", "Middle", "Late"]);
    }

    #[test]
    fn equal_dates_keep_file_name_order() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_file(tmp.path(), "b.md", "---\ntitle: B\ndate: 2024-01-01\n---\n");
        write_file(tmp.path(), "a.md", "---\ntitle: A\ndate: 2024-01-01\n---\n");

        let docs = collect(tmp.path()).unwrap();
        assert_eq!(document_titles(&docs), vec!["A", "B"]);
    }

    #[test]
    fn invalid_date_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_file(tmp.path(), "bad.md", "---\ndate: next tuesday\n---\n");

        let err = collect(tmp.path()).unwrap_err();
        match err {
            CollectError::InvalidDate { path, value } => {
                assert_eq!(path, PathBuf::from("bad.md"));
                assert_eq!(value, "next tuesday");
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn root_index_document_is_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_file(tmp.path(), "index.md", "---\ndate: 2024-01-01\n---\n");

        let err = collect(tmp.path()).unwrap_err();
        assert!(matches!(err, CollectError::ReservedOutput(_)));
    }

    #[test]
    fn nested_index_document_is_allowed() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_file(tmp.path(), "teams/index.md", "---\ndate: 2024-01-01\n---\n");

        let docs = collect(tmp.path()).unwrap();
        assert_eq!(docs[0].output_path, "teams/index.html");
    }

    #[test]
    fn duplicate_output_paths_are_rejected() {
        let doc = sample_document("A", "2024-01-01", "same.html");
        let mut other = doc.clone();
        other.source_path = PathBuf::from("other.md");

        let err = check_output_paths(&[doc, other]).unwrap_err();
        assert!(matches!(err, CollectError::DuplicateOutput { .. }));
    }

    #[test]
    fn invalid_front_matter_names_the_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_file(tmp.path(), "broken.md", "---\n- just\n- a list\n---\n");

        let err = collect(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("broken.md"));
    }

    #[test]
    fn parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_date("2024-03-01"), Some(expected));
        assert_eq!(parse_date(" 2024-03-01 "), Some(expected));
        assert_eq!(parse_date("2024-03-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_date("2024-03-01 23:59:59"), Some(expected));
        assert_eq!(parse_date("2024-03-01T23:30:00+00:00"), Some(expected));
        // Offset timestamps resolve to the UTC calendar day
        assert_eq!(parse_date("2024-03-02T01:00:00+08:00"), Some(expected));
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("20240301"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn output_path_and_category_helpers() {
        assert_eq!(output_path(Path::new("intro.md")), "intro.html");
        assert_eq!(output_path(Path::new("a/b/c.md")), "a/b/c.html");
        assert_eq!(category(Path::new("intro.md")), ".");
        assert_eq!(category(Path::new("a/b/c.md")), "a/b");
    }
}
