//! Shared test utilities.
//!
//! Builders for in-memory [`Document`]s, a file writer for temp project trees,
//! and lookups that panic with a readable message on miss.

use crate::types::{Document, Metadata};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Read a generated file from `root/dist`.
pub fn read_output(root: &Path, rel: &str) -> String {
    let path = root.join("dist").join(rel);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

/// A document as the collector would produce it for a top-level or nested file.
///
/// `date` is `YYYY-MM-DD`; the metadata holds only the title.
pub fn sample_document(title: &str, date: &str, output_path: &str) -> Document {
    let source = output_path
        .strip_suffix(".html")
        .map(|stem| format!("{stem}.md"))
        .unwrap_or_else(|| output_path.to_string());
    let category = match output_path.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => ".".to_string(),
    };
    let mut metadata = Metadata::new();
    metadata.insert("title".to_string(), serde_json::json!(title));

    Document {
        title: title.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        description: String::new(),
        output_path: output_path.to_string(),
        body: String::new(),
        metadata,
        category,
        format: None,
        source_path: PathBuf::from(source),
    }
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a document by title. Panics if not found.
pub fn find_document<'a>(documents: &'a [Document], title: &str) -> &'a Document {
    documents
        .iter()
        .find(|d| d.title == title)
        .unwrap_or_else(|| {
            let titles = document_titles(documents);
            panic!("document '{title}' not found. Available: {titles:?}")
        })
}

/// All document titles in order.
pub fn document_titles(documents: &[Document]) -> Vec<&str> {
    documents.iter().map(|d| d.title.as_str()).collect()
}
