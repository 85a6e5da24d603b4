//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines (pure, tested) and a
//! `print_*` wrapper that writes them to stdout.
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! 001 Speed Tiers → speed-tiers.html
//! 002 Rain Teams → teams/rain.html
//!
//! Generated 2 documents, 3 images → dist
//! ```
//!
//! ## Check
//!
//! ```text
//! Documents
//! 001 Speed Tiers (2024-01-05)
//!     Source: speed-tiers.md
//! 002 Rain Teams (2024-03-01)
//!     Source: teams/rain.md
//!     Format: Reg F
//! ```

use crate::generate::BuildSummary;
use crate::types::Document;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

pub fn format_build_output(summary: &BuildSummary) -> Vec<String> {
    let mut lines = vec!["Home \u{2192} index.html".to_string()];

    for (i, doc) in summary.documents.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            doc.title,
            doc.output_path
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {} \u{2192} {}",
        plural(summary.documents.len(), "document"),
        plural(summary.images_copied, "image"),
        summary.output_dir.display()
    ));
    lines
}

pub fn print_build_output(summary: &BuildSummary) {
    for line in format_build_output(summary) {
        println!("{}", line);
    }
}

pub fn format_check_output(documents: &[Document]) -> Vec<String> {
    let mut lines = vec!["Documents".to_string()];
    if documents.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, doc) in documents.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            doc.title,
            doc.display_date()
        ));
        lines.push(format!("    Source: {}", doc.source_path.display()));
        if let Some(format) = &doc.format {
            lines.push(format!("    Format: {}", format));
        }
    }
    lines
}

pub fn print_check_output(documents: &[Document]) {
    for line in format_check_output(documents) {
        println!("{}", line);
    }
}
