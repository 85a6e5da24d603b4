//! Image asset mirroring.
//!
//! Copies every image under the Markdown source tree into the output root at
//! the same relative path, so `markdown/VGC/pics/team.png` lands at
//! `dist/VGC/pics/team.png`. Anything that is not an image (notes, drafts,
//! editor files) stays behind.

use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp", "bmp", "ico"];

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Copy all images under `source_dir` to the same relative paths under
/// `target_dir`. Returns how many files were copied.
pub fn mirror(source_dir: &Path, target_dir: &Path) -> Result<usize, AssetError> {
    if !source_dir.exists() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(source_dir).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_image(entry.path()) {
            continue;
        }

        let rel_path = entry
            .path()
            .strip_prefix(source_dir)
            .unwrap_or(entry.path());
        let target = target_dir.join(rel_path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)?;
        tracing::debug!(image = %rel_path.display(), "copied image");
        copied += 1;
    }
    Ok(copied)
}

fn is_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}
