//! Site build.
//!
//! Runs the whole pipeline once, strictly in order:
//!
//! ```text
//! 1. Output dir     create dist/ (and parents)
//! 2. Stylesheet     styles.css → dist/styles.css, skipped when missing
//! 3. Source dir     create markdown/ when missing (the build then has no documents)
//! 4. Assets         images under markdown/ → same paths under dist/
//! 5. Collect        markdown/**.md → documents, oldest first
//! 6. Index          dist/index.html
//! 7. Articles       per document: embeds → Markdown → article page → dist/<path>.html
//! ```
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html            # Card list with front-matter search
//! ├── styles.css            # Copied stylesheet (if present)
//! ├── intro.html            # markdown/intro.md
//! ├── teams/
//! │   └── rain.html         # markdown/teams/rain.md
//! └── VGC/pics/
//!     └── team 1.png        # Mirrored image
//! ```
//!
//! Nothing is cached between runs and a failed build leaves whatever it had
//! written so far.

use crate::assets::{self, AssetError};
use crate::collect::{self, CollectError, INDEX_PAGE};
use crate::config::SiteConfig;
use crate::embed;
use crate::highlight::SyntectHighlighter;
use crate::markdown::MarkdownRenderer;
use crate::render;
use crate::types::{BuildContext, Document};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const STYLESHEET_OUTPUT: &str = "styles.css";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Asset error: {0}")]
    Assets(#[from] AssetError),
    #[error("Collect error: {0}")]
    Collect(#[from] CollectError),
}

/// What a build wrote.
#[derive(Debug)]
pub struct BuildSummary {
    pub output_dir: PathBuf,
    /// Documents in index order
    pub documents: Vec<Document>,
    pub images_copied: usize,
    pub stylesheet_copied: bool,
    /// The Markdown directory did not exist and was created empty
    pub source_created: bool,
}

/// Paths the build reads from and writes to, resolved against the project root.
#[derive(Debug, Clone)]
pub struct SitePaths {
    pub markdown_dir: PathBuf,
    pub output_dir: PathBuf,
    pub stylesheet: PathBuf,
}

impl SitePaths {
    pub fn resolve(root: &Path, config: &SiteConfig) -> Self {
        Self {
            markdown_dir: root.join(&config.markdown_dir),
            output_dir: root.join(&config.output_dir),
            stylesheet: root.join(&config.stylesheet),
        }
    }
}

/// Build the site for the project at `root`.
pub fn build(
    root: &Path,
    config: &SiteConfig,
    ctx: &BuildContext,
) -> Result<BuildSummary, GenerateError> {
    let paths = SitePaths::resolve(root, config);

    fs::create_dir_all(&paths.output_dir)?;

    let stylesheet_copied = paths.stylesheet.is_file();
    if stylesheet_copied {
        fs::copy(&paths.stylesheet, paths.output_dir.join(STYLESHEET_OUTPUT))?;
        tracing::debug!(stylesheet = %paths.stylesheet.display(), "copied stylesheet");
    }

    let source_created = !paths.markdown_dir.exists();
    if source_created {
        fs::create_dir_all(&paths.markdown_dir)?;
        tracing::info!(
            dir = %paths.markdown_dir.display(),
            "created empty markdown directory; add .md files to it"
        );
    }

    tracing::info!(from = %paths.markdown_dir.display(), "build: mirror assets");
    let images_copied = assets::mirror(&paths.markdown_dir, &paths.output_dir)?;

    tracing::info!("build: collect documents");
    let documents = collect::collect(&paths.markdown_dir)?;

    tracing::info!(documents = documents.len(), "build: render pages");
    let index = render::render_index(ctx, &config.site, &documents)?;
    fs::write(paths.output_dir.join(INDEX_PAGE), index.into_string())?;

    let highlighter = SyntectHighlighter::new();
    let markdown = MarkdownRenderer::new(&config.markdown, &highlighter);
    for doc in &documents {
        let html = render_document(ctx, config, &markdown, doc);
        let target = paths.output_dir.join(&doc.output_path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, html)?;
        tracing::debug!(page = %doc.output_path, "wrote article");
    }

    Ok(BuildSummary {
        output_dir: paths.output_dir,
        documents,
        images_copied,
        stylesheet_copied,
        source_created,
    })
}

/// Full HTML of one article page.
pub fn render_document(
    ctx: &BuildContext,
    config: &SiteConfig,
    markdown: &MarkdownRenderer<'_>,
    doc: &Document,
) -> String {
    let body = embed::rewrite(&doc.body, doc.depth(), &config.pics_dir);
    let body_html = markdown.render(&body);
    render::render_article(ctx, &config.site, doc, &body_html).into_string()
}
