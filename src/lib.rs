//! # vgc-site
//!
//! Builds a static site from a directory of Markdown study notes. Each note
//! becomes a page; the index lists every note as a card that can be filtered
//! by its front-matter, client-side, without a server.
//!
//! # Pipeline
//!
//! ```text
//! markdown/**.md ──collect──▶ Documents (sorted by date)
//!                                  │
//!                    embed::rewrite (![[img]] → ![img](../VGC/pics/img))
//!                                  │
//!                    markdown (pulldown-cmark + syntect highlighting)
//!                                  │
//!                    render (maud page shell, depth-relative links)
//!                                  ▼
//!                               dist/
//! ```
//!
//! Images anywhere under the source tree are mirrored into the output root by
//! [`assets`], so embeds resolve against the same relative layout.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`generate`] | Runs a full build and reports what it wrote |
//! | [`collect`] | Walks the source tree and derives [`types::Document`]s |
//! | [`front_matter`] | Splits YAML front-matter from the Markdown body |
//! | [`embed`] | Rewrites `![[name]]` embeds into image links |
//! | [`markdown`] | Markdown → HTML with a pluggable code highlighter |
//! | [`highlight`] | syntect-backed highlighter with language auto-detection |
//! | [`render`] | Page shell, index page and article pages |
//! | [`assets`] | Copies images into the output tree |
//! | [`config`] | Optional `config.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Depth-Relative Links
//!
//! The output has to work from any URL prefix (a GitHub Pages project path,
//! a subdirectory, `file://`), so no page uses absolute links. A page at
//! `teams/2024/rain.html` reaches the root through `../../`.
//!
//! ## One Version Token Per Build
//!
//! The stylesheet URL carries `?v=<build start in ms>`. The token lives in a
//! [`types::BuildContext`] created once and passed to every render call, so
//! two builds with the same context produce identical bytes.
//!
//! ## Strict Inputs
//!
//! Unparseable dates, two notes mapping to the same page, and a top-level
//! `index.md` shadowing the generated index all stop the build instead of
//! producing a silently wrong site.

pub mod assets;
pub mod collect;
pub mod config;
pub mod embed;
pub mod front_matter;
pub mod generate;
pub mod highlight;
pub mod logging;
pub mod markdown;
pub mod output;
pub mod render;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
