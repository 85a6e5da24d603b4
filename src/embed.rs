//! Rewriting of `![[name]]` image embeds.
//!
//! Note-taking tools reference images as `![[photo 1.png]]`. Standard
//! Markdown has no such syntax, so before rendering every embed becomes a
//! regular image link into the pictures directory, relative to the page:
//!
//! ```text
//! ![[photo 1.png]]   at depth 2   →   ![photo 1.png](../../VGC/pics/photo%201.png)
//! ```
//!
//! The link is surrounded by blank lines so it renders as its own block, then
//! runs of three or more newlines are collapsed back to one blank line.
//! Whether the image exists is not checked.

use crate::types::relative_prefix;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static EMBED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[([^\]]+)\]\]").expect("embed pattern is valid"));

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("newline pattern is valid"));

/// Replace every embed in `body` with an image link for a page `depth`
/// directories below the output root.
pub fn rewrite(body: &str, depth: usize, pics_dir: &str) -> String {
    let prefix = relative_prefix(depth);
    let pics_dir = pics_dir.trim_end_matches('/');

    let replaced = EMBED.replace_all(body, |caps: &Captures| {
        let name = &caps[1];
        let target = format!("{prefix}{pics_dir}/{name}").replace(' ', "%20");
        format!("\n\n![{name}]({target})\n\n")
    });

    EXCESS_NEWLINES.replace_all(&replaced, "\n\n").into_owned()
}
