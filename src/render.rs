//! HTML page rendering.
//!
//! Every page shares one shell ([`render_page`]): head metadata, navigation bar,
//! a `main.container` holding the page content, and a footer. Pages can sit at
//! any depth below the output root, so every internal link in the shell is
//! prefixed with `../` once per directory level:
//!
//! ```text
//! dist/index.html               depth 0   href="index.html"
//! dist/teams/rain.html          depth 1   href="../index.html"
//! dist/teams/2024/sun.html      depth 2   href="../../index.html"
//! ```
//!
//! The stylesheet URL carries the build's version token
//! (`styles.css?v=<version>`) so browsers refetch it after every build.
//!
//! Templates use [maud](https://maud.lambda.xyz/); interpolated text is escaped,
//! rendered Markdown and the search script are inserted as-is.

use crate::config::SiteSettings;
use crate::types::{BuildContext, Document, relative_prefix};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const SEARCH_JS: &str = include_str!("../static/search.js");

/// Wrap `content` in the site shell for a page `depth` levels below the root.
pub fn render_page(
    ctx: &BuildContext,
    site: &SiteSettings,
    title: &str,
    content: Markup,
    depth: usize,
) -> Markup {
    let prefix = relative_prefix(depth);
    let home = format!("{prefix}index.html");

    html! {
        (DOCTYPE)
        html lang=(site.lang) {
            head {
                meta charset="UTF-8";
                meta http-equiv="Content-Type" content="text/html; charset=utf-8";
                meta http-equiv="X-Content-Type-Options" content="nosniff";
                meta http-equiv="Cache-Control" content="no-cache, no-store, must-revalidate";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href={ (prefix) "styles.css?v=" (ctx.version) };
                link rel="stylesheet" href=(site.highlight_stylesheet);
            }
            body {
                nav.navbar {
                    div.container {
                        a.logo href=(home) { (site.logo) }
                        div.nav-links {
                            a href=(home) { (site.home_label) }
                        }
                    }
                }
                main.container {
                    (content)
                }
                footer.footer {
                    div.container {
                        p { (site.footer) }
                    }
                }
            }
        }
    }
}

/// Render the index page listing `documents` in the given order.
pub fn render_index(
    ctx: &BuildContext,
    site: &SiteSettings,
    documents: &[Document],
) -> Result<Markup, serde_json::Error> {
    let cards = documents
        .iter()
        .map(|doc| article_card(site, doc))
        .collect::<Result<Vec<_>, _>>()?;

    let content = html! {
        div.hero {
            h1 { (site.title) }
            p { (site.subtitle) }
        }
        div.search-box {
            input id="frontmatter-search" type="text" name="frontmatter-search"
                placeholder=(site.search_placeholder);
        }
        div.articles-list {
            @if cards.is_empty() {
                p.no-articles { (site.empty_message) }
            } @else {
                @for card in &cards {
                    (card)
                }
            }
        }
        script { (PreEscaped(SEARCH_JS)) }
    };

    Ok(render_page(ctx, site, &site.home_label, content, 0))
}

fn article_card(site: &SiteSettings, doc: &Document) -> Result<Markup, serde_json::Error> {
    let frontmatter = serde_json::to_string(&doc.metadata)?;
    Ok(html! {
        article.article-card data-frontmatter=(frontmatter) {
            h2 { a href=(doc.output_path) { (doc.title) } }
            div.article-meta {
                span.date { "📅 " (doc.display_date()) }
                @if doc.category != "." {
                    span.category { "📁 " (doc.category) }
                }
                @if let Some(format) = &doc.format {
                    span.format { "🏷️ " (format) }
                }
            }
            p.description { (doc.description) }
            a.read-more href=(doc.output_path) { (site.read_more) }
        }
    })
}

/// Render an article page from its already-converted body HTML.
pub fn render_article(
    ctx: &BuildContext,
    site: &SiteSettings,
    doc: &Document,
    body_html: &str,
) -> Markup {
    let depth = doc.depth();
    let back_to_home = back_to_home_href(depth);

    let content = html! {
        article.article-content {
            header.article-header {
                h1 { (doc.title) }
                div.article-meta {
                    span.date { "📅 " (doc.display_date()) }
                }
            }
            div.markdown-body {
                (PreEscaped(body_html))
            }
            div.article-footer {
                a.back-link href=(back_to_home) { (site.back_to_home) }
            }
        }
    };

    render_page(ctx, site, &doc.title, content, depth)
}

/// Link from a page at `depth` back to the index.
pub fn back_to_home_href(depth: usize) -> String {
    format!("{}index.html", relative_prefix(depth))
}
