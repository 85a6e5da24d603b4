//! Markdown to HTML conversion.
//!
//! A thin layer over `pulldown-cmark` with GitHub-flavored extensions. Two
//! event rewrites happen on the way to HTML:
//!
//! - code blocks are collected and handed to a [`Highlight`] implementation,
//!   then emitted as `<pre><code class="language-…">` with the returned markup;
//! - with `breaks` enabled, soft line breaks become `<br />`, so single
//!   newlines in a note survive rendering.

use crate::config::MarkdownConfig;
use crate::highlight::Highlight;
use maud::{PreEscaped, html};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html as md_html};

pub struct MarkdownRenderer<'a> {
    highlighter: &'a dyn Highlight,
    breaks: bool,
}

/// Code block being collected between its start and end events.
struct PendingCode {
    lang: Option<String>,
    source: String,
}

impl<'a> MarkdownRenderer<'a> {
    pub fn new(config: &MarkdownConfig, highlighter: &'a dyn Highlight) -> Self {
        Self {
            highlighter,
            breaks: config.breaks,
        }
    }

    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
    }

    /// Render Markdown text to an HTML fragment.
    pub fn render(&self, markdown: &str) -> String {
        let mut events = Vec::new();
        let mut pending: Option<PendingCode> = None;

        for event in Parser::new_ext(markdown, Self::options()) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    pending = Some(PendingCode {
                        lang,
                        source: String::new(),
                    });
                }
                Event::Text(text) if pending.is_some() => {
                    if let Some(code) = pending.as_mut() {
                        code.source.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(code) = pending.take() {
                        events.push(Event::Html(self.code_block(&code).into()));
                    }
                }
                Event::SoftBreak if self.breaks => events.push(Event::HardBreak),
                other => events.push(other),
            }
        }

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        md_html::push_html(&mut out, events.into_iter());
        out
    }

    fn code_block(&self, code: &PendingCode) -> String {
        let lang = code.lang.as_deref();
        let highlighted = self.highlighter.highlight(&code.source, lang);
        let class = lang.map(|l| format!("language-{l}"));
        let mut block = html! {
            pre { code class=[class] { (PreEscaped(highlighted)) } }
        }
        .into_string();
        block.push('\n');
        block
    }
}
