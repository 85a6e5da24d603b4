//! Syntax highlighting for fenced code blocks.
//!
//! [`Highlight`] is the seam the Markdown renderer calls for every code block.
//! [`SyntectHighlighter`] implements it with class-annotated spans, so colors
//! come from the site stylesheet rather than inline styles.
//!
//! Language resolution:
//! 1. the fence hint, looked up by token, extension, then name;
//! 2. automatic detection from the first line (shebangs, `<?xml`, …);
//! 3. plain text.
//!
//! A hint that resolves but fails to highlight falls back to step 2.

use maud::html;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Turns source code into escaped HTML markup.
pub trait Highlight {
    fn highlight(&self, code: &str, lang: Option<&str>) -> String;
}

/// Highlighter backed by syntect's bundled syntax definitions.
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    fn find_syntax(&self, lang: &str) -> Option<&SyntaxReference> {
        self.syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .or_else(|| self.syntax_set.find_syntax_by_name(lang))
    }

    fn detect_syntax(&self, code: &str) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_first_line(code)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    fn highlight_with(
        &self,
        syntax: &SyntaxReference,
        code: &str,
    ) -> Result<String, syntect::Error> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(generator.finalize())
    }

    fn highlight_auto(&self, code: &str) -> String {
        let syntax = self.detect_syntax(code);
        match self.highlight_with(syntax, code) {
            Ok(markup) => markup,
            Err(err) => {
                tracing::debug!(%err, "auto highlighting failed, emitting plain text");
                html! { (code) }.into_string()
            }
        }
    }
}

impl Highlight for SyntectHighlighter {
    fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        if let Some(syntax) = lang.and_then(|l| self.find_syntax(l)) {
            match self.highlight_with(syntax, code) {
                Ok(markup) => return markup,
                Err(err) => {
                    tracing::debug!(lang = ?lang, %err, "highlighting failed, detecting language");
                }
            }
        }
        self.highlight_auto(code)
    }
}
