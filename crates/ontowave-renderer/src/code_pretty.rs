//! Class-based syntax highlighting for fenced code blocks.
//!
//! Output uses `ow-` prefixed classes so it can be styled by the stylesheet
//! from [`crate::css`] (native) or a prebuilt one (browser).

use std::sync::LazyLock;

use markdown_weaver_escape::escape_html_body_text;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

pub const CSS_PREFIX: &str = "ow-";

pub(crate) static SYNTAX_SET: LazyLock<SyntaxSet> =
    LazyLock::new(SyntaxSet::load_defaults_newlines);

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
pub enum HighlightError {
    #[error("no syntax definition for language `{0}`")]
    #[diagnostic(code(ontowave::highlight::unknown_language))]
    UnknownLanguage(String),
    #[error(transparent)]
    #[diagnostic(code(ontowave::highlight::syntect))]
    Syntect(#[from] syntect::Error),
}

/// Highlighted HTML for the inner content of a `<code>` element.
pub fn highlight(syntax_set: &SyntaxSet, lang: &str, code: &str) -> Result<String, HighlightError> {
    let syntax = syntax_set
        .find_syntax_by_token(lang)
        .ok_or_else(|| HighlightError::UnknownLanguage(lang.to_string()))?;
    let mut generator = ClassedHTMLGenerator::new_with_class_style(
        syntax,
        syntax_set,
        ClassStyle::SpacedPrefixed { prefix: CSS_PREFIX },
    );
    for line in LinesWithEndings::from(code) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    Ok(generator.finalize())
}

/// A complete `<pre><code>` block. Unknown languages and highlighter failures
/// degrade to escaped plain text.
pub fn code_block(lang: Option<&str>, code: &str) -> String {
    match lang.map(str::trim).filter(|lang| !lang.is_empty()) {
        Some(lang) => finish_block(lang, code, highlight(&SYNTAX_SET, lang, code)),
        None => plain_block(code),
    }
}

fn finish_block(lang: &str, code: &str, highlighted: Result<String, HighlightError>) -> String {
    match highlighted {
        Ok(highlighted) => {
            let mut out = String::from("<pre class=\"hljs\"><code class=\"language-");
            let _ = markdown_weaver_escape::escape_html(&mut out, lang);
            out.push_str("\">");
            out.push_str(&highlighted);
            out.push_str("</code></pre>\n");
            out
        }
        Err(HighlightError::UnknownLanguage(_)) => plain_block(code),
        Err(err) => {
            tracing::warn!(lang, error = %err, "highlighting failed, using plain text");
            plain_block(code)
        }
    }
}

pub(crate) fn plain_block(code: &str) -> String {
    let mut out = String::from("<pre class=\"hljs\"><code>");
    let _ = escape_html_body_text(&mut out, code);
    out.push_str("</code></pre>\n");
    out
}
