//! `$…$` and `$$…$$` spans as MathML.
//!
//! Each span is written straight into the output wrapped in a
//! `<span class="math math-inline|math-display">`. The TeX source rides
//! along as a MathML annotation so copy/paste and screen readers get it.
//! Source that does not parse is shown as escaped TeX inside the same
//! wrapper with a `math-error` class; rendering never fails.

use markdown_weaver_escape::escape_html;
use pulldown_latex::config::{DisplayMode, RenderConfig};
use pulldown_latex::mathml::push_mathml;
use pulldown_latex::{Parser, Storage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathMode {
    /// `$…$`, flows with the surrounding text.
    Inline,
    /// `$$…$$`, laid out as its own block.
    Display,
}

impl MathMode {
    fn class(self) -> &'static str {
        match self {
            MathMode::Inline => "math-inline",
            MathMode::Display => "math-display",
        }
    }

    fn display_mode(self) -> DisplayMode {
        match self {
            MathMode::Inline => DisplayMode::Inline,
            MathMode::Display => DisplayMode::Block,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, miette::Diagnostic)]
#[error("{message}")]
#[diagnostic(code(ontowave::math::latex))]
pub struct MathError {
    pub message: String,
}

/// MathML for `tex`, or the first problem found in it.
pub fn to_mathml(tex: &str, mode: MathMode) -> Result<String, MathError> {
    let storage = Storage::new();
    let events: Vec<_> = Parser::new(tex, &storage).collect();
    if let Some(err) = events.iter().find_map(|event| event.as_ref().err()) {
        return Err(MathError {
            message: err.to_string(),
        });
    }

    let config = RenderConfig {
        display_mode: mode.display_mode(),
        annotation: Some(tex),
        ..Default::default()
    };
    let mut mathml = String::new();
    push_mathml(&mut mathml, events.into_iter(), config).map_err(|err| MathError {
        message: err.to_string(),
    })?;
    Ok(mathml)
}

/// Append the wrapped span for `tex` to `out`.
pub fn push_math(out: &mut String, tex: &str, mode: MathMode) {
    match to_mathml(tex, mode) {
        Ok(mathml) => {
            out.push_str(r#"<span class="math "#);
            out.push_str(mode.class());
            out.push_str(r#"">"#);
            out.push_str(&mathml);
        }
        Err(err) => {
            tracing::debug!(error = %err, tex, "math left as source");
            out.push_str(r#"<span class="math "#);
            out.push_str(mode.class());
            out.push_str(r#" math-error" title=""#);
            let _ = escape_html(&mut *out, &err.message);
            out.push_str(r#""><code>"#);
            let _ = escape_html(&mut *out, tex);
            out.push_str("</code>");
        }
    }
    out.push_str("</span>");
}
