//! Stylesheet for the classes emitted by [`crate::code_pretty`].

use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, css_for_theme_with_class_style};

use crate::code_pretty::CSS_PREFIX;

pub const DEFAULT_THEME: &str = "InspiredGitHub";

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
pub enum CssError {
    #[error("unknown theme `{name}` (available: {available})")]
    #[diagnostic(code(ontowave::css::unknown_theme))]
    UnknownTheme { name: String, available: String },
    #[error(transparent)]
    #[diagnostic(code(ontowave::css::syntect))]
    Syntect(#[from] syntect::Error),
}

/// CSS for one of syntect's bundled themes.
pub fn highlight_css(theme: &str) -> Result<String, CssError> {
    let themes = ThemeSet::load_defaults();
    let Some(selected) = themes.themes.get(theme) else {
        let mut names: Vec<_> = themes.themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        return Err(CssError::UnknownTheme {
            name: theme.to_string(),
            available: names.join(", "),
        });
    };
    Ok(css_for_theme_with_class_style(
        selected,
        ClassStyle::SpacedPrefixed { prefix: CSS_PREFIX },
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_uses_prefixed_classes() {
        let css = highlight_css(DEFAULT_THEME).unwrap();
        assert!(css.contains(".ow-"));
    }

    #[test]
    fn unknown_theme_lists_alternatives() {
        let err = highlight_css("nope").unwrap_err();
        match err {
            CssError::UnknownTheme { available, .. } => assert!(available.contains(DEFAULT_THEME)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
