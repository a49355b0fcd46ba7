//! Typed configuration for the Markdown pipeline.

/// How headings expose a permalink to themselves.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AnchorStyle {
    /// Headings get an `id` but no visible link.
    IdOnly,
    /// The heading content is wrapped in a link to its own anchor.
    #[default]
    HeaderLink,
    /// A trailing `¶` link is appended after the heading content.
    LinkSymbol,
}

/// What happens to links that leave the site.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ExternalLinkPolicy {
    /// Rendered like any other link.
    SameContext,
    /// `target="_blank"` with `rel="noopener noreferrer"`.
    #[default]
    NewContext,
}

/// The full extension set of the Markdown pipeline.
///
/// The default matches what the viewer ships with: trusted raw HTML, bare URL
/// autolinking, header-link anchors, footnotes, math, and external links
/// opened in a new browsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub anchors: AnchorStyle,
    pub footnotes: bool,
    pub math: bool,
    /// Pass raw HTML through. When off, HTML in the source is escaped.
    pub raw_html: bool,
    /// Turn bare `http(s)://` URLs in text into links.
    pub linkify: bool,
    pub external_links: ExternalLinkPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            anchors: AnchorStyle::default(),
            footnotes: true,
            math: true,
            raw_html: true,
            linkify: true,
            external_links: ExternalLinkPolicy::default(),
        }
    }
}

impl RenderOptions {
    pub(crate) fn md_options(&self) -> markdown_weaver::Options {
        let mut options = markdown_weaver::Options::ENABLE_TABLES
            | markdown_weaver::Options::ENABLE_GFM
            | markdown_weaver::Options::ENABLE_STRIKETHROUGH
            | markdown_weaver::Options::ENABLE_TASKLISTS
            | markdown_weaver::Options::ENABLE_HEADING_ATTRIBUTES;
        if self.footnotes {
            options |= markdown_weaver::Options::ENABLE_FOOTNOTES;
        }
        if self.math {
            options |= markdown_weaver::Options::ENABLE_MATH;
        }
        options
    }
}
