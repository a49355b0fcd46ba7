//! OntoWave renderer
//!
//! Turns Markdown source into the HTML the viewer mounts, and knows which
//! links in that HTML are internal document links that should become
//! client-side routes.
//!
//! - [`markdown`]: the Markdown pipeline (anchors, footnotes, math, code, links)
//! - [`options`]: typed pipeline configuration
//! - [`links`]: internal link detection and the HTML rewrite pass
//! - [`html`]: DOM helpers for rendered fragments
//! - [`math`]: LaTeX → MathML
//! - [`code_pretty`]: class-based syntax highlighting

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub(crate) use regex_lite::Regex;
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
pub(crate) use regex::Regex;

#[cfg(feature = "syntax-highlighting")]
pub mod code_pretty;
#[cfg(all(
    feature = "syntax-css",
    not(all(target_family = "wasm", target_os = "unknown"))
))]
pub mod css;
pub mod html;
pub mod links;
pub mod markdown;
pub mod math;
pub mod options;
pub mod utils;

pub use links::{
    MARKDOWN_EXTENSION, internal_route_href, is_external, markdown_link_path, rewrite_links_html,
};
pub use markdown::MarkdownRenderer;
pub use options::{AnchorStyle, ExternalLinkPolicy, RenderOptions};
