//! Document resolution: logical path → candidate locations → Markdown text.

use crate::config::Root;
use crate::source::DocumentSource;

/// Stem used for the root route.
pub const INDEX_STEM: &str = "/index";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Normalized<'p> {
    Root,
    Path(std::borrow::Cow<'p, str>),
}

/// One trailing slash is dropped; empty and `/` are both the root.
fn normalize(path: &str) -> Normalized<'_> {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    if trimmed.is_empty() || trimmed == "/" {
        Normalized::Root
    } else if trimmed.starts_with('/') {
        Normalized::Path(trimmed.into())
    } else {
        Normalized::Path(format!("/{trimmed}").into())
    }
}

/// Every location to try for `path`, in order.
///
/// For each root in configuration order: `<root><path>.md`, then
/// `<root><path>/index.md`. The root route only has `<root>/index.md`.
pub fn candidates(roots: &[Root], path: &str) -> Vec<String> {
    let normalized = normalize(path);
    let mut out = Vec::with_capacity(roots.len() * 2);
    for root in roots {
        let prefix = root.root.strip_suffix('/').unwrap_or(&root.root);
        match &normalized {
            Normalized::Root => out.push(format!("{prefix}{INDEX_STEM}.md")),
            Normalized::Path(path) => {
                out.push(format!("{prefix}{path}.md"));
                out.push(format!("{prefix}{path}/index.md"));
            }
        }
    }
    out
}

/// Markdown shown when no candidate exists.
pub fn not_found_document(path: &str) -> String {
    format!("# 404 — Not found\n\nNo document for `{path}`\n")
}

/// Outcome of a resolution. `location` is `None` when nothing matched and
/// `markdown` is the not-found document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub location: Option<String>,
    pub markdown: String,
}

impl Resolved {
    pub fn is_found(&self) -> bool {
        self.location.is_some()
    }
}

/// Try candidates strictly one after another; the first success wins.
/// Never fails.
pub async fn resolve(source: &impl DocumentSource, roots: &[Root], path: &str) -> Resolved {
    for location in candidates(roots, path) {
        match source.fetch_text(&location).await {
            Ok(markdown) => {
                tracing::debug!(path, %location, "resolved");
                return Resolved {
                    location: Some(location),
                    markdown,
                };
            }
            Err(err) => tracing::debug!(path, error = %err, "candidate miss"),
        }
    }
    tracing::info!(path, "no document found");
    Resolved {
        location: None,
        markdown: not_found_document(path),
    }
}
