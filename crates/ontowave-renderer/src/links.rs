//! Internal document links.
//!
//! A link is an internal document link when its raw href ends in
//! [`MARKDOWN_EXTENSION`] and it is not an absolute external URL. Such links
//! map onto the fragment route scheme: `guide.md` → `#/guide`,
//! `/a/b.md` → `#/a/b`. Rewritten hrefs no longer end in `.md`, so every
//! rewrite here is idempotent.

use std::borrow::Cow;
use std::sync::LazyLock;

use crate::{Regex, html};

pub const MARKDOWN_EXTENSION: &str = ".md";

static EXTERNAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:https?:)?//").expect("external link regex"));

/// Absolute `http(s)` or protocol-relative URL.
pub fn is_external(href: &str) -> bool {
    EXTERNAL_RE.is_match(href)
}

/// Logical route path for an internal document link, or `None` when the href
/// is not one.
pub fn markdown_link_path(href: &str) -> Option<String> {
    if is_external(href) {
        return None;
    }
    let stem = href.strip_suffix(MARKDOWN_EXTENSION)?;
    if stem.starts_with('/') {
        Some(stem.to_string())
    } else {
        Some(format!("/{stem}"))
    }
}

/// Fragment href (`#/path`) for an internal document link.
pub fn internal_route_href(href: &str) -> Option<String> {
    markdown_link_path(href).map(|path| format!("#{path}"))
}

/// Rewrite pass over an HTML fragment: every `<a>` whose href is an internal
/// document link gets the fragment route instead. The input comes back
/// untouched when there is nothing to rewrite.
pub fn rewrite_links_html(fragment: &str) -> Cow<'_, str> {
    let (_dom, Some(body)) = html::parse_fragment(fragment) else {
        return Cow::Borrowed(fragment);
    };

    let mut rewritten = 0;
    for anchor in html::find_all(&body, "a") {
        let route = html::attribute(&anchor, "href")
            .as_deref()
            .and_then(internal_route_href);
        if let Some(route) = route {
            html::set_attribute(&anchor, "href", &route);
            rewritten += 1;
        }
    }
    if rewritten == 0 {
        return Cow::Borrowed(fragment);
    }
    tracing::trace!(rewritten, "rewrote internal links");
    Cow::Owned(html::serialize_children(&body))
}
