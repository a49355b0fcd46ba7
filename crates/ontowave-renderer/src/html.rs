//! Rendered HTML as a DOM.
//!
//! Mounted documents may carry hand-written HTML, so anchors and headings are
//! found by parsing rather than pattern matching: attribute quoting, entity
//! references and look-alike attributes such as `data-href` are the parser's
//! problem.

use html5ever::parse_document;
use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{Attribute, LocalName, Namespace, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// Parse a body fragment. Returns the document and its `<body>`.
pub fn parse_fragment(html: &str) -> (RcDom, Option<Handle>) {
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{html}</body></html>");
    let dom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .one(wrapped.as_bytes());
    let body = find_first(&dom.document, "body");
    (dom, body)
}

/// Every element named `name` under `handle`, in document order.
pub fn find_all(handle: &Handle, name: &str) -> Vec<Handle> {
    let mut found = Vec::new();
    collect(handle, name, &mut found);
    found
}

fn collect(handle: &Handle, name: &str, found: &mut Vec<Handle>) {
    if is_element(handle, name) {
        found.push(handle.clone());
    }
    for child in handle.children.borrow().iter() {
        collect(child, name, found);
    }
}

pub fn find_first(handle: &Handle, name: &str) -> Option<Handle> {
    if is_element(handle, name) {
        return Some(handle.clone());
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_first(child, name))
}

fn is_element(handle: &Handle, name: &str) -> bool {
    matches!(&handle.data, NodeData::Element { name: qname, .. } if qname.local.as_ref() == name)
}

pub fn attribute(handle: &Handle, name: &str) -> Option<String> {
    let NodeData::Element { attrs, .. } = &handle.data else {
        return None;
    };
    attrs
        .borrow()
        .iter()
        .find(|attr| attr.name.local.as_ref() == name)
        .map(|attr| attr.value.to_string())
}

pub fn set_attribute(handle: &Handle, name: &str, value: &str) {
    let NodeData::Element { attrs, .. } = &handle.data else {
        return;
    };
    let mut attrs = attrs.borrow_mut();
    match attrs.iter_mut().find(|attr| attr.name.local.as_ref() == name) {
        Some(attr) => attr.value = StrTendril::from(value),
        None => attrs.push(Attribute {
            name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
            value: StrTendril::from(value),
        }),
    }
}

/// Markup of the children of `handle`, without `handle` itself.
pub fn serialize_children(handle: &Handle) -> String {
    let mut bytes = Vec::new();
    let node: SerializableHandle = handle.clone().into();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    if let Err(err) = serialize(&mut bytes, &node, opts) {
        tracing::warn!(error = %err, "html serialization failed");
    }
    String::from_utf8(bytes).unwrap_or_default()
}

/// Visible text under `handle`. Subtrees marked `aria-hidden="true"` are
/// decoration (heading permalinks) and are skipped.
pub fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    push_text(handle, &mut text);
    text
}

fn push_text(handle: &Handle, text: &mut String) {
    match &handle.data {
        NodeData::Text { contents } => text.push_str(&contents.borrow()),
        NodeData::Element { .. } | NodeData::Document => {
            if attribute(handle, "aria-hidden").as_deref() == Some("true") {
                return;
            }
            for child in handle.children.borrow().iter() {
                push_text(child, text);
            }
        }
        _ => {}
    }
}

/// Trimmed text of the first `<h1>` in a fragment, when it has any.
pub fn first_heading_text(html: &str) -> Option<String> {
    let (_dom, body) = parse_fragment(html);
    let heading = find_first(&body?, "h1")?;
    let text = text_content(&heading);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
