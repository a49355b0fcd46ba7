use ontowave_common::RenderTarget;
use ontowave_common::ontowave_renderer::internal_route_href;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

/// Renders into a DOM element and titles its owner document.
#[derive(Debug, Clone)]
pub struct DomTarget {
    element: Element,
    document: Document,
}

impl DomTarget {
    /// `None` for elements with no owner document.
    pub fn new(element: Element) -> Option<Self> {
        let document = element.owner_document()?;
        Some(Self { element, document })
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl RenderTarget for DomTarget {
    fn mount(&self, html: &str) {
        self.element.set_inner_html(html);
    }

    fn rewrite_links(&self) {
        let anchors = match self.element.query_selector_all("a[href]") {
            Ok(anchors) => anchors,
            Err(err) => {
                tracing::warn!(error = ?err, "anchor query failed");
                return;
            }
        };
        for index in 0..anchors.length() {
            let Some(anchor) = anchors
                .get(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let Some(route) = anchor
                .get_attribute("href")
                .and_then(|href| internal_route_href(&href))
            else {
                continue;
            };
            if let Err(err) = anchor.set_attribute("href", &route) {
                tracing::warn!(%route, error = ?err, "failed to rewrite link");
            }
        }
    }

    fn first_heading(&self) -> Option<String> {
        let heading = self.element.query_selector("h1").ok().flatten()?;
        // permalink symbols are aria-hidden and not part of the title
        let heading: Element = heading.clone_node_with_deep(true).ok()?.dyn_into().ok()?;
        if let Ok(hidden) = heading.query_selector_all(r#"[aria-hidden="true"]"#) {
            for index in 0..hidden.length() {
                if let Some(node) = hidden
                    .get(index)
                    .and_then(|node| node.dyn_into::<Element>().ok())
                {
                    node.remove();
                }
            }
        }
        let text = heading.text_content()?;
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    fn set_title(&self, title: &str) {
        self.document.set_title(title);
    }
}
