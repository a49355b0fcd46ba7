//! `window.location.hash` as a [`NavigationHost`].

use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use ontowave_common::router::{LinkPredicate, LinkRewrite};
use ontowave_common::{NavigationHost, Subscription};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Location, Window};

pub struct BrowserHost {
    window: Window,
    document: Document,
}

impl BrowserHost {
    pub fn new(window: Window) -> Option<Self> {
        let document = window.document()?;
        Some(Self { window, document })
    }

    fn location(&self) -> Location {
        self.window.location()
    }
}

fn set_hash(location: &Location, fragment: &str) {
    if let Err(err) = location.set_hash(fragment) {
        tracing::warn!(fragment, error = ?err, "failed to set location hash");
    }
}

/// The nearest anchor with an `href` at or above the event target.
fn clicked_href(event: &web_sys::Event) -> Option<String> {
    let element = event.target()?.dyn_into::<Element>().ok()?;
    let anchor = element.closest("a[href]").ok().flatten()?;
    anchor.get_attribute("href")
}

impl NavigationHost for BrowserHost {
    fn fragment(&self) -> String {
        self.location().hash().unwrap_or_default()
    }

    fn set_fragment(&self, fragment: &str) {
        set_hash(&self.location(), fragment);
    }

    fn subscribe(&self, on_change: Box<dyn Fn()>) -> Subscription {
        let listener = EventListener::new(&self.window, "hashchange", move |_| on_change());
        Subscription::new(move || drop(listener))
    }

    fn intercept_internal_links(
        &self,
        predicate: LinkPredicate,
        rewrite: LinkRewrite,
    ) -> Subscription {
        let location = self.location();
        // Document-level capture sees clicks on anchors mounted later too.
        let options = EventListenerOptions {
            phase: EventListenerPhase::Capture,
            passive: false,
        };
        let listener =
            EventListener::new_with_options(&self.document, "click", options, move |event| {
                let Some(href) = clicked_href(event) else {
                    return;
                };
                if !predicate(&href) {
                    return;
                }
                event.prevent_default();
                let fragment = rewrite(&href);
                tracing::debug!(%href, %fragment, "intercepted document link");
                set_hash(&location, &fragment);
            });
        Subscription::new(move || drop(listener))
    }
}
