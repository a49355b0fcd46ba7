//! Fragment routing.
//!
//! The [`Router`] owns no event plumbing of its own. A [`NavigationHost`]
//! supplies the fragment, change notifications and click interception, so
//! the same routing logic runs against the browser or against
//! [`memory::MemoryHost`].

use std::rc::Rc;

use ontowave_renderer::links;

use crate::route::Route;

pub mod memory;

/// Decides whether a raw anchor href should be intercepted.
pub type LinkPredicate = Box<dyn Fn(&str) -> bool>;
/// Maps an intercepted href to the fragment to navigate to.
pub type LinkRewrite = Box<dyn Fn(&str) -> String>;

/// Navigation capabilities of a host environment.
pub trait NavigationHost {
    /// Current fragment including the leading `#`, or empty.
    fn fragment(&self) -> String;

    fn set_fragment(&self, fragment: &str);

    /// Call `on_change` after every fragment change.
    fn subscribe(&self, on_change: Box<dyn Fn()>) -> Subscription;

    /// For every anchor click whose raw href satisfies `predicate`, suppress
    /// the default navigation and set the fragment to `rewrite(href)`
    /// instead. Applies to anchors present now and added later.
    fn intercept_internal_links(&self, predicate: LinkPredicate, rewrite: LinkRewrite)
    -> Subscription;
}

/// Disposer for a listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription removes the listener"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    /// A subscription with nothing to remove.
    pub fn noop() -> Self {
        Self { dispose: None }
    }

    pub fn dispose(mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }

    /// Keep the listener for the rest of the page's life.
    pub fn forget(mut self) {
        if let Some(dispose) = self.dispose.take() {
            std::mem::forget(dispose);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.dispose.is_some())
            .finish()
    }
}

/// Tracks the route in the URL fragment and turns internal document link
/// clicks into fragment changes. Interception is installed once, when the
/// router is created, and lives as long as the router.
pub struct Router<H: NavigationHost> {
    host: Rc<H>,
    _interception: Subscription,
}

impl<H: NavigationHost + 'static> Router<H> {
    pub fn new(host: Rc<H>) -> Self {
        let interception = host.intercept_internal_links(
            Box::new(|href| links::markdown_link_path(href).is_some()),
            Box::new(|href| {
                links::internal_route_href(href).unwrap_or_else(|| Route::root().fragment())
            }),
        );
        Self {
            host,
            _interception: interception,
        }
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    /// Read of the live fragment.
    pub fn current(&self) -> Route {
        Route::from_fragment(&self.host.fragment())
    }

    /// Call `callback` with the new route on every fragment change.
    pub fn on_change(&self, callback: impl Fn(Route) + 'static) -> Subscription {
        let host = Rc::downgrade(&self.host);
        self.host.subscribe(Box::new(move || {
            if let Some(host) = host.upgrade() {
                let route = Route::from_fragment(&host.fragment());
                tracing::debug!(%route, "route changed");
                callback(route);
            }
        }))
    }

    pub fn navigate(&self, path: &str) {
        self.host.set_fragment(&Route::new(path).fragment());
    }

    /// Keep the host and link interception alive for the rest of the page's
    /// life.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::memory::{Click, MemoryHost};
    use super::*;

    fn router() -> Router<MemoryHost> {
        Router::new(Rc::new(MemoryHost::default()))
    }

    #[test]
    fn default_route_is_root() {
        assert_eq!(router().current(), Route::root());
    }

    #[test]
    fn markdown_link_click_is_intercepted() {
        let router = router();
        assert_eq!(router.host().click("guide.md"), Click::Intercepted);
        assert_eq!(router.host().fragment(), "#/guide");
        assert_eq!(router.current().path(), "/guide");
    }

    #[test]
    fn absolute_markdown_link_click() {
        let router = router();
        assert_eq!(router.host().click("/modules/x/index.md"), Click::Intercepted);
        assert_eq!(router.current().path(), "/modules/x/index");
    }

    #[test]
    fn external_markdown_link_is_not_intercepted() {
        let router = router();
        assert_eq!(
            router.host().click("https://example.com/x.md"),
            Click::Default
        );
        assert_eq!(router.current(), Route::root());
        assert_eq!(router.host().followed(), vec!["https://example.com/x.md"]);
    }

    #[test]
    fn relative_link_without_extension_is_not_intercepted() {
        let router = router();
        assert_eq!(router.host().click("other.html"), Click::Default);
        assert_eq!(router.current(), Route::root());
    }

    #[test]
    fn subscribers_see_each_route_change() {
        let router = router();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let subscription = router.on_change(move |route| sink.borrow_mut().push(route));

        router.navigate("/a");
        router.host().click("b.md");
        assert_eq!(*seen.borrow(), vec![Route::new("/a"), Route::new("/b")]);

        subscription.dispose();
        router.navigate("/c");
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn dropping_the_router_removes_interception() {
        let host = Rc::new(MemoryHost::default());
        let router = Router::new(host.clone());
        drop(router);
        assert_eq!(host.click("guide.md"), Click::Default);
    }

    #[test]
    fn forgotten_subscription_stays_active() {
        let router = router();
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        router
            .on_change(move |_| *sink.borrow_mut() += 1)
            .forget();
        router.navigate("/a");
        assert_eq!(*count.borrow(), 1);
    }
}
