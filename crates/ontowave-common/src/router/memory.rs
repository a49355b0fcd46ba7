//! In-memory [`NavigationHost`] for tests and non-browser embedding.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::{LinkPredicate, LinkRewrite, NavigationHost, Subscription};

/// What a simulated click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    /// An interceptor prevented the default navigation.
    Intercepted,
    /// The host followed the link itself.
    Default,
}

type Listeners = RefCell<Vec<(u64, Rc<dyn Fn()>)>>;
type Interceptors = RefCell<Vec<(u64, Rc<(LinkPredicate, LinkRewrite)>)>>;

/// Fragment state plus listener lists. Fragment changes notify listeners
/// synchronously, and only when the fragment actually changes, like
/// `hashchange`.
#[derive(Default)]
pub struct MemoryHost {
    fragment: RefCell<String>,
    listeners: Rc<Listeners>,
    interceptors: Rc<Interceptors>,
    followed: RefCell<Vec<String>>,
    next_id: Cell<u64>,
}

impl MemoryHost {
    pub fn with_fragment(fragment: &str) -> Self {
        let host = Self::default();
        *host.fragment.borrow_mut() = fragment.to_string();
        host
    }

    /// Simulate a click on an anchor with the given raw href.
    pub fn click(&self, href: &str) -> Click {
        let interceptor = self
            .interceptors
            .borrow()
            .iter()
            .map(|(_, interceptor)| interceptor.clone())
            .find(|interceptor| (interceptor.0)(href));
        if let Some(interceptor) = interceptor {
            let fragment = (interceptor.1)(href);
            self.set_fragment(&fragment);
            return Click::Intercepted;
        }

        self.followed.borrow_mut().push(href.to_string());
        if href.starts_with('#') {
            self.set_fragment(href);
        }
        Click::Default
    }

    /// Hrefs the host navigated to without interception.
    pub fn followed(&self) -> Vec<String> {
        self.followed.borrow().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl NavigationHost for MemoryHost {
    fn fragment(&self) -> String {
        self.fragment.borrow().clone()
    }

    fn set_fragment(&self, fragment: &str) {
        let fragment = if fragment.starts_with('#') {
            fragment.to_string()
        } else {
            format!("#{fragment}")
        };
        if *self.fragment.borrow() == fragment {
            return;
        }
        *self.fragment.borrow_mut() = fragment;

        // listeners may subscribe or navigate; don't hold the borrow
        let listeners: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener();
        }
    }

    fn subscribe(&self, on_change: Box<dyn Fn()>) -> Subscription {
        let id = self.next_id();
        self.listeners.borrow_mut().push((id, Rc::from(on_change)));
        let listeners: Weak<Listeners> = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().retain(|(other, _)| *other != id);
            }
        })
    }

    fn intercept_internal_links(
        &self,
        predicate: LinkPredicate,
        rewrite: LinkRewrite,
    ) -> Subscription {
        let id = self.next_id();
        self.interceptors
            .borrow_mut()
            .push((id, Rc::new((predicate, rewrite))));
        let interceptors: Weak<Interceptors> = Rc::downgrade(&self.interceptors);
        Subscription::new(move || {
            if let Some(interceptors) = interceptors.upgrade() {
                interceptors.borrow_mut().retain(|(other, _)| *other != id);
            }
        })
    }
}
