//! Where rendered HTML goes.

use std::cell::RefCell;

use ontowave_renderer::html::first_heading_text;
use ontowave_renderer::rewrite_links_html;

/// A mount point for rendered documents, passed to the viewer by reference
/// rather than looked up, so several viewers can coexist.
pub trait RenderTarget {
    /// Replace the mounted content.
    fn mount(&self, html: &str);

    /// Rewrite internal document links inside the mounted content.
    fn rewrite_links(&self);

    /// Trimmed text of the first `<h1>`, if there is one with any text.
    fn first_heading(&self) -> Option<String>;

    fn set_title(&self, title: &str);
}

impl<T: RenderTarget + ?Sized> RenderTarget for &T {
    fn mount(&self, html: &str) {
        (**self).mount(html)
    }

    fn rewrite_links(&self) {
        (**self).rewrite_links()
    }

    fn first_heading(&self) -> Option<String> {
        (**self).first_heading()
    }

    fn set_title(&self, title: &str) {
        (**self).set_title(title)
    }
}

impl<T: RenderTarget + ?Sized> RenderTarget for std::rc::Rc<T> {
    fn mount(&self, html: &str) {
        (**self).mount(html)
    }

    fn rewrite_links(&self) {
        (**self).rewrite_links()
    }

    fn first_heading(&self) -> Option<String> {
        (**self).first_heading()
    }

    fn set_title(&self, title: &str) {
        (**self).set_title(title)
    }
}

/// Holds the mounted document as an HTML string.
#[derive(Debug, Default)]
pub struct StringTarget {
    html: RefCell<String>,
    title: RefCell<Option<String>>,
}

impl StringTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html(&self) -> String {
        self.html.borrow().clone()
    }

    pub fn title(&self) -> Option<String> {
        self.title.borrow().clone()
    }
}

impl RenderTarget for StringTarget {
    fn mount(&self, html: &str) {
        *self.html.borrow_mut() = html.to_string();
    }

    fn rewrite_links(&self) {
        let rewritten = rewrite_links_html(&self.html.borrow()).into_owned();
        *self.html.borrow_mut() = rewritten;
    }

    fn first_heading(&self) -> Option<String> {
        first_heading_text(&self.html.borrow())
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = Some(title.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_heading_strips_markup() {
        let target = StringTarget::new();
        target.mount(r##"<h1 id="a"><a class="header-anchor" href="#a">Fish &amp; <em>Chips</em></a></h1><h1>Second</h1>"##);
        assert_eq!(target.first_heading().as_deref(), Some("Fish & Chips"));
    }

    #[test]
    fn first_heading_decodes_named_entities() {
        let target = StringTarget::new();
        target.mount("<h1>Caf&eacute; &mdash; menu</h1>");
        assert_eq!(target.first_heading().as_deref(), Some("Café — menu"));
    }

    #[test]
    fn first_heading_leaves_out_link_symbol() {
        let target = StringTarget::new();
        target.mount(r##"<h1 id="intro">Intro <a class="header-anchor" href="#intro" aria-hidden="true">¶</a></h1>"##);
        assert_eq!(target.first_heading().as_deref(), Some("Intro"));
    }

    #[test]
    fn no_heading() {
        let target = StringTarget::new();
        target.mount("<h2>Not it</h2><p>body</p>");
        assert_eq!(target.first_heading(), None);
        target.mount("<h1>  </h1>");
        assert_eq!(target.first_heading(), None);
    }

    #[test]
    fn rewrite_pass_twice_equals_once() {
        let target = StringTarget::new();
        target.mount(r#"<p><a href="guide.md">g</a> <a href="https://x.example/a.md">x</a></p>"#);
        target.rewrite_links();
        let once = target.html();
        target.rewrite_links();
        assert_eq!(target.html(), once);
        assert!(once.contains(r##"href="#/guide""##));
        assert!(once.contains(r#"href="https://x.example/a.md""#));
    }

    #[test]
    fn rewrite_handles_single_quotes_and_data_href() {
        let target = StringTarget::new();
        target.mount(r#"<p><a href='guide.md'>g</a> <a data-href="x.md" href="y.md">y</a></p>"#);
        target.rewrite_links();
        assert_eq!(
            target.html(),
            r##"<p><a href="#/guide">g</a> <a data-href="x.md" href="#/y">y</a></p>"##
        );
    }
}
