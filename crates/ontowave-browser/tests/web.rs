//! WASM browser tests for ontowave-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use std::rc::Rc;

use ontowave_common::{NavigationHost, RenderTarget, Route, Router};
use ontowave_browser::{BrowserHost, DomTarget};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn attached_div() -> Element {
    let document = document();
    let div = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&div).unwrap();
    div
}

#[wasm_bindgen_test]
fn test_dom_target_mount_and_heading() {
    let target = DomTarget::new(attached_div()).unwrap();
    target.mount("<h1 id=\"a\"> Intro </h1><p>body</p>");
    assert_eq!(target.first_heading().as_deref(), Some("Intro"));

    target.mount("<p>no heading</p>");
    assert_eq!(target.first_heading(), None);
}

#[wasm_bindgen_test]
fn test_dom_target_heading_leaves_out_link_symbol() {
    let target = DomTarget::new(attached_div()).unwrap();
    target.mount(
        r##"<h1 id="intro">Intro <a class="header-anchor" href="#intro" aria-hidden="true">¶</a></h1>"##,
    );
    assert_eq!(target.first_heading().as_deref(), Some("Intro"));
    // the mounted heading keeps its permalink
    assert!(target.element().inner_html().contains("¶"));
}

#[wasm_bindgen_test]
fn test_dom_target_rewrites_internal_links_only() {
    let target = DomTarget::new(attached_div()).unwrap();
    target.mount(
        r#"<a id="i" href="guide.md">g</a><a id="e" href="https://example.com/x.md">x</a><a id="o" href="page.html">o</a>"#,
    );
    target.rewrite_links();
    target.rewrite_links();

    let href = |id: &str| {
        target
            .element()
            .query_selector(&format!("#{id}"))
            .unwrap()
            .unwrap()
            .get_attribute("href")
            .unwrap()
    };
    assert_eq!(href("i"), "#/guide");
    assert_eq!(href("e"), "https://example.com/x.md");
    assert_eq!(href("o"), "page.html");
}

#[wasm_bindgen_test]
fn test_dom_target_sets_document_title() {
    let target = DomTarget::new(attached_div()).unwrap();
    target.set_title("Intro — OntoWave");
    assert_eq!(document().title(), "Intro — OntoWave");
}

#[wasm_bindgen_test]
fn test_host_fragment_round_trip() {
    let host = BrowserHost::new(web_sys::window().unwrap()).unwrap();
    host.set_fragment("#/round/trip");
    assert_eq!(host.fragment(), "#/round/trip");
}

#[wasm_bindgen_test]
fn test_markdown_link_click_is_routed() {
    let router = Router::new(Rc::new(
        BrowserHost::new(web_sys::window().unwrap()).unwrap(),
    ));
    router.navigate("/");

    let container = attached_div();
    container.set_inner_html(r#"<a href="guide.md"><span>guide</span></a>"#);
    let span = container
        .query_selector("span")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    span.click();

    assert_eq!(router.current(), Route::new("/guide"));
}
