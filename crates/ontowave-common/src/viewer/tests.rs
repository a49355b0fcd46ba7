use std::cell::RefCell;
use std::collections::HashMap;
use std::task::{Context, Poll, Waker};

use tokio::sync::oneshot;

use super::*;
use crate::config::Root;
use crate::error::FetchError;
use crate::router::memory::MemoryHost;
use crate::source::MemorySource;
use crate::target::StringTarget;

fn docs_config() -> AppConfig {
    AppConfig::new(vec![Root::new("/", "/docs")])
}

fn viewer(documents: MemorySource) -> Viewer<MemorySource, StringTarget> {
    Viewer::new(
        docs_config(),
        documents,
        StringTarget::new(),
        ViewerSettings::default(),
    )
}

/// Holds individual locations back until their gate is opened.
struct GatedSource {
    inner: MemorySource,
    gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
}

impl GatedSource {
    fn gate(&self, location: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(location.to_string(), rx);
        tx
    }
}

impl DocumentSource for GatedSource {
    async fn fetch_text(&self, location: &str) -> Result<String, FetchError> {
        let gate = self.gates.borrow_mut().remove(location);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.inner.fetch_text(location).await
    }
}

#[tokio::test]
async fn renders_heading_links_and_title() {
    let viewer = viewer(MemorySource::new([(
        "/docs/intro.md",
        "# Intro\n\nSee [guide](guide.md).",
    )]));
    let outcome = viewer.render_route(&Route::new("/intro")).await;
    assert_eq!(
        outcome,
        RenderOutcome::Rendered {
            title: Some("Intro — OntoWave".to_string())
        }
    );

    let html = viewer.target().html();
    assert!(html.contains("<h1"));
    assert!(html.contains(r##"href="#/guide""##));
    assert_eq!(viewer.target().title().as_deref(), Some("Intro — OntoWave"));
}

#[tokio::test]
async fn missing_document_mounts_not_found() {
    let viewer = viewer(MemorySource::default());
    let outcome = viewer.render_route(&Route::new("/missing")).await;
    assert!(matches!(outcome, RenderOutcome::Rendered { title: Some(_) }));
    let html = viewer.target().html();
    assert!(html.contains("404"));
    assert!(html.contains("/missing"));
}

#[tokio::test]
async fn headingless_document_keeps_the_previous_title() {
    let viewer = viewer(MemorySource::new([
        ("/docs/a.md", "# First"),
        ("/docs/b.md", "just text"),
    ]));
    viewer.render_route(&Route::new("/a")).await;
    let outcome = viewer.render_route(&Route::new("/b")).await;
    assert_eq!(outcome, RenderOutcome::Rendered { title: None });
    assert_eq!(viewer.target().title().as_deref(), Some("First — OntoWave"));
    assert!(viewer.target().html().contains("just text"));
}

#[tokio::test]
async fn custom_app_name_is_used_in_titles() {
    let settings = ViewerSettings {
        app_name: "Handbook".to_string(),
        ..ViewerSettings::default()
    };
    let viewer = Viewer::new(
        docs_config(),
        MemorySource::new([("/docs/index.md", "# Home")]),
        StringTarget::new(),
        settings,
    );
    viewer.render_route(&Route::root()).await;
    assert_eq!(viewer.target().title().as_deref(), Some("Home — Handbook"));
}

#[tokio::test]
async fn slow_render_is_discarded_after_a_newer_navigation() {
    let source = GatedSource {
        inner: MemorySource::new([("/docs/a.md", "# Slow"), ("/docs/b.md", "# Fast")]),
        gates: RefCell::default(),
    };
    let open_a = source.gate("/docs/a.md");
    let viewer = Viewer::new(
        docs_config(),
        source,
        StringTarget::new(),
        ViewerSettings::default(),
    );

    let route_a = Route::new("/a");
    let mut slow = Box::pin(viewer.render_route(&route_a));
    let mut cx = Context::from_waker(Waker::noop());
    assert!(slow.as_mut().poll(&mut cx).is_pending());

    let fast = viewer.render_route(&Route::new("/b")).await;
    assert!(matches!(fast, RenderOutcome::Rendered { .. }));

    open_a.send(()).unwrap();
    assert_eq!(slow.await, RenderOutcome::Superseded);
    assert!(viewer.target().html().contains("Fast"));
    assert_eq!(viewer.target().title().as_deref(), Some("Fast — OntoWave"));
}

#[tokio::test]
async fn load_fails_without_a_manifest() {
    let result = Viewer::load(
        MemorySource::default(),
        StringTarget::new(),
        ViewerSettings::default(),
    )
    .await;
    assert!(matches!(result, Err(ConfigError::Fetch(_))));
}

#[tokio::test]
async fn load_reads_roots_from_the_manifest() {
    let viewer = Viewer::load(
        MemorySource::new([(
            CONFIG_LOCATION,
            r#"{ "roots": [ { "base": "/", "root": "/docs" } ] }"#,
        )]),
        StringTarget::new(),
        ViewerSettings::default(),
    )
    .await
    .unwrap();
    assert_eq!(viewer.config(), &docs_config());
}

type Queue = Rc<RefCell<Vec<Pin<Box<dyn Future<Output = ()>>>>>>;

async fn drain(queue: &Queue) {
    loop {
        let next = queue.borrow_mut().pop();
        match next {
            Some(task) => task.await,
            None => break,
        }
    }
}

#[tokio::test]
async fn start_renders_now_and_on_each_route_change() {
    let viewer = Rc::new(viewer(MemorySource::new([
        ("/docs/index.md", "# Home\n\n[Guide](guide.md)"),
        ("/docs/guide.md", "# Guide"),
    ])));
    let router = Router::new(Rc::new(MemoryHost::default()));
    let queue: Queue = Rc::default();
    let spawner = queue.clone();
    let subscription = viewer
        .clone()
        .start(&router, move |task| spawner.borrow_mut().push(task));

    drain(&queue).await;
    assert_eq!(viewer.target().title().as_deref(), Some("Home — OntoWave"));

    router.host().click("guide.md");
    drain(&queue).await;
    assert_eq!(viewer.target().title().as_deref(), Some("Guide — OntoWave"));

    drop(subscription);
    router.navigate("/");
    assert!(queue.borrow().is_empty());
}

#[test]
fn pending_render_stays_pending_until_fetch_completes() {
    let source = GatedSource {
        inner: MemorySource::new([("/docs/a.md", "# A")]),
        gates: RefCell::default(),
    };
    let open = source.gate("/docs/a.md");
    let viewer = Viewer::new(
        docs_config(),
        source,
        StringTarget::new(),
        ViewerSettings::default(),
    );
    let route = Route::new("/a");
    let mut render = Box::pin(viewer.render_route(&route));
    let mut cx = Context::from_waker(Waker::noop());
    assert!(render.as_mut().poll(&mut cx).is_pending());
    assert!(viewer.target().html().is_empty());

    open.send(()).unwrap();
    assert_eq!(
        render.as_mut().poll(&mut cx),
        Poll::Ready(RenderOutcome::Rendered {
            title: Some("A — OntoWave".to_string())
        })
    );
}
