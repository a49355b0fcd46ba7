//! OntoWave in the browser.
//!
//! On load the module looks for an `#app` element and, if there is one,
//! fetches `/config.json` from the page origin and starts rendering the
//! route in `location.hash` into it. [`launch`] does the same for an
//! explicitly chosen element.

use std::rc::Rc;

use ontowave_common::source::HttpSource;
use ontowave_common::{Router, Viewer, ViewerSettings};
use url::Url;
use wasm_bindgen::prelude::*;
use web_sys::Element;

mod host;
mod target;

pub use host::BrowserHost;
pub use target::DomTarget;

/// Id of the element the viewer mounts into on page load.
pub const MOUNT_ID: &str = "app";

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    init_tracing();

    let Some(mount) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(MOUNT_ID))
    else {
        tracing::debug!("no #{MOUNT_ID} element, waiting for an explicit launch");
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        // errors are already logged by launch
        let _ = launch(mount, None).await;
    });
}

fn init_tracing() {
    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    let _ = set_global_default(Registry::default().with(wasm_layer));
}

fn fail(message: String) -> JsError {
    tracing::error!("{message}");
    JsError::new(&message)
}

/// Load the configuration and render into `mount` for the rest of the
/// page's life. Rejects when the configuration cannot be loaded.
#[wasm_bindgen]
pub async fn launch(mount: Element, app_name: Option<String>) -> Result<(), JsError> {
    let window = web_sys::window().ok_or_else(|| fail("no window".into()))?;
    let origin = window
        .location()
        .origin()
        .map_err(|err| fail(format!("page origin unavailable: {err:?}")))?;
    let base = Url::parse(&origin).map_err(|err| fail(format!("bad page origin {origin}: {err}")))?;

    let target = DomTarget::new(mount).ok_or_else(|| fail("mount element is detached".into()))?;
    let host = BrowserHost::new(window).ok_or_else(|| fail("window has no document".into()))?;

    let mut settings = ViewerSettings::default();
    if let Some(app_name) = app_name {
        settings.app_name = app_name;
    }

    let viewer = Viewer::load(HttpSource::new(base), target, settings)
        .await
        .map_err(|err| JsError::new(&err.to_string()))?;

    let router = Router::new(Rc::new(host));
    Rc::new(viewer)
        .start(&router, wasm_bindgen_futures::spawn_local)
        .forget();
    router.forget();
    tracing::info!("viewer started");
    Ok(())
}
