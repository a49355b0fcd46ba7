//! Route resolution and viewer orchestration for OntoWave.
//!
//! Everything here is host-agnostic: the browser and the CLI plug in their
//! own [`DocumentSource`], [`RenderTarget`] and [`router::NavigationHost`].

pub mod config;
pub mod error;
pub mod resolve;
pub mod route;
pub mod router;
pub mod source;
pub mod target;
#[cfg(all(
    feature = "telemetry",
    not(all(target_family = "wasm", target_os = "unknown"))
))]
pub mod telemetry;
pub mod viewer;

pub use ontowave_renderer;

pub use crate::config::{AppConfig, CONFIG_LOCATION, Root, load_config};
pub use crate::error::{ConfigError, FetchError};
pub use crate::resolve::{Resolved, candidates, not_found_document, resolve};
pub use crate::route::Route;
pub use crate::router::{NavigationHost, Router, Subscription};
pub use crate::source::DocumentSource;
pub use crate::target::{RenderTarget, StringTarget};
pub use crate::viewer::{RenderOutcome, Viewer, ViewerSettings};
