//! The viewer: configuration, resolution, rendering and mounting wired to
//! route changes.

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use ontowave_renderer::{MarkdownRenderer, RenderOptions};

use crate::config::{AppConfig, CONFIG_LOCATION, load_config};
use crate::error::ConfigError;
use crate::resolve::resolve;
use crate::route::Route;
use crate::router::{NavigationHost, Router, Subscription};
use crate::source::DocumentSource;
use crate::target::RenderTarget;

#[cfg(test)]
mod tests;

/// Session-wide settings that are not part of the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSettings {
    /// Appended to the first heading to form the document title.
    pub app_name: String,
    pub config_location: String,
    pub render: RenderOptions,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            app_name: "OntoWave".to_string(),
            config_location: CONFIG_LOCATION.to_string(),
            render: RenderOptions::default(),
        }
    }
}

/// What a call to [`Viewer::render_route`] ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The document was mounted. `title` is what the title was set to, if a
    /// heading was found.
    Rendered { title: Option<String> },
    /// A later navigation started while this one was resolving; nothing was
    /// mounted.
    Superseded,
}

/// Renders routes into one [`RenderTarget`].
///
/// Only the most recently requested render may mount: every call takes a
/// new generation and a render whose generation is stale when resolution
/// finishes is dropped.
pub struct Viewer<S, T> {
    config: AppConfig,
    source: S,
    renderer: MarkdownRenderer,
    target: T,
    settings: ViewerSettings,
    generation: Cell<u64>,
}

impl<S: DocumentSource, T: RenderTarget> Viewer<S, T> {
    pub fn new(config: AppConfig, source: S, target: T, settings: ViewerSettings) -> Self {
        Self {
            config,
            source,
            renderer: MarkdownRenderer::new(settings.render),
            target,
            settings,
            generation: Cell::new(0),
        }
    }

    /// Load the manifest from `source` and build a viewer on it.
    pub async fn load(source: S, target: T, settings: ViewerSettings) -> Result<Self, ConfigError> {
        match load_config(&source, &settings.config_location).await {
            Ok(config) => Ok(Self::new(config, source, target, settings)),
            Err(err) => {
                tracing::error!(error = %err, location = %settings.config_location, "failed to load configuration");
                Err(err)
            }
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Resolve, render and mount `route`, then rewrite links and update the
    /// title. Never fails: a missing document mounts the not-found page.
    pub async fn render_route(&self, route: &Route) -> RenderOutcome {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let resolved = resolve(&self.source, &self.config.roots, route.path()).await;
        if self.generation.get() != generation {
            tracing::warn!(%route, "discarding superseded render");
            return RenderOutcome::Superseded;
        }

        let html = self.renderer.render(&resolved.markdown);
        self.target.mount(&html);
        self.target.rewrite_links();

        let title = self
            .target
            .first_heading()
            .map(|heading| format!("{heading} — {}", self.settings.app_name));
        if let Some(title) = &title {
            self.target.set_title(title);
        }
        tracing::info!(%route, location = ?resolved.location, "rendered");
        RenderOutcome::Rendered { title }
    }
}

impl<S, T> Viewer<S, T>
where
    S: DocumentSource + 'static,
    T: RenderTarget + 'static,
{
    /// Render the current route now and again on every route change.
    ///
    /// `spawn` runs a render to completion on the host's executor; renders
    /// may overlap and the generation check keeps the newest one. The
    /// returned subscription stops re-rendering when dropped.
    pub fn start<H, F>(self: Rc<Self>, router: &Router<H>, spawn: F) -> Subscription
    where
        H: NavigationHost + 'static,
        F: Fn(Pin<Box<dyn Future<Output = ()>>>) + 'static,
    {
        let initial = router.current();
        let viewer = self.clone();
        spawn(Box::pin(async move {
            viewer.render_route(&initial).await;
        }));

        router.on_change(move |route| {
            let viewer = self.clone();
            spawn(Box::pin(async move {
                viewer.render_route(&route).await;
            }));
        })
    }
}
