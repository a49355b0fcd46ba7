//! Where document text comes from.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::future::Future;

use url::Url;

use crate::error::FetchError;

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
mod fs;
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
pub use fs::FsSource;

/// Reads the text at a location. Any error means "absent" to the resolver.
///
/// Futures are not required to be `Send`: the viewer runs on a single
/// cooperative thread.
pub trait DocumentSource {
    fn fetch_text(&self, location: &str) -> impl Future<Output = Result<String, FetchError>>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn fetch_text(&self, location: &str) -> impl Future<Output = Result<String, FetchError>> {
        (**self).fetch_text(location)
    }
}

/// Uncached HTTP reads relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base)
    }

    pub fn with_client(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }
}

impl DocumentSource for HttpSource {
    async fn fetch_text(&self, location: &str) -> Result<String, FetchError> {
        let url = self
            .base
            .join(location)
            .map_err(|source| FetchError::InvalidLocation {
                location: location.to_string(),
                source,
            })?;
        let transport = |source| FetchError::Transport {
            location: location.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(transport)
    }
}

/// Fixed set of documents held in memory. Records every fetch so callers can
/// see the order locations were tried in.
#[derive(Debug, Default)]
pub struct MemorySource {
    documents: BTreeMap<String, String>,
    requests: RefCell<Vec<String>>,
}

impl MemorySource {
    pub fn new<L, T>(documents: impl IntoIterator<Item = (L, T)>) -> Self
    where
        L: Into<String>,
        T: Into<String>,
    {
        Self {
            documents: documents
                .into_iter()
                .map(|(location, text)| (location.into(), text.into()))
                .collect(),
            requests: RefCell::default(),
        }
    }

    pub fn insert(&mut self, location: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(location.into(), text.into());
    }

    /// Locations requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }
}

impl DocumentSource for MemorySource {
    async fn fetch_text(&self, location: &str) -> Result<String, FetchError> {
        self.requests.borrow_mut().push(location.to_string());
        self.documents
            .get(location)
            .cloned()
            .ok_or_else(|| FetchError::Missing {
                location: location.to_string(),
            })
    }
}
