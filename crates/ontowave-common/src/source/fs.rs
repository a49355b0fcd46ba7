use std::path::{Component, Path, PathBuf};

use crate::error::FetchError;
use crate::source::DocumentSource;

/// Serves locations out of a local site directory, the way a static file
/// server would: `/docs/intro.md` is `<site>/docs/intro.md`.
#[derive(Debug, Clone)]
pub struct FsSource {
    site: PathBuf,
}

impl FsSource {
    pub fn new(site: impl Into<PathBuf>) -> Self {
        Self { site: site.into() }
    }

    pub fn site(&self) -> &Path {
        &self.site
    }

    /// Map a location onto the filesystem. Locations that would leave the
    /// site directory are refused.
    pub fn path_for(&self, location: &str) -> Result<PathBuf, FetchError> {
        let relative = location.trim_start_matches('/');
        let mut path = self.site.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(FetchError::OutsideSite {
                        location: location.to_string(),
                    });
                }
            }
        }
        Ok(path)
    }
}

impl DocumentSource for FsSource {
    async fn fetch_text(&self, location: &str) -> Result<String, FetchError> {
        let path = self.path_for(location)?;
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::Io {
                location: location.to_string(),
                source,
            })
    }
}
