use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::source::DocumentSource;

/// Well-known location of the manifest.
pub const CONFIG_LOCATION: &str = "/config.json";

/// One content tree reachable from the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Root {
    /// Mount prefix in the viewer's route space.
    pub base: String,
    /// Prefix of the document source tree that candidates are built from.
    pub root: String,
}

impl Root {
    pub fn new(base: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            root: root.into(),
        }
    }
}

/// Session configuration. Root order is fallback precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub roots: Vec<Root>,
}

impl AppConfig {
    pub fn new(roots: Vec<Root>) -> Self {
        Self { roots }
    }

    /// Parse a manifest body. `location` is only used for error reporting.
    pub fn from_json(location: &str, text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            location: location.to_string(),
            source,
        })
    }
}

/// Fetch and parse the manifest. Called once per session.
pub async fn load_config(
    source: &impl DocumentSource,
    location: &str,
) -> Result<AppConfig, ConfigError> {
    let text = source
        .fetch_text(location)
        .await
        .map_err(ConfigError::Fetch)?;
    let config = AppConfig::from_json(location, &text)?;
    tracing::info!(location, roots = config.roots.len(), "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    #[test]
    fn parses_manifest() {
        let config = AppConfig::from_json(
            CONFIG_LOCATION,
            r#"{ "roots": [ { "base": "/modules", "root": "/modules" }, { "base": "/", "root": "/docs" } ] }"#,
        )
        .unwrap();
        assert_eq!(
            config.roots,
            vec![Root::new("/modules", "/modules"), Root::new("/", "/docs")]
        );
    }

    #[test]
    fn malformed_manifest_is_a_parse_error() {
        let err = AppConfig::from_json(CONFIG_LOCATION, r#"{ "roots": [ { "base": "/" } ] }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let err = AppConfig::from_json(CONFIG_LOCATION, "not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[tokio::test]
    async fn load_reads_the_well_known_location() {
        let source = MemorySource::new([(
            CONFIG_LOCATION,
            r#"{ "roots": [ { "base": "/", "root": "/docs" } ] }"#,
        )]);
        let config = load_config(&source, CONFIG_LOCATION).await.unwrap();
        assert_eq!(config.roots, vec![Root::new("/", "/docs")]);
    }

    #[tokio::test]
    async fn unreachable_manifest_is_fatal() {
        let source = MemorySource::default();
        let err = load_config(&source, CONFIG_LOCATION).await.unwrap_err();
        assert!(matches!(err, ConfigError::Fetch(_)));
    }
}
