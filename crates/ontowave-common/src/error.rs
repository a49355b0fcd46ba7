//! Error types for OntoWave.
//!
//! A [`FetchError`] is ordinary control flow for the resolver (the next
//! candidate is tried). A [`ConfigError`] is fatal for the session.

use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum FetchError {
    #[error("{location}: HTTP status {status}")]
    #[diagnostic(code(ontowave::fetch::status))]
    Status { location: String, status: u16 },

    #[error("{location}: request failed")]
    #[diagnostic(code(ontowave::fetch::transport))]
    Transport {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{location}: not a valid location")]
    #[diagnostic(code(ontowave::fetch::invalid_location))]
    InvalidLocation {
        location: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{location}: {source}")]
    #[diagnostic(code(ontowave::fetch::io))]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{location} escapes the site directory")]
    #[diagnostic(code(ontowave::fetch::outside_site))]
    OutsideSite { location: String },

    #[error("{location}: no such document")]
    #[diagnostic(code(ontowave::fetch::missing))]
    Missing { location: String },
}

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("could not load the configuration manifest")]
    #[diagnostic(
        code(ontowave::config::fetch),
        help("the viewer needs a JSON manifest of content roots before it can render anything")
    )]
    Fetch(#[source] FetchError),

    #[error("{location} is not a valid configuration manifest")]
    #[diagnostic(
        code(ontowave::config::parse),
        help("expected an object with a `roots` array of `base`/`root` string pairs")
    )]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}
