//! Error types for pokedex-core
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;

/// Main error type for the crate
#[derive(Debug, Snafu)]
pub enum Error {
    /// Invalid input, configuration or upstream record
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// Network unreachable, connection reset, unexpected HTTP status
    #[snafu(display("Transport error: {message}"))]
    Transport { message: String },

    /// Request exceeded the configured deadline
    #[snafu(display("Timeout: {url}"))]
    Timeout { url: String },

    /// Upstream answered 404 for a single resource
    #[snafu(display("Not found: {url}"))]
    NotFound { url: String },

    /// Upstream body could not be decoded into the expected schema
    #[snafu(display("Malformed response from {url}: {source}"))]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// Curated game id not present in the static table
    #[snafu(display("Unknown game: {game}"))]
    UnknownGame { game: String },

    /// IO error (preference and favorites files)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },
}

impl Error {
    /// Whether this failure happened on the way to or from the upstream API
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport { .. } | Error::Timeout { .. } | Error::Decode { .. }
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
