//! Typed errors for fetching, parsing, input validation and configuration.
//!
//! None of these are fatal to a search run: [`FetchError`] and [`ParseError`]
//! are absorbed at the extractor boundary and surface as an empty record list,
//! [`InputError`] stops a run before it starts, and [`ConfigError`] only
//! occurs at startup.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single HTTP GET.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// DNS, connection, TLS, timeout or body read failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

/// Document-level parse failure. Per-record problems never produce this;
/// those records are skipped.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejected user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("please enter keywords")]
    Empty,
}

/// Failure loading the YAML configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
