//! Error types for the LFSWorld client.
//!
//! # Design
//! None of these are fatal. `FetchError` is the "no result" outcome of a
//! fetch: the request was never sent. Anything that went wrong after the
//! request left the process is folded into a `Response` whose `is_error()`
//! is true instead, because the backend answers HTTP 200 for most failures
//! and callers need a single place to check.

use thiserror::Error;

/// Reasons a fetch produced no `Response` at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The endpoint name is not in the catalog.
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// The endpoint needs a newer API version than the client is configured for.
    #[error("endpoint {endpoint} requires API version {required}, configured {configured}")]
    UnsupportedVersion {
        endpoint: String,
        required: f64,
        configured: f64,
    },
}

/// Failure reported by a `Transport` before any HTTP response arrived.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Request(err.to_string())
    }
}

/// Errors from `Config::set_option` and `Config::from_env`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("invalid value {value:?} for option {key}")]
    InvalidValue { key: String, value: String },
}

/// Errors from decoding a `Response` payload into a typed value.
#[derive(Debug, Error)]
pub enum DataError {
    /// The response carried no parsed payload.
    #[error("response has no data")]
    Missing,

    #[error("payload does not match the requested type: {0}")]
    Decode(#[from] serde_json::Error),
}
