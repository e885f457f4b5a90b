//! Async client for the LFSWorld pubstat statistics API.
//!
//! # Overview
//! Builds request URLs from a catalog of endpoint templates, sends them
//! through a pluggable `Transport`, and classifies each reply into a
//! `Response` with a single `is_error()` check.
//!
//! # Design
//! - `Client` holds only configuration and the endpoint catalog; a fetch
//!   either never leaves the process (`FetchError`) or yields a `Response`.
//! - LFSWorld answers HTTP 200 even for failures, so classification keys on
//!   the payload as well as the status. See `response`.
//! - `build_request` renders the exact request without I/O, so URL building
//!   is testable without a server.
//!
//! ```no_run
//! # async fn run() -> Result<(), lfsworld_core::FetchError> {
//! let client = lfsworld_core::Client::new(lfsworld_core::Config::new("your-ident-key"));
//! let res = client.hosts().await?;
//! if res.is_error() {
//!     eprintln!("{}", res.raw().unwrap_or_default());
//! } else {
//!     println!("{:?}", res.data());
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod response;
pub mod template;

pub use catalog::{Catalog, EndpointDescriptor};
pub use client::{Client, USER_AGENT};
pub use config::{Config, Scheme};
pub use error::{ConfigError, DataError, FetchError, TransportError};
pub use http::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use response::Response;
pub use template::{substitute, Params};
