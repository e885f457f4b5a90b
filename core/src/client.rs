//! Request client for the LFSWorld pubstat API.
//!
//! # Design
//! `Client` owns its `Config` and `Catalog` and nothing else mutable. A fetch
//! is split in two: `build_request` resolves the endpoint, applies the
//! version gate and renders the URL without touching the network, then the
//! request goes through the `Transport` and the reply is classified into a
//! `Response`. Nothing runs until the returned future is polled, so a caller
//! never sees a result before the call has returned, even when the request
//! is rejected up front.

use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::catalog::{self, Catalog, EndpointDescriptor};
use crate::config::Config;
use crate::error::{ConfigError, FetchError};
use crate::http::{HttpRequest, ReqwestTransport, Transport};
use crate::response::Response;
use crate::template::{self, Params};

/// Sent as `User-Agent` with every request.
pub const USER_AGENT: &str = concat!("lfsworld-rs/", env!("CARGO_PKG_VERSION"));

/// Client for the LFSWorld statistics API.
///
/// Cloning is cheap when the transport is (`ReqwestTransport` shares its
/// connection pool); each clone has its own configuration and catalog.
#[derive(Debug, Clone)]
pub struct Client<T = ReqwestTransport> {
    config: Config,
    catalog: Catalog,
    transport: T,
}

impl Client<ReqwestTransport> {
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }

    /// Client configured from `LFSWORLD_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(Config::from_env()?))
    }
}

impl Default for Client<ReqwestTransport> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self {
            config,
            catalog: Catalog::builtin(),
            transport,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// See `Config::set_option`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys or unparseable values.
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<&mut Self, ConfigError> {
        self.config.set_option(key, value)?;
        Ok(self)
    }

    pub fn get_option(&self, key: &str) -> Option<String> {
        self.config.get_option(key)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Adds an API call this library does not know about yet. The path must
    /// be absolute and use `%(name)type` placeholders. Returns `false` if
    /// `name` is taken; built-in calls cannot be replaced.
    pub fn register(&mut self, name: impl Into<String>, path: impl Into<String>, min_version: f64) -> bool {
        self.catalog.register(name, path, min_version)
    }

    /// Alias for `register`.
    pub fn fix_up(&mut self, name: impl Into<String>, path: impl Into<String>, min_version: f64) -> bool {
        self.register(name, path, min_version)
    }

    /// Renders the request `fetch` would send, without sending it.
    ///
    /// # Errors
    ///
    /// `FetchError::UnknownEndpoint` if `name` is not registered,
    /// `FetchError::UnsupportedVersion` if the endpoint needs a newer API
    /// version than configured.
    pub fn build_request(&self, name: &str, params: &Params) -> Result<HttpRequest, FetchError> {
        let descriptor = self.resolve(name)?;
        let path = template::substitute(&descriptor.path, params);

        let unresolved = template::placeholders(&path);
        if !unresolved.is_empty() {
            trace!(endpoint = name, ?unresolved, "placeholders left unresolved");
        }

        let url = format!(
            "{}://{}{}&idk={}&version={}&s=1",
            self.config.transport,
            self.config.domain,
            path,
            self.config.idk,
            template::format_number(self.config.version),
        );

        Ok(HttpRequest {
            url,
            headers: vec![("User-Agent".to_string(), USER_AGENT.to_string())],
        })
    }

    fn resolve(&self, name: &str) -> Result<&EndpointDescriptor, FetchError> {
        let descriptor = self
            .catalog
            .lookup(name)
            .ok_or_else(|| FetchError::UnknownEndpoint(name.to_string()))?;

        if !descriptor.supports(self.config.version) {
            return Err(FetchError::UnsupportedVersion {
                endpoint: name.to_string(),
                required: descriptor.min_version,
                configured: self.config.version,
            });
        }
        Ok(descriptor)
    }

    /// Fetches any registered endpoint.
    ///
    /// `Err` means no request was sent. Once a request is sent the result is
    /// always `Ok`, and transport failures show up as a `Response` whose
    /// `is_error()` is true.
    ///
    /// # Errors
    ///
    /// See `build_request`.
    pub async fn fetch(&self, name: &str, params: &Params) -> Result<Response, FetchError> {
        let request = self.build_request(name, params).inspect_err(|err| {
            warn!(endpoint = name, %err, "request not sent");
        })?;

        debug!(endpoint = name, domain = %self.config.domain, "dispatching request");
        let raw = match self.transport.get(request).await {
            Ok(raw) => Some(raw),
            Err(err) => {
                warn!(endpoint = name, %err, "transport failed");
                None
            }
        };

        let response = Response::from_raw(raw.as_ref());
        debug!(
            endpoint = name,
            status = response.status(),
            error = response.is_error(),
            "response classified"
        );
        Ok(response)
    }

    /// Spawns `fetch` on the current tokio runtime and hands the result to
    /// `callback` exactly once.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn fetch_with<F>(&self, name: &str, params: Params, callback: F) -> JoinHandle<()>
    where
        T: Clone + 'static,
        F: FnOnce(Result<Response, FetchError>) + Send + 'static,
    {
        let client = self.clone();
        let name = name.to_string();
        tokio::spawn(async move {
            let result = client.fetch(&name, &params).await;
            callback(result);
        })
    }

    /// All hot laps set by `racer`.
    pub async fn hot_laps(&self, racer: &str) -> Result<Response, FetchError> {
        self.fetch(catalog::HOT_LAPS, &Params::new().with("racer", racer))
            .await
    }

    /// Hot laps on a track in a given car.
    pub async fn combo_hot_laps(&self, track: &str, car: &str) -> Result<Response, FetchError> {
        let params = Params::new().with("track", track).with("car", car);
        self.fetch(catalog::COMBO_HOT_LAPS, &params).await
    }

    /// World records on a track in a given car.
    pub async fn world_records(&self, track: &str, car: &str) -> Result<Response, FetchError> {
        let params = Params::new().with("track", track).with("car", car);
        self.fetch(catalog::WORLD_RECORDS, &params).await
    }

    pub async fn personal_bests(&self, racer: &str) -> Result<Response, FetchError> {
        self.fetch(catalog::PERSONAL_BESTS, &Params::new().with("racer", racer))
            .await
    }

    /// Fuel used per lap by `racer`.
    pub async fn fuel(&self, racer: &str) -> Result<Response, FetchError> {
        self.fetch(catalog::FUEL, &Params::new().with("racer", racer))
            .await
    }

    /// Online statistics for `racer`.
    pub async fn online_status(&self, racer: &str) -> Result<Response, FetchError> {
        self.fetch(catalog::ONLINE_STATUS, &Params::new().with("racer", racer))
            .await
    }

    /// Hosts currently online and the racers on them.
    pub async fn hosts(&self) -> Result<Response, FetchError> {
        self.fetch(catalog::HOSTS, &Params::new()).await
    }

    pub async fn teams(&self) -> Result<Response, FetchError> {
        self.fetch(catalog::TEAMS, &Params::new()).await
    }

    /// Recent hot lap uploads.
    pub async fn hot_lap_log(&self) -> Result<Response, FetchError> {
        self.fetch(catalog::HOT_LAP_LOG, &Params::new()).await
    }

    /// Global lap counts for every car and track.
    pub async fn counters(&self) -> Result<Response, FetchError> {
        self.fetch(catalog::COUNTERS, &Params::new()).await
    }

    /// Highlights for a country: wins, personal bests and records.
    ///
    /// The feed is newline-delimited HTML, not JSON, so the returned
    /// `Response` always reports `is_error()`; read it with `raw_lines()`.
    pub async fn highlights(&self, country: &str) -> Result<Response, FetchError> {
        self.fetch(catalog::HIGHLIGHTS, &Params::new().with("country", country))
            .await
    }
}
