//! Catalog of known LFSWorld endpoints.
//!
//! Each entry maps a short request name (the `action` LFSWorld uses) to a
//! path template and the lowest API version that supports it. The catalog
//! can grow at runtime through `register`, but existing entries are never
//! replaced.

use serde::{Deserialize, Serialize};

/// Hot laps for a racer.
pub const HOT_LAPS: &str = "hl";
/// Hot laps for a track and car combination.
pub const COMBO_HOT_LAPS: &str = "ch";
/// World records for a track and car.
pub const WORLD_RECORDS: &str = "wr";
/// Personal bests for a racer.
pub const PERSONAL_BESTS: &str = "pb";
/// Fuel used per lap by a racer.
pub const FUEL: &str = "fuel";
/// Online status for a racer.
pub const ONLINE_STATUS: &str = "pst";
/// Hosts currently online and their racers.
pub const HOSTS: &str = "hosts";
/// Team listing.
pub const TEAMS: &str = "teams";
/// Hot lap upload log.
pub const HOT_LAP_LOG: &str = "hl_log";
/// Global lap counters.
pub const COUNTERS: &str = "counters";
/// Per-country highlights feed.
pub const HIGHLIGHTS: &str = "highlights";

const PUBSTAT: &str = "/pubstat/get_stat2.php";

/// A named, parameterised API call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub name: String,
    /// Absolute path including the query, with `%(name)type` placeholders.
    pub path: String,
    pub min_version: f64,
}

impl EndpointDescriptor {
    pub fn new(name: impl Into<String>, path: impl Into<String>, min_version: f64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            min_version,
        }
    }

    /// Whether a client configured for `version` may call this endpoint.
    pub fn supports(&self, version: f64) -> bool {
        self.min_version <= version
    }
}

/// Endpoint descriptors in registration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<EndpointDescriptor>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// A catalog with no entries.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The endpoints LFSWorld documents for API version 1.5.
    pub fn builtin() -> Self {
        let action = |name: &str, query: &str| format!("{PUBSTAT}?action={name}{query}");
        let mut catalog = Self::empty();
        for (name, path) in [
            (HOT_LAPS, action(HOT_LAPS, "&racer=%(racer)s")),
            (COMBO_HOT_LAPS, action(COMBO_HOT_LAPS, "&track=%(track)s&car=%(car)s")),
            (WORLD_RECORDS, action(WORLD_RECORDS, "&track=%(track)s&car=%(car)s")),
            (PERSONAL_BESTS, action(PERSONAL_BESTS, "&racer=%(racer)s")),
            (FUEL, action(FUEL, "&racer=%(racer)s")),
            (ONLINE_STATUS, action(ONLINE_STATUS, "&racer=%(racer)s")),
            (HOSTS, action(HOSTS, "")),
            (TEAMS, action(TEAMS, "")),
            (HOT_LAP_LOG, action(HOT_LAP_LOG, "")),
            (COUNTERS, action(COUNTERS, "")),
            (
                HIGHLIGHTS,
                "/highlight_countries/highlights_%(country)s.txt".to_string(),
            ),
        ] {
            catalog.register(name, path, 1.5);
        }
        catalog
    }

    /// Adds an endpoint. Returns `false` and leaves the catalog untouched
    /// when `name` is already registered.
    pub fn register(&mut self, name: impl Into<String>, path: impl Into<String>, min_version: f64) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push(EndpointDescriptor::new(name, path, min_version));
        true
    }

    pub fn lookup(&self, name: &str) -> Option<&EndpointDescriptor> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EndpointDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
