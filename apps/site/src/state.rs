use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, TimeZone};

use crate::config::Config;
use crate::site::{Bindings, Site};
use crate::timestamp::format_generated_at;

pub const VERSION: &str = "version";
pub const GENERATED_AT: &str = "generated_at";

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<Site>,
    /// Bindings applied to every page: manifest defaults plus config overrides.
    pub bindings: Arc<Bindings>,
}

impl AppState {
    pub fn new(site: Site, config: &Config) -> Self {
        let bindings = site_bindings(&site, config);
        Self {
            site: Arc::new(site),
            bindings: Arc::new(bindings),
        }
    }

    /// The release version every download link is built from.
    pub fn version(&self) -> Option<&str> {
        self.bindings.get(VERSION)
    }

    pub fn not_found_bindings<Tz>(&self, at: &DateTime<Tz>) -> Bindings
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.bindings
            .as_ref()
            .clone()
            .with(GENERATED_AT, format_generated_at(at))
    }
}

fn site_bindings(site: &Site, config: &Config) -> Bindings {
    let mut bindings = site.default_bindings().clone();
    if let Some(version) = &config.latest_version {
        bindings.insert(VERSION, version.as_str());
    }
    bindings
}
