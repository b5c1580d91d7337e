use std::path::PathBuf;

use serde::Deserialize;

use crate::site::bindings::Bindings;
use crate::site::template::Template;

// ── site.toml ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteManifest {
    pub layout: LayoutSpec,
    #[serde(default)]
    pub bindings: Bindings,
    pub pages: Vec<PageSpec>,
    #[serde(default)]
    pub nav: Vec<NavSpec>,
    pub not_found: NotFoundSpec,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutSpec {
    pub header: PathBuf,
    pub footer: PathBuf,
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageSpec {
    pub id: String,
    pub route: String,
    pub title: String,
    pub body: PathBuf,
    /// Navigation entry to highlight. Defaults to the page's own id.
    pub nav: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavSpec {
    pub label: String,
    pub page: String,
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotFoundSpec {
    pub title: String,
    pub body: PathBuf,
}

// ── Loaded site ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Page {
    pub id: String,
    pub route: String,
    pub title: String,
    /// Target page id of the navigation entry shown as active.
    pub nav: String,
    pub body: Template,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: String,
    pub page: String,
    pub route: String,
    pub order: u32,
}

/// Page served for unknown paths. Not part of the routable page set and
/// highlights no navigation entry.
#[derive(Debug, Clone)]
pub struct NotFoundPage {
    pub title: String,
    pub body: Template,
}
