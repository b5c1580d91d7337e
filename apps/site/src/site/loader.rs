use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::site::models::{NavEntry, NotFoundPage, Page, SiteManifest};
use crate::site::template::{Template, TemplateError};
use crate::site::Site;

pub const MANIFEST_FILE: &str = "site.toml";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid template {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },

    #[error("duplicate page id '{0}'")]
    DuplicatePage(String),

    #[error("route '{route}' of page '{page}' must start with '/'")]
    InvalidRoute { page: String, route: String },

    #[error("route '{0}' is claimed by more than one page")]
    DuplicateRoute(String),

    #[error("navigation entry '{label}' targets unknown page '{page}'")]
    UnknownNavTarget { label: String, page: String },

    #[error("navigation entries '{first}' and '{second}' both target page '{page}'")]
    DuplicateNavTarget {
        page: String,
        first: String,
        second: String,
    },

    #[error("page '{page}' highlights navigation entry '{nav}', which does not exist")]
    UnknownNavEntry { page: String, nav: String },
}

/// Loads `site.toml` from `dir` along with every template it references.
pub fn load_site(dir: &Path) -> Result<Site, LoadError> {
    let path = dir.join(MANIFEST_FILE);
    let text = fs::read_to_string(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    let manifest: SiteManifest =
        toml::from_str(&text).map_err(|source| LoadError::Manifest { path, source })?;

    let site = assemble(manifest, dir, |p| fs::read_to_string(p))?;
    info!(
        "Loaded {} pages and {} navigation entries from {}",
        site.pages().len(),
        site.nav().len(),
        dir.display()
    );
    Ok(site)
}

/// Builds and validates a [`Site`] from a parsed manifest. Template paths are
/// resolved against `base` and fetched through `read`.
pub(crate) fn assemble<F>(manifest: SiteManifest, base: &Path, mut read: F) -> Result<Site, LoadError>
where
    F: FnMut(&Path) -> io::Result<String>,
{
    let mut load = |relative: &Path| -> Result<Template, LoadError> {
        let path = base.join(relative);
        let source = read(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        Template::parse(&source).map_err(|source| LoadError::Template { path, source })
    };

    let header = load(&manifest.layout.header)?;
    let footer = load(&manifest.layout.footer)?;

    let mut pages = Vec::with_capacity(manifest.pages.len());
    let mut by_id = HashMap::new();
    let mut by_route = HashMap::new();
    let mut by_alias = HashMap::new();
    // Routes and aliases share one namespace.
    let mut claimed = HashSet::new();

    for spec in manifest.pages {
        let index = pages.len();
        if by_id.insert(spec.id.clone(), index).is_some() {
            return Err(LoadError::DuplicatePage(spec.id));
        }

        for route in std::iter::once(&spec.route).chain(&spec.aliases) {
            if !route.starts_with('/') {
                return Err(LoadError::InvalidRoute {
                    page: spec.id.clone(),
                    route: route.clone(),
                });
            }
            if !claimed.insert(route.clone()) {
                return Err(LoadError::DuplicateRoute(route.clone()));
            }
        }
        by_route.insert(spec.route.clone(), index);
        for alias in &spec.aliases {
            by_alias.insert(alias.clone(), index);
        }

        let body = load(&spec.body)?;
        let nav = spec.nav.unwrap_or_else(|| spec.id.clone());
        pages.push(Page {
            id: spec.id,
            route: spec.route,
            title: spec.title,
            nav,
            body,
        });
    }

    // One navigation entry per page.
    let mut nav: Vec<NavEntry> = Vec::with_capacity(manifest.nav.len());
    let mut targeted = HashSet::new();
    for spec in manifest.nav {
        let Some(&target) = by_id.get(&spec.page) else {
            return Err(LoadError::UnknownNavTarget {
                label: spec.label,
                page: spec.page,
            });
        };
        if !targeted.insert(spec.page.clone()) {
            let first = nav
                .iter()
                .find(|entry| entry.page == spec.page)
                .map(|entry| entry.label.clone())
                .unwrap_or_default();
            return Err(LoadError::DuplicateNavTarget {
                page: spec.page,
                first,
                second: spec.label,
            });
        }
        nav.push(NavEntry {
            route: pages[target].route.clone(),
            label: spec.label,
            page: spec.page,
            order: spec.order,
        });
    }
    nav.sort_by_key(|entry| entry.order);

    for page in &pages {
        if !nav.iter().any(|entry| entry.page == page.nav) {
            return Err(LoadError::UnknownNavEntry {
                page: page.id.clone(),
                nav: page.nav.clone(),
            });
        }
    }

    let not_found = NotFoundPage {
        title: manifest.not_found.title,
        body: load(&manifest.not_found.body)?,
    };

    Ok(Site {
        header,
        footer,
        pages,
        by_id,
        by_route,
        by_alias,
        nav,
        not_found,
        defaults: manifest.bindings,
        static_dir: manifest.layout.static_dir.map(|dir| base.join(dir)),
    })
}
