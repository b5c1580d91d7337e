// Site content: templates, bindings, navigation and the page composer.
// Everything here is loaded once at startup and never mutated afterwards.

pub mod bindings;
pub mod composer;
pub mod loader;
pub mod models;
pub mod navigation;
pub mod template;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use bindings::Bindings;
pub use composer::{ComposeError, MissingBinding};
pub use loader::load_site;
pub use models::{NavEntry, NotFoundPage, Page};
pub use template::Template;

/// The complete, immutable site: layout templates, pages and navigation.
#[derive(Debug, Clone)]
pub struct Site {
    header: Template,
    footer: Template,
    pages: Vec<Page>,
    by_id: HashMap<String, usize>,
    by_route: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
    nav: Vec<NavEntry>,
    not_found: NotFoundPage,
    defaults: Bindings,
    static_dir: Option<PathBuf>,
}

impl Site {
    pub fn page(&self, id: &str) -> Option<&Page> {
        self.by_id.get(id).map(|&i| &self.pages[i])
    }

    pub fn page_for_route(&self, route: &str) -> Option<&Page> {
        self.by_route.get(route).map(|&i| &self.pages[i])
    }

    /// Page a legacy path (e.g. `/download.php`) redirects to.
    pub fn page_for_alias(&self, alias: &str) -> Option<&Page> {
        self.by_alias.get(alias).map(|&i| &self.pages[i])
    }

    /// Pages in manifest order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Navigation entries in display order.
    pub fn nav(&self) -> &[NavEntry] {
        &self.nav
    }

    /// Site-wide bindings declared in the manifest.
    pub fn default_bindings(&self) -> &Bindings {
        &self.defaults
    }

    pub fn static_dir(&self) -> Option<&Path> {
        self.static_dir.as_deref()
    }
}
