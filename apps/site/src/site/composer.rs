use std::collections::BTreeSet;

use thiserror::Error;

use crate::site::bindings::Bindings;
use crate::site::navigation::render_nav;
use crate::site::template::{Template, TemplateError};
use crate::site::Site;

/// Bindings supplied by the composer itself. They shadow caller bindings.
pub const TITLE: &str = "title";
pub const PAGE_ID: &str = "page_id";
pub const NAV: &str = "nav";
pub const BUILTINS: [&str; 3] = [TITLE, PAGE_ID, NAV];

/// `page_id` used when composing the not-found page.
pub const NOT_FOUND_ID: &str = "error";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("page not found: {0}")]
    PageNotFound(String),

    #[error("failed to render page '{page}': {source}")]
    Render {
        page: String,
        #[source]
        source: TemplateError,
    },
}

/// A placeholder that no binding would satisfy when rendering `page`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MissingBinding {
    pub page: String,
    pub name: String,
}

impl Site {
    /// Composes header, body and footer for `page_id`.
    ///
    /// Pure: the output depends only on the page, `bindings` and the loaded
    /// templates. Either the whole document is returned or an error.
    pub fn render(&self, page_id: &str, bindings: &Bindings) -> Result<String, ComposeError> {
        let page = self
            .page(page_id)
            .ok_or_else(|| ComposeError::PageNotFound(page_id.to_string()))?;
        self.compose(&page.id, &page.title, Some(page.nav.as_str()), &page.body, bindings)
    }

    pub fn render_not_found(&self, bindings: &Bindings) -> Result<String, ComposeError> {
        self.compose(
            NOT_FOUND_ID,
            &self.not_found.title,
            None,
            &self.not_found.body,
            bindings,
        )
    }

    /// Every placeholder across the routable pages (layout included) that
    /// `bindings` plus the built-ins leave unresolved.
    pub fn missing_bindings(&self, bindings: &Bindings) -> Vec<MissingBinding> {
        self.pages
            .iter()
            .flat_map(|page| self.missing_in(&page.id, &page.body, bindings))
            .collect()
    }

    /// Same as [`Site::missing_bindings`] for the not-found page.
    pub fn missing_not_found_bindings(&self, bindings: &Bindings) -> Vec<MissingBinding> {
        self.missing_in(NOT_FOUND_ID, &self.not_found.body, bindings)
    }

    fn missing_in(&self, page: &str, body: &Template, bindings: &Bindings) -> Vec<MissingBinding> {
        let referenced: BTreeSet<&str> = [&self.header, body, &self.footer]
            .into_iter()
            .flat_map(Template::placeholders)
            .collect();

        referenced
            .into_iter()
            .filter(|name| !BUILTINS.contains(name) && !bindings.contains(name))
            .map(|name| MissingBinding {
                page: page.to_string(),
                name: name.to_string(),
            })
            .collect()
    }

    fn compose(
        &self,
        page_id: &str,
        title: &str,
        active_nav: Option<&str>,
        body: &Template,
        bindings: &Bindings,
    ) -> Result<String, ComposeError> {
        let scope = bindings
            .clone()
            .with(TITLE, title)
            .with(PAGE_ID, page_id)
            .with(NAV, render_nav(&self.nav, active_nav));

        let render = |template: &Template| {
            template.render(&scope).map_err(|source| ComposeError::Render {
                page: page_id.to_string(),
                source,
            })
        };

        let header = render(&self.header)?;
        let body = render(body)?;
        let footer = render(&self.footer)?;

        Ok([header, body, footer].concat())
    }
}
