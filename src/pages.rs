//! Resolution of logical page names to page templates.
//!
//! A logical name such as `Users/Index` maps to the module `Pages/Users/Index`.
//! Resolution always runs the same three steps: sanitize the name, look the
//! module up through a [`PageLoader`], attach the default layout when the
//! module does not declare one.

use std::collections::HashMap;
use std::future::{Future, ready};

use tera::Tera;
use thiserror::Error;

/// Root under which every page module lives.
pub const PAGES_ROOT: &str = "Pages";
/// Template directory holding page templates.
pub const PAGES_TEMPLATE_DIR: &str = "pages/";
/// Shared chrome wrapped around pages that do not pick their own layout.
pub const DEFAULT_LAYOUT: &str = "layouts/app.html";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    /// No module exists for the sanitized name. Traversal attempts end here
    /// too, once their `..` segments are stripped.
    #[error("page not found: {0}")]
    NotFound(String),

    #[error("failed to load page {name}: {reason}")]
    Load { name: String, reason: String },
}

/// A loadable page module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageModule {
    /// Tera template rendering the page body.
    pub template: String,
    /// Layout declared by the page itself.
    pub layout: Option<String>,
}

impl PageModule {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            layout: None,
        }
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }
}

/// A resolved page ready to be mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Sanitized logical name, e.g. `Users/Index`.
    pub name: String,
    pub template: String,
    /// Effective layout: the page's own, or the default one.
    pub layout: String,
}

/// Source of page modules keyed by module path (`Pages/<name>`).
///
/// Loading may suspend, e.g. when modules are fetched lazily.
pub trait PageLoader {
    fn load(
        &self,
        module_path: &str,
    ) -> impl Future<Output = Result<Option<PageModule>, PageError>> + Send;
}

/// Removes every `../` together with the separator in front of it, so
/// `Users/../../Secret` collapses to `UsersSecret`. Leftover `..`, `.` and
/// empty segments are dropped afterwards, so the name can only address
/// modules below [`PAGES_ROOT`].
pub fn sanitize_page_name(name: &str) -> String {
    let mut stripped = name.to_string();
    while let Some(at) = stripped.find("../") {
        let start = if stripped[..at].ends_with('/') { at - 1 } else { at };
        stripped.replace_range(start..at + 3, "");
    }

    stripped
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .collect::<Vec<_>>()
        .join("/")
}

pub fn module_path(name: &str) -> String {
    format!("{PAGES_ROOT}/{name}")
}

/// Static registry of page modules built at start-up.
#[derive(Debug, Clone, Default)]
pub struct PageRegistry {
    modules: HashMap<String, PageModule>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `module` under the logical `name`. An already registered
    /// name keeps its first module.
    pub fn register(mut self, name: &str, module: PageModule) -> Self {
        let path = module_path(&sanitize_page_name(name));
        if self.modules.contains_key(&path) {
            log::warn!("Page {path} is already registered");
        } else {
            self.modules.insert(path, module);
        }
        self
    }

    /// Registers every template under `pages/` as a page without a layout:
    /// `pages/Users/Index.html` becomes `Users/Index`.
    pub fn discover(tera: &Tera) -> Self {
        tera.get_template_names()
            .filter_map(|template| {
                template
                    .strip_prefix(PAGES_TEMPLATE_DIR)
                    .and_then(|rest| rest.strip_suffix(".html"))
                    .map(|name| (name.to_string(), template.to_string()))
            })
            .fold(Self::new(), |registry, (name, template)| {
                registry.register(&name, PageModule::new(template))
            })
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl PageLoader for PageRegistry {
    fn load(
        &self,
        module_path: &str,
    ) -> impl Future<Output = Result<Option<PageModule>, PageError>> + Send {
        ready(Ok(self.modules.get(module_path).cloned()))
    }
}

/// Maps logical page names to mountable pages.
#[derive(Debug, Clone)]
pub struct PageResolver<L> {
    loader: L,
    default_layout: String,
}

impl<L: PageLoader> PageResolver<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            default_layout: DEFAULT_LAYOUT.to_string(),
        }
    }

    pub fn with_default_layout(mut self, layout: impl Into<String>) -> Self {
        self.default_layout = layout.into();
        self
    }

    pub fn default_layout(&self) -> &str {
        &self.default_layout
    }

    pub async fn resolve(&self, name: &str) -> Result<Page, PageError> {
        let sanitized = sanitize_page_name(name);
        if sanitized.is_empty() {
            return Err(PageError::NotFound(name.to_string()));
        }

        let module = self
            .loader
            .load(&module_path(&sanitized))
            .await?
            .ok_or_else(|| PageError::NotFound(sanitized.clone()))?;

        let layout = module
            .layout
            .unwrap_or_else(|| self.default_layout.clone());

        Ok(Page {
            name: sanitized,
            template: module.template,
            layout,
        })
    }
}
