//! Page-object responses for the hydrating front-end.
//!
//! Every page response carries a page object `{component, props, url,
//! version}`. A client-side navigation (`X-Inertia: true`) receives it as
//! JSON; a first visit receives the resolved page rendered inside its layout
//! with the page object embedded for hydration.

use actix_web::http::{Method, StatusCode, header};
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::pages::{Page, PageError, PageLoader, PageRegistry, PageResolver};

pub const INERTIA_HEADER: &str = "X-Inertia";
pub const VERSION_HEADER: &str = "X-Inertia-Version";
pub const LOCATION_HEADER: &str = "X-Inertia-Location";

/// The page object shared by the JSON and HTML responses.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InertiaPage {
    pub component: String,
    pub props: serde_json::Value,
    pub url: String,
    pub version: String,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Page(#[from] PageError),

    #[error("failed to serialize props: {0}")]
    Props(#[from] serde_json::Error),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

/// Returns `true` for client-side navigations.
pub fn is_inertia_request(req: &HttpRequest) -> bool {
    req.headers()
        .get(INERTIA_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

/// Forces the client to perform a full page visit to `url`.
pub fn location(url: &str) -> HttpResponse {
    HttpResponse::Conflict()
        .insert_header((LOCATION_HEADER, url))
        .finish()
}

/// Renders pages resolved through a [`PageResolver`].
pub struct Inertia<L = PageRegistry> {
    resolver: PageResolver<L>,
    tera: Tera,
    version: String,
}

impl<L: PageLoader> Inertia<L> {
    pub fn new(resolver: PageResolver<L>, tera: Tera, version: impl Into<String>) -> Self {
        Self {
            resolver,
            tera,
            version: version.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub async fn render<P>(&self, req: &HttpRequest, component: &str, props: &P) -> HttpResponse
    where
        P: Serialize + ?Sized,
    {
        self.render_with_status(req, StatusCode::OK, component, props)
            .await
    }

    pub async fn render_with_status<P>(
        &self,
        req: &HttpRequest,
        status: StatusCode,
        component: &str,
        props: &P,
    ) -> HttpResponse
    where
        P: Serialize + ?Sized,
    {
        let inertia = is_inertia_request(req);

        if inertia && req.method() == Method::GET && self.is_stale(req) {
            return location(&req.uri().to_string());
        }

        let result = match self.page_object(req, component, props).await {
            Ok((_, page_object)) if inertia => Ok(HttpResponse::build(status)
                .insert_header((INERTIA_HEADER, "true"))
                .insert_header((header::VARY, INERTIA_HEADER))
                .json(page_object)),
            Ok((page, page_object)) => self.render_html(&page, &page_object).map(|html| {
                HttpResponse::build(status)
                    .insert_header((header::VARY, INERTIA_HEADER))
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }),
            Err(err) => Err(err),
        };

        match result {
            Ok(response) => response,
            Err(err) => {
                log::error!("Failed to render page {component}: {err}");
                HttpResponse::InternalServerError().finish()
            }
        }
    }

    /// Client asset version differs from ours.
    fn is_stale(&self, req: &HttpRequest) -> bool {
        req.headers()
            .get(VERSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|version| version != self.version)
    }

    async fn page_object<P>(
        &self,
        req: &HttpRequest,
        component: &str,
        props: &P,
    ) -> Result<(Page, InertiaPage), RenderError>
    where
        P: Serialize + ?Sized,
    {
        let page = self.resolver.resolve(component).await?;
        let page_object = InertiaPage {
            component: page.name.clone(),
            props: serde_json::to_value(props)?,
            url: req.uri().to_string(),
            version: self.version.clone(),
        };
        Ok((page, page_object))
    }

    fn render_html(&self, page: &Page, page_object: &InertiaPage) -> Result<String, RenderError> {
        let mut context = Context::from_value(page_object.props.clone())?;
        let content = self.tera.render(&page.template, &context)?;

        context.insert("content", &content);
        context.insert("page", page_object);
        context.insert("page_json", &serde_json::to_string(page_object)?);

        Ok(self.tera.render(&page.layout, &context)?)
    }
}
