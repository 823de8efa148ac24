use crate::chart::ChartFragment;
use actix_web::{http::header::ContentType, HttpResponse};
use anyhow::Result;
use tera::{Context, Tera};

const BASE: &str = include_str!("../templates/base.html");

/// Tera templates, compiled once at startup and shared by every request.
///
/// Every page extends `base.html`, which loads plotly.js and draws whatever
/// is in the `charts` context variable; see [`Pages::context()`].
pub struct Pages {
    tera: Tera,
}

impl Pages {
    /// Compile `templates` (as `(name, source)` pairs) alongside the base layout.
    ///
    /// Names ending in `.html` are auto-escaped.
    pub fn new(templates: &[(&str, &str)]) -> Result<Self> {
        let mut tera = Tera::default();
        let mut all = vec![("base.html", BASE)];
        all.extend_from_slice(templates);
        tera.add_raw_templates(all)?;
        Ok(Pages { tera })
    }

    /// A fresh context with no charts in it.
    pub fn context() -> Context {
        let mut context = Context::new();
        context.insert("charts", &Vec::<ChartFragment>::new());
        context
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<String> {
        let html = self.tera.render(name, context)?;
        Ok(html)
    }

    /// Render `name` into a `200 OK` HTML response; a rendering failure is
    /// logged and answered with a `500`.
    pub fn respond(&self, name: &str, context: &Context) -> HttpResponse {
        match self.render(name, context) {
            Ok(html) => HttpResponse::Ok()
                .content_type(ContentType::html())
                .body(html),
            Err(e) => {
                log::error!("failed to render {name}: {e:?}");
                HttpResponse::InternalServerError().body("Page rendering failed")
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
