//! Embedded HTML templates for the page and its views
//!
//! Templates are compiled once on first use. Autoescape is on for every
//! `.html` template, so any text placed in a context is shown literally;
//! only already-rendered markup is passed through with `| safe`.

use std::sync::OnceLock;

use tera::{Context, Tera};

/// Error type for template operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum TemplateError {
    #[error("template compilation failed: {0}")]
    Compile(String),
    #[error("template rendering failed: {0}")]
    Render(String),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        Self::Render(e.to_string())
    }
}

pub const CURRENT: &str = "current.html";
pub const GRID: &str = "grid.html";
pub const LOADING: &str = "loading.html";
pub const ERROR: &str = "error.html";
pub const PAGE: &str = "page.html";

mod embedded {
    pub const CURRENT: &str = include_str!("current.html");
    pub const GRID: &str = include_str!("grid.html");
    pub const LOADING: &str = include_str!("loading.html");
    pub const ERROR: &str = include_str!("error.html");
    pub const PAGE: &str = include_str!("page.html");
}

fn build() -> Result<Tera, TemplateError> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![".html"]);
    tera.add_raw_templates(vec![
        (CURRENT, embedded::CURRENT),
        (GRID, embedded::GRID),
        (LOADING, embedded::LOADING),
        (ERROR, embedded::ERROR),
        (PAGE, embedded::PAGE),
    ])
    .map_err(|e| TemplateError::Compile(e.to_string()))?;
    tracing::debug!(count = tera.get_template_names().count(), "templates compiled");
    Ok(tera)
}

fn engine() -> Result<&'static Tera, TemplateError> {
    static ENGINE: OnceLock<Result<Tera, TemplateError>> = OnceLock::new();
    ENGINE.get_or_init(build).as_ref().map_err(Clone::clone)
}

/// Render one of the embedded templates
pub fn render(name: &str, context: &Context) -> Result<String, TemplateError> {
    Ok(engine()?.render(name, context)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_compile() {
        let tera = engine().unwrap();
        let mut names: Vec<_> = tera.get_template_names().collect();
        names.sort_unstable();
        assert_eq!(names, vec![CURRENT, ERROR, GRID, LOADING, PAGE]);
    }

    #[test]
    fn test_context_text_is_escaped() {
        let mut ctx = Context::new();
        ctx.insert("icon", "!");
        ctx.insert("message", "<b>\"x\" & y</b>");
        let html = render(ERROR, &ctx).unwrap();
        assert!(html.contains("&lt;b&gt;&quot;x&quot; &amp; y&lt;&#x2F;b&gt;"));
    }

    #[test]
    fn test_unknown_template_is_render_error() {
        let err = render("missing.html", &Context::new()).unwrap_err();
        assert!(matches!(err, TemplateError::Render(_)));
    }
}
