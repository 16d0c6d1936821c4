//! The HTML page: tab bar plus view container, written to disk for a browser

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use tera::Context;

use crate::state::AppState;
use crate::templates::{self, TemplateError};

/// Seconds between browser reloads of the written page
const REFRESH_SECS: u32 = 5;

#[derive(Serialize)]
struct Trigger {
    endpoint: &'static str,
    label: &'static str,
    active: bool,
}

/// Full document for the current state
pub fn document(state: &AppState) -> Result<String, TemplateError> {
    let tabs: Vec<Trigger> = state
        .tabs
        .triggers()
        .map(|(tab, active)| Trigger {
            endpoint: tab.endpoint(),
            label: tab.label(),
            active,
        })
        .collect();

    let mut ctx = Context::new();
    ctx.insert("refresh_secs", &REFRESH_SECS);
    ctx.insert("tabs", &tabs);
    ctx.insert("view", state.container.markup());
    templates::render(templates::PAGE, &ctx)
}

/// Writes the page whenever it differs from the last write
#[derive(Debug)]
pub struct HtmlSink {
    path: PathBuf,
    last: Option<String>,
}

impl HtmlSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last: None,
        }
    }

    /// Returns whether the file was rewritten
    pub fn sync(&mut self, state: &AppState) -> io::Result<bool> {
        let html = document(state).map_err(io::Error::other)?;
        if self.last.as_deref() == Some(html.as_str()) {
            return Ok(false);
        }
        std::fs::write(&self.path, &html)?;
        tracing::debug!(path = %self.path.display(), bytes = html.len(), "page written");
        self.last = Some(html);
        Ok(true)
    }
}
