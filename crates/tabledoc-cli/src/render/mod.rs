//! Rendering of a documentation site to disk.

mod html;
mod view;

use std::path::PathBuf;

use serde::Serialize;
use tabledoc::Site;
use thiserror::Error;

pub use html::HtmlRenderer;

/// Error raised while rendering a site.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Embedded asset not found: {0}")]
    MissingAsset(String),

    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a render wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    pub output_dir: PathBuf,
    pub pages_written: usize,
    pub assets_written: usize,
}

/// Consumes a finished site and produces output.
pub trait Renderer {
    fn render(&self, site: &Site) -> Result<RenderSummary, RenderError>;
}
