//! Static HTML site renderer.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::Environment;
use rust_embed::RustEmbed;
use serde::Serialize;
use tabledoc::{Site, SiteContents};

use super::view::{DatasetView, FolderView, HomeView, PageLinks};
use super::{RenderError, RenderSummary, Renderer};

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/assets/"]
struct Assets;

const TEMPLATE_PREFIX: &str = "templates/";
const STATIC_PREFIX: &str = "static/";

/// Writes a site as static HTML pages.
///
/// Flat sites get `index.html` plus one page per dataset. Folder sites get
/// `index.html`, then `<folder>/index.html` and one page per dataset inside
/// each folder. Stylesheets go to `static/`.
pub struct HtmlRenderer {
    output_dir: PathBuf,
    static_dir: Option<PathBuf>,
    clean: bool,
}

impl HtmlRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            static_dir: None,
            clean: false,
        }
    }

    /// Copy a user directory over the embedded static assets.
    pub fn with_static_dir(mut self, static_dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(static_dir.into());
        self
    }

    /// Remove the output directory before writing.
    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    fn write_assets(&self) -> Result<usize, RenderError> {
        let static_out = self.output_dir.join("static");
        let mut written = 0;

        for name in Assets::iter() {
            let Some(relative) = name.strip_prefix(STATIC_PREFIX) else {
                continue;
            };
            let file = Assets::get(&name).ok_or_else(|| RenderError::MissingAsset(name.to_string()))?;
            write_bytes(&static_out.join(relative), &file.data)?;
            written += 1;
        }

        if let Some(static_dir) = &self.static_dir {
            written += copy_dir(static_dir, &static_out)?;
        }

        Ok(written)
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, site: &Site) -> Result<RenderSummary, RenderError> {
        if self.clean && self.output_dir.exists() {
            tracing::info!("Removing {}", self.output_dir.display());
            fs::remove_dir_all(&self.output_dir).map_err(|e| io_error(&self.output_dir, e))?;
        }
        fs::create_dir_all(&self.output_dir).map_err(|e| io_error(&self.output_dir, e))?;

        let sources = template_sources()?;
        let mut env = Environment::new();
        for (name, source) in &sources {
            env.add_template(name, source)?;
        }

        let generated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
        let mut pages = 0;

        let home = HomeView::new(site, &generated_at);
        render_page(&env, "home.html", &home, &self.output_dir.join("index.html"))?;
        pages += 1;

        match &site.contents {
            SiteContents::Datasets(datasets) => {
                for dataset in datasets {
                    let view = DatasetView::new(dataset, None, PageLinks::ROOT, &generated_at);
                    let path = self.output_dir.join(dataset.output_file_name());
                    render_page(&env, "dataset.html", &view, &path)?;
                    pages += 1;
                }
            }
            SiteContents::Folders(folders) => {
                for folder in folders {
                    let folder_dir = self.output_dir.join(&folder.name);
                    let view = FolderView::new(folder, &generated_at);
                    render_page(&env, "folder.html", &view, &folder_dir.join("index.html"))?;
                    pages += 1;

                    for dataset in &folder.datasets {
                        let view =
                            DatasetView::new(dataset, Some(folder), PageLinks::NESTED, &generated_at);
                        render_page(&env, "dataset.html", &view, &folder_dir.join(dataset.output_file_name()))?;
                        pages += 1;
                    }
                }
            }
        }

        let assets_written = self.write_assets()?;
        tracing::info!(
            "Rendered {} page(s) and {} asset(s) to {}",
            pages,
            assets_written,
            self.output_dir.display()
        );

        Ok(RenderSummary {
            output_dir: self.output_dir.clone(),
            pages_written: pages,
            assets_written,
        })
    }
}

/// Embedded templates as (name, source) pairs, names without the prefix.
fn template_sources() -> Result<Vec<(String, String)>, RenderError> {
    let mut sources = Vec::new();
    for name in Assets::iter() {
        let Some(template_name) = name.strip_prefix(TEMPLATE_PREFIX) else {
            continue;
        };
        let file = Assets::get(&name).ok_or_else(|| RenderError::MissingAsset(name.to_string()))?;
        let source = String::from_utf8_lossy(&file.data).into_owned();
        sources.push((template_name.to_string(), source));
    }
    Ok(sources)
}

fn render_page<S: Serialize>(
    env: &Environment<'_>,
    template: &str,
    view: &S,
    path: &Path,
) -> Result<(), RenderError> {
    let html = env
        .get_template(template)?
        .render(minijinja::Value::from_serialize(view))?;
    tracing::debug!("Writing {}", path.display());
    write_bytes(path, html.as_bytes())
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    fs::write(path, bytes).map_err(|e| io_error(path, e))
}

/// Recursively copy `from` into `to`, returning the number of files copied.
fn copy_dir(from: &Path, to: &Path) -> Result<usize, RenderError> {
    fs::create_dir_all(to).map_err(|e| io_error(to, e))?;
    let mut copied = 0;

    for entry in fs::read_dir(from).map_err(|e| io_error(from, e))? {
        let entry = entry.map_err(|e| io_error(from, e))?;
        let source = entry.path();
        let target = to.join(entry.file_name());
        if source.is_dir() {
            copied += copy_dir(&source, &target)?;
        } else {
            fs::copy(&source, &target).map_err(|e| io_error(&source, e))?;
            copied += 1;
        }
    }

    Ok(copied)
}

fn io_error(path: &Path, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabledoc::{SourceTree, Tabledoc};
    use tempfile::TempDir;

    fn build_site(data_dir: &Path) -> Site {
        let tree = SourceTree::discover(data_dir).unwrap();
        Tabledoc::new().build(&tree, None).unwrap().site
    }

    #[test]
    fn test_render_flat_site() {
        let data = TempDir::new().unwrap();
        fs::write(data.path().join("My Survey.csv"), "age,region\n30,north\n41,south\n").unwrap();
        let out = TempDir::new().unwrap();
        let output_dir = out.path().join("docs");

        let summary = HtmlRenderer::new(&output_dir)
            .render(&build_site(data.path()))
            .unwrap();

        assert_eq!(summary.pages_written, 2);
        assert!(summary.assets_written >= 1);
        assert!(output_dir.join("static/style.css").exists());

        let home = fs::read_to_string(output_dir.join("index.html")).unwrap();
        assert!(home.contains("My_Survey.html"));

        let page = fs::read_to_string(output_dir.join("My_Survey.html")).unwrap();
        assert!(page.contains("region"));
        assert!(page.contains("Categorical"));
        assert!(page.contains("href=\"static/style.css\""));
    }

    #[test]
    fn test_render_folder_site_with_static_dir() {
        let data = TempDir::new().unwrap();
        fs::create_dir(data.path().join("2019")).unwrap();
        fs::write(data.path().join("2019/a.csv"), "x\n1\n").unwrap();

        let static_dir = TempDir::new().unwrap();
        fs::write(static_dir.path().join("logo.png"), b"png").unwrap();

        let out = TempDir::new().unwrap();
        let summary = HtmlRenderer::new(out.path())
            .with_static_dir(static_dir.path())
            .render(&build_site(data.path()))
            .unwrap();

        assert_eq!(summary.pages_written, 3);
        assert!(out.path().join("2019/index.html").exists());
        assert!(out.path().join("static/logo.png").exists());

        let page = fs::read_to_string(out.path().join("2019/a.html")).unwrap();
        assert!(page.contains("href=\"../static/style.css\""));
        assert!(page.contains("href=\"../index.html\""));
    }

    #[test]
    fn test_clean_removes_stale_pages() {
        let data = TempDir::new().unwrap();
        fs::write(data.path().join("a.csv"), "x\n1\n").unwrap();
        let out = TempDir::new().unwrap();
        fs::write(out.path().join("stale.html"), "old").unwrap();

        HtmlRenderer::new(out.path())
            .with_clean(true)
            .render(&build_site(data.path()))
            .unwrap();

        assert!(!out.path().join("stale.html").exists());
        assert!(out.path().join("a.html").exists());
    }

    #[test]
    fn test_index_source_does_not_replace_home_page() {
        let data = TempDir::new().unwrap();
        fs::write(data.path().join("index.csv"), "x\n1\n").unwrap();
        fs::write(data.path().join("other.csv"), "y\n2\n").unwrap();

        let tree = SourceTree::discover(data.path()).unwrap();
        let err = Tabledoc::new().build(&tree, None).unwrap_err();
        assert!(matches!(err, tabledoc::TabledocError::PageCollision { .. }));
    }

    #[test]
    fn test_every_page_written_is_distinct() {
        let data = TempDir::new().unwrap();
        fs::write(data.path().join("a b.csv"), "x\n1\n").unwrap();
        fs::write(data.path().join("c.csv"), "y\n2\n").unwrap();
        let out = TempDir::new().unwrap();

        let summary = HtmlRenderer::new(out.path())
            .render(&build_site(data.path()))
            .unwrap();

        let html_files = fs::read_dir(out.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "html"))
            .count();
        assert_eq!(summary.pages_written, html_files);
        assert_eq!(html_files, 3);
    }
}
