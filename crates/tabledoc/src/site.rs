//! Site model: every documented dataset, flat or grouped into folders.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::Metadata;
use crate::error::{Result, TabledocError};
use crate::input::{Layout, SourceTree};
use crate::schema::{Dataset, DisplayOptions};

/// Page name reserved for the site and folder indexes.
const INDEX_PAGE: &str = "index.html";

/// A group of datasets read from one subdirectory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Folder {
    /// Directory name, used as the identifier in metadata.
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub datasets: Vec<Dataset>,
}

impl Folder {
    /// Title if set, otherwise the directory name.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Path of the folder index page, relative to the site root.
    pub fn index_path(&self) -> String {
        format!("{}/{}", self.name, INDEX_PAGE)
    }
}

/// Datasets of a site in one of the two layouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", content = "items", rename_all = "snake_case")]
pub enum SiteContents {
    Datasets(Vec<Dataset>),
    Folders(Vec<Folder>),
}

impl SiteContents {
    pub fn layout(&self) -> Layout {
        match self {
            SiteContents::Datasets(_) => Layout::Flat,
            SiteContents::Folders(_) => Layout::Folders,
        }
    }

    fn datasets_mut(&mut self) -> Box<dyn Iterator<Item = &mut Dataset> + '_> {
        match self {
            SiteContents::Datasets(datasets) => Box::new(datasets.iter_mut()),
            SiteContents::Folders(folders) => {
                Box::new(folders.iter_mut().flat_map(|f| f.datasets.iter_mut()))
            }
        }
    }
}

/// The documentation site handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Site {
    pub title: Option<String>,
    pub description: Option<String>,
    pub contents: SiteContents,
    pub display: DisplayOptions,
}

impl Site {
    /// Aggregate built datasets or folders into a site.
    ///
    /// `sources` is the scanned tree the contents were built from. Sources
    /// skipped during the build still count as found. Site-wide display
    /// settings are copied into every dataset.
    ///
    /// # Errors
    ///
    /// Returns [`TabledocError::EmptyConfiguration`] if the metadata
    /// declares datasets or folders that are not among `sources`, and
    /// [`TabledocError::PageCollision`] if two datasets in the same
    /// directory share a page name or one takes the `index.html` slot.
    pub fn assemble(mut contents: SiteContents, metadata: &Metadata, sources: &SourceTree) -> Result<Self> {
        metadata.check_sources(sources)?;
        match &contents {
            SiteContents::Datasets(datasets) => check_page_names(None, datasets)?,
            SiteContents::Folders(folders) => {
                for folder in folders {
                    check_page_names(Some(&folder.name), &folder.datasets)?;
                }
            }
        }

        let display = DisplayOptions {
            show_percent_complete: metadata.site.show_percent_answered,
        };
        for dataset in contents.datasets_mut() {
            dataset.display = display;
        }

        Ok(Self {
            title: metadata.site.title.clone(),
            description: metadata.site.description.clone(),
            contents,
            display,
        })
    }

    pub fn layout(&self) -> Layout {
        self.contents.layout()
    }

    /// Every dataset with the folder it belongs to, in site order.
    pub fn datasets(&self) -> Vec<(Option<&Folder>, &Dataset)> {
        match &self.contents {
            SiteContents::Datasets(datasets) => datasets.iter().map(|d| (None, d)).collect(),
            SiteContents::Folders(folders) => folders
                .iter()
                .flat_map(|f| f.datasets.iter().map(move |d| (Some(f), d)))
                .collect(),
        }
    }

    pub fn dataset_count(&self) -> usize {
        match &self.contents {
            SiteContents::Datasets(datasets) => datasets.len(),
            SiteContents::Folders(folders) => folders.iter().map(|f| f.datasets.len()).sum(),
        }
    }

    /// Title if set, otherwise a generic heading.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Data documentation")
    }
}

/// Page every dataset of one output directory renders to must be unique.
fn check_page_names(folder: Option<&str>, datasets: &[Dataset]) -> Result<()> {
    let qualify = |name: &str| match folder {
        Some(folder) => format!("{}/{}", folder, name),
        None => name.to_string(),
    };

    let mut claimed: HashMap<String, String> = HashMap::new();
    claimed.insert(INDEX_PAGE.to_string(), qualify(INDEX_PAGE));

    for dataset in datasets {
        let page = dataset.output_file_name();
        let owner = qualify(&dataset.name);
        if let Some(first) = claimed.get(&page) {
            return Err(TabledocError::PageCollision {
                page: qualify(&page),
                first: first.clone(),
                second: owner,
            });
        }
        claimed.insert(page, owner);
    }
    Ok(())
}
