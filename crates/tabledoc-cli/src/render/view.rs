//! Template contexts built from the documentation model.

use serde::Serialize;
use tabledoc::{Column, Dataset, Folder, Site, SiteContents};

/// Relative links from a page back to the site root.
#[derive(Debug, Clone, Serialize)]
pub struct PageLinks {
    pub home: &'static str,
    #[serde(rename = "static")]
    pub static_dir: &'static str,
}

impl PageLinks {
    pub const ROOT: PageLinks = PageLinks {
        home: "index.html",
        static_dir: "static",
    };

    pub const NESTED: PageLinks = PageLinks {
        home: "../index.html",
        static_dir: "../static",
    };
}

#[derive(Debug, Serialize)]
pub struct DatasetLink<'a> {
    pub title: &'a str,
    pub name: &'a str,
    pub href: String,
    pub row_count: usize,
    pub column_count: usize,
}

impl<'a> DatasetLink<'a> {
    pub fn new(dataset: &'a Dataset, prefix: &str) -> Self {
        Self {
            title: dataset.display_title(),
            name: &dataset.name,
            href: format!("{}{}", prefix, dataset.output_file_name()),
            row_count: dataset.row_count,
            column_count: dataset.column_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FolderLink<'a> {
    pub title: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub href: String,
    pub dataset_count: usize,
}

#[derive(Debug, Serialize)]
pub struct HomeView<'a> {
    pub links: PageLinks,
    pub generated_at: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub datasets: Vec<DatasetLink<'a>>,
    pub folders: Vec<FolderLink<'a>>,
}

impl<'a> HomeView<'a> {
    pub fn new(site: &'a Site, generated_at: &'a str) -> Self {
        let (datasets, folders) = match &site.contents {
            SiteContents::Datasets(datasets) => (
                datasets.iter().map(|d| DatasetLink::new(d, "")).collect(),
                Vec::new(),
            ),
            SiteContents::Folders(folders) => (
                Vec::new(),
                folders
                    .iter()
                    .map(|f| FolderLink {
                        title: f.display_title(),
                        name: &f.name,
                        description: f.description.as_deref(),
                        href: f.index_path(),
                        dataset_count: f.datasets.len(),
                    })
                    .collect(),
            ),
        };

        Self {
            links: PageLinks::ROOT,
            generated_at,
            title: site.display_title(),
            description: site.description.as_deref(),
            datasets,
            folders,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FolderView<'a> {
    pub links: PageLinks,
    pub generated_at: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub datasets: Vec<DatasetLink<'a>>,
}

impl<'a> FolderView<'a> {
    pub fn new(folder: &'a Folder, generated_at: &'a str) -> Self {
        Self {
            links: PageLinks::NESTED,
            generated_at,
            title: folder.display_title(),
            description: folder.description.as_deref(),
            datasets: folder.datasets.iter().map(|d| DatasetLink::new(d, "")).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryView<'a> {
    pub name: &'a str,
    pub columns: Vec<&'a Column>,
}

#[derive(Debug, Serialize)]
pub struct DatasetView<'a> {
    pub links: PageLinks,
    pub generated_at: &'a str,
    pub title: &'a str,
    pub name: &'a str,
    pub folder: Option<&'a str>,
    pub row_count: usize,
    pub column_count: usize,
    pub show_percent_complete: bool,
    pub categories: Vec<CategoryView<'a>>,
}

impl<'a> DatasetView<'a> {
    pub fn new(
        dataset: &'a Dataset,
        folder: Option<&'a Folder>,
        links: PageLinks,
        generated_at: &'a str,
    ) -> Self {
        Self {
            links,
            generated_at,
            title: dataset.display_title(),
            name: &dataset.name,
            folder: folder.map(|f| f.display_title()),
            row_count: dataset.row_count,
            column_count: dataset.column_count,
            show_percent_complete: dataset.display.show_percent_complete,
            categories: dataset
                .buckets()
                .map(|(name, columns)| CategoryView { name, columns })
                .collect(),
        }
    }
}
