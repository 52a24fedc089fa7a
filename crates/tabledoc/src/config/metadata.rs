//! User-authored metadata: titles, descriptions, and category rules.
//!
//! Metadata is a YAML mapping keyed by dataset file name (flat layout) or
//! folder name (folder layout). The reserved `site` key holds site-wide
//! settings:
//!
//! ```yaml
//! site:
//!   title: Survey documentation
//!   show_uncategorized: false
//! "My Survey.csv":
//!   title: Annual survey
//!   categories:
//!     - category: Demographics
//!       columns:
//!         age: Age in years
//!         region:
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;

use crate::category::{ShadowedListing, shadowed_listings};
use crate::error::{Result, TabledocError};
use crate::input::{Layout, SourceTree};

/// Top-level key holding site-wide settings.
pub const SITE_KEY: &str = "site";

/// A user-declared category and the columns it groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryRule {
    /// Category label.
    pub category: String,
    /// Column name to optional description, in declaration order.
    #[serde(default)]
    pub columns: IndexMap<String, Option<String>>,
}

/// Metadata for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryRule>,
}

/// Metadata for one folder and the datasets it holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FolderMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub datasets: IndexMap<String, DatasetMetadata>,
}

/// Site-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Bucket columns that match no category under "Uncategorized".
    #[serde(default = "default_true")]
    pub show_uncategorized: bool,
    /// Show completeness percentages in dataset pages.
    #[serde(default = "default_true")]
    pub show_percent_answered: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            show_uncategorized: true,
            show_percent_answered: true,
        }
    }
}

/// Dataset or folder entries, matching the layout of the sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataEntries {
    Datasets(IndexMap<String, DatasetMetadata>),
    Folders(IndexMap<String, FolderMetadata>),
}

/// A category listing that can never take effect, with its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataWarning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    pub dataset: String,
    pub listing: ShadowedListing,
}

impl std::fmt::Display for MetadataWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dataset = match &self.folder {
            Some(folder) => format!("{}/{}", folder, self.dataset),
            None => self.dataset.clone(),
        };
        write!(
            f,
            "{}: column '{}' is listed under '{}' and '{}'; only '{}' applies",
            dataset,
            self.listing.column,
            self.listing.bound_to,
            self.listing.shadowed,
            self.listing.bound_to
        )
    }
}

/// Typed metadata, validated once when loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub site: SiteMetadata,
    pub entries: MetadataEntries,
}

impl Metadata {
    /// Metadata with default site settings and no entries.
    pub fn empty(layout: Layout) -> Self {
        let entries = match layout {
            Layout::Flat => MetadataEntries::Datasets(IndexMap::new()),
            Layout::Folders => MetadataEntries::Folders(IndexMap::new()),
        };
        Self {
            site: SiteMetadata::default(),
            entries,
        }
    }

    /// Load metadata from a YAML file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not have the expected shape.
    pub fn load(path: impl AsRef<Path>, layout: Layout) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| TabledocError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml_str(&content, layout, path)
    }

    /// Load metadata if the file exists.
    ///
    /// A missing file is `Ok(None)`; an unreadable or malformed one is an error.
    pub fn load_optional(path: impl AsRef<Path>, layout: Layout) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No metadata file at {}", path.display());
            return Ok(None);
        }
        Self::load(path, layout).map(Some)
    }

    /// Parse metadata from YAML. `path` is only used in error messages.
    pub fn from_yaml_str(content: &str, layout: Layout, path: &Path) -> Result<Self> {
        let invalid = |message: String| TabledocError::Metadata {
            path: path.to_path_buf(),
            message,
        };

        let root: Value = serde_yaml_ng::from_str(content).map_err(|e| invalid(e.to_string()))?;
        let mapping = match root {
            Value::Null => return Ok(Self::empty(layout)),
            Value::Mapping(mapping) => mapping,
            _ => return Err(invalid("expected a mapping at the top level".to_string())),
        };

        let mut site = SiteMetadata::default();
        let mut datasets: IndexMap<String, DatasetMetadata> = IndexMap::new();
        let mut folders: IndexMap<String, FolderMetadata> = IndexMap::new();

        for (key, value) in mapping {
            let key = key_to_string(&key).ok_or_else(|| invalid(format!("unsupported key {:?}", key)))?;
            if key == SITE_KEY {
                site = entry_from_value(value, path, &key)?;
                continue;
            }
            match layout {
                Layout::Flat => {
                    datasets.insert(key.clone(), entry_from_value(value, path, &key)?);
                }
                Layout::Folders => {
                    folders.insert(key.clone(), entry_from_value(value, path, &key)?);
                }
            }
        }

        let entries = match layout {
            Layout::Flat => MetadataEntries::Datasets(datasets),
            Layout::Folders => MetadataEntries::Folders(folders),
        };
        let metadata = Self { site, entries };

        for warning in metadata.warnings() {
            tracing::warn!("{}", warning);
        }

        Ok(metadata)
    }

    /// Layout the entries were parsed for.
    pub fn layout(&self) -> Layout {
        match self.entries {
            MetadataEntries::Datasets(_) => Layout::Flat,
            MetadataEntries::Folders(_) => Layout::Folders,
        }
    }

    /// Metadata for a dataset, by file name and, in folder layout, folder name.
    pub fn dataset(&self, folder: Option<&str>, name: &str) -> Option<&DatasetMetadata> {
        match (&self.entries, folder) {
            (MetadataEntries::Datasets(datasets), None) => datasets.get(name),
            (MetadataEntries::Folders(folders), Some(folder)) => {
                folders.get(folder).and_then(|f| f.datasets.get(name))
            }
            _ => None,
        }
    }

    /// Metadata for a folder.
    pub fn folder(&self, name: &str) -> Option<&FolderMetadata> {
        match &self.entries {
            MetadataEntries::Folders(folders) => folders.get(name),
            MetadataEntries::Datasets(_) => None,
        }
    }

    /// Category listings shadowed by an earlier category of the same dataset.
    pub fn warnings(&self) -> Vec<MetadataWarning> {
        let mut warnings = Vec::new();
        let mut collect = |folder: Option<&str>, name: &str, dataset: &DatasetMetadata| {
            for listing in shadowed_listings(&dataset.categories) {
                warnings.push(MetadataWarning {
                    folder: folder.map(str::to_string),
                    dataset: name.to_string(),
                    listing,
                });
            }
        };

        match &self.entries {
            MetadataEntries::Datasets(datasets) => {
                for (name, dataset) in datasets {
                    collect(None, name, dataset);
                }
            }
            MetadataEntries::Folders(folders) => {
                for (folder_name, folder) in folders {
                    for (name, dataset) in &folder.datasets {
                        collect(Some(folder_name), name, dataset);
                    }
                }
            }
        }
        warnings
    }

    /// Check that every declared dataset and folder exists among the sources.
    ///
    /// Names are compared literally and case-sensitively.
    ///
    /// # Errors
    ///
    /// Returns [`TabledocError::EmptyConfiguration`] listing every declared
    /// name that was not found.
    pub fn check_sources(&self, tree: &SourceTree) -> Result<()> {
        // Entries declared for the other layout are never found
        let found: HashSet<(Option<&str>, &str)> = match tree {
            SourceTree::Flat(files) => files.iter().map(|f| (None, f.name.as_str())).collect(),
            SourceTree::Folders(folders) => folders
                .iter()
                .flat_map(|folder| {
                    folder
                        .sources
                        .iter()
                        .map(move |f| (Some(folder.name.as_str()), f.name.as_str()))
                })
                .collect(),
        };
        let known: HashSet<&str> = match tree {
            SourceTree::Flat(_) => HashSet::new(),
            SourceTree::Folders(folders) => folders.iter().map(|f| f.name.as_str()).collect(),
        };

        match &self.entries {
            MetadataEntries::Datasets(declared) => {
                let missing: Vec<String> = declared
                    .keys()
                    .filter(|name| !found.contains(&(None, name.as_str())))
                    .cloned()
                    .collect();
                if !missing.is_empty() {
                    return Err(TabledocError::EmptyConfiguration {
                        kind: "datasets".to_string(),
                        names: missing,
                    });
                }
            }
            MetadataEntries::Folders(declared) => {
                let missing_folders: Vec<String> = declared
                    .keys()
                    .filter(|name| !known.contains(name.as_str()))
                    .cloned()
                    .collect();
                if !missing_folders.is_empty() {
                    return Err(TabledocError::EmptyConfiguration {
                        kind: "folders".to_string(),
                        names: missing_folders,
                    });
                }

                let mut missing = Vec::new();
                for (folder_name, folder) in declared {
                    for name in folder.datasets.keys() {
                        if !found.contains(&(Some(folder_name.as_str()), name.as_str())) {
                            missing.push(format!("{}/{}", folder_name, name));
                        }
                    }
                }
                if !missing.is_empty() {
                    return Err(TabledocError::EmptyConfiguration {
                        kind: "datasets".to_string(),
                        names: missing,
                    });
                }
            }
        }

        Ok(())
    }
}

fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Deserialize one entry; an empty entry (`name:`) is the default.
fn entry_from_value<T>(value: Value, path: &Path, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if value.is_null() {
        return Ok(T::default());
    }
    serde_yaml_ng::from_value(value).map_err(|e| TabledocError::Metadata {
        path: PathBuf::from(path),
        message: format!("entry '{}': {}", key, e),
    })
}
