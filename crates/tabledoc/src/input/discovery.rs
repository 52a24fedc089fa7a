//! Discovery of CSV sources under a data directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabledocError};

/// Shape of a documentation site: flat datasets or one folder per directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Flat,
    Folders,
}

/// A single source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name, used as the dataset name and metadata key.
    pub name: String,
    pub path: PathBuf,
}

/// A directory of source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFolder {
    /// Directory name, used as the folder name and metadata key.
    pub name: String,
    pub path: PathBuf,
    pub sources: Vec<SourceFile>,
}

/// The sources found under a data directory, in name order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceTree {
    Flat(Vec<SourceFile>),
    Folders(Vec<SourceFolder>),
}

impl SourceTree {
    /// Walk `root` one level deep.
    ///
    /// CSV files directly under `root` produce a flat tree; subdirectories
    /// holding CSV files produce a folder tree. Mixing both is an error.
    /// Hidden entries (leading `.`) are ignored.
    pub fn discover(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let mut files = Vec::new();
        let mut folders = Vec::new();

        for (name, path) in list_dir(root)? {
            if path.is_dir() {
                let sources = csv_files(&path)?;
                if sources.is_empty() {
                    tracing::debug!("Skipping directory without CSV files: {}", path.display());
                    continue;
                }
                folders.push(SourceFolder {
                    name,
                    path,
                    sources,
                });
            } else if is_csv(&path) {
                files.push(SourceFile { name, path });
            } else {
                tracing::debug!("Skipping non-CSV file: {}", path.display());
            }
        }

        match (files.is_empty(), folders.is_empty()) {
            (_, true) => Ok(SourceTree::Flat(files)),
            (true, false) => Ok(SourceTree::Folders(folders)),
            (false, false) => Err(TabledocError::Layout {
                path: root.to_path_buf(),
                message: format!(
                    "found {} CSV file(s) next to {} folder(s); use either datasets or folders, not both",
                    files.len(),
                    folders.len()
                ),
            }),
        }
    }

    /// The layout of this tree.
    pub fn layout(&self) -> Layout {
        match self {
            SourceTree::Flat(_) => Layout::Flat,
            SourceTree::Folders(_) => Layout::Folders,
        }
    }

    /// Total number of source files.
    pub fn source_count(&self) -> usize {
        match self {
            SourceTree::Flat(files) => files.len(),
            SourceTree::Folders(folders) => folders.iter().map(|f| f.sources.len()).sum(),
        }
    }

    /// Returns true if no sources were found.
    pub fn is_empty(&self) -> bool {
        self.source_count() == 0
    }
}

/// Sorted, non-hidden entries of a directory.
fn list_dir(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let io_error = |source: std::io::Error| TabledocError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        entries.push((name, entry.path()));
    }
    entries.sort();
    Ok(entries)
}

fn csv_files(dir: &Path) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    for (name, path) in list_dir(dir)? {
        if is_csv(&path) {
            files.push(SourceFile { name, path });
        } else {
            tracing::debug!("Skipping {}", path.display());
        }
    }
    Ok(files)
}

fn is_csv(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("csv"))
            .unwrap_or(false)
}
