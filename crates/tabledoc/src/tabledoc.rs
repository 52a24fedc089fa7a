//! Main Tabledoc struct and public API.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::assembly::{DatasetAssembler, DatasetOptions};
use crate::config::{Metadata, MetadataWarning};
use crate::error::{Result, TabledocError};
use crate::inference::{DEFAULT_CATEGORICAL_THRESHOLD, TypeInferencer};
use crate::input::{Parser, ParserConfig, SourceFile, SourceTree};
use crate::schema::Dataset;
use crate::site::{Folder, Site, SiteContents};

/// What to do when one source fails to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Abort the whole build.
    #[default]
    FailFast,
    /// Log the failure, leave the source out, and keep going.
    ///
    /// Configuration errors abort regardless.
    SkipFailed,
}

/// Configuration for a Tabledoc build.
#[derive(Debug, Clone)]
pub struct TabledocConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Text columns with fewer distinct values are categorical.
    pub categorical_threshold: usize,
    pub failure_mode: FailureMode,
}

impl Default for TabledocConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            categorical_threshold: DEFAULT_CATEGORICAL_THRESHOLD,
            failure_mode: FailureMode::FailFast,
        }
    }
}

/// A source left out of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    pub dataset: String,
    pub path: PathBuf,
    pub reason: String,
}

/// Result of building a site.
#[derive(Debug, Clone, Serialize)]
pub struct BuildOutput {
    pub site: Site,
    /// Sources that failed and were skipped.
    pub skipped: Vec<SkippedSource>,
    /// Category listings that can never take effect.
    pub warnings: Vec<MetadataWarning>,
}

/// The main documentation engine.
pub struct Tabledoc {
    config: TabledocConfig,
    assembler: DatasetAssembler,
}

impl Tabledoc {
    /// Create a new instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(TabledocConfig::default())
    }

    /// Create an instance with custom configuration.
    pub fn with_config(config: TabledocConfig) -> Self {
        let assembler = DatasetAssembler::new(
            Parser::with_config(config.parser.clone()),
            TypeInferencer::with_threshold(config.categorical_threshold),
        );
        Self { config, assembler }
    }

    pub fn config(&self) -> &TabledocConfig {
        &self.config
    }

    /// Document a single file with no metadata.
    pub fn describe(&self, path: impl AsRef<Path>) -> Result<Dataset> {
        self.assembler.build(path, &DatasetOptions::default())
    }

    /// Document a single file with explicit options.
    pub fn build_dataset(&self, path: impl AsRef<Path>, options: &DatasetOptions<'_>) -> Result<Dataset> {
        self.assembler.build(path, options)
    }

    /// Discover sources under `data_dir`, load metadata if present, and build.
    pub fn build_dir(&self, data_dir: impl AsRef<Path>, metadata_path: Option<&Path>) -> Result<BuildOutput> {
        let tree = SourceTree::discover(data_dir)?;
        let metadata = match metadata_path {
            Some(path) => Metadata::load_optional(path, tree.layout())?,
            None => None,
        };
        self.build(&tree, metadata.as_ref())
    }

    /// Build the site for a scanned source tree.
    ///
    /// Metadata coverage is checked before any source is read.
    ///
    /// # Errors
    ///
    /// Configuration errors always fail the build. Per-source errors fail it
    /// in [`FailureMode::FailFast`] and are collected in
    /// [`BuildOutput::skipped`] otherwise.
    pub fn build(&self, tree: &SourceTree, metadata: Option<&Metadata>) -> Result<BuildOutput> {
        let empty;
        let metadata = match metadata {
            Some(metadata) => metadata,
            None => {
                empty = Metadata::empty(tree.layout());
                &empty
            }
        };
        metadata.check_sources(tree)?;

        tracing::info!("Building {} source(s)", tree.source_count());

        let mut skipped = Vec::new();
        let contents = match tree {
            SourceTree::Flat(files) => {
                let mut datasets = Vec::with_capacity(files.len());
                for file in files {
                    if let Some(dataset) = self.build_source(None, file, metadata, &mut skipped)? {
                        datasets.push(dataset);
                    }
                }
                SiteContents::Datasets(datasets)
            }
            SourceTree::Folders(source_folders) => {
                let mut folders = Vec::with_capacity(source_folders.len());
                for source_folder in source_folders {
                    let mut datasets = Vec::with_capacity(source_folder.sources.len());
                    for file in &source_folder.sources {
                        let folder = Some(source_folder.name.as_str());
                        if let Some(dataset) = self.build_source(folder, file, metadata, &mut skipped)? {
                            datasets.push(dataset);
                        }
                    }
                    let folder_metadata = metadata.folder(&source_folder.name);
                    folders.push(Folder {
                        name: source_folder.name.clone(),
                        title: folder_metadata.and_then(|f| f.title.clone()),
                        description: folder_metadata.and_then(|f| f.description.clone()),
                        datasets,
                    });
                }
                SiteContents::Folders(folders)
            }
        };

        let site = Site::assemble(contents, metadata, tree)?;
        tracing::info!(
            "Documented {} dataset(s), skipped {}",
            site.dataset_count(),
            skipped.len()
        );

        Ok(BuildOutput {
            site,
            skipped,
            warnings: metadata.warnings(),
        })
    }

    fn build_source(
        &self,
        folder: Option<&str>,
        file: &SourceFile,
        metadata: &Metadata,
        skipped: &mut Vec<SkippedSource>,
    ) -> Result<Option<Dataset>> {
        let dataset_metadata = metadata.dataset(folder, &file.name);
        let options = DatasetOptions {
            title: dataset_metadata.and_then(|d| d.title.as_deref()),
            category_rules: dataset_metadata.map(|d| d.categories.as_slice()).unwrap_or(&[]),
            show_uncategorized: metadata.site.show_uncategorized,
        };

        tracing::debug!("Building {}", file.path.display());
        match self.assembler.build(&file.path, &options) {
            Ok(dataset) => Ok(Some(dataset)),
            Err(e) => self.skip_or_fail(folder, file, e, skipped).map(|()| None),
        }
    }

    fn skip_or_fail(
        &self,
        folder: Option<&str>,
        file: &SourceFile,
        error: TabledocError,
        skipped: &mut Vec<SkippedSource>,
    ) -> Result<()> {
        if error.is_configuration_error() || self.config.failure_mode == FailureMode::FailFast {
            return Err(error);
        }

        tracing::warn!("Skipping {}: {}", file.path.display(), error);
        skipped.push(SkippedSource {
            folder: folder.map(str::to_string),
            dataset: file.name.clone(),
            path: file.path.clone(),
            reason: error.to_string(),
        });
        Ok(())
    }
}

impl Default for Tabledoc {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::input::Layout;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_default_config() {
        let tabledoc = Tabledoc::new();
        assert_eq!(tabledoc.config().categorical_threshold, 20);
        assert_eq!(tabledoc.config().failure_mode, FailureMode::FailFast);
    }

    #[test]
    fn test_build_dir_flat() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", "x,y\n1,foo\n2,bar\n");
        write(dir.path(), "b.csv", "z\ntrue\nfalse\n");

        let output = Tabledoc::new().build_dir(dir.path(), None).unwrap();

        assert_eq!(output.site.layout(), Layout::Flat);
        assert_eq!(output.site.dataset_count(), 2);
        assert!(output.skipped.is_empty());
    }

    #[test]
    fn test_fail_fast_and_skip_failed() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "good.csv", "x\n1\n");
        write(dir.path(), "headers_only.csv", "x\n");
        let tree = SourceTree::discover(dir.path()).unwrap();

        let err = Tabledoc::new().build(&tree, None).unwrap_err();
        assert!(matches!(err, TabledocError::EmptyColumn { ref dataset, .. } if dataset == "headers_only.csv"));

        let tabledoc = Tabledoc::with_config(TabledocConfig {
            failure_mode: FailureMode::SkipFailed,
            ..TabledocConfig::default()
        });
        let output = tabledoc.build(&tree, None).unwrap();
        assert_eq!(output.site.dataset_count(), 1);
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].dataset, "headers_only.csv");
    }

    #[test]
    fn test_configuration_errors_abort_when_skipping() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", "x\n1\n");
        let tree = SourceTree::discover(dir.path()).unwrap();
        let metadata = Metadata::from_yaml_str(
            "a.csv:\n  categories:\n    - category: C\n      columns:\n        nope:\n",
            Layout::Flat,
            Path::new("metadata.yaml"),
        )
        .unwrap();

        let tabledoc = Tabledoc::with_config(TabledocConfig {
            failure_mode: FailureMode::SkipFailed,
            ..TabledocConfig::default()
        });
        let err = tabledoc.build(&tree, Some(&metadata)).unwrap_err();
        assert!(matches!(err, TabledocError::UnknownColumn { .. }));
    }
}
