//! Typed configuration loaded from user metadata.

mod metadata;

pub use metadata::{
    CategoryRule, DatasetMetadata, FolderMetadata, Metadata, MetadataEntries, MetadataWarning,
    SITE_KEY, SiteMetadata,
};
