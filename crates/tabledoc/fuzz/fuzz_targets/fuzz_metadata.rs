//! Fuzz target for the metadata loader.

#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use tabledoc::{Layout, Metadata};

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    for layout in [Layout::Flat, Layout::Folders] {
        if let Ok(metadata) = Metadata::from_yaml_str(content, layout, Path::new("fuzz.yaml")) {
            let _ = metadata.warnings();
        }
    }
});
