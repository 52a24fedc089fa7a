//! Fuzz target for the CSV parser and dataset assembly.
//!
//! Parsing and assembly must never panic on malformed input.

#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use tabledoc::inference::TypeInferencer;
use tabledoc::input::Parser;
use tabledoc::{DatasetAssembler, DatasetOptions};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let path = Path::new("fuzz.csv");
    let parser = Parser::new();
    if let Ok(table) = parser.parse_bytes("fuzz.csv", path, data) {
        let assembler = DatasetAssembler::new(Parser::new(), TypeInferencer::new());
        let _ = assembler.build_from_table("fuzz.csv", path, &table, &DatasetOptions::default());
    }
});
