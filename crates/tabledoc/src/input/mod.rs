//! Input parsing and source discovery.

mod discovery;
mod parser;
mod source;

pub use discovery::{Layout, SourceFile, SourceFolder, SourceTree};
pub use parser::{Encoding, Parser, ParserConfig};
pub use source::{DataTable, MISSING_MARKERS};
