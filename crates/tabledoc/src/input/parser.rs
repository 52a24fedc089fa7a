//! CSV parser with explicit encoding and index-column handling.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::source::DataTable;
use crate::error::{Result, TabledocError};

/// Text encoding of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// ISO-8859-1: every byte is the code point of the same value.
    #[default]
    Latin1,
    /// Strict UTF-8; invalid byte sequences are read errors.
    Utf8,
}

impl Encoding {
    /// Decode one raw field.
    pub fn decode(self, bytes: &[u8]) -> std::result::Result<String, std::str::Utf8Error> {
        match self {
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Encoding::Utf8 => std::str::from_utf8(bytes).map(str::to_string),
        }
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "latin1" | "iso88591" => Ok(Encoding::Latin1),
            "utf8" => Ok(Encoding::Utf8),
            _ => Err(format!("Unknown encoding: {}. Use latin1 or utf8.", s)),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Latin1 => write!(f, "latin1"),
            Encoding::Utf8 => write!(f, "utf8"),
        }
    }
}

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Encoding of the source files.
    pub encoding: Encoding,
    /// Treat the first column as a row index and leave it out of the schema.
    pub index_column: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            encoding: Encoding::Latin1,
            index_column: false,
        }
    }
}

/// Parses comma-separated source files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse the file at `path`, reporting errors against `dataset`.
    pub fn parse_file(&self, dataset: &str, path: impl AsRef<Path>) -> Result<DataTable> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| TabledocError::SourceRead {
            dataset: dataset.to_string(),
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        self.parse_bytes(dataset, path, &contents)
    }

    /// Parse bytes directly. `path` is only used in error messages.
    pub fn parse_bytes(&self, dataset: &str, path: &Path, bytes: &[u8]) -> Result<DataTable> {
        let read_error = |message: String| TabledocError::SourceRead {
            dataset: dataset.to_string(),
            path: path.to_path_buf(),
            message,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .quote(b'"')
            .flexible(true)
            .from_reader(bytes);

        let raw_headers = reader
            .byte_headers()
            .map_err(|e| read_error(e.to_string()))?
            .clone();

        if raw_headers.is_empty() {
            return Err(read_error("No columns to parse".to_string()));
        }

        let mut headers = Vec::with_capacity(raw_headers.len());
        for (idx, field) in raw_headers.iter().enumerate() {
            let mut name = self
                .config
                .encoding
                .decode(field)
                .map_err(|e| read_error(format!("Header {}: {}", idx + 1, e)))?;
            if idx == 0 && self.config.encoding == Encoding::Utf8 {
                name = name.trim_start_matches('\u{feff}').to_string();
            }
            if name.is_empty() {
                name = format!("Unnamed: {}", idx);
            }
            headers.push(name);
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for result in reader.byte_records() {
            let record = result.map_err(|e| read_error(e.to_string()))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.len() > expected_cols {
                return Err(read_error(format!(
                    "Line {}: expected {} fields, found {}",
                    line,
                    expected_cols,
                    record.len()
                )));
            }

            let mut row = Vec::with_capacity(expected_cols);
            for (col_idx, field) in record.iter().enumerate() {
                let value = self
                    .config
                    .encoding
                    .decode(field)
                    .map_err(|e| read_error(format!("Line {}, field {}: {}", line, col_idx + 1, e)))?;
                if DataTable::is_missing_value(&value) {
                    row.push(None);
                } else {
                    row.push(Some(value));
                }
            }
            // Short rows are padded with missing values
            row.resize(expected_cols, None);

            rows.push(row);
        }

        let mut table = DataTable::new(headers, rows);
        if self.config.index_column {
            table.drop_first_column();
        }

        // Only the columns that reach the schema must be unique
        let mut seen = HashSet::new();
        for name in &table.headers {
            if !seen.insert(name.as_str()) {
                return Err(TabledocError::DuplicateColumn {
                    dataset: dataset.to_string(),
                    column: name.clone(),
                });
            }
        }

        Ok(table)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(parser: &Parser, data: &[u8]) -> Result<DataTable> {
        parser.parse_bytes("test.csv", Path::new("data/test.csv"), data)
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let table = parse(&parser, b"name,age,city\nAlice,30,NYC\nBob,25,LA").unwrap();

        assert_eq!(table.headers, vec!["name", "age", "city"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 0), Some("Alice"));
        assert_eq!(table.get(1, 1), Some("25"));
    }

    #[test]
    fn test_missing_markers_and_short_rows() {
        let parser = Parser::new();
        let table = parse(&parser, b"a,b,c\n1,NA,x\n2\n").unwrap();

        assert_eq!(table.get(0, 1), None);
        assert_eq!(table.get(1, 0), Some("2"));
        assert_eq!(table.get(1, 1), None);
        assert_eq!(table.get(1, 2), None);
    }

    #[test]
    fn test_long_row_is_malformed() {
        let parser = Parser::new();
        let err = parse(&parser, b"a,b\n1,2\n3,4,5\n").unwrap_err();

        match err {
            TabledocError::SourceRead { dataset, message, .. } => {
                assert_eq!(dataset, "test.csv");
                assert!(message.contains("expected 2 fields, found 3"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_header() {
        let parser = Parser::new();
        let err = parse(&parser, b"a,b,a\n1,2,3\n").unwrap_err();
        assert!(matches!(
            err,
            TabledocError::DuplicateColumn { ref column, .. } if column == "a"
        ));
    }

    #[test]
    fn test_duplicate_check_skips_index_column() {
        let parser = Parser::with_config(ParserConfig {
            index_column: true,
            ..ParserConfig::default()
        });
        let table = parse(&parser, b"a,b,a\n0,1,2\n").unwrap();
        assert_eq!(table.headers, vec!["b", "a"]);

        let err = parse(&parser, b"id,b,b\n0,1,2\n").unwrap_err();
        assert!(matches!(
            err,
            TabledocError::DuplicateColumn { ref column, .. } if column == "b"
        ));
    }

    #[test]
    fn test_reads_every_row() {
        let parser = Parser::new();
        let mut data = String::from("n\n");
        for i in 0..5000 {
            data.push_str(&format!("{}\n", i));
        }
        let table = parse(&parser, data.as_bytes()).unwrap();
        assert_eq!(table.row_count(), 5000);
    }

    #[test]
    fn test_unnamed_headers() {
        let parser = Parser::new();
        let table = parse(&parser, b",score\n0,10\n1,20\n").unwrap();
        assert_eq!(table.headers, vec!["Unnamed: 0", "score"]);
    }

    #[test]
    fn test_index_column() {
        let parser = Parser::with_config(ParserConfig {
            index_column: true,
            ..ParserConfig::default()
        });
        let table = parse(&parser, b",score,grade\n0,10,A\n1,20,B\n").unwrap();

        assert_eq!(table.headers, vec!["score", "grade"]);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.get(1, 1), Some("B"));
    }

    #[test]
    fn test_empty_input() {
        let parser = Parser::new();
        let err = parse(&parser, b"").unwrap_err();
        assert!(matches!(err, TabledocError::SourceRead { .. }));
    }

    #[test]
    fn test_header_only() {
        let parser = Parser::new();
        let table = parse(&parser, b"a,b\n").unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_latin1_decoding() {
        let parser = Parser::new();
        let table = parse(&parser, b"city\nZ\xfcrich\n").unwrap();
        assert_eq!(table.get(0, 0), Some("Zürich"));
    }

    #[test]
    fn test_utf8_rejects_invalid_bytes() {
        let parser = Parser::with_config(ParserConfig {
            encoding: Encoding::Utf8,
            ..ParserConfig::default()
        });
        let err = parse(&parser, b"city\nZ\xfcrich\n").unwrap_err();
        assert!(matches!(err, TabledocError::SourceRead { .. }));

        let table = parse(&parser, "\u{feff}city\nZürich\n".as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["city"]);
        assert_eq!(table.get(0, 0), Some("Zürich"));
    }

    #[test]
    fn test_missing_file() {
        let parser = Parser::new();
        let err = parser
            .parse_file("nope.csv", "/definitely/not/here/nope.csv")
            .unwrap_err();
        assert!(matches!(err, TabledocError::SourceRead { .. }));
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("latin1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert_eq!("ISO-8859-1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert!("ebcdic".parse::<Encoding>().is_err());
    }
}
