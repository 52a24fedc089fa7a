//! In-memory representation of a parsed tabular source.

/// Cell values treated as missing.
///
/// Matching is exact and case-sensitive, so `"na"` or `" NA"` are ordinary
/// text values.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Represents parsed tabular data.
///
/// Missing cells (absent fields or [`MISSING_MARKERS`]) are stored as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTable {
    /// Column headers, in source order.
    pub headers: Vec<String>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<Option<String>>>,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Option<&str>> {
        self.rows
            .iter()
            .map(move |row| row.get(index).and_then(|cell| cell.as_deref()))
    }

    /// Drop the first column (a row index) from headers and rows.
    pub(crate) fn drop_first_column(&mut self) {
        if self.headers.is_empty() {
            return;
        }
        self.headers.remove(0);
        for row in &mut self.rows {
            if !row.is_empty() {
                row.remove(0);
            }
        }
    }

    /// Check if a raw cell value represents a missing value.
    pub fn is_missing_value(value: &str) -> bool {
        MISSING_MARKERS.contains(&value)
    }
}

#[cfg(test)]
impl DataTable {
    /// Cell value at `row`, `col`. Missing cells yield `None`.
    pub(crate) fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|cell| cell.as_deref())
    }
}
