//! Dataset records: the documented schema of one source file.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

use super::column::Column;
use crate::config::CategoryRule;

/// Presentation switches carried by every dataset of a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayOptions {
    /// Show the completeness percentage of each column.
    pub show_percent_complete: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_percent_complete: true,
        }
    }
}

/// Documentation record for one source file.
///
/// Columns are kept in schema order. `columns_by_category` holds indices
/// into `columns`, so each column appears in at most one bucket and
/// excluded columns appear in none. Buckets are ordered by first insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    /// Source file name, used as the identifier in metadata.
    pub name: String,
    pub source_path: PathBuf,
    /// Title from metadata.
    pub title: Option<String>,
    pub columns: Vec<Column>,
    columns_by_category: IndexMap<String, Vec<usize>>,
    pub row_count: usize,
    pub column_count: usize,
    /// Category rules the columns were resolved against.
    pub category_rules: Vec<CategoryRule>,
    pub show_uncategorized: bool,
    pub display: DisplayOptions,
}

impl Dataset {
    /// Create a dataset with no columns.
    pub fn new(
        name: impl Into<String>,
        source_path: impl Into<PathBuf>,
        title: Option<String>,
        category_rules: Vec<CategoryRule>,
        show_uncategorized: bool,
        row_count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
            title,
            columns: Vec::new(),
            columns_by_category: IndexMap::new(),
            row_count,
            column_count: 0,
            category_rules,
            show_uncategorized,
            display: DisplayOptions::default(),
        }
    }

    /// Append a column, bucketing it under its category if it has one.
    pub fn push_column(&mut self, column: Column) {
        let index = self.columns.len();
        if let Some(category) = &column.category {
            self.columns_by_category
                .entry(category.clone())
                .or_default()
                .push(index);
        }
        self.columns.push(column);
        self.column_count = self.columns.len();
    }

    /// Title if set, otherwise the file name.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// File name of the rendered dataset page.
    pub fn output_file_name(&self) -> String {
        output_file_name(&self.name)
    }

    /// Category labels in bucket order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.columns_by_category.keys().map(String::as_str)
    }

    /// Columns bucketed under `category`, in schema order.
    pub fn columns_in<'a>(&'a self, category: &str) -> impl Iterator<Item = &'a Column> + 'a {
        self.columns_by_category
            .get(category)
            .into_iter()
            .flatten()
            .map(|&idx| &self.columns[idx])
    }

    /// Every bucket with its columns, in bucket order.
    pub fn buckets(&self) -> impl Iterator<Item = (&str, Vec<&Column>)> {
        self.columns_by_category.iter().map(|(category, indices)| {
            (
                category.as_str(),
                indices.iter().map(|&idx| &self.columns[idx]).collect(),
            )
        })
    }

    /// Columns left out of every bucket.
    pub fn excluded_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.category.is_none())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Page file name for a dataset: spaces become underscores, a trailing
/// `.csv` is dropped and `.html` is appended.
pub fn output_file_name(name: &str) -> String {
    let name = name.replace(' ', "_");
    let stem = name.strip_suffix(".csv").unwrap_or(&name);
    format!("{}.html", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::UNCATEGORIZED;
    use crate::inference::NativeType;
    use crate::schema::ColumnType;

    fn column(name: &str, position: usize, category: Option<&str>) -> Column {
        Column {
            name: name.to_string(),
            position,
            inferred_type: ColumnType::Text,
            native_type: NativeType::Text,
            percent_complete: 100,
            distinct_count: 30,
            missing_count: 0,
            description: None,
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("My Survey.csv"), "My_Survey.html");
        assert_eq!(output_file_name("report.data.csv"), "report.data.html");
        assert_eq!(output_file_name("notes"), "notes.html");
        assert_eq!(output_file_name("upper.CSV"), "upper.CSV.html");
    }

    #[test]
    fn test_buckets_follow_first_insertion() {
        let mut dataset = Dataset::new("survey.csv", "data/survey.csv", None, Vec::new(), true, 10);
        dataset.push_column(column("notes", 0, Some(UNCATEGORIZED)));
        dataset.push_column(column("age", 1, Some("Demographics")));
        dataset.push_column(column("secret", 2, None));
        dataset.push_column(column("region", 3, Some("Demographics")));

        assert_eq!(dataset.column_count, 4);
        let categories: Vec<_> = dataset.categories().collect();
        assert_eq!(categories, vec![UNCATEGORIZED, "Demographics"]);

        let demographics: Vec<_> = dataset.columns_in("Demographics").map(|c| c.name.as_str()).collect();
        assert_eq!(demographics, vec!["age", "region"]);
        assert_eq!(dataset.columns_in("Health").count(), 0);

        let excluded: Vec<_> = dataset.excluded_columns().map(|c| c.name.as_str()).collect();
        assert_eq!(excluded, vec!["secret"]);

        let buckets: Vec<_> = dataset.buckets().map(|(c, cols)| (c, cols.len())).collect();
        assert_eq!(buckets, vec![(UNCATEGORIZED, 1), ("Demographics", 2)]);
    }

    #[test]
    fn test_display_title() {
        let mut dataset = Dataset::new("survey.csv", "survey.csv", None, Vec::new(), true, 0);
        assert_eq!(dataset.display_title(), "survey.csv");
        dataset.title = Some("Annual survey".to_string());
        assert_eq!(dataset.display_title(), "Annual survey");
        assert_eq!(dataset.output_file_name(), "survey.html");
    }
}
