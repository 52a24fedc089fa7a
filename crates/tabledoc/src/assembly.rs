//! Assembly of dataset records from parsed tables.

use std::collections::HashSet;
use std::path::Path;

use crate::category::CategoryResolver;
use crate::config::CategoryRule;
use crate::error::{Result, TabledocError};
use crate::inference::{ColumnProfile, TypeInferencer};
use crate::input::{DataTable, Parser};
use crate::schema::{Column, Dataset};

/// Per-dataset settings taken from metadata.
#[derive(Debug, Clone, Copy)]
pub struct DatasetOptions<'a> {
    pub title: Option<&'a str>,
    pub category_rules: &'a [CategoryRule],
    pub show_uncategorized: bool,
}

impl Default for DatasetOptions<'_> {
    fn default() -> Self {
        Self {
            title: None,
            category_rules: &[],
            show_uncategorized: true,
        }
    }
}

/// Builds [`Dataset`] records: parse, profile, infer, and categorize.
pub struct DatasetAssembler {
    parser: Parser,
    inferencer: TypeInferencer,
}

impl DatasetAssembler {
    pub fn new(parser: Parser, inferencer: TypeInferencer) -> Self {
        Self { parser, inferencer }
    }

    /// Build the dataset for the file at `source_path`.
    ///
    /// The dataset is named after the file name.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, a rule names a column the file does
    /// not have, or any column is empty or of an unsupported type.
    pub fn build(&self, source_path: impl AsRef<Path>, options: &DatasetOptions<'_>) -> Result<Dataset> {
        let source_path = source_path.as_ref();
        let name = source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source_path.display().to_string());

        let table = self.parser.parse_file(&name, source_path)?;
        self.build_from_table(&name, source_path, &table, options)
    }

    /// Build a dataset from an already parsed table.
    pub fn build_from_table(
        &self,
        name: &str,
        source_path: &Path,
        table: &DataTable,
        options: &DatasetOptions<'_>,
    ) -> Result<Dataset> {
        check_headers(name, table)?;
        check_rule_columns(name, table, options.category_rules)?;

        let resolver = CategoryResolver::new(options.category_rules, options.show_uncategorized);
        let mut dataset = Dataset::new(
            name,
            source_path,
            options.title.map(str::to_string),
            options.category_rules.to_vec(),
            options.show_uncategorized,
            table.row_count(),
        );

        for (position, header) in table.headers.iter().enumerate() {
            let profile = ColumnProfile::from_values(table.column_values(position));
            let column = Column::describe(
                header,
                position,
                &profile,
                &self.inferencer,
                resolver.resolve(header),
            )
            .map_err(|e| e.in_column(name, header))?;

            tracing::debug!("{} - {} is {}", name, header, column.inferred_type);
            dataset.push_column(column);
        }

        Ok(dataset)
    }
}

fn check_headers(name: &str, table: &DataTable) -> Result<()> {
    let mut seen = HashSet::new();
    for header in &table.headers {
        if !seen.insert(header.as_str()) {
            return Err(TabledocError::DuplicateColumn {
                dataset: name.to_string(),
                column: header.clone(),
            });
        }
    }
    Ok(())
}

/// Every column a rule lists must exist in the table.
fn check_rule_columns(name: &str, table: &DataTable, rules: &[CategoryRule]) -> Result<()> {
    let headers: HashSet<&str> = table.headers.iter().map(String::as_str).collect();
    for rule in rules {
        if let Some(column) = rule.columns.keys().find(|c| !headers.contains(c.as_str())) {
            return Err(TabledocError::UnknownColumn {
                dataset: name.to_string(),
                category: rule.category.clone(),
                column: column.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::UNCATEGORIZED;
    use crate::inference::NativeType;
    use crate::schema::ColumnType;

    fn table(headers: &[&str], rows: &[&[Option<&str>]]) -> DataTable {
        DataTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|v| v.map(str::to_string)).collect())
                .collect(),
        )
    }

    fn assembler() -> DatasetAssembler {
        DatasetAssembler::new(Parser::new(), TypeInferencer::new())
    }

    fn rule(category: &str, columns: &[(&str, Option<&str>)]) -> CategoryRule {
        CategoryRule {
            category: category.to_string(),
            columns: columns
                .iter()
                .map(|(n, d)| (n.to_string(), d.map(str::to_string)))
                .collect(),
        }
    }

    fn survey() -> DataTable {
        table(
            &["id", "visit date", "region", "score"],
            &[
                &[Some("1"), Some("2020-01-01"), Some("north"), Some("1.5")],
                &[Some("2"), None, Some("south"), Some("2")],
                &[Some("3"), Some("2020-03-01"), Some("north"), None],
                &[Some("4"), Some("2020-04-01"), Some("east"), Some("3.25")],
            ],
        )
    }

    #[test]
    fn test_build_from_table() {
        let rules = vec![rule("Visit", &[("visit date", Some("Date of visit")), ("score", None)])];
        let options = DatasetOptions {
            title: Some("Visits"),
            category_rules: &rules,
            show_uncategorized: true,
        };

        let dataset = assembler()
            .build_from_table("visits.csv", Path::new("visits.csv"), &survey(), &options)
            .unwrap();

        assert_eq!(dataset.display_title(), "Visits");
        assert_eq!(dataset.row_count, 4);
        assert_eq!(dataset.column_count, 4);

        let types: Vec<_> = dataset.columns.iter().map(|c| c.inferred_type).collect();
        assert_eq!(
            types,
            vec![ColumnType::Numeric, ColumnType::Date, ColumnType::Categorical, ColumnType::Numeric]
        );
        let complete: Vec<_> = dataset.columns.iter().map(|c| c.percent_complete).collect();
        assert_eq!(complete, vec![100, 75, 100, 75]);
        assert_eq!(dataset.column("score").unwrap().native_type, NativeType::Float);

        let categories: Vec<_> = dataset.categories().collect();
        assert_eq!(categories, vec![UNCATEGORIZED, "Visit"]);
        let visit: Vec<_> = dataset.columns_in("Visit").map(|c| c.name.as_str()).collect();
        assert_eq!(visit, vec!["visit date", "score"]);
        assert_eq!(
            dataset.column("visit date").unwrap().description.as_deref(),
            Some("Date of visit")
        );
    }

    #[test]
    fn test_hidden_uncategorized() {
        let rules = vec![rule("Visit", &[("score", None)])];
        let options = DatasetOptions {
            title: None,
            category_rules: &rules,
            show_uncategorized: false,
        };

        let dataset = assembler()
            .build_from_table("visits.csv", Path::new("visits.csv"), &survey(), &options)
            .unwrap();

        let categories: Vec<_> = dataset.categories().collect();
        assert_eq!(categories, vec!["Visit"]);
        assert_eq!(dataset.excluded_columns().count(), 3);
        assert_eq!(dataset.columns.len(), 4);
    }

    #[test]
    fn test_unknown_rule_column() {
        let rules = vec![rule("Visit", &[("Score", None)])];
        let options = DatasetOptions {
            category_rules: &rules,
            ..DatasetOptions::default()
        };

        let err = assembler()
            .build_from_table("visits.csv", Path::new("visits.csv"), &survey(), &options)
            .unwrap_err();
        assert!(matches!(
            err,
            TabledocError::UnknownColumn { ref category, ref column, .. } if category == "Visit" && column == "Score"
        ));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_empty_column_names_dataset_and_column() {
        let data = table(&["a", "b"], &[&[Some("1"), None], &[Some("2"), None]]);
        let dataset = assembler()
            .build_from_table("t.csv", Path::new("t.csv"), &data, &DatasetOptions::default())
            .unwrap();
        // All-missing columns are floats with zero completeness, not empty
        assert_eq!(dataset.column("b").unwrap().percent_complete, 0);

        let no_rows = table(&["a"], &[]);
        let err = assembler()
            .build_from_table("t.csv", Path::new("t.csv"), &no_rows, &DatasetOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            TabledocError::EmptyColumn { ref dataset, ref column } if dataset == "t.csv" && column == "a"
        ));
    }

    #[test]
    fn test_duplicate_headers() {
        let data = table(&["a", "a"], &[&[Some("1"), Some("2")]]);
        let err = assembler()
            .build_from_table("t.csv", Path::new("t.csv"), &data, &DatasetOptions::default())
            .unwrap_err();
        assert!(matches!(err, TabledocError::DuplicateColumn { ref column, .. } if column == "a"));
    }
}
