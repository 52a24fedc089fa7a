//! Resolution of columns to user-declared categories.

use serde::Serialize;

use crate::config::CategoryRule;

/// Bucket label for columns that match no category rule.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Outcome of resolving one column against the category rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The first rule listing the column.
    Matched {
        category: &'a str,
        description: Option<&'a str>,
    },
    /// No rule lists the column and uncategorized columns are shown.
    Uncategorized,
    /// No rule lists the column and uncategorized columns are hidden.
    Excluded,
}

impl<'a> Resolution<'a> {
    /// Category label the column is bucketed under, if any.
    pub fn category(&self) -> Option<&'a str> {
        match *self {
            Resolution::Matched { category, .. } => Some(category),
            Resolution::Uncategorized => Some(UNCATEGORIZED),
            Resolution::Excluded => None,
        }
    }

    /// Description taken from the matching rule.
    pub fn description(&self) -> Option<&'a str> {
        match *self {
            Resolution::Matched { description, .. } => description,
            Resolution::Uncategorized | Resolution::Excluded => None,
        }
    }
}

/// Resolves columns against an ordered list of category rules.
///
/// Rules are scanned in declaration order and the first rule listing a column
/// wins. Later listings of the same column are never reached; see
/// [`shadowed_listings`].
#[derive(Debug, Clone, Copy)]
pub struct CategoryResolver<'a> {
    rules: &'a [CategoryRule],
    show_uncategorized: bool,
}

impl<'a> CategoryResolver<'a> {
    pub fn new(rules: &'a [CategoryRule], show_uncategorized: bool) -> Self {
        Self {
            rules,
            show_uncategorized,
        }
    }

    /// Resolve the category and description of `column_name`.
    pub fn resolve(&self, column_name: &str) -> Resolution<'a> {
        let matched = self
            .rules
            .iter()
            .find_map(|rule| rule.columns.get(column_name).map(|desc| (rule, desc)));

        match matched {
            Some((rule, description)) => Resolution::Matched {
                category: &rule.category,
                description: description.as_deref(),
            },
            None if self.show_uncategorized => Resolution::Uncategorized,
            None => Resolution::Excluded,
        }
    }
}

/// A column listed under more than one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShadowedListing {
    pub column: String,
    /// Category the column is bound to.
    pub bound_to: String,
    /// Later category whose listing is unreachable.
    pub shadowed: String,
}

/// Listings that first-match resolution can never reach, in rule order.
pub fn shadowed_listings(rules: &[CategoryRule]) -> Vec<ShadowedListing> {
    let mut shadowed = Vec::new();
    for (idx, rule) in rules.iter().enumerate() {
        for column in rule.columns.keys() {
            let earlier = rules
                .iter()
                .take(idx)
                .find(|r| r.columns.contains_key(column));
            if let Some(earlier) = earlier {
                shadowed.push(ShadowedListing {
                    column: column.clone(),
                    bound_to: earlier.category.clone(),
                    shadowed: rule.category.clone(),
                });
            }
        }
    }
    shadowed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(category: &str, columns: &[(&str, Option<&str>)]) -> CategoryRule {
        CategoryRule {
            category: category.to_string(),
            columns: columns
                .iter()
                .map(|(name, desc)| (name.to_string(), desc.map(str::to_string)))
                .collect(),
        }
    }

    fn rules() -> Vec<CategoryRule> {
        vec![
            rule("Demographics", &[("age", Some("Age in years")), ("region", None)]),
            rule("Health", &[("bmi", Some("Body mass index")), ("age", Some("Age at visit"))]),
        ]
    }

    #[test]
    fn test_first_match_wins() {
        let rules = rules();
        let resolver = CategoryResolver::new(&rules, true);

        let resolution = resolver.resolve("age");
        assert_eq!(
            resolution,
            Resolution::Matched {
                category: "Demographics",
                description: Some("Age in years"),
            }
        );
        assert_eq!(resolution.category(), Some("Demographics"));
        assert_eq!(resolution.description(), Some("Age in years"));
    }

    #[test]
    fn test_match_without_description() {
        let rules = rules();
        let resolver = CategoryResolver::new(&rules, false);

        let resolution = resolver.resolve("region");
        assert_eq!(resolution.category(), Some("Demographics"));
        assert_eq!(resolution.description(), None);
    }

    #[test]
    fn test_unmatched_policy() {
        let rules = rules();

        let shown = CategoryResolver::new(&rules, true).resolve("notes");
        assert_eq!(shown, Resolution::Uncategorized);
        assert_eq!(shown.category(), Some(UNCATEGORIZED));
        assert_eq!(shown.description(), None);

        let hidden = CategoryResolver::new(&rules, false).resolve("notes");
        assert_eq!(hidden, Resolution::Excluded);
        assert_eq!(hidden.category(), None);
    }

    #[test]
    fn test_no_rules() {
        let resolver = CategoryResolver::new(&[], true);
        assert_eq!(resolver.resolve("anything"), Resolution::Uncategorized);
    }

    #[test]
    fn test_name_match_is_exact() {
        let rules = rules();
        let resolver = CategoryResolver::new(&rules, false);
        assert_eq!(resolver.resolve("Age"), Resolution::Excluded);
    }

    #[test]
    fn test_shadowed_listings() {
        let shadowed = shadowed_listings(&rules());
        assert_eq!(
            shadowed,
            vec![ShadowedListing {
                column: "age".to_string(),
                bound_to: "Demographics".to_string(),
                shadowed: "Health".to_string(),
            }]
        );
    }
}
