//! Category taxonomy and the keyword table driving classification.
//!
//! The taxonomy itself is a fixed enum; which keywords map into each
//! category is configuration, loaded once at startup from
//! `config/categories.yaml`. Adding a keyword (or re-ordering match
//! priority) is a config change, not a classifier change.

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One label from the fixed creator taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Finance,
    Food,
    Fitness,
    Fashion,
    Tech,
    Wellness,
    Celebrity,
    /// Catch-all. Every classified creator gets at least this.
    Lifestyle,
}

impl Category {
    /// Human-readable display name used in prompts and UI payloads.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Finance => "Finance & Money",
            Category::Food => "Food & Cooking",
            Category::Fitness => "Fitness & Sports",
            Category::Fashion => "Fashion & Beauty",
            Category::Tech => "Tech & Digital",
            Category::Wellness => "Mental Health & Wellness",
            Category::Celebrity => "Celebrity & Public Figures",
            Category::Lifestyle => "Lifestyle & Entertainment",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::Finance => "finance",
            Category::Food => "food",
            Category::Fitness => "fitness",
            Category::Fashion => "fashion",
            Category::Tech => "tech",
            Category::Wellness => "wellness",
            Category::Celebrity => "celebrity",
            Category::Lifestyle => "lifestyle",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "finance" => Ok(Category::Finance),
            "food" => Ok(Category::Food),
            "fitness" => Ok(Category::Fitness),
            "fashion" => Ok(Category::Fashion),
            "tech" => Ok(Category::Tech),
            "wellness" => Ok(Category::Wellness),
            "celebrity" => Ok(Category::Celebrity),
            "lifestyle" => Ok(Category::Lifestyle),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}

/// One ordered entry of the keyword table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesFile {
    pub categories: Vec<CategoryRule>,
}

/// Immutable, ordered category → keyword-set table.
///
/// Order is match priority: during keyword classification the first
/// category whose keyword set hits wins.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

impl CategoryTable {
    /// The keyword table shipped with the binary, used when no
    /// categories file is configured.
    #[must_use]
    pub fn builtin() -> Self {
        let rule = |category: Category, keywords: &[&str]| CategoryRule {
            category,
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        };
        Self {
            rules: vec![
                rule(
                    Category::Finance,
                    &["finance", "invest", "money", "debt", "wealth", "budget"],
                ),
                rule(
                    Category::Wellness,
                    &[
                        "mental",
                        "wellness",
                        "psychology",
                        "trauma",
                        "health",
                        "mindfulness",
                    ],
                ),
                rule(
                    Category::Food,
                    &["food", "cook", "recipe", "kitchen", "meal"],
                ),
                rule(
                    Category::Fitness,
                    &["fitness", "workout", "sport", "exercise", "training"],
                ),
                rule(
                    Category::Fashion,
                    &["fashion", "style", "outfit", "beauty", "clothing"],
                ),
                rule(
                    Category::Tech,
                    &["tech", "software", "ai", "gadget", "startup"],
                ),
            ],
        }
    }

    /// Returns the first category (in table order) whose keyword set
    /// matches `text`, which must be pre-lowercased.
    ///
    /// A keyword hits only at the start of a word, so `invest` covers
    /// "investing" but `ai` does not fire inside "daily" or "email".
    #[must_use]
    pub fn match_keywords(&self, text: &str) -> Option<Category> {
        let words: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        self.rules.iter().find_map(|rule| {
            rule.keywords
                .iter()
                .any(|kw| words.iter().any(|w| w.starts_with(kw.as_str())))
                .then_some(rule.category)
        })
    }

    #[must_use]
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }
}

/// Load and validate the category keyword table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: &Path) -> Result<CategoryTable, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CategoriesFile = serde_yaml::from_str(&content)?;
    validate_categories(&file)?;

    Ok(CategoryTable {
        rules: file.categories,
    })
}

fn validate_categories(file: &CategoriesFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for rule in &file.categories {
        if !seen.insert(rule.category) {
            return Err(ConfigError::Validation(format!(
                "duplicate category entry: '{}'",
                rule.category
            )));
        }
        for kw in &rule.keywords {
            if kw.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "category '{}' has an empty keyword",
                    rule.category
                )));
            }
            if kw.chars().any(char::is_uppercase) {
                return Err(ConfigError::Validation(format!(
                    "category '{}' keyword '{kw}' must be lowercase (matching is over lowercased text)",
                    rule.category
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_display_roundtrip() {
        for c in [
            Category::Finance,
            Category::Food,
            Category::Fitness,
            Category::Fashion,
            Category::Tech,
            Category::Wellness,
            Category::Celebrity,
            Category::Lifestyle,
        ] {
            assert_eq!(c.to_string().parse::<Category>().unwrap(), c);
        }
    }

    #[test]
    fn category_from_str_is_case_insensitive() {
        assert_eq!("Finance".parse::<Category>().unwrap(), Category::Finance);
        assert_eq!("WELLNESS".parse::<Category>().unwrap(), Category::Wellness);
    }

    #[test]
    fn category_from_str_rejects_unknown() {
        assert!("gaming".parse::<Category>().is_err());
    }

    #[test]
    fn builtin_table_matches_finance_keywords() {
        let table = CategoryTable::builtin();
        assert_eq!(
            table.match_keywords("how i got out of debt in a year"),
            Some(Category::Finance)
        );
    }

    #[test]
    fn builtin_table_first_match_wins() {
        // "money" (finance) appears before "workout" (fitness) in table order,
        // so mixed text resolves to finance.
        let table = CategoryTable::builtin();
        assert_eq!(
            table.match_keywords("money tips and workout plans"),
            Some(Category::Finance)
        );
    }

    #[test]
    fn builtin_table_no_match_returns_none() {
        let table = CategoryTable::builtin();
        assert_eq!(table.match_keywords("daily vlog from the lake"), None);
    }

    #[test]
    fn keywords_match_only_at_word_starts() {
        let table = CategoryTable::builtin();
        // "ai" must not fire inside "daily", "said", or "email".
        assert_eq!(table.match_keywords("said hello in my daily email"), None);
        assert_eq!(table.match_keywords("ai tools for writers"), Some(Category::Tech));
        // Prefix matches still extend across suffixes.
        assert_eq!(
            table.match_keywords("investing for beginners"),
            Some(Category::Finance)
        );
    }

    #[test]
    fn validate_rejects_duplicate_category() {
        let file = CategoriesFile {
            categories: vec![
                CategoryRule {
                    category: Category::Food,
                    keywords: vec!["cook".to_string()],
                },
                CategoryRule {
                    category: Category::Food,
                    keywords: vec!["meal".to_string()],
                },
            ],
        };
        let err = validate_categories(&file).unwrap_err();
        assert!(err.to_string().contains("duplicate category"));
    }

    #[test]
    fn validate_rejects_empty_keyword() {
        let file = CategoriesFile {
            categories: vec![CategoryRule {
                category: Category::Tech,
                keywords: vec!["  ".to_string()],
            }],
        };
        let err = validate_categories(&file).unwrap_err();
        assert!(err.to_string().contains("empty keyword"));
    }

    #[test]
    fn validate_rejects_uppercase_keyword() {
        let file = CategoriesFile {
            categories: vec![CategoryRule {
                category: Category::Tech,
                keywords: vec!["AI".to_string()],
            }],
        };
        let err = validate_categories(&file).unwrap_err();
        assert!(err.to_string().contains("must be lowercase"));
    }

    #[test]
    fn load_categories_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("categories.yaml");
        assert!(
            path.exists(),
            "categories.yaml missing at {path:?} — required for this test"
        );
        let table = load_categories(&path).expect("categories.yaml should load");
        assert!(!table.rules().is_empty());
        assert_eq!(
            table.match_keywords("budget meal prep"),
            Some(Category::Finance),
            "finance precedes food in match priority"
        );
    }
}
