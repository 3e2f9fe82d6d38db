//! Product category classification.
//!
//! A product name is resolved to exactly one category key by an ordered
//! cascade: explicit priority rules first, then the keyword table in
//! declaration order, then the fallback category. Both tables are plain
//! values owned by a [`CategoryTable`] and handed to the classifier.

mod table;

pub use table::FALLBACK_KEY;

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CestaError, RulesError};

/// Static descriptor of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Icon glyph.
    pub icon: String,
    /// Display color (CSS hex).
    pub color: String,
    /// Substrings matched case-insensitively against product names. Stored
    /// upper-cased once a table is built.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Category {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.into().to_uppercase())
                .collect(),
        }
    }
}

/// Explicit regex override evaluated before keyword matching.
#[derive(Debug, Clone)]
pub struct PriorityRule {
    pattern: Regex,
    category: String,
}

impl PriorityRule {
    /// Compile a rule. The pattern is matched against the upper-cased name.
    pub fn new(pattern: &str, category: impl Into<String>) -> Result<Self, RulesError> {
        let pattern = Regex::new(pattern).map_err(|source| RulesError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern,
            category: category.into(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

/// One entry of an ordered "first match wins" list.
pub trait MatchRule {
    /// Category key this rule yields for `upper_name`, if it applies.
    fn matched_category(&self, upper_name: &str) -> Option<&str>;
}

impl MatchRule for PriorityRule {
    fn matched_category(&self, upper_name: &str) -> Option<&str> {
        self.pattern
            .is_match(upper_name)
            .then_some(self.category.as_str())
    }
}

impl MatchRule for Category {
    fn matched_category(&self, upper_name: &str) -> Option<&str> {
        self.keywords
            .iter()
            .any(|keyword| upper_name.contains(keyword.as_str()))
            .then_some(self.key.as_str())
    }
}

/// Evaluate `rules` in order and return the category of the first one that applies.
pub fn first_match<'r, R>(rules: impl IntoIterator<Item = &'r R>, upper_name: &str) -> Option<&'r str>
where
    R: MatchRule + 'r,
{
    rules
        .into_iter()
        .find_map(|rule| rule.matched_category(upper_name))
}

/// Immutable pair of tables driving classification.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    categories: Vec<Category>,
    priority_rules: Vec<PriorityRule>,
    fallback: String,
}

/// Serialized form of a [`CategoryTable`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTableSpec {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub priority_rules: Vec<PriorityRuleSpec>,
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

/// Serialized form of a [`PriorityRule`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityRuleSpec {
    pub pattern: String,
    pub category: String,
}

fn default_fallback() -> String {
    FALLBACK_KEY.to_string()
}

impl CategoryTable {
    /// Build and validate a table.
    ///
    /// Every rule category and the fallback must exist among `categories`,
    /// keys must be unique and the fallback must have no keywords.
    pub fn new(
        mut categories: Vec<Category>,
        priority_rules: Vec<PriorityRule>,
        fallback: impl Into<String>,
    ) -> Result<Self, RulesError> {
        for keyword in categories.iter_mut().flat_map(|c| c.keywords.iter_mut()) {
            *keyword = keyword.to_uppercase();
        }

        let table = Self {
            categories,
            priority_rules,
            fallback: fallback.into(),
        };
        table.validate()?;
        Ok(table)
    }

    /// The built-in grocery table.
    pub fn builtin() -> Self {
        let categories = table::CATEGORY_DEFS
            .iter()
            .map(|(key, name, icon, color, keywords)| {
                Category::new(*key, *name, *icon, *color, keywords.iter().copied())
            })
            .collect();

        let priority_rules = table::PRIORITY_RULE_DEFS
            .iter()
            .map(|(pattern, category)| PriorityRule::new(pattern, *category))
            .collect::<Result<Vec<_>, _>>()
            .expect("built-in priority rules compile");

        Self::new(categories, priority_rules, FALLBACK_KEY).expect("built-in category table is closed")
    }

    /// Build a table from its serialized form.
    pub fn from_spec(spec: CategoryTableSpec) -> Result<Self, RulesError> {
        let priority_rules = spec
            .priority_rules
            .iter()
            .map(|rule| PriorityRule::new(&rule.pattern, rule.category.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(spec.categories, priority_rules, spec.fallback)
    }

    /// Serialized form of this table.
    pub fn to_spec(&self) -> CategoryTableSpec {
        CategoryTableSpec {
            categories: self.categories.clone(),
            priority_rules: self
                .priority_rules
                .iter()
                .map(|rule| PriorityRuleSpec {
                    pattern: rule.pattern().to_string(),
                    category: rule.category.clone(),
                })
                .collect(),
            fallback: self.fallback.clone(),
        }
    }

    /// Parse a table from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let spec: CategoryTableSpec = serde_json::from_str(json)?;
        Ok(Self::from_spec(spec)?)
    }

    /// Load a table from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| match e {
            CestaError::Json(err) => CestaError::Config(format!("{}: {}", path.display(), err)),
            other => other,
        })
    }

    /// Check that the table is closed over its category keys.
    pub fn validate(&self) -> Result<(), RulesError> {
        let mut keys = HashSet::new();
        for category in &self.categories {
            if !keys.insert(category.key.as_str()) {
                return Err(RulesError::DuplicateCategory(category.key.clone()));
            }
        }

        match self.category(&self.fallback) {
            None => return Err(RulesError::UnknownCategory(self.fallback.clone())),
            Some(fallback) if !fallback.keywords.is_empty() => {
                return Err(RulesError::FallbackWithKeywords(self.fallback.clone()));
            }
            Some(_) => {}
        }

        if let Some(rule) = self
            .priority_rules
            .iter()
            .find(|rule| !keys.contains(rule.category.as_str()))
        {
            return Err(RulesError::UnknownCategory(rule.category.clone()));
        }

        Ok(())
    }

    /// Categories in declaration order, fallback included.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn priority_rules(&self) -> &[PriorityRule] {
        &self.priority_rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn category(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.category(key).is_some()
    }

    /// Categories eligible for keyword matching.
    fn keyword_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(move |c| c.key != self.fallback)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Resolves a product name to a category key.
#[derive(Debug, Clone, Default)]
pub struct CategoryClassifier {
    table: CategoryTable,
}

impl CategoryClassifier {
    pub fn new(table: CategoryTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    /// Category key for `name`. Pure: depends only on `name` and the table.
    pub fn classify(&self, name: &str) -> &str {
        let upper = name.to_uppercase();

        first_match(self.table.priority_rules(), &upper)
            .or_else(|| first_match(self.table.keyword_categories(), &upper))
            .unwrap_or(self.table.fallback())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classifier() -> CategoryClassifier {
        CategoryClassifier::new(CategoryTable::builtin())
    }

    #[test]
    fn test_builtin_table_is_valid() {
        let table = CategoryTable::builtin();
        assert!(table.validate().is_ok());
        assert_eq!(table.fallback(), "otros");
        assert_eq!(table.categories().len(), 9);
        assert_eq!(table.categories()[0].key, "proteinas");
    }

    #[test]
    fn test_keyword_matching() {
        let c = classifier();
        assert_eq!(c.classify("PECHUGA POLLO"), "proteinas");
        assert_eq!(c.classify("YOGUR NATURAL"), "lacteos");
        assert_eq!(c.classify("TOMATE PERA"), "frutas_verduras");
        assert_eq!(c.classify("CERVEZA TOSTADA"), "bebidas");
        assert_eq!(c.classify("DETERGENTE ROPA"), "higiene_limpieza");
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let c = classifier();
        assert_eq!(c.classify("leche entera"), "lacteos");
        assert_eq!(c.classify("Jamón cocido"), "proteinas");
    }

    #[test]
    fn test_keywords_are_upper_cased_once() {
        let json = r##"{
            "categories": [
                {"key": "frio", "name": "Frío", "icon": "🧊", "color": "#00f", "keywords": ["hielo"]},
                {"key": "otros", "name": "Otros", "icon": "📦", "color": "#777"}
            ]
        }"##;
        let table = CategoryTable::from_json(json).unwrap();
        assert_eq!(table.categories()[0].keywords, vec!["HIELO"]);

        let c = CategoryClassifier::new(table);
        assert_eq!(c.classify("Bolsa hielo"), "frio");
        assert_eq!(
            Category::new("a", "A", "", "", ["pan"]).keywords,
            vec!["PAN"]
        );
    }

    #[test]
    fn test_table_order_decides_overlaps() {
        // "LECHE" (dairy) is declared before "MANZANA" (produce).
        let c = classifier();
        assert_eq!(c.classify("MANZANA CON LECHE"), "lacteos");
    }

    #[test]
    fn test_priority_rule_overrides_dairy_keyword() {
        let c = classifier();
        assert_eq!(c.classify("PIZZA 4 QUESOS"), "congelados");
        assert_eq!(c.classify("PIZZA JAMON QUESO"), "congelados");
        assert_eq!(c.classify("HELADO NATA"), "dulces_snacks");
    }

    #[test]
    fn test_priority_rule_overrides_produce_keyword() {
        let c = classifier();
        assert_eq!(c.classify("TOMATE FRITO"), "despensa");
        assert_eq!(c.classify("TORTILLA PATATA"), "despensa");
        assert_eq!(c.classify("PATATAS GAJO"), "congelados");
    }

    #[test]
    fn test_fallback() {
        let c = classifier();
        assert_eq!(c.classify("BOLSA PLASTICO"), "otros");
        assert_eq!(c.classify(""), "otros");
    }

    #[test]
    fn test_classification_is_pure() {
        let c = classifier();
        for name in ["PIZZA 4 QUESOS", "LECHE ENTERA", "BOLSA PLASTICO"] {
            assert_eq!(c.classify(name), c.classify(name));
        }
    }

    #[test]
    fn test_every_result_is_a_known_category() {
        let c = classifier();
        let names = [
            "PECHUGA POLLO", "TOMATE FRITO", "PIZZA 4 QUESOS", "AGUA MINERAL",
            "PAPEL HIGIENICO", "X", "CAFE MOLIDO", "CROQUETAS JAMON",
        ];
        for name in names {
            assert!(c.table().contains(c.classify(name)), "{name}");
        }
        for rule in c.table().priority_rules() {
            assert!(c.table().contains(rule.category()), "{}", rule.pattern());
        }
    }

    #[test]
    fn test_first_match_returns_earliest_rule() {
        let rules = vec![
            PriorityRule::new("QUESO", "lacteos").unwrap(),
            PriorityRule::new("PIZZA", "congelados").unwrap(),
        ];
        assert_eq!(first_match(&rules, "PIZZA QUESO"), Some("lacteos"));
        assert_eq!(first_match(&rules, "PIZZA"), Some("congelados"));
        assert_eq!(first_match(&rules, "PAN"), None);
    }

    #[test]
    fn test_rule_with_unknown_category_is_rejected() {
        let categories = vec![Category::new("otros", "Otros", "📦", "#000", Vec::<String>::new())];
        let rules = vec![PriorityRule::new("PIZZA", "congelados").unwrap()];
        let err = CategoryTable::new(categories, rules, "otros").unwrap_err();
        assert!(matches!(err, RulesError::UnknownCategory(key) if key == "congelados"));
    }

    #[test]
    fn test_fallback_with_keywords_is_rejected() {
        let categories = vec![Category::new("otros", "Otros", "📦", "#000", ["BOLSA"])];
        let err = CategoryTable::new(categories, Vec::new(), "otros").unwrap_err();
        assert!(matches!(err, RulesError::FallbackWithKeywords(_)));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        assert!(matches!(
            PriorityRule::new("(PIZZA", "congelados"),
            Err(RulesError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_table_from_json() {
        let json = r##"{
            "categories": [
                {"key": "frio", "name": "Frío", "icon": "🧊", "color": "#00f", "keywords": ["HIELO"]},
                {"key": "otros", "name": "Otros", "icon": "📦", "color": "#777"}
            ],
            "priorityRules": [{"pattern": "^POLO", "category": "frio"}]
        }"##;
        let c = CategoryClassifier::new(CategoryTable::from_json(json).unwrap());
        assert_eq!(c.classify("polo limon"), "frio");
        assert_eq!(c.classify("BOLSA HIELO"), "frio");
        assert_eq!(c.classify("PAN"), "otros");
    }

    #[test]
    fn test_spec_roundtrip_keeps_rule_order() {
        let table = CategoryTable::builtin();
        let rebuilt = CategoryTable::from_spec(table.to_spec()).unwrap();
        let patterns: Vec<_> = rebuilt.priority_rules().iter().map(|r| r.pattern()).collect();
        let original: Vec<_> = table.priority_rules().iter().map(|r| r.pattern()).collect();
        assert_eq!(patterns, original);
    }
}
