//! Keyword-based category classification for item names.

use crate::models::config::{CategoryRule, ExtractionConfig, default_category_rules};

/// Maps item names to category labels by ordered keyword matching.
///
/// Categories are tried in declaration order and the first one with any
/// keyword appearing as a case-insensitive substring of the item name
/// wins. An item matching keywords from two categories is reported
/// under the earlier-declared one; this is a deliberate tie-break, not
/// a scored match. Classification never fails: unmatched items get the
/// fallback label.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    categories: Vec<CategoryRule>,
    fallback: String,
}

impl CategoryClassifier {
    /// Classifier over the built-in Mercadona category table.
    pub fn new() -> Self {
        Self {
            categories: default_category_rules(),
            fallback: "Otros".to_string(),
        }
    }

    /// Classifier over the category table from an extraction config.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            categories: config.categories.clone(),
            fallback: config.default_category.clone(),
        }
    }

    /// Classify an item name, returning the capitalized category label
    /// or the fallback when no keyword matches.
    pub fn classify(&self, item: &str) -> String {
        let item_lower = item.to_lowercase();

        for rule in &self.categories {
            for keyword in &rule.keywords {
                if item_lower.contains(keyword.as_str()) {
                    return capitalize(&rule.label);
                }
            }
        }

        self.fallback.clone()
    }
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_keyword_match() {
        let classifier = CategoryClassifier::new();

        assert_eq!(classifier.classify("Manzana Fuji"), "Frutas");
        assert_eq!(classifier.classify("Leche entera"), "Lácteos");
        assert_eq!(classifier.classify("Pechuga de pavo"), "Carnes");
    }

    #[test]
    fn test_classify_case_insensitive() {
        let classifier = CategoryClassifier::new();

        assert_eq!(classifier.classify("PLATANO DE CANARIAS"), "Frutas");
        assert_eq!(classifier.classify("atÚn claro"), "Pescado");
    }

    #[test]
    fn test_classify_fallback() {
        let classifier = CategoryClassifier::new();

        assert_eq!(classifier.classify("Pilas alcalinas AA"), "Otros");
        assert_eq!(classifier.classify(""), "Otros");
    }

    #[test]
    fn test_classify_first_category_wins() {
        // "crema" is a lácteos keyword and also a higiene keyword;
        // lácteos is declared earlier.
        let classifier = CategoryClassifier::new();
        assert_eq!(classifier.classify("Crema hidratante"), "Lácteos");
    }

    #[test]
    fn test_classify_accented_label_capitalization() {
        let classifier = CategoryClassifier::new();
        assert_eq!(classifier.classify("Yogur griego"), "Lácteos");
        assert_eq!(classifier.classify("Pan de chapata"), "Panadería");
    }

    #[test]
    fn test_classify_custom_table() {
        let config = ExtractionConfig {
            categories: vec![CategoryRule::new("congelados", &["helado", "pizza"])],
            default_category: "Sin clasificar".to_string(),
            ..ExtractionConfig::default()
        };
        let classifier = CategoryClassifier::from_config(&config);

        assert_eq!(classifier.classify("Helado de vainilla"), "Congelados");
        assert_eq!(classifier.classify("Manzana"), "Sin clasificar");
    }
}
