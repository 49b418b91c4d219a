//! Deterministic text normalization.
//!
//! [`TextNormalizer`] wraps an analyzer and collects its output into a
//! [`NormalizedDocument`], the ordered list of terms that both training and
//! inference see. Normalization is idempotent: normalizing the space-joined
//! terms of a document yields the same document.
//!
//! # Examples
//!
//! ```
//! use complaint_router::analysis::normalizer::TextNormalizer;
//! use complaint_router::config::NormalizerConfig;
//!
//! let normalizer = TextNormalizer::new(&NormalizerConfig::default());
//! let doc = normalizer.normalize("My husband's family demands more dowry!").unwrap();
//!
//! assert_eq!(doc.terms(), &["husband", "family", "demand", "dowry"]);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::language::english::EnglishAnalyzer;
use crate::config::NormalizerConfig;
use crate::error::Result;

/// Ordered sequence of normalized terms for one piece of text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDocument {
    terms: Vec<String>,
}

impl NormalizedDocument {
    /// Create a document from already-normalized terms.
    pub fn new(terms: Vec<String>) -> Self {
        NormalizedDocument { terms }
    }

    /// The terms in input order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Whether normalization left nothing behind.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.terms.iter()
    }

    /// The terms joined by single spaces.
    pub fn as_text(&self) -> String {
        self.terms.join(" ")
    }
}

impl From<Vec<String>> for NormalizedDocument {
    fn from(terms: Vec<String>) -> Self {
        Self::new(terms)
    }
}

impl<'a> IntoIterator for &'a NormalizedDocument {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl fmt::Display for NormalizedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

/// Turns raw text into a [`NormalizedDocument`].
#[derive(Clone)]
pub struct TextNormalizer {
    analyzer: Arc<dyn Analyzer>,
}

impl TextNormalizer {
    /// Create the standard English normalizer for the given configuration.
    pub fn new(config: &NormalizerConfig) -> Self {
        TextNormalizer {
            analyzer: Arc::new(EnglishAnalyzer::new(config.min_token_length)),
        }
    }

    /// Normalize `text`. Empty or all-noise input gives an empty document.
    pub fn normalize(&self, text: &str) -> Result<NormalizedDocument> {
        let terms = self
            .analyzer
            .analyze(text)?
            .filter(|token| !token.is_stopped() && !token.is_empty())
            .map(|token| token.text)
            .collect();
        Ok(NormalizedDocument::new(terms))
    }

    /// Name of the underlying analyzer.
    pub fn analyzer_name(&self) -> &'static str {
        self.analyzer.name()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default())
    }
}

impl fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_gives_empty_document() {
        let normalizer = TextNormalizer::default();

        assert!(normalizer.normalize("").unwrap().is_empty());
        assert!(normalizer.normalize("   \n\t").unwrap().is_empty());
        assert!(normalizer.normalize("!!! ??? ...").unwrap().is_empty());
        assert!(normalizer.normalize("I am so, so, so tired of it").unwrap().len() == 1);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let normalizer = TextNormalizer::default();
        let inputs = [
            "My boss keeps touching me inappropriately during meetings.",
            "Women's safety isn't guaranteed on buses after 9 PM!",
            "In-laws harassed my sister-in-law over dowry; they're demanding a car.",
            "Online trolls keep sending abusive messages \u{1F621}\u{1F621}",
            "Mädchen werden früh verheiratet",
            "yesssssssssssss pleasssssssssssss stop",
            "pleasssssssssssss stop",
            "sooooo ussssssssss happinesses stressfulnesses",
        ];

        for input in inputs {
            let once = normalizer.normalize(input).unwrap();
            let twice = normalizer.normalize(&once.as_text()).unwrap();
            assert_eq!(once, twice, "normalizing {input:?}");
        }
    }

    #[test]
    fn test_elongated_words_settle_in_one_pass() {
        let normalizer = TextNormalizer::default();
        let doc = normalizer.normalize("pleasssssssssssss stop").unwrap();

        assert_eq!(doc.terms(), &["pleass", "stop"]);
    }

    #[test]
    fn test_non_ascii_terms_survive() {
        let normalizer = TextNormalizer::default();
        let doc = normalizer.normalize("Mädchen werden früh verheiratet").unwrap();

        assert_eq!(doc.terms(), &["mädchen", "werden", "früh", "verheiratet"]);
    }

    #[test]
    fn test_document_accessors() {
        let doc = NormalizedDocument::from(vec!["dowry".to_string(), "demand".to_string()]);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.as_text(), "dowry demand");
        assert_eq!(doc.to_string(), "dowry demand");
        assert_eq!(doc.iter().count(), 2);
        assert_eq!((&doc).into_iter().next().map(String::as_str), Some("dowry"));
    }
}
