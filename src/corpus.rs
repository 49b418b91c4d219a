//! Labeled training examples.
//!
//! A corpus file is a JSON array of `{"text": ..., "category": ...}` objects,
//! where `category` is a category display name.

use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::category::CategoryLabel;
use crate::error::Result;

/// Corpus shipped with the crate.
const BUILTIN_CORPUS: &str = include_str!("../data/training_corpus.json");

/// One complaint text with its known category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    /// Complaint narrative.
    pub text: String,
    /// Category label.
    pub category: CategoryLabel,
}

impl LabeledExample {
    pub fn new<S: Into<String>>(text: S, category: CategoryLabel) -> Self {
        LabeledExample {
            text: text.into(),
            category,
        }
    }
}

/// Parse a corpus from its JSON representation.
pub fn parse_corpus(json: &str) -> Result<Arc<[LabeledExample]>> {
    let examples: Vec<LabeledExample> = serde_json::from_str(json)?;
    Ok(examples.into())
}

/// Load a corpus from a JSON file.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Arc<[LabeledExample]>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let corpus = parse_corpus(&content)?;
    debug!("Loaded {} examples from {}", corpus.len(), path.display());
    Ok(corpus)
}

/// The built-in complaint corpus.
pub fn builtin_corpus() -> Result<Arc<[LabeledExample]>> {
    parse_corpus(BUILTIN_CORPUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_corpus_loads() {
        let corpus = builtin_corpus().unwrap();

        assert_eq!(corpus.len(), 149);
        assert!(
            corpus
                .iter()
                .all(|e| e.category != CategoryLabel::GeneralComplaint)
        );
        assert!(
            corpus
                .iter()
                .any(|e| e.category == CategoryLabel::DowryHarassment)
        );
    }

    #[test]
    fn test_load_corpus_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"text": "stalker follows me home", "category": "Public Harassment"}}]"#
        )
        .unwrap();

        let corpus = load_corpus(file.path()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus[0].category, CategoryLabel::PublicHarassment);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let result = parse_corpus(r#"[{"text": "x", "category": "Parking"}]"#);
        assert!(result.is_err());
    }
}
