//! Engine configuration.
//!
//! Every section deserializes with defaults for missing fields, so a config
//! file only needs to name what it changes:
//!
//! ```
//! use complaint_router::config::{EngineConfig, ModelFamily};
//!
//! let config: EngineConfig = serde_json::from_str(
//!     r#"{"confidence_threshold": 0.5, "classifier": {"family": "logistic_regression"}}"#,
//! ).unwrap();
//!
//! assert_eq!(config.confidence_threshold, 0.5);
//! assert_eq!(config.classifier.family, ModelFamily::LogisticRegression);
//! assert_eq!(config.vectorizer.ngram_order, 2);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::CategoryLabel;
use crate::error::{Result, RouterError};
use crate::routing::department::{DepartmentDirectory, DepartmentRecord};

/// Top-level configuration for an [`Engine`](crate::engine::Engine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Start without a model; every classification falls back.
    pub skip_nlp_init: bool,
    /// Minimum top probability for a prediction to be accepted.
    pub confidence_threshold: f64,
    /// Category returned when a prediction is rejected.
    pub fallback_category: CategoryLabel,
    pub normalizer: NormalizerConfig,
    pub vectorizer: VectorizerConfig,
    pub classifier: ClassifierConfig,
    /// Replaces the built-in department table when set.
    pub departments: Option<Vec<DepartmentRecord>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            skip_nlp_init: false,
            confidence_threshold: 0.6,
            fallback_category: CategoryLabel::GeneralComplaint,
            normalizer: NormalizerConfig::default(),
            vectorizer: VectorizerConfig::default(),
            classifier: ClassifierConfig::default(),
            departments: None,
        }
    }
}

impl EngineConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder-style threshold override.
    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(RouterError::invalid_config(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        self.normalizer.validate()?;
        self.vectorizer.validate()?;
        self.classifier.validate()?;

        if let Some(departments) = &self.departments {
            DepartmentDirectory::new(departments.clone(), self.fallback_category)?;
        }
        Ok(())
    }
}

/// Text normalization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Tokens with fewer characters are dropped.
    pub min_token_length: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            min_token_length: 3,
        }
    }
}

impl NormalizerConfig {
    fn validate(&self) -> Result<()> {
        if self.min_token_length == 0 {
            return Err(RouterError::invalid_config(
                "min_token_length must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Vocabulary and TF-IDF settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// 1 for unigrams only, 2 for unigrams and bigrams.
    pub ngram_order: usize,
    /// Keep only this many of the most frequent terms.
    pub max_features: Option<usize>,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            ngram_order: 2,
            max_features: None,
        }
    }
}

impl VectorizerConfig {
    fn validate(&self) -> Result<()> {
        if !(1..=2).contains(&self.ngram_order) {
            return Err(RouterError::invalid_config(format!(
                "ngram_order must be 1 or 2, got {}",
                self.ngram_order
            )));
        }
        if self.max_features == Some(0) {
            return Err(RouterError::invalid_config("max_features must be positive"));
        }
        Ok(())
    }
}

/// Classifier family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    /// Multinomial naive Bayes.
    NaiveBayes,
    /// Elastic-net multinomial logistic regression.
    LogisticRegression,
}

/// Per-class sample weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassWeight {
    /// `n_samples / (n_classes * count_c)`.
    Balanced,
    /// Every sample weighs 1.
    Uniform,
}

/// Classifier settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub family: ModelFamily,
    pub class_weight: ClassWeight,
    pub naive_bayes: NaiveBayesConfig,
    pub logistic: LogisticConfig,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            family: ModelFamily::NaiveBayes,
            class_weight: ClassWeight::Balanced,
            naive_bayes: NaiveBayesConfig::default(),
            logistic: LogisticConfig::default(),
        }
    }
}

impl ClassifierConfig {
    fn validate(&self) -> Result<()> {
        match self.family {
            ModelFamily::NaiveBayes => self.naive_bayes.validate(),
            ModelFamily::LogisticRegression => self.logistic.validate(),
        }
    }
}

/// Multinomial naive Bayes hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveBayesConfig {
    /// Additive (Laplace/Lidstone) smoothing.
    pub alpha: f64,
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        Self { alpha: 0.01 }
    }
}

impl NaiveBayesConfig {
    fn validate(&self) -> Result<()> {
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(RouterError::invalid_config(format!(
                "naive_bayes.alpha must be positive, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// Logistic regression hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticConfig {
    /// Inverse regularization strength.
    pub c: f64,
    /// Share of the penalty that is L1.
    pub l1_ratio: f64,
    pub max_iter: usize,
    /// Stop once the largest parameter update falls below this.
    pub tol: f64,
    pub learning_rate: f64,
}

impl Default for LogisticConfig {
    fn default() -> Self {
        Self {
            c: 100.0,
            l1_ratio: 0.1,
            max_iter: 10_000,
            tol: 1e-4,
            learning_rate: 2.0,
        }
    }
}

impl LogisticConfig {
    fn validate(&self) -> Result<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(RouterError::invalid_config("logistic.c must be positive"));
        }
        if !(0.0..=1.0).contains(&self.l1_ratio) {
            return Err(RouterError::invalid_config(
                "logistic.l1_ratio must be within [0, 1]",
            ));
        }
        if self.max_iter == 0 {
            return Err(RouterError::invalid_config(
                "logistic.max_iter must be at least 1",
            ));
        }
        if !(self.tol.is_finite() && self.tol >= 0.0) {
            return Err(RouterError::invalid_config(
                "logistic.tol must be non-negative",
            ));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(RouterError::invalid_config(
                "logistic.learning_rate must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_engine_config_default() {
        let config = EngineConfig::default();
        assert!(!config.skip_nlp_init);
        assert_eq!(config.confidence_threshold, 0.6);
        assert_eq!(config.fallback_category, CategoryLabel::GeneralComplaint);
        assert_eq!(config.normalizer.min_token_length, 3);
        assert_eq!(config.vectorizer.ngram_order, 2);
        assert_eq!(config.vectorizer.max_features, None);
        assert_eq!(config.classifier.family, ModelFamily::NaiveBayes);
        assert_eq!(config.classifier.class_weight, ClassWeight::Balanced);
        assert_eq!(config.classifier.naive_bayes.alpha, 0.01);
        assert_eq!(config.classifier.logistic.max_iter, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let config = EngineConfig::default().with_confidence_threshold(1.5);
        assert!(matches!(
            config.validate(),
            Err(RouterError::InvalidConfig(_))
        ));

        let config = EngineConfig::default().with_confidence_threshold(f64::NAN);
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.vectorizer.ngram_order = 3;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.classifier.naive_bayes.alpha = 0.0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.classifier.family = ModelFamily::LogisticRegression;
        config.classifier.logistic.l1_ratio = 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_department_override_needs_fallback_row() {
        let mut config = EngineConfig::default();
        config.departments = Some(vec![DepartmentRecord::new(
            CategoryLabel::CyberHarassment,
            "Cyber Crime Cell",
            "cyber@example.org",
            "+1-555-0107",
        )]);
        assert!(matches!(
            config.validate(),
            Err(RouterError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_department_override_rejects_duplicates() {
        let row = DepartmentRecord::new(
            CategoryLabel::GeneralComplaint,
            "State Women Commission",
            "swc@example.org",
            "+1-555-0110",
        );
        let mut config = EngineConfig::default();
        config.departments = Some(vec![row.clone(), row.clone()]);
        assert!(config.validate().is_err());

        config.departments = Some(vec![row]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"skip_nlp_init": true, "normalizer": {{"min_token_length": 4}}}}"#
        )
        .unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert!(config.skip_nlp_init);
        assert_eq!(config.normalizer.min_token_length, 4);
        assert_eq!(config.confidence_threshold, 0.6);
    }
}
