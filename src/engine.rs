//! The classification and routing engine.
//!
//! An [`Engine`] owns its configuration and text normalizer, along with the
//! confidence gate, the department directory and the current
//! [`ModelSnapshot`]. Inference clones the snapshot handle under a short
//! read lock and then runs without locks; retraining builds a new snapshot
//! off to the side and swaps it in with one write.
//!
//! # Examples
//!
//! ```
//! use complaint_router::category::CategoryLabel;
//! use complaint_router::config::EngineConfig;
//! use complaint_router::corpus::LabeledExample;
//! use complaint_router::engine::Engine;
//!
//! let corpus = vec![
//!     LabeledExample::new("boss touches me inappropriately", CategoryLabel::WorkplaceHarassment),
//!     LabeledExample::new("husband locks me inside daily", CategoryLabel::DomesticViolence),
//! ];
//! let engine = Engine::with_corpus(EngineConfig::default(), &corpus).unwrap();
//!
//! let prediction = engine.classify("my boss", "keeps touching me");
//! assert_eq!(prediction.category, CategoryLabel::WorkplaceHarassment);
//! assert!(prediction.accepted);
//!
//! let empty = engine.classify("", "");
//! assert_eq!(empty.category, CategoryLabel::GeneralComplaint);
//! ```

use std::path::Path;
use std::sync::Arc;

use log::{debug, error, info};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::TextNormalizer;
use crate::category::CategoryLabel;
use crate::config::EngineConfig;
use crate::corpus::LabeledExample;
use crate::error::{Result, RouterError};
use crate::ml::gate::{ConfidenceGate, PredictionResult};
use crate::routing::department::{DepartmentDirectory, DepartmentRecord};
use crate::routing::notifier::ComplaintNotice;
use crate::training::{TrainingPipeline, TrainingReport};

pub mod snapshot;

pub use snapshot::ModelSnapshot;

/// A prediction together with the department it routes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub prediction: PredictionResult,
    pub department: DepartmentRecord,
}

impl RoutingDecision {
    /// Build the notice sent to the department.
    pub fn notice(
        &self,
        complaint_id: impl Into<String>,
        title: impl Into<String>,
        description: &str,
    ) -> ComplaintNotice {
        ComplaintNotice::new(
            complaint_id,
            self.prediction.category,
            title,
            description,
            self.department.clone(),
        )
    }
}

/// Classifies complaint text and resolves the responsible department.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    normalizer: TextNormalizer,
    gate: ConfidenceGate,
    directory: DepartmentDirectory,
    snapshot: RwLock<Option<Arc<ModelSnapshot>>>,
    /// Serializes retraining and snapshot loads.
    training: Mutex<()>,
}

impl Engine {
    /// Create an engine without a model. Every classification falls back
    /// until [`retrain`](Self::retrain) or
    /// [`load_snapshot`](Self::load_snapshot) succeeds.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let directory = match &config.departments {
            Some(records) => DepartmentDirectory::new(records.clone(), config.fallback_category)?,
            None => DepartmentDirectory::builtin(),
        };

        Ok(Engine {
            normalizer: TextNormalizer::new(&config.normalizer),
            gate: ConfidenceGate::new(config.confidence_threshold, config.fallback_category),
            directory,
            snapshot: RwLock::new(None),
            training: Mutex::new(()),
            config,
        })
    }

    /// Create an engine and train it on `corpus`, unless the configuration
    /// sets `skip_nlp_init`.
    pub fn with_corpus(config: EngineConfig, corpus: &[LabeledExample]) -> Result<Self> {
        let engine = Self::new(config)?;
        if engine.config.skip_nlp_init {
            info!("Model initialization skipped; all complaints route to the fallback category");
        } else {
            engine.retrain(corpus)?;
        }
        Ok(engine)
    }

    /// Train a new model and install it. The current model stays in place
    /// if training fails.
    pub fn retrain(&self, corpus: &[LabeledExample]) -> Result<TrainingReport> {
        let _guard = self.training.lock();
        let outcome = TrainingPipeline::new(&self.config).run(corpus)?;
        *self.snapshot.write() = Some(Arc::new(outcome.snapshot));
        Ok(outcome.report)
    }

    /// Install an already trained snapshot.
    pub fn install(&self, snapshot: ModelSnapshot) -> Result<()> {
        if snapshot.normalizer() != &self.config.normalizer {
            return Err(RouterError::model_mismatch(format!(
                "snapshot was trained with {:?}, engine uses {:?}",
                snapshot.normalizer(),
                self.config.normalizer
            )));
        }
        let _guard = self.training.lock();
        *self.snapshot.write() = Some(Arc::new(snapshot));
        Ok(())
    }

    /// Write the current model to `path`.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        match self.snapshot() {
            Some(snapshot) => snapshot.save(path),
            None => Err(RouterError::model_unavailable("no trained model to save")),
        }
    }

    /// Load a model from `path` and install it.
    pub fn load_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let snapshot = ModelSnapshot::load(path)?;
        self.install(snapshot)
    }

    /// Classify a complaint by its title and description.
    pub fn classify(&self, title: &str, description: &str) -> PredictionResult {
        self.classify_text(&format!("{title} {description}"))
    }

    /// Classify free text. Never fails: errors are logged and the fallback
    /// category is returned.
    pub fn classify_text(&self, text: &str) -> PredictionResult {
        match self.try_classify_text(text) {
            Ok(result) => result,
            Err(RouterError::ModelUnavailable(reason)) => {
                debug!("{reason}; using fallback category");
                self.gate.fallback()
            }
            Err(err) => {
                error!("Classification failed, using fallback category: {err}");
                self.gate.fallback()
            }
        }
    }

    /// Classify free text, surfacing errors.
    pub fn try_classify_text(&self, text: &str) -> Result<PredictionResult> {
        let snapshot = self
            .snapshot()
            .ok_or_else(|| RouterError::model_unavailable("no trained model"))?;

        let document = self.normalizer.normalize(text)?;
        if document.is_empty() {
            debug!("Nothing left to classify after normalization");
            return Ok(self.gate.fallback());
        }

        let features = snapshot.vectorize(&document);
        if features.is_zero() {
            debug!("No known terms in {:?}", document.as_text());
            return Ok(self.gate.fallback());
        }

        let distribution = snapshot.predict_proba(&features)?;
        let result = self.gate.decide(&distribution);
        if result.accepted {
            debug!(
                "Predicted category: {} ({:.2})",
                result.category, result.confidence
            );
        }
        Ok(result)
    }

    /// Department for `category`.
    pub fn route(&self, category: CategoryLabel) -> &DepartmentRecord {
        self.directory.resolve(category)
    }

    /// Classify a complaint and resolve its department.
    pub fn route_complaint(&self, title: &str, description: &str) -> RoutingDecision {
        let prediction = self.classify(title, description);
        RoutingDecision {
            department: self.route(prediction.category).clone(),
            prediction,
        }
    }

    /// Whether a model is installed.
    pub fn is_ready(&self) -> bool {
        self.snapshot.read().is_some()
    }

    /// Handle to the current model.
    pub fn snapshot(&self) -> Option<Arc<ModelSnapshot>> {
        self.snapshot.read().clone()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn gate(&self) -> &ConfidenceGate {
        &self.gate
    }

    pub fn directory(&self) -> &DepartmentDirectory {
        &self.directory
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizerConfig;
    use tempfile::TempDir;

    fn scenario_corpus() -> Vec<LabeledExample> {
        vec![
            LabeledExample::new(
                "boss touches me inappropriately",
                CategoryLabel::WorkplaceHarassment,
            ),
            LabeledExample::new(
                "husband locks me inside daily",
                CategoryLabel::DomesticViolence,
            ),
        ]
    }

    #[test]
    fn test_untrained_engine_falls_back() {
        let engine = Engine::new(EngineConfig::default()).unwrap();

        assert!(!engine.is_ready());
        let result = engine.classify("My boss", "keeps touching me");
        assert_eq!(result.category, CategoryLabel::GeneralComplaint);
        assert!(!result.accepted);
        assert!(matches!(
            engine.try_classify_text("boss"),
            Err(RouterError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn test_skip_nlp_init() {
        let config = EngineConfig {
            skip_nlp_init: true,
            ..EngineConfig::default()
        };
        let engine = Engine::with_corpus(config, &scenario_corpus()).unwrap();

        assert!(!engine.is_ready());
        assert_eq!(
            engine.classify("boss", "touching").category,
            CategoryLabel::GeneralComplaint
        );
    }

    #[test]
    fn test_failed_retrain_keeps_model() {
        let engine = Engine::with_corpus(EngineConfig::default(), &scenario_corpus()).unwrap();
        let before = engine.snapshot().unwrap();

        assert!(engine.retrain(&[]).is_err());
        assert!(Arc::ptr_eq(&before, &engine.snapshot().unwrap()));
    }

    #[test]
    fn test_route_complaint() {
        let engine = Engine::with_corpus(EngineConfig::default(), &scenario_corpus()).unwrap();

        let decision = engine.route_complaint("Husband", "locks me inside the house");
        assert_eq!(decision.prediction.category, CategoryLabel::DomesticViolence);
        assert_eq!(decision.department.department_name, "Women Protection Cell");

        let notice = decision.notice("7", "Husband", "locks me inside the house");
        assert_eq!(notice.category, CategoryLabel::DomesticViolence);
        assert_eq!(notice.department_contact, decision.department);
    }

    #[test]
    fn test_snapshot_requires_matching_normalizer() {
        let engine = Engine::with_corpus(EngineConfig::default(), &scenario_corpus()).unwrap();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        engine.save_snapshot(&path).unwrap();

        let other = Engine::new(EngineConfig {
            normalizer: NormalizerConfig {
                min_token_length: 2,
            },
            ..EngineConfig::default()
        })
        .unwrap();
        assert!(matches!(
            other.load_snapshot(&path),
            Err(RouterError::ModelMismatch(_))
        ));
        assert!(!other.is_ready());

        let same = Engine::new(EngineConfig::default()).unwrap();
        same.load_snapshot(&path).unwrap();
        assert!(same.is_ready());
    }

    #[test]
    fn test_save_without_model() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            engine.save_snapshot(dir.path().join("model.json")),
            Err(RouterError::ModelUnavailable(_))
        ));
    }
}
