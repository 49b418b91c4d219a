//! Offline training: corpus in, validated [`ModelSnapshot`] out.
//!
//! ```no_run
//! use complaint_router::config::EngineConfig;
//! use complaint_router::corpus::builtin_corpus;
//! use complaint_router::training::TrainingPipeline;
//!
//! let corpus = builtin_corpus().unwrap();
//! let outcome = TrainingPipeline::new(&EngineConfig::default()).run(&corpus).unwrap();
//! println!("{}", outcome.report);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::{NormalizedDocument, TextNormalizer};
use crate::category::CategoryLabel;
use crate::config::{ClassifierConfig, EngineConfig, NormalizerConfig, VectorizerConfig};
use crate::corpus::LabeledExample;
use crate::engine::snapshot::ModelSnapshot;
use crate::error::{Result, RouterError};
use crate::ml::classifier::ProbabilisticClassifier;
use crate::ml::gate::ConfidenceGate;
use crate::ml::tfidf::FeatureVectorizer;
use crate::ml::vocabulary::VocabularyModel;

/// Summary of one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub n_examples: usize,
    pub class_counts: BTreeMap<CategoryLabel, usize>,
    pub vocabulary_size: usize,
    /// Fraction of training examples whose top category matches their label.
    /// Informational only; it is measured on the data the model was fit on.
    pub training_accuracy: f64,
    pub duration: Duration,
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} examples, {} categories, {} terms, training accuracy {:.2} ({:.2?})",
            self.n_examples,
            self.class_counts.len(),
            self.vocabulary_size,
            self.training_accuracy,
            self.duration
        )
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub snapshot: ModelSnapshot,
    pub report: TrainingReport,
}

/// Runs normalization and vocabulary fitting, then vectorizes and fits the classifier.
#[derive(Debug, Clone)]
pub struct TrainingPipeline {
    normalizer: TextNormalizer,
    normalizer_config: NormalizerConfig,
    vectorizer: VectorizerConfig,
    classifier: ClassifierConfig,
    fallback: CategoryLabel,
}

impl TrainingPipeline {
    pub fn new(config: &EngineConfig) -> Self {
        TrainingPipeline {
            normalizer: TextNormalizer::new(&config.normalizer),
            normalizer_config: config.normalizer.clone(),
            vectorizer: config.vectorizer.clone(),
            classifier: config.classifier.clone(),
            fallback: config.fallback_category,
        }
    }

    /// Train on `corpus`. Nothing is returned unless every step succeeds.
    pub fn run(&self, corpus: &[LabeledExample]) -> Result<TrainingOutcome> {
        let start = Instant::now();

        if corpus.is_empty() {
            return Err(RouterError::data("training corpus is empty"));
        }
        if let Some(example) = corpus.iter().find(|e| e.category == self.fallback) {
            return Err(RouterError::data(format!(
                "training example labeled with the fallback category {}: {:?}",
                self.fallback, example.text
            )));
        }

        let documents = corpus
            .par_iter()
            .map(|example| self.normalizer.normalize(&example.text))
            .collect::<Result<Vec<NormalizedDocument>>>()?;
        let labels: Vec<CategoryLabel> = corpus.iter().map(|e| e.category).collect();
        debug!("Normalized {} training examples", documents.len());

        let vocabulary = VocabularyModel::fit(&documents, &self.vectorizer)?;
        let vectorizer = FeatureVectorizer::new(&vocabulary);
        let features = vectorizer.transform_all(&documents);

        let classifier = self.classifier.fit(&vocabulary, &features, &labels)?;

        let argmax = ConfidenceGate::new(0.0, self.fallback);
        let mut correct = 0;
        for (vector, label) in features.iter().zip(&labels) {
            let distribution = classifier.predict_proba(vector)?;
            if argmax.decide(&distribution).category == *label {
                correct += 1;
            }
        }
        let training_accuracy = correct as f64 / corpus.len() as f64;

        let mut class_counts = BTreeMap::new();
        for label in &labels {
            *class_counts.entry(*label).or_insert(0) += 1;
        }

        let vocabulary_size = vocabulary.len();
        let snapshot =
            ModelSnapshot::new(vocabulary, classifier, self.normalizer_config.clone())?;

        let report = TrainingReport {
            n_examples: corpus.len(),
            class_counts,
            vocabulary_size,
            training_accuracy,
            duration: start.elapsed(),
        };
        info!(
            "Trained {} model: {}",
            snapshot.classifier().name(),
            report
        );

        Ok(TrainingOutcome { snapshot, report })
    }
}
