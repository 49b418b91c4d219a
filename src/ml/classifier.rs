//! Supervised probabilistic classifiers over TF-IDF features.
//!
//! Two linear families are available, selected by
//! [`ClassifierConfig::family`](crate::config::ClassifierConfig):
//!
//! - [`naive_bayes::NaiveBayesModel`] - multinomial naive Bayes (default)
//! - [`logistic::LogisticModel`] - elastic-net multinomial logistic regression
//!
//! Both record the categories they were trained on, the feature dimension
//! and the fingerprint of the vocabulary that produced their features.
//! [`ProbabilisticClassifier::predict_proba`] refuses vectors of any other
//! dimension.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::category::CategoryLabel;
use crate::config::{ClassWeight, ClassifierConfig, ModelFamily};
use crate::error::{Result, RouterError};
use crate::ml::tfidf::FeatureVector;
use crate::ml::vocabulary::VocabularyModel;

pub mod logistic;
pub mod naive_bayes;

pub use logistic::LogisticModel;
pub use naive_bayes::NaiveBayesModel;

/// Probability per category. Iteration follows category order.
pub type CategoryDistribution = BTreeMap<CategoryLabel, f64>;

/// What a fitted model was trained against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelHeader {
    /// Categories in sorted order; row `i` of every parameter matrix belongs
    /// to `categories[i]`.
    pub categories: Vec<CategoryLabel>,
    /// Feature dimension, equal to the vocabulary size.
    pub dimension: usize,
    /// Fingerprint of the vocabulary the features came from.
    pub vocabulary_fingerprint: u32,
}

/// A fitted classifier producing a probability distribution over categories.
pub trait ProbabilisticClassifier: Send + Sync {
    /// Training metadata.
    fn header(&self) -> &ModelHeader;

    /// Unnormalized log-scores, one per category in header order.
    fn joint_log_scores(&self, features: &FeatureVector) -> Vec<f64>;

    /// Name of the model family.
    fn name(&self) -> &'static str;

    /// Class probabilities summing to 1.
    fn predict_proba(&self, features: &FeatureVector) -> Result<CategoryDistribution> {
        let header = self.header();
        if features.dimension() != header.dimension {
            return Err(RouterError::model_mismatch(format!(
                "feature vector has dimension {} but the {} model expects {}",
                features.dimension(),
                self.name(),
                header.dimension
            )));
        }

        let probabilities = softmax(&self.joint_log_scores(features));
        Ok(header
            .categories
            .iter()
            .copied()
            .zip(probabilities)
            .collect())
    }
}

/// Numerically stable softmax.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// `n_samples / (n_classes * count_c)` for every class present in `labels`.
pub fn balanced_class_weights(labels: &[CategoryLabel]) -> BTreeMap<CategoryLabel, f64> {
    let mut counts: BTreeMap<CategoryLabel, usize> = BTreeMap::new();
    for &label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    let n_samples = labels.len() as f64;
    let n_classes = counts.len() as f64;
    counts
        .into_iter()
        .map(|(label, count)| (label, n_samples / (n_classes * count as f64)))
        .collect()
}

/// Validated training input shared by all families.
#[derive(Debug)]
pub struct TrainingSet<'a> {
    features: &'a [FeatureVector],
    class_indices: Vec<usize>,
    sample_weights: Vec<f64>,
    header: ModelHeader,
}

impl<'a> TrainingSet<'a> {
    /// Check features against labels and the vocabulary they came from.
    pub fn new(
        features: &'a [FeatureVector],
        labels: &[CategoryLabel],
        vocabulary: &VocabularyModel,
        class_weight: ClassWeight,
    ) -> Result<Self> {
        if features.len() != labels.len() {
            return Err(RouterError::dimension_mismatch(features.len(), labels.len()));
        }
        if features.is_empty() {
            return Err(RouterError::data("no training examples"));
        }

        let categories: Vec<CategoryLabel> = labels
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if categories.len() < 2 {
            return Err(RouterError::insufficient_data(categories.len()));
        }

        let dimension = vocabulary.len();
        if let Some(bad) = features.iter().find(|f| f.dimension() != dimension) {
            return Err(RouterError::model_mismatch(format!(
                "training vector has dimension {} but the vocabulary has {} terms",
                bad.dimension(),
                dimension
            )));
        }

        let class_indices = labels
            .iter()
            .map(|label| categories.binary_search(label).unwrap_or_default())
            .collect();
        let sample_weights = match class_weight {
            ClassWeight::Uniform => vec![1.0; labels.len()],
            ClassWeight::Balanced => {
                let weights = balanced_class_weights(labels);
                labels
                    .iter()
                    .map(|label| weights.get(label).copied().unwrap_or(1.0))
                    .collect()
            }
        };

        Ok(TrainingSet {
            features,
            class_indices,
            sample_weights,
            header: ModelHeader {
                categories,
                dimension,
                vocabulary_fingerprint: vocabulary.fingerprint(),
            },
        })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn n_classes(&self) -> usize {
        self.header.categories.len()
    }

    pub fn header(&self) -> &ModelHeader {
        &self.header
    }

    /// `(features, class index, sample weight)` per example.
    pub fn samples(&self) -> impl Iterator<Item = (&FeatureVector, usize, f64)> + '_ {
        self.features
            .iter()
            .zip(self.class_indices.iter().copied())
            .zip(self.sample_weights.iter().copied())
            .map(|((x, y), w)| (x, y, w))
    }

    pub fn total_weight(&self) -> f64 {
        self.sample_weights.iter().sum()
    }
}

/// A fitted model of either family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum ClassifierModel {
    NaiveBayes(NaiveBayesModel),
    LogisticRegression(LogisticModel),
}

impl ClassifierModel {
    fn inner(&self) -> &dyn ProbabilisticClassifier {
        match self {
            ClassifierModel::NaiveBayes(model) => model,
            ClassifierModel::LogisticRegression(model) => model,
        }
    }

    pub fn family(&self) -> ModelFamily {
        match self {
            ClassifierModel::NaiveBayes(_) => ModelFamily::NaiveBayes,
            ClassifierModel::LogisticRegression(_) => ModelFamily::LogisticRegression,
        }
    }

    pub fn categories(&self) -> &[CategoryLabel] {
        &self.header().categories
    }

    pub fn dimension(&self) -> usize {
        self.header().dimension
    }

    pub fn vocabulary_fingerprint(&self) -> u32 {
        self.header().vocabulary_fingerprint
    }
}

impl ProbabilisticClassifier for ClassifierModel {
    fn header(&self) -> &ModelHeader {
        self.inner().header()
    }

    fn joint_log_scores(&self, features: &FeatureVector) -> Vec<f64> {
        self.inner().joint_log_scores(features)
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }
}

impl ClassifierConfig {
    /// Fit the configured family on vectorized examples.
    pub fn fit(
        &self,
        vocabulary: &VocabularyModel,
        features: &[FeatureVector],
        labels: &[CategoryLabel],
    ) -> Result<ClassifierModel> {
        let set = TrainingSet::new(features, labels, vocabulary, self.class_weight)?;
        debug!(
            "Fitting {:?} on {} examples, {} classes, {} features",
            self.family,
            set.len(),
            set.n_classes(),
            set.header().dimension
        );

        Ok(match self.family {
            ModelFamily::NaiveBayes => {
                ClassifierModel::NaiveBayes(NaiveBayesModel::fit(&set, &self.naive_bayes)?)
            }
            ModelFamily::LogisticRegression => {
                ClassifierModel::LogisticRegression(LogisticModel::fit(&set, &self.logistic))
            }
        })
    }
}
