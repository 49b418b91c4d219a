//! Multinomial naive Bayes.
//!
//! Feature counts are the sample-weighted sums of the TF-IDF weights per
//! class, smoothed with `alpha`. Class priors come from the weighted class
//! totals, which are uniform under balanced class weights.

use serde::{Deserialize, Serialize};

use super::{ModelHeader, ProbabilisticClassifier, TrainingSet};
use crate::config::NaiveBayesConfig;
use crate::error::{Result, RouterError};
use crate::ml::tfidf::FeatureVector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    header: ModelHeader,
    alpha: f64,
    /// `log P(c)` per class.
    class_log_prior: Vec<f64>,
    /// `log P(t | c)`, one row per class.
    feature_log_prob: Vec<Vec<f64>>,
}

impl NaiveBayesModel {
    /// Fit on a validated training set. Features must be non-negative.
    pub fn fit(set: &TrainingSet<'_>, config: &NaiveBayesConfig) -> Result<Self> {
        let header = set.header().clone();
        let n_classes = header.categories.len();
        let dimension = header.dimension;

        let mut feature_count = vec![vec![0.0; dimension]; n_classes];
        let mut class_count = vec![0.0; n_classes];

        for (features, class, weight) in set.samples() {
            class_count[class] += weight;
            for &(index, value) in features.entries() {
                if value < 0.0 {
                    return Err(RouterError::data(
                        "naive Bayes requires non-negative feature values",
                    ));
                }
                feature_count[class][index] += weight * value;
            }
        }

        let total: f64 = class_count.iter().sum();
        let class_log_prior = class_count.iter().map(|c| (c / total).ln()).collect();

        let smoothing_total = config.alpha * dimension as f64;
        let feature_log_prob = feature_count
            .into_iter()
            .map(|row| {
                let denominator = (row.iter().sum::<f64>() + smoothing_total).ln();
                row.into_iter()
                    .map(|count| (count + config.alpha).ln() - denominator)
                    .collect()
            })
            .collect();

        Ok(NaiveBayesModel {
            header,
            alpha: config.alpha,
            class_log_prior,
            feature_log_prob,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn class_log_prior(&self) -> &[f64] {
        &self.class_log_prior
    }
}

impl ProbabilisticClassifier for NaiveBayesModel {
    fn header(&self) -> &ModelHeader {
        &self.header
    }

    fn joint_log_scores(&self, features: &FeatureVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, row)| prior + features.dot(row))
            .collect()
    }

    fn name(&self) -> &'static str {
        "naive_bayes"
    }
}
