//! Confidence gating of classifier output.
//!
//! The gate picks the most probable category and accepts it only when its
//! probability reaches the configured threshold. Everything else, including
//! inputs the classifier never saw, resolves to the fallback category.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::category::CategoryLabel;
use crate::ml::classifier::CategoryDistribution;

/// Outcome of one classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// The routed category: the model's choice if accepted, else the fallback.
    pub category: CategoryLabel,
    /// Highest class probability, or 0 when the classifier was not consulted.
    pub confidence: f64,
    /// Whether the model's choice cleared the threshold.
    pub accepted: bool,
}

/// Threshold test on the top class probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceGate {
    threshold: f64,
    fallback: CategoryLabel,
}

impl ConfidenceGate {
    pub fn new(threshold: f64, fallback: CategoryLabel) -> Self {
        ConfidenceGate {
            threshold,
            fallback,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn fallback_category(&self) -> CategoryLabel {
        self.fallback
    }

    /// The fallback result, used when there is nothing to classify.
    pub fn fallback(&self) -> PredictionResult {
        PredictionResult {
            category: self.fallback,
            confidence: 0.0,
            accepted: false,
        }
    }

    /// Decide on a class distribution.
    ///
    /// Ties go to the category that sorts first. NaN probabilities are never
    /// selected; a distribution without any finite entry falls back.
    pub fn decide(&self, distribution: &CategoryDistribution) -> PredictionResult {
        let best = distribution
            .iter()
            .filter(|(_, p)| !p.is_nan())
            .fold(None::<(CategoryLabel, f64)>, |best, (&category, &p)| {
                match best {
                    Some((_, best_p)) if best_p >= p => best,
                    _ => Some((category, p)),
                }
            });

        let Some((candidate, confidence)) = best else {
            return self.fallback();
        };

        if confidence < self.threshold {
            warn!(
                "Low confidence prediction: {} ({:.3} < {:.3}), routing to {}",
                candidate, confidence, self.threshold, self.fallback
            );
            return PredictionResult {
                category: self.fallback,
                confidence,
                accepted: false,
            };
        }

        PredictionResult {
            category: candidate,
            confidence,
            accepted: true,
        }
    }
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self::new(0.6, CategoryLabel::GeneralComplaint)
    }
}
