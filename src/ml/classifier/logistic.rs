//! Elastic-net multinomial logistic regression.
//!
//! Minimizes the sample-weighted softmax cross-entropy plus
//! `(1 / C) * (l1_ratio * |W|_1 + 0.5 * (1 - l1_ratio) * |W|^2)` with
//! full-batch proximal gradient descent. Intercepts are not penalized. Both
//! the loss and the penalty are divided by the total sample weight so the
//! learning rate does not depend on corpus size. Updates run in a fixed
//! order, so fitting is deterministic.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{ModelHeader, ProbabilisticClassifier, TrainingSet, softmax};
use crate::config::LogisticConfig;
use crate::ml::tfidf::FeatureVector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    header: ModelHeader,
    /// One weight row per class.
    weights: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
    /// Iterations actually run.
    n_iter: usize,
    converged: bool,
}

impl LogisticModel {
    /// Fit on a validated training set.
    pub fn fit(set: &TrainingSet<'_>, config: &LogisticConfig) -> Self {
        let header = set.header().clone();
        let n_classes = header.categories.len();
        let dimension = header.dimension;

        let mut weights = vec![vec![0.0; dimension]; n_classes];
        let mut intercepts = vec![0.0; n_classes];

        let step = config.learning_rate / set.total_weight();
        let l2 = (1.0 - config.l1_ratio) / config.c;
        let threshold = step * config.l1_ratio / config.c;

        let mut n_iter = 0;
        let mut converged = false;

        while n_iter < config.max_iter {
            n_iter += 1;

            let mut grad_w = vec![vec![0.0; dimension]; n_classes];
            let mut grad_b = vec![0.0; n_classes];

            for (features, class, weight) in set.samples() {
                let scores: Vec<f64> = weights
                    .iter()
                    .zip(&intercepts)
                    .map(|(row, b)| features.dot(row) + b)
                    .collect();
                let probabilities = softmax(&scores);

                for (c, p) in probabilities.into_iter().enumerate() {
                    let target = if c == class { 1.0 } else { 0.0 };
                    let residual = weight * (p - target);
                    grad_b[c] += residual;
                    for &(j, x) in features.entries() {
                        grad_w[c][j] += residual * x;
                    }
                }
            }

            let mut max_delta: f64 = 0.0;
            for c in 0..n_classes {
                for j in 0..dimension {
                    let w = weights[c][j];
                    let z = w - step * (grad_w[c][j] + l2 * w);
                    let updated = z.signum() * (z.abs() - threshold).max(0.0);
                    max_delta = max_delta.max((updated - w).abs());
                    weights[c][j] = updated;
                }
                let b = intercepts[c];
                let updated = b - step * grad_b[c];
                max_delta = max_delta.max((updated - b).abs());
                intercepts[c] = updated;
            }

            if max_delta < config.tol {
                converged = true;
                break;
            }
        }

        if converged {
            debug!("Logistic regression converged after {n_iter} iterations");
        } else {
            warn!(
                "Logistic regression did not converge within {} iterations",
                config.max_iter
            );
        }

        LogisticModel {
            header,
            weights,
            intercepts,
            n_iter,
            converged,
        }
    }

    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Number of non-zero weights across all classes.
    pub fn nonzero_weights(&self) -> usize {
        self.weights
            .iter()
            .map(|row| row.iter().filter(|w| **w != 0.0).count())
            .sum()
    }
}

impl ProbabilisticClassifier for LogisticModel {
    fn header(&self) -> &ModelHeader {
        &self.header
    }

    fn joint_log_scores(&self, features: &FeatureVector) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| features.dot(row) + b)
            .collect()
    }

    fn name(&self) -> &'static str {
        "logistic_regression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::NormalizedDocument;
    use crate::category::CategoryLabel;
    use crate::config::{ClassWeight, VectorizerConfig};
    use crate::ml::classifier::CategoryDistribution;
    use crate::ml::tfidf::FeatureVectorizer;
    use crate::ml::vocabulary::VocabularyModel;

    fn doc(terms: &[&str]) -> NormalizedDocument {
        NormalizedDocument::new(terms.iter().map(|t| t.to_string()).collect())
    }

    fn corpus() -> (Vec<NormalizedDocument>, Vec<CategoryLabel>) {
        (
            vec![
                doc(&["boss", "touch", "office"]),
                doc(&["manager", "touch", "office"]),
                doc(&["husband", "beat", "home"]),
                doc(&["husband", "lock", "home"]),
                doc(&["troll", "online", "message"]),
                doc(&["fake", "online", "profile"]),
            ],
            vec![
                CategoryLabel::WorkplaceHarassment,
                CategoryLabel::WorkplaceHarassment,
                CategoryLabel::DomesticViolence,
                CategoryLabel::DomesticViolence,
                CategoryLabel::CyberHarassment,
                CategoryLabel::CyberHarassment,
            ],
        )
    }

    fn argmax(proba: &CategoryDistribution) -> CategoryLabel {
        proba
            .iter()
            .fold(None::<(CategoryLabel, f64)>, |best, (&c, &p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((c, p)),
            })
            .unwrap()
            .0
    }

    #[test]
    fn test_logistic_separates_classes() {
        let (docs, labels) = corpus();
        let vocabulary = VocabularyModel::fit(&docs, &VectorizerConfig::default()).unwrap();
        let vectorizer = FeatureVectorizer::new(&vocabulary);
        let features = vectorizer.transform_all(&docs);
        let set =
            TrainingSet::new(&features, &labels, &vocabulary, ClassWeight::Balanced).unwrap();

        let config = LogisticConfig {
            c: 100.0,
            ..LogisticConfig::default()
        };
        let model = LogisticModel::fit(&set, &config);

        for (query, expected) in [
            (doc(&["boss", "touch"]), CategoryLabel::WorkplaceHarassment),
            (doc(&["husband", "home"]), CategoryLabel::DomesticViolence),
            (doc(&["online", "troll"]), CategoryLabel::CyberHarassment),
        ] {
            let proba = model.predict_proba(&vectorizer.transform(&query)).unwrap();
            assert!((proba.values().sum::<f64>() - 1.0).abs() < 1e-9);
            assert_eq!(argmax(&proba), expected);
        }
    }

    #[test]
    fn test_strong_l1_zeroes_weights() {
        let (docs, labels) = corpus();
        let vocabulary = VocabularyModel::fit(&docs, &VectorizerConfig::default()).unwrap();
        let features = FeatureVectorizer::new(&vocabulary).transform_all(&docs);
        let set =
            TrainingSet::new(&features, &labels, &vocabulary, ClassWeight::Balanced).unwrap();

        let config = LogisticConfig {
            c: 0.01,
            l1_ratio: 1.0,
            ..LogisticConfig::default()
        };
        let model = LogisticModel::fit(&set, &config);

        assert_eq!(model.nonzero_weights(), 0);
        assert!(model.converged());
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (docs, labels) = corpus();
        let vocabulary = VocabularyModel::fit(&docs, &VectorizerConfig::default()).unwrap();
        let features = FeatureVectorizer::new(&vocabulary).transform_all(&docs);
        let set =
            TrainingSet::new(&features, &labels, &vocabulary, ClassWeight::Balanced).unwrap();
        let config = LogisticConfig {
            max_iter: 50,
            ..LogisticConfig::default()
        };

        let a = LogisticModel::fit(&set, &config);
        let b = LogisticModel::fit(&set, &config);

        assert_eq!(a, b);
        assert!(a.n_iter() <= 50);
        assert_eq!(a.name(), "logistic_regression");
    }
}
