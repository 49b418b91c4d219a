//! Learned components of the classification pipeline.
//!
//! ```text
//! NormalizedDocument → VocabularyModel / FeatureVectorizer → FeatureVector
//!                    → ClassifierModel → CategoryDistribution → ConfidenceGate
//! ```

pub mod classifier;
pub mod gate;
pub mod tfidf;
pub mod vocabulary;
