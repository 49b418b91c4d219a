//! A trained model: the vocabulary and the classifier fit against it.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::NormalizedDocument;
use crate::config::NormalizerConfig;
use crate::error::{Result, RouterError};
use crate::ml::classifier::{CategoryDistribution, ClassifierModel, ProbabilisticClassifier};
use crate::ml::tfidf::{FeatureVector, FeatureVectorizer};
use crate::ml::vocabulary::VocabularyModel;

/// Snapshot file format version.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Vocabulary, classifier and the normalizer settings they were trained
/// with. The classifier is guaranteed to match the vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotRecord", into = "SnapshotRecord")]
pub struct ModelSnapshot {
    vocabulary: VocabularyModel,
    classifier: ClassifierModel,
    normalizer: NormalizerConfig,
    trained_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct SnapshotRecord {
    format_version: u32,
    trained_at: DateTime<Utc>,
    normalizer: NormalizerConfig,
    vocabulary: VocabularyModel,
    classifier: ClassifierModel,
}

impl ModelSnapshot {
    /// Pair a vocabulary with a classifier, stamped with the current time.
    pub fn new(
        vocabulary: VocabularyModel,
        classifier: ClassifierModel,
        normalizer: NormalizerConfig,
    ) -> Result<Self> {
        Self::assemble(vocabulary, classifier, normalizer, Utc::now())
    }

    fn assemble(
        vocabulary: VocabularyModel,
        classifier: ClassifierModel,
        normalizer: NormalizerConfig,
        trained_at: DateTime<Utc>,
    ) -> Result<Self> {
        if classifier.dimension() != vocabulary.len() {
            return Err(RouterError::model_mismatch(format!(
                "classifier expects {} features but the vocabulary has {} terms",
                classifier.dimension(),
                vocabulary.len()
            )));
        }
        if classifier.vocabulary_fingerprint() != vocabulary.fingerprint() {
            return Err(RouterError::model_mismatch(format!(
                "classifier was fit against vocabulary {:08x}, not {:08x}",
                classifier.vocabulary_fingerprint(),
                vocabulary.fingerprint()
            )));
        }
        Ok(ModelSnapshot {
            vocabulary,
            classifier,
            normalizer,
            trained_at,
        })
    }

    pub fn vocabulary(&self) -> &VocabularyModel {
        &self.vocabulary
    }

    pub fn classifier(&self) -> &ClassifierModel {
        &self.classifier
    }

    pub fn normalizer(&self) -> &NormalizerConfig {
        &self.normalizer
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    pub fn vectorizer(&self) -> FeatureVectorizer<'_> {
        FeatureVectorizer::new(&self.vocabulary)
    }

    pub fn vectorize(&self, document: &NormalizedDocument) -> FeatureVector {
        self.vectorizer().transform(document)
    }

    pub fn predict_proba(&self, features: &FeatureVector) -> Result<CategoryDistribution> {
        self.classifier.predict_proba(features)
    }

    /// Write the snapshot as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        debug!("Saved model snapshot to {}", path.display());
        Ok(())
    }

    /// Read and validate a snapshot written by [`save`](Self::save).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let snapshot: ModelSnapshot = serde_json::from_reader(reader)?;
        debug!(
            "Loaded model snapshot from {} ({} terms, trained {})",
            path.display(),
            snapshot.vocabulary.len(),
            snapshot.trained_at
        );
        Ok(snapshot)
    }
}

impl TryFrom<SnapshotRecord> for ModelSnapshot {
    type Error = RouterError;

    fn try_from(record: SnapshotRecord) -> Result<Self> {
        if record.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(RouterError::model_mismatch(format!(
                "unsupported snapshot format version {}",
                record.format_version
            )));
        }
        Self::assemble(
            record.vocabulary,
            record.classifier,
            record.normalizer,
            record.trained_at,
        )
    }
}

impl From<ModelSnapshot> for SnapshotRecord {
    fn from(snapshot: ModelSnapshot) -> Self {
        SnapshotRecord {
            format_version: SNAPSHOT_FORMAT_VERSION,
            trained_at: snapshot.trained_at,
            normalizer: snapshot.normalizer,
            vocabulary: snapshot.vocabulary,
            classifier: snapshot.classifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryLabel;
    use crate::config::{ClassifierConfig, VectorizerConfig};
    use tempfile::TempDir;

    fn doc(terms: &[&str]) -> NormalizedDocument {
        NormalizedDocument::new(terms.iter().map(|t| t.to_string()).collect())
    }

    fn fitted(docs: &[NormalizedDocument]) -> (VocabularyModel, ClassifierModel) {
        let labels = [
            CategoryLabel::WorkplaceHarassment,
            CategoryLabel::DomesticViolence,
        ];
        let vocabulary = VocabularyModel::fit(docs, &VectorizerConfig::default()).unwrap();
        let features = FeatureVectorizer::new(&vocabulary).transform_all(docs);
        let classifier = ClassifierConfig::default()
            .fit(&vocabulary, &features, &labels)
            .unwrap();
        (vocabulary, classifier)
    }

    #[test]
    fn test_rejects_mismatched_pair() {
        let (vocabulary, _) = fitted(&[doc(&["boss", "touch"]), doc(&["husband", "beat"])]);
        let (_, other) = fitted(&[doc(&["boss", "shout"]), doc(&["husband", "lock"])]);

        let err = ModelSnapshot::new(vocabulary, other, NormalizerConfig::default()).unwrap_err();
        assert!(matches!(err, RouterError::ModelMismatch(_)));
    }

    #[test]
    fn test_save_and_load() {
        let (vocabulary, classifier) =
            fitted(&[doc(&["boss", "touch"]), doc(&["husband", "beat"])]);
        let snapshot =
            ModelSnapshot::new(vocabulary, classifier, NormalizerConfig::default()).unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        snapshot.save(&path).unwrap();
        let loaded = ModelSnapshot::load(&path).unwrap();

        assert_eq!(loaded, snapshot);
        let query = loaded.vectorize(&doc(&["boss"]));
        assert_eq!(
            loaded.predict_proba(&query).unwrap(),
            snapshot.predict_proba(&query).unwrap()
        );
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let (vocabulary, classifier) =
            fitted(&[doc(&["boss", "touch"]), doc(&["husband", "beat"])]);
        let snapshot =
            ModelSnapshot::new(vocabulary, classifier, NormalizerConfig::default()).unwrap();

        let mut value = serde_json::to_value(&snapshot).unwrap();
        value["format_version"] = serde_json::json!(99);
        let result: std::result::Result<ModelSnapshot, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }
}
