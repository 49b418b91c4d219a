//! TF-IDF feature extraction over a fixed vocabulary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::NormalizedDocument;
use crate::ml::vocabulary::{VocabularyModel, ngrams};

/// Sparse feature vector with entries sorted by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Build a vector from `(index, weight)` pairs.
    ///
    /// Entries are sorted by index; entries outside `dimension` and zero
    /// weights are dropped.
    pub fn new(dimension: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(index, weight)| index < dimension && weight != 0.0);
        entries.sort_by_key(|&(index, _)| index);
        FeatureVector { dimension, entries }
    }

    /// The all-zero vector.
    pub fn zeros(dimension: usize) -> Self {
        FeatureVector {
            dimension,
            entries: Vec::new(),
        }
    }

    /// Build a vector from a dense slice.
    pub fn from_dense(values: &[f64]) -> Self {
        let entries = values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0.0)
            .map(|(i, &v)| (i, v))
            .collect();
        FeatureVector {
            dimension: values.len(),
            entries,
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Non-zero entries, sorted by index.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry is non-zero.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product with a dense weight row of the same dimension.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|&(i, w)| dense.get(i).map(|d| d * w))
            .sum()
    }

    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for &(i, w) in &self.entries {
            dense[i] = w;
        }
        dense
    }
}

/// Turns normalized documents into L2-normalized TF-IDF vectors.
///
/// Terms that are not in the vocabulary are ignored, so a document made only
/// of unseen words becomes the zero vector.
#[derive(Debug, Clone, Copy)]
pub struct FeatureVectorizer<'a> {
    vocabulary: &'a VocabularyModel,
}

impl<'a> FeatureVectorizer<'a> {
    pub fn new(vocabulary: &'a VocabularyModel) -> Self {
        FeatureVectorizer { vocabulary }
    }

    /// Output dimension.
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    /// Vectorize one document.
    pub fn transform(&self, document: &NormalizedDocument) -> FeatureVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for gram in ngrams(document, self.vocabulary.ngram_order()) {
            if let Some(index) = self.vocabulary.index_of(&gram) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .filter_map(|(index, tf)| self.vocabulary.idf(index).map(|idf| (index, tf * idf)))
            .collect();

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut entries {
                *weight /= norm;
            }
        }

        FeatureVector::new(self.dimension(), entries)
    }

    /// Vectorize a batch of documents, preserving order.
    pub fn transform_all(&self, documents: &[NormalizedDocument]) -> Vec<FeatureVector> {
        documents.iter().map(|doc| self.transform(doc)).collect()
    }
}
