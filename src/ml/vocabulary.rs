//! Learned term vocabulary.
//!
//! A [`VocabularyModel`] maps every unigram (and, for order 2, every bigram of
//! adjacent terms joined by one space) seen during training to a feature
//! index and its document frequency. Indices follow the byte order of the
//! term strings, so the same corpus always yields the same indices.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::NormalizedDocument;
use crate::config::VectorizerConfig;
use crate::error::{Result, RouterError};

/// Enumerate the n-gram terms of a document, unigrams first.
pub fn ngrams(document: &NormalizedDocument, order: usize) -> Vec<String> {
    let terms = document.terms();
    let mut out = Vec::with_capacity(terms.len() * order.max(1));
    out.extend(terms.iter().cloned());
    if order >= 2 {
        out.extend(terms.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    }
    out
}

/// Serialized form of a [`VocabularyModel`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VocabularyRecord {
    terms: Vec<String>,
    document_frequencies: Vec<usize>,
    n_documents: usize,
    ngram_order: usize,
    fingerprint: u32,
}

/// Term to feature index mapping with document frequencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "VocabularyRecord", into = "VocabularyRecord")]
pub struct VocabularyModel {
    /// Terms in index order.
    terms: Vec<String>,
    document_frequencies: Vec<usize>,
    /// Smoothed inverse document frequency per index.
    idf: Vec<f64>,
    index: AHashMap<String, usize>,
    n_documents: usize,
    ngram_order: usize,
    fingerprint: u32,
}

impl VocabularyModel {
    /// Learn a vocabulary from normalized training documents.
    ///
    /// Fails with a data error when there are no documents or every document
    /// is empty.
    pub fn fit(documents: &[NormalizedDocument], config: &VectorizerConfig) -> Result<Self> {
        if documents.is_empty() {
            return Err(RouterError::data("cannot fit a vocabulary on an empty corpus"));
        }
        if documents.iter().all(NormalizedDocument::is_empty) {
            return Err(RouterError::data(
                "every training document is empty after normalization",
            ));
        }

        // term -> (document frequency, total count)
        let mut stats: AHashMap<String, (usize, usize)> = AHashMap::new();
        for document in documents {
            let grams = ngrams(document, config.ngram_order);
            let mut seen = AHashSet::with_capacity(grams.len());
            for gram in grams {
                let first_in_doc = seen.insert(gram.clone());
                let entry = stats.entry(gram).or_insert((0, 0));
                if first_in_doc {
                    entry.0 += 1;
                }
                entry.1 += 1;
            }
        }

        let mut selected: Vec<(String, (usize, usize))> = stats.into_iter().collect();
        if let Some(max_features) = config.max_features {
            if selected.len() > max_features {
                selected.sort_by(|a, b| b.1.1.cmp(&a.1.1).then_with(|| a.0.cmp(&b.0)));
                selected.truncate(max_features);
            }
        }
        selected.sort_by(|a, b| a.0.cmp(&b.0));

        let (terms, document_frequencies): (Vec<String>, Vec<usize>) =
            selected.into_iter().map(|(term, (df, _))| (term, df)).unzip();

        Ok(Self::assemble(
            terms,
            document_frequencies,
            documents.len(),
            config.ngram_order,
        ))
    }

    fn assemble(
        terms: Vec<String>,
        document_frequencies: Vec<usize>,
        n_documents: usize,
        ngram_order: usize,
    ) -> Self {
        let n = n_documents as f64;
        let idf = document_frequencies
            .iter()
            .map(|&df| ((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0)
            .collect();
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        let fingerprint = Self::compute_fingerprint(&terms);

        VocabularyModel {
            terms,
            document_frequencies,
            idf,
            index,
            n_documents,
            ngram_order,
            fingerprint,
        }
    }

    /// CRC32 over the indexed terms in index order.
    fn compute_fingerprint(terms: &[String]) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        for term in terms {
            hasher.update(term.as_bytes());
            hasher.update(&[0]);
        }
        hasher.finalize()
    }

    /// Feature index of a term, if it is in the vocabulary.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Term at a feature index.
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn document_frequency(&self, index: usize) -> Option<usize> {
        self.document_frequencies.get(index).copied()
    }

    /// Smoothed IDF, `ln((N + 1) / (df + 1)) + 1`.
    pub fn idf(&self, index: usize) -> Option<f64> {
        self.idf.get(index).copied()
    }

    /// Number of indexed terms, which is the feature dimension.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of documents the vocabulary was fit on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    pub fn ngram_order(&self) -> usize {
        self.ngram_order
    }

    /// Identifies the exact term list; classifiers record it at fit time.
    pub fn fingerprint(&self) -> u32 {
        self.fingerprint
    }
}

impl TryFrom<VocabularyRecord> for VocabularyModel {
    type Error = RouterError;

    fn try_from(record: VocabularyRecord) -> Result<Self> {
        if record.terms.len() != record.document_frequencies.len() {
            return Err(RouterError::model_mismatch(format!(
                "vocabulary has {} terms but {} document frequencies",
                record.terms.len(),
                record.document_frequencies.len()
            )));
        }
        if record.terms.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(RouterError::model_mismatch(
                "vocabulary terms are not strictly sorted",
            ));
        }

        let expected = record.fingerprint;
        let model = Self::assemble(
            record.terms,
            record.document_frequencies,
            record.n_documents,
            record.ngram_order,
        );
        if model.fingerprint != expected {
            return Err(RouterError::model_mismatch(format!(
                "vocabulary fingerprint {:08x} does not match its terms ({:08x})",
                expected, model.fingerprint
            )));
        }
        Ok(model)
    }
}

impl From<VocabularyModel> for VocabularyRecord {
    fn from(model: VocabularyModel) -> Self {
        VocabularyRecord {
            terms: model.terms,
            document_frequencies: model.document_frequencies,
            n_documents: model.n_documents,
            ngram_order: model.ngram_order,
            fingerprint: model.fingerprint,
        }
    }
}

impl PartialEq for VocabularyModel {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
            && self.document_frequencies == other.document_frequencies
            && self.n_documents == other.n_documents
            && self.ngram_order == other.ngram_order
    }
}
