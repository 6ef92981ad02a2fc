//! Text vectorization
//!
//! - `CountVectorizer`: bag of words over a vocabulary fixed at fit time
//! - `TfidfTransformer`: inverse document frequency weighting + L2 normalization
//!
//! Rows are sparse: `(feature index, value)` pairs sorted by index.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Sparse feature row
pub type SparseRow = Vec<(usize, f64)>;

/// Lowercase word tokens of at least two word characters
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Bag of words vectorizer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountVectorizer {
    /// Term -> feature index
    vocabulary: HashMap<String, usize>,
}

impl CountVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the vocabulary. Feature indices follow sorted term order.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) {
        let terms: BTreeSet<String> = documents
            .iter()
            .flat_map(|doc| tokenize(doc.as_ref()))
            .collect();

        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();
    }

    /// Term counts for one document; unknown terms are ignored
    pub fn transform_one(&self, document: &str) -> SparseRow {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        counts.into_iter().collect()
    }

    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Vec<SparseRow> {
        documents
            .iter()
            .map(|doc| self.transform_one(doc.as_ref()))
            .collect()
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Vec<SparseRow> {
        self.fit(documents);
        self.transform(documents)
    }

    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }
}

/// TF-IDF reweighting of count rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TfidfTransformer {
    /// IDF per feature
    idf: Vec<f64>,
}

impl TfidfTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn smoothed IDF: `ln((1 + n) / (1 + df)) + 1`
    pub fn fit(&mut self, rows: &[SparseRow], n_features: usize) {
        let mut doc_freq = vec![0usize; n_features];
        for row in rows {
            for &(idx, value) in row {
                if value > 0.0 && idx < n_features {
                    doc_freq[idx] += 1;
                }
            }
        }

        let n_docs = rows.len() as f64;
        self.idf = doc_freq
            .into_iter()
            .map(|df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
    }

    /// Weight one row by IDF and L2-normalize it
    pub fn transform_one(&self, row: &SparseRow) -> SparseRow {
        let mut weighted: SparseRow = row
            .iter()
            .filter_map(|&(idx, tf)| self.idf.get(idx).map(|idf| (idx, tf * idf)))
            .collect();

        let norm = weighted.iter().map(|(_, x)| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, x) in weighted.iter_mut() {
                *x /= norm;
            }
        }
        weighted
    }

    pub fn transform(&self, rows: &[SparseRow]) -> Vec<SparseRow> {
        rows.iter().map(|row| self.transform_one(row)).collect()
    }

    pub fn fit_transform(&mut self, rows: &[SparseRow], n_features: usize) -> Vec<SparseRow> {
        self.fit(rows, n_features);
        self.transform(rows)
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }
}
