//! TF-IDF vectorization over unigrams and bigrams, with cosine similarity

use crate::error::{Result, ScorerError};
use crate::processing::text_processor::TextProcessor;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// L2-normalised sparse vector. Ordered keys keep float summation stable
/// between runs.
pub type SparseVector = BTreeMap<String, f64>;

#[derive(Clone)]
pub struct TfidfVectorizer {
    processor: Arc<TextProcessor>,
}

impl TfidfVectorizer {
    pub fn new(processor: Arc<TextProcessor>) -> Self {
        Self { processor }
    }

    /// Unigrams plus the bigrams formed after stop-word removal
    pub fn terms(&self, document: &str) -> Vec<String> {
        let unigrams = self.processor.vector_tokens(document);
        let bigrams: Vec<String> = unigrams
            .windows(2)
            .map(|pair| format!("{} {}", pair[0], pair[1]))
            .collect();

        let mut terms = unigrams;
        terms.extend(bigrams);
        terms
    }

    /// Weight every document against the shared vocabulary.
    ///
    /// Uses raw term counts, smoothed idf `ln((1 + n) / (1 + df)) + 1` and
    /// L2 row normalisation. Fails with `DegenerateInput` when no document
    /// contributes a single term.
    pub fn fit_transform(&self, documents: &[&str]) -> Result<Vec<SparseVector>> {
        let term_counts: Vec<BTreeMap<String, f64>> = documents
            .iter()
            .map(|doc| {
                let mut counts = BTreeMap::new();
                for term in self.terms(doc) {
                    *counts.entry(term).or_insert(0.0) += 1.0;
                }
                counts
            })
            .collect();

        let vocabulary: HashSet<&String> = term_counts.iter().flat_map(|c| c.keys()).collect();
        if vocabulary.is_empty() {
            return Err(ScorerError::DegenerateInput(
                "empty vocabulary; documents only contain stop words".to_string(),
            ));
        }

        let n = documents.len() as f64;
        let mut document_frequency: BTreeMap<&str, f64> = BTreeMap::new();
        for counts in &term_counts {
            for term in counts.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0.0) += 1.0;
            }
        }

        let vectors = term_counts
            .iter()
            .map(|counts| {
                let mut vector: SparseVector = counts
                    .iter()
                    .map(|(term, tf)| {
                        let df = document_frequency.get(term.as_str()).copied().unwrap_or(0.0);
                        let idf = ((1.0 + n) / (1.0 + df)).ln() + 1.0;
                        (term.clone(), tf * idf)
                    })
                    .collect();

                let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for weight in vector.values_mut() {
                        *weight /= norm;
                    }
                }
                vector
            })
            .collect();

        Ok(vectors)
    }

    /// Cosine similarity of two vectors; zero when either is empty
    pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
        let dot: f64 = a
            .iter()
            .filter_map(|(term, wa)| b.get(term).map(|wb| wa * wb))
            .sum();
        let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
        let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            0.0
        } else {
            (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
        }
    }

    /// Similarity of two documents in `[0, 1]`
    pub fn similarity(&self, first: &str, second: &str) -> Result<f64> {
        let vectors = self.fit_transform(&[first, second])?;
        Ok(Self::cosine_similarity(&vectors[0], &vectors[1]))
    }
}
