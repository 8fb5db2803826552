//! BM25 scoring for the in-memory store.
//!
//! The memory store treats the title, description and keyword fields of a
//! record as one bag of terms and scores exact query-term matches with
//! BM25:
//!
//! ```text
//! score = Σ IDF(t) · tf·(k1 + 1) / (tf + k1·(1 − b + b·dl/avgdl))
//! IDF(t) = ln(1 + (N − df + 0.5) / (df + 0.5))
//! ```
//!
//! The IDF form matches the one Tantivy uses, so both stores rank alike on
//! small corpora.

use std::collections::HashMap;

use omnidex_core::IndexRecord;
use omnidex_core::util::terms::split_terms;

/// Term frequencies of one record.
#[derive(Debug, Clone, Default)]
pub struct TermBag {
    freqs: HashMap<String, u32>,
    len: u32,
}

impl TermBag {
    /// Collect the terms of a record's full-text fields.
    pub fn from_record(record: &IndexRecord) -> Self {
        let mut bag = Self::default();
        for field in record.text_fields() {
            for term in split_terms(field) {
                *bag.freqs.entry(term).or_insert(0) += 1;
                bag.len += 1;
            }
        }
        bag
    }

    /// Occurrences of `term`.
    pub fn freq(&self, term: &str) -> u32 {
        self.freqs.get(term).copied().unwrap_or(0)
    }

    /// Whether some term in the bag starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.freqs.keys().any(|t| t.starts_with(prefix))
    }

    /// Total number of terms.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether the record has no terms at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Corpus statistics for IDF and length normalization.
#[derive(Debug, Clone, Default)]
pub struct CorpusStats {
    total_docs: usize,
    avg_doc_len: f32,
    doc_freqs: HashMap<String, usize>,
}

impl CorpusStats {
    /// Compute statistics for `terms` over `bags`.
    pub fn collect<'a>(bags: impl IntoIterator<Item = &'a TermBag>, terms: &[String]) -> Self {
        let mut stats = Self::default();
        let mut total_len: u64 = 0;

        for bag in bags {
            stats.total_docs += 1;
            total_len += u64::from(bag.len());
            for term in terms {
                if bag.freq(term) > 0 {
                    *stats.doc_freqs.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        if stats.total_docs > 0 {
            stats.avg_doc_len = total_len as f32 / stats.total_docs as f32;
        }
        stats
    }

    /// Inverse document frequency of `term`.
    pub fn idf(&self, term: &str) -> f32 {
        let df = self.doc_freqs.get(term).copied().unwrap_or(0) as f32;
        let n = self.total_docs as f32;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }
}

/// BM25 parameters.
#[derive(Debug, Clone, Copy)]
pub struct Bm25 {
    /// Term-frequency saturation.
    pub k1: f32,
    /// Length normalization strength.
    pub b: f32,
}

impl Default for Bm25 {
    fn default() -> Self {
        Self { k1: 1.2, b: 0.75 }
    }
}

impl Bm25 {
    /// Score `bag` for `terms`.
    pub fn score(&self, bag: &TermBag, terms: &[String], stats: &CorpusStats) -> f32 {
        if bag.is_empty() || stats.avg_doc_len <= 0.0 {
            return 0.0;
        }

        let dl = bag.len() as f32;
        let norm = self.k1 * (1.0 - self.b + self.b * dl / stats.avg_doc_len);

        terms
            .iter()
            .map(|term| {
                let tf = bag.freq(term) as f32;
                if tf == 0.0 {
                    0.0
                } else {
                    stats.idf(term) * tf * (self.k1 + 1.0) / (tf + norm)
                }
            })
            .sum()
    }
}
