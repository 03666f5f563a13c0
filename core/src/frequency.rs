use crate::corpus::{Corpus, Document};
use crate::tokenizer::Preprocessor;
use crate::vector::{TermFrequencyVector, TfIdfVector};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// Smoothed inverse document frequency, `ln(N / (df + 1)) + 1`.
///
/// Positive for every `df <= total_docs` once `total_docs >= 1`, and finite for
/// terms the corpus has never seen (`df = 0`).
pub fn idf(total_docs: usize, df: usize) -> f64 {
    (total_docs as f64 / (df as f64 + 1.0)).ln() + 1.0
}

/// Count tokens and divide by the token count. No tokens gives an empty vector.
pub fn term_frequencies(tokens: &[String]) -> TermFrequencyVector {
    if tokens.is_empty() {
        return TermFrequencyVector::new();
    }
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    let total = tokens.len() as f64;
    counts.into_iter().map(|(t, c)| (t.to_string(), f64::from(c) / total)).collect()
}

/// Number of documents containing each term at least once.
///
/// Always built from a full scan; there is no way to patch an existing table.
#[derive(Debug, Clone, Default)]
pub struct DocumentFrequencyTable {
    counts: HashMap<String, usize>,
    total_docs: usize,
}

impl DocumentFrequencyTable {
    /// Merge per-document distinct term sets. Each set counts once per term.
    pub fn from_term_sets<'a, I>(sets: I) -> Self
    where
        I: IntoIterator<Item = &'a HashSet<String>>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut total_docs = 0;
        for set in sets {
            total_docs += 1;
            for term in set {
                *counts.entry(term.clone()).or_insert(0) += 1;
            }
        }
        Self { counts, total_docs }
    }

    pub fn df(&self, term: &str) -> usize {
        self.counts.get(term).copied().unwrap_or(0)
    }

    pub fn idf(&self, term: &str) -> f64 {
        idf(self.total_docs, self.df(term))
    }

    pub fn total_docs(&self) -> usize {
        self.total_docs
    }

    /// Number of distinct terms across the corpus.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Weight a term-frequency vector by this table's IDF values.
    pub fn weigh(&self, tf: &TermFrequencyVector) -> TfIdfVector {
        tf.iter().map(|(term, f)| (term.to_string(), f * self.idf(term))).collect()
    }
}

/// Preprocessing output for one document: id, normalized TF and distinct terms.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentProfile {
    pub id: String,
    pub tf: TermFrequencyVector,
    pub terms: HashSet<String>,
}

/// Term and document frequency accounting over one preprocessing configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyModel {
    preprocessor: Preprocessor,
}

impl FrequencyModel {
    pub fn new(preprocessor: Preprocessor) -> Self {
        Self { preprocessor }
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn compute_tf(&self, text: &str) -> TermFrequencyVector {
        term_frequencies(&self.preprocessor.preprocess(text))
    }

    /// Preprocess one document once, keeping both its TF vector and its distinct terms.
    pub fn profile(&self, doc: &Document) -> DocumentProfile {
        let tokens = self.preprocessor.preprocess(&doc.text);
        let terms = tokens.iter().cloned().collect();
        DocumentProfile { id: doc.id.clone(), tf: term_frequencies(&tokens), terms }
    }

    /// Profiles in id order. `parallel` fans the per-document work out on the rayon pool.
    pub fn profile_corpus(&self, corpus: &Corpus, parallel: bool) -> Vec<DocumentProfile> {
        let docs: Vec<&Document> = corpus.iter().collect();
        if parallel {
            docs.par_iter().map(|doc| self.profile(doc)).collect()
        } else {
            docs.iter().map(|doc| self.profile(doc)).collect()
        }
    }

    pub fn compute_document_frequencies(&self, profiles: &[DocumentProfile]) -> DocumentFrequencyTable {
        DocumentFrequencyTable::from_term_sets(profiles.iter().map(|p| &p.terms))
    }
}
