use crate::corpus::Corpus;
use crate::frequency::{DocumentFrequencyTable, FrequencyModel};
use crate::vector::TfIdfVector;
use serde::Serialize;
use std::collections::BTreeMap;

/// One document's weight for a term, as shown by the index viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Posting {
    pub document: String,
    pub tfidf: f64,
}

/// term -> {document id -> tf-idf}. Kept for inspection only, scoring reads the per-document vectors.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: BTreeMap<String, BTreeMap<String, f64>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, term: &str, document: &str, weight: f64) {
        self.postings
            .entry(term.to_string())
            .or_default()
            .insert(document.to_string(), weight);
    }

    pub fn postings(&self, term: &str) -> Option<&BTreeMap<String, f64>> {
        self.postings.get(term)
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Terms in lexical order, postings sorted by document id.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<Posting>> {
        self.postings
            .iter()
            .map(|(term, docs)| {
                let list = docs
                    .iter()
                    .map(|(document, tfidf)| Posting { document: document.clone(), tfidf: *tfidf })
                    .collect();
                (term.clone(), list)
            })
            .collect()
    }
}

/// Per-document TF-IDF vectors plus the frequency table they were weighted with.
#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    vectors: BTreeMap<String, TfIdfVector>,
    inverted: InvertedIndex,
    frequencies: DocumentFrequencyTable,
}

impl VectorIndex {
    /// Full rebuild from `corpus`. TF runs per document (optionally on the rayon pool),
    /// then document frequencies are merged on the calling thread before weighting.
    pub fn build(corpus: &Corpus, model: &FrequencyModel, parallel: bool) -> Self {
        let profiles = model.profile_corpus(corpus, parallel);
        let frequencies = model.compute_document_frequencies(&profiles);

        let mut vectors = BTreeMap::new();
        let mut inverted = InvertedIndex::new();
        for profile in profiles {
            let vector = frequencies.weigh(&profile.tf);
            for (term, weight) in vector.iter() {
                inverted.insert(term, &profile.id, weight);
            }
            vectors.insert(profile.id, vector);
        }

        Self { vectors, inverted, frequencies }
    }

    pub fn vector_of(&self, doc_id: &str) -> Option<&TfIdfVector> {
        self.vectors.get(doc_id)
    }

    pub fn vectors(&self) -> impl Iterator<Item = (&str, &TfIdfVector)> + '_ {
        self.vectors.iter().map(|(id, v)| (id.as_str(), v))
    }

    /// Number of distinct indexed terms.
    pub fn size(&self) -> usize {
        self.inverted.term_count()
    }

    pub fn document_count(&self) -> usize {
        self.vectors.len()
    }

    pub fn frequencies(&self) -> &DocumentFrequencyTable {
        &self.frequencies
    }

    pub fn inverted(&self) -> &InvertedIndex {
        &self.inverted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::idf;

    fn corpus(docs: &[(&str, &str)]) -> Corpus {
        let mut c = Corpus::new();
        for (id, text) in docs {
            c.add_document(*id, *text).unwrap();
        }
        c
    }

    #[test]
    fn weights_are_tf_times_idf() {
        let c = corpus(&[("a", "cat dog cat"), ("b", "dog bird")]);
        let index = VectorIndex::build(&c, &FrequencyModel::default(), false);
        let a = index.vector_of("a").unwrap();
        let expected = (2.0 / 3.0) * idf(2, 1);
        assert!((a.get("cat") - expected).abs() < 1e-12);
        assert_eq!(index.size(), 3);
        assert_eq!(index.document_count(), 2);
    }

    #[test]
    fn parallel_and_sequential_builds_agree() {
        let c = corpus(&[("a", "rust systems programming"), ("b", "rust web"), ("c", "python scripting")]);
        let model = FrequencyModel::default();
        let seq = VectorIndex::build(&c, &model, false);
        let par = VectorIndex::build(&c, &model, true);
        for (id, v) in seq.vectors() {
            assert_eq!(Some(v), par.vector_of(id));
        }
        assert_eq!(seq.inverted().snapshot(), par.inverted().snapshot());
    }

    #[test]
    fn inverted_index_mirrors_vectors() {
        let c = corpus(&[("a", "cat dog"), ("b", "dog")]);
        let index = VectorIndex::build(&c, &FrequencyModel::default(), false);
        let snap = index.inverted().snapshot();
        let dog: Vec<&str> = snap["dog"].iter().map(|p| p.document.as_str()).collect();
        assert_eq!(dog, vec!["a", "b"]);
        assert_eq!(snap["cat"][0].tfidf, index.vector_of("a").unwrap().get("cat"));
        assert!(index.inverted().postings("bird").is_none());
    }

    #[test]
    fn index_frequencies_match_the_model() {
        let c = corpus(&[("a", "cat dog cat"), ("b", "dog bird")]);
        let model = FrequencyModel::default();
        let index = VectorIndex::build(&c, &model, true);
        let df = model.compute_document_frequencies(&model.profile_corpus(&c, false));
        for term in ["cat", "dog", "bird"] {
            assert_eq!(index.frequencies().df(term), df.df(term));
        }
        assert_eq!(index.frequencies().total_docs(), df.total_docs());
    }

    #[test]
    fn empty_corpus_builds_empty_index() {
        let index = VectorIndex::build(&Corpus::new(), &FrequencyModel::default(), true);
        assert_eq!(index.size(), 0);
        assert_eq!(index.document_count(), 0);
        assert!(index.inverted().snapshot().is_empty());
    }

    #[test]
    fn stopword_only_document_gets_an_empty_vector() {
        let c = corpus(&[("a", "the and of"), ("b", "cat")]);
        let index = VectorIndex::build(&c, &FrequencyModel::default(), false);
        assert!(index.vector_of("a").unwrap().is_empty());
        assert_eq!(index.document_count(), 2);
    }
}
