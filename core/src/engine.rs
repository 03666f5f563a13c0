//! Search engine facade.
//!
//! The engine moves through `Empty -> Loaded -> Indexed`. Every state is an
//! immutable value behind an `Arc`: searches clone the current snapshot under a
//! short read lock and score without holding it, while ingestion and index
//! builds are serialized by a writer mutex, prepare the next state off to the
//! side and publish it with one write-locked swap.
//!
//! Callers that need several reads to agree (ranking plus previews, a build
//! report plus its postings) hold a [`Snapshot`] instead of going back to the
//! engine between reads.

use crate::config::EngineConfig;
use crate::corpus::{Corpus, Document};
use crate::error::{Result, SearchError};
use crate::frequency::{term_frequencies, FrequencyModel};
use crate::index::{Posting, VectorIndex};
use crate::similarity::SimilarityMethod;
use crate::tokenizer::Preprocessor;
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Empty,
    Loaded,
    Indexed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub document: String,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    /// Ids now in the corpus, sorted.
    pub accepted: Vec<String>,
    pub rejected: Vec<(String, SearchError)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub document_count: usize,
    pub term_count: usize,
}

struct IndexedCorpus {
    corpus: Arc<Corpus>,
    index: VectorIndex,
    model: FrequencyModel,
}

/// A published index together with the corpus it was built from.
///
/// Cheap to clone. Later ingests and rebuilds never change what a snapshot sees.
#[derive(Clone)]
pub struct Snapshot {
    inner: Arc<IndexedCorpus>,
}

impl Snapshot {
    pub fn report(&self) -> BuildReport {
        BuildReport { document_count: self.inner.index.document_count(), term_count: self.inner.index.size() }
    }

    /// Terms in lexical order, postings sorted by document id.
    pub fn postings(&self) -> BTreeMap<String, Vec<Posting>> {
        self.inner.index.inverted().snapshot()
    }

    /// Raw text of a document in this snapshot's corpus.
    pub fn document(&self, id: &str) -> Option<&str> {
        self.inner.corpus.get(id)
    }

    /// Rank every indexed document against `query`, best first, ties by ascending id.
    pub fn search(&self, query: &str, method: SimilarityMethod) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let index = &self.inner.index;
        if index.document_count() == 0 {
            return Ok(Vec::new());
        }

        let tokens = self.inner.model.preprocessor().preprocess(query);
        let query_vector = index.frequencies().weigh(&term_frequencies(&tokens));

        let mut hits: Vec<SearchHit> = index
            .vectors()
            .map(|(id, vector)| SearchHit { document: id.to_string(), score: method.score(&query_vector, vector) })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.document.cmp(&b.document)));

        tracing::debug!(tokens = tokens.len(), method = %method, hits = hits.len(), "search");
        Ok(hits)
    }
}

enum Stage {
    Empty,
    Loaded(Arc<Corpus>),
    Indexed(Arc<IndexedCorpus>),
}

impl Stage {
    fn corpus(&self) -> Option<&Arc<Corpus>> {
        match self {
            Stage::Empty => None,
            Stage::Loaded(corpus) => Some(corpus),
            Stage::Indexed(indexed) => Some(&indexed.corpus),
        }
    }
}

pub struct SearchEngine {
    config: EngineConfig,
    model: FrequencyModel,
    stage: RwLock<Stage>,
    writer: Mutex<()>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Self {
        let model = FrequencyModel::new(Preprocessor::new(config.language));
        Self { config, model, stage: RwLock::new(Stage::Empty), writer: Mutex::new(()) }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        match &*self.stage.read() {
            Stage::Empty => EngineState::Empty,
            Stage::Loaded(_) => EngineState::Loaded,
            Stage::Indexed(_) => EngineState::Indexed,
        }
    }

    /// Replace the whole corpus with `documents` and drop any built index.
    ///
    /// Each item is committed or rejected on its own; a later item with the same id
    /// overwrites an earlier one.
    pub fn ingest<I>(&self, documents: I) -> IngestReport
    where
        I: IntoIterator<Item = Document>,
    {
        let _writer = self.writer.lock();
        let mut corpus = Corpus::new();
        let mut rejected = Vec::new();
        for doc in documents {
            let id = doc.id.clone();
            if let Err(err) = corpus.insert(doc) {
                tracing::warn!(id = %id, error = %err, "rejected document");
                rejected.push((id, err));
            }
        }
        let accepted: Vec<String> = corpus.ids().map(str::to_string).collect();
        tracing::info!(accepted = accepted.len(), rejected = rejected.len(), "corpus replaced");
        *self.stage.write() = Stage::Loaded(Arc::new(corpus));
        IngestReport { accepted, rejected }
    }

    /// Add or overwrite a single document in the current corpus. Drops any built index.
    pub fn add_document(&self, id: impl Into<String>, text: impl Into<String>) -> Result<()> {
        let doc = Document::new(id, text);
        doc.validate()?;
        let _writer = self.writer.lock();
        // The writer mutex keeps the stage stable, so the copy is made without blocking readers.
        let current = self.stage.read().corpus().cloned();
        let mut corpus = current.map(|c| Corpus::clone(&c)).unwrap_or_default();
        corpus.insert(doc)?;
        *self.stage.write() = Stage::Loaded(Arc::new(corpus));
        Ok(())
    }

    /// Rebuild frequencies and vectors for the current corpus, publish them and
    /// return the published snapshot.
    ///
    /// Building from `Empty` indexes the empty corpus. Searches keep running against
    /// the previous snapshot until the swap.
    pub fn build(&self) -> Snapshot {
        let _writer = self.writer.lock();
        let corpus = self.stage.read().corpus().cloned().unwrap_or_default();

        let start = Instant::now();
        let index = VectorIndex::build(&corpus, &self.model, self.config.parallel_build);
        let snapshot = Snapshot { inner: Arc::new(IndexedCorpus { corpus, index, model: self.model }) };
        let report = snapshot.report();
        tracing::info!(
            documents = report.document_count,
            terms = report.term_count,
            took_ms = start.elapsed().as_millis() as u64,
            "index built"
        );

        *self.stage.write() = Stage::Indexed(Arc::clone(&snapshot.inner));
        snapshot
    }

    pub fn build_index(&self) -> BuildReport {
        self.build().report()
    }

    /// The currently published index, or `NotIndexed` when none is servable.
    pub fn snapshot(&self) -> Result<Snapshot> {
        match &*self.stage.read() {
            Stage::Indexed(indexed) => Ok(Snapshot { inner: Arc::clone(indexed) }),
            _ => Err(SearchError::NotIndexed),
        }
    }

    /// Rank every indexed document against `query`, best first, ties by ascending id.
    ///
    /// A blank query is `EmptyQuery` whatever the engine state.
    pub fn search(&self, query: &str, method: SimilarityMethod) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        self.snapshot()?.search(query, method)
    }

    /// The inverted index for display. Empty until an index is built.
    pub fn index_snapshot(&self) -> BTreeMap<String, Vec<Posting>> {
        self.snapshot().map(|s| s.postings()).unwrap_or_default()
    }

    pub fn document(&self, id: &str) -> Option<String> {
        self.stage.read().corpus().and_then(|c| c.get(id)).map(str::to_string)
    }

    pub fn document_ids(&self) -> Vec<String> {
        self.stage
            .read()
            .corpus()
            .map(|c| c.ids().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(pairs: &[(&str, &str)]) -> Vec<Document> {
        pairs.iter().map(|(id, text)| Document::new(*id, *text)).collect()
    }

    #[test]
    fn lifecycle_transitions() {
        let engine = SearchEngine::default();
        assert_eq!(engine.state(), EngineState::Empty);
        engine.ingest(docs(&[("a", "cat")]));
        assert_eq!(engine.state(), EngineState::Loaded);
        engine.build_index();
        assert_eq!(engine.state(), EngineState::Indexed);
        engine.ingest(docs(&[("b", "dog")]));
        assert_eq!(engine.state(), EngineState::Loaded);
        assert_eq!(engine.search("dog", SimilarityMethod::Cosine), Err(SearchError::NotIndexed));
    }

    #[test]
    fn ingest_rejects_blank_ids_individually() {
        let engine = SearchEngine::default();
        let report = engine.ingest(docs(&[("a", "cat"), (" ", "dog"), ("b", "bird")]));
        assert_eq!(report.accepted, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(report.rejected.len(), 1);
        assert!(matches!(report.rejected[0].1, SearchError::InvalidDocument(_)));
    }

    #[test]
    fn add_document_drops_index_but_keeps_corpus() {
        let engine = SearchEngine::default();
        engine.ingest(docs(&[("a", "cat")]));
        engine.build_index();
        engine.add_document("b", "dog").unwrap();
        assert_eq!(engine.state(), EngineState::Loaded);
        assert_eq!(engine.document_ids(), vec!["a".to_string(), "b".to_string()]);
        assert!(engine.index_snapshot().is_empty());
    }

    #[test]
    fn invalid_add_leaves_index_untouched() {
        let engine = SearchEngine::default();
        engine.ingest(docs(&[("a", "cat")]));
        engine.build_index();
        assert!(engine.add_document("", "dog").is_err());
        assert_eq!(engine.state(), EngineState::Indexed);
        assert!(engine.search("cat", SimilarityMethod::Cosine).is_ok());
    }

    #[test]
    fn build_from_empty_gives_empty_index() {
        let engine = SearchEngine::default();
        let report = engine.build_index();
        assert_eq!(report, BuildReport { document_count: 0, term_count: 0 });
        assert_eq!(engine.state(), EngineState::Indexed);
        assert!(engine.search("cat", SimilarityMethod::Euclidean).unwrap().is_empty());
    }

    #[test]
    fn add_document_keeps_published_snapshot_intact() {
        let engine = SearchEngine::default();
        engine.ingest(docs(&[("a", "cat")]));
        let snapshot = engine.build();
        engine.add_document("a", "dog").unwrap();
        engine.add_document("b", "bird").unwrap();
        assert_eq!(snapshot.document("a"), Some("cat"));
        assert_eq!(snapshot.document("b"), None);
        assert_eq!(engine.document("a").as_deref(), Some("dog"));
        assert_eq!(engine.document_ids(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn add_document_to_empty_engine_starts_a_corpus() {
        let engine = SearchEngine::default();
        engine.add_document("a", "cat").unwrap();
        assert_eq!(engine.state(), EngineState::Loaded);
        assert_eq!(engine.document_ids(), vec!["a".to_string()]);
    }

    #[test]
    fn snapshot_outlives_reingest() {
        let engine = SearchEngine::default();
        engine.ingest(docs(&[("a", "cat dog"), ("b", "dog")]));
        let snapshot = engine.build();
        assert_eq!(snapshot.report(), BuildReport { document_count: 2, term_count: 2 });

        engine.ingest(docs(&[("c", "bird")]));
        assert_eq!(engine.snapshot().err(), Some(SearchError::NotIndexed));

        let hits = snapshot.search("cat", SimilarityMethod::Cosine).unwrap();
        assert_eq!(hits[0].document, "a");
        assert_eq!(snapshot.document(&hits[0].document), Some("cat dog"));
        assert_eq!(snapshot.postings()["dog"].len(), 2);
        assert_eq!(snapshot.search(" ", SimilarityMethod::Cosine), Err(SearchError::EmptyQuery));
    }

    #[test]
    fn build_report_matches_published_postings() {
        let engine = SearchEngine::default();
        engine.ingest(docs(&[("a", "cat dog"), ("b", "bird")]));
        let snapshot = engine.build();
        assert_eq!(snapshot.report().term_count, snapshot.postings().len());
        assert_eq!(engine.index_snapshot(), snapshot.postings());
    }

    #[test]
    fn document_lookup() {
        let engine = SearchEngine::default();
        assert_eq!(engine.document("a"), None);
        engine.ingest(docs(&[("a", "Cats and dogs")]));
        assert_eq!(engine.document("a").as_deref(), Some("Cats and dogs"));
    }
}
