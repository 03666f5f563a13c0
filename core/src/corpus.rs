use crate::error::{Result, SearchError};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(SearchError::InvalidDocument("document id is blank".into()));
        }
        Ok(())
    }
}

/// Raw documents keyed by id. Iteration is in id order so displays are stable.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: BTreeMap<String, Document>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the document stored under `id`. Blank ids are rejected.
    pub fn add_document(&mut self, id: impl Into<String>, text: impl Into<String>) -> Result<()> {
        self.insert(Document::new(id, text))
    }

    pub fn insert(&mut self, doc: Document) -> Result<()> {
        doc.validate()?;
        self.documents.insert(doc.id.clone(), doc);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.documents.get(id).map(|d| d.text.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.documents.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> + '_ {
        self.documents.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_overwrites_same_id() {
        let mut c = Corpus::new();
        c.add_document("a.txt", "first").unwrap();
        c.add_document("a.txt", "second").unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c.get("a.txt"), Some("second"));
    }

    #[test]
    fn blank_id_is_rejected_without_side_effects() {
        let mut c = Corpus::new();
        c.add_document("a.txt", "kept").unwrap();
        let err = c.add_document("  ", "dropped").unwrap_err();
        assert!(matches!(err, SearchError::InvalidDocument(_)));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn ids_are_sorted_and_clear_empties() {
        let mut c = Corpus::new();
        c.add_document("b", "x").unwrap();
        c.add_document("a", "y").unwrap();
        assert_eq!(c.ids().collect::<Vec<_>>(), vec!["a", "b"]);
        c.clear();
        assert!(c.is_empty());
        assert!(!c.contains("a"));
    }
}
