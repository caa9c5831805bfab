use crate::error::{EngineError, Result};
use crate::tokenizer::tokenize;
use crate::DocId;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    /// term -> occurrences in this document, every count >= 1
    pub term_frequencies: HashMap<String, u32>,
}

/// Count how often each term occurs in `text`.
pub fn term_frequencies(text: &str) -> HashMap<String, u32> {
    let tokens = tokenize(text);
    let mut tf: HashMap<String, u32> = HashMap::new();
    for term in tokens.iter() {
        *tf.entry(term.to_string()).or_insert(0) += 1;
    }
    tf
}

/// Append-only store of documents. Ids are dense and start at 0.
#[derive(Debug, Default)]
pub struct DocumentStore {
    docs: Vec<Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next insert will receive.
    pub fn next_id(&self) -> DocId {
        self.docs.len() as DocId
    }

    pub fn insert(&mut self, title: String, term_frequencies: HashMap<String, u32>) -> &Document {
        let id = self.next_id();
        self.docs.push(Document { id, title, term_frequencies });
        &self.docs[id as usize]
    }

    pub fn get(&self, id: DocId) -> Result<&Document> {
        self.docs.get(id as usize).ok_or(EngineError::NotFound(id))
    }

    pub fn title(&self, id: DocId) -> Result<&str> {
        self.get(id).map(|doc| doc.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_repeated_terms() {
        let tf = term_frequencies("<title>John john</title> 4 John john 12345678 Hanoi");
        assert_eq!(tf.get("john"), Some(&4));
        assert_eq!(tf.get("hanoi"), Some(&1));
        assert_eq!(tf.get("4"), Some(&1));
        assert!(!tf.contains_key("title"));
    }

    #[test]
    fn ids_are_sequential() {
        let mut store = DocumentStore::new();
        let a = store.insert("a".into(), term_frequencies("x")).id;
        let b = store.insert("a".into(), term_frequencies("x")).id;
        assert_eq!((a, b), (0, 1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.title(1).unwrap(), "a");
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store = DocumentStore::new();
        assert_eq!(store.title(7).unwrap_err(), EngineError::NotFound(7));
    }
}
