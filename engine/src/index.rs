use crate::DocId;
use std::collections::{BTreeMap, HashMap};

/// doc_id -> frequency of one term in that document. Ordered by doc_id.
pub type Postings = BTreeMap<DocId, u32>;

#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Postings>,
    num_docs: u32,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Record every `(term, frequency)` of a newly stored document.
    /// Zero frequencies are skipped so every listed entry stays >= 1.
    pub fn insert_document(&mut self, doc_id: DocId, term_frequencies: &HashMap<String, u32>) {
        for (term, &tf) in term_frequencies {
            if tf == 0 { continue; }
            self.postings.entry(term.clone()).or_default().insert(doc_id, tf);
        }
        self.num_docs += 1;
    }

    /// Postings for `term`; `None` when no document contains it.
    pub fn get(&self, term: &str) -> Option<&Postings> {
        self.postings.get(term)
    }

    /// Owned copy of the postings for `term`, empty for unknown terms.
    pub fn postings(&self, term: &str) -> Postings {
        self.get(term).cloned().unwrap_or_default()
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn num_docs(&self) -> u32 { self.num_docs }
}
