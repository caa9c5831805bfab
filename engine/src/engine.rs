use crate::document::{term_frequencies, Document, DocumentStore};
use crate::error::{EngineError, Result};
use crate::index::{InvertedIndex, Postings};
use crate::query::{DocCount, Query, QueryState};
use crate::tokenizer::{extract_title, keyword_terms};
use crate::DocId;
use parking_lot::RwLock;
use std::time::{Duration, Instant};

/// Anything that can render itself as indexable text, usually an HTML page.
pub trait Indexable {
    fn to_indexable_text(&self) -> String;

    /// Title stored for the document rendered as `text`. Defaults to its `<title>`.
    fn title_from(&self, text: &str) -> String {
        extract_title(text)
    }
}

#[derive(Default)]
struct Shared {
    store: DocumentStore,
    index: InvertedIndex,
}

/// Document store plus inverted index behind one lock.
///
/// Adds take the write lock, lookups take the read lock, and neither is held
/// longer than a single call. A query that spans several calls can therefore
/// observe documents added between its keywords.
#[derive(Default)]
pub struct Engine {
    shared: RwLock<Shared>,
}

impl Engine {
    pub fn new() -> Self { Self::default() }

    /// Store and index a document, returning its id.
    pub fn add_document(&self, title: &str, text: &str) -> DocId {
        // tokenize before taking the lock
        let tf = term_frequencies(text);
        let mut shared = self.shared.write();
        let Shared { store, index } = &mut *shared;
        let doc = store.insert(title.to_string(), tf);
        index.insert_document(doc.id, &doc.term_frequencies);
        tracing::debug!(
            doc_id = doc.id,
            title,
            terms = doc.term_frequencies.len(),
            index_terms = index.num_terms(),
            index_docs = index.num_docs(),
            "indexed document"
        );
        doc.id
    }

    pub fn add<T: Indexable + ?Sized>(&self, item: &T) -> DocId {
        let text = item.to_indexable_text();
        let title = item.title_from(&text);
        self.add_document(&title, &text)
    }

    pub fn title(&self, doc_id: DocId) -> Result<String> {
        self.shared.read().store.title(doc_id).map(str::to_string)
    }

    pub fn document(&self, doc_id: DocId) -> Result<Document> {
        self.shared.read().store.get(doc_id).cloned()
    }

    /// Postings for an already normalized term. Unknown terms give an empty map.
    pub fn postings(&self, term: &str) -> Postings {
        self.shared.read().index.postings(term)
    }

    pub fn len(&self) -> usize { self.shared.read().store.len() }

    pub fn is_empty(&self) -> bool { self.shared.read().store.is_empty() }

    pub fn num_terms(&self) -> usize { self.shared.read().index.num_terms() }

    /// Postings of several terms read under one guard, so a keyword is
    /// applied against a single state of the index.
    fn postings_all(&self, terms: &[String]) -> Vec<Postings> {
        let shared = self.shared.read();
        terms.iter().map(|t| shared.index.postings(t)).collect()
    }

    /// Open a query with its first keyword.
    ///
    /// A keyword that tokenizes into several terms (`hong-kong`) seeds with the
    /// first and narrows by the rest, each term becoming a key.
    pub fn query_first(&self, keyword: &str) -> Result<Query> {
        let terms = terms_of(keyword)?;
        let mut postings = self.postings_all(&terms).into_iter();
        let mut terms = terms.into_iter();
        let (Some(first), Some(seed)) = (terms.next(), postings.next()) else {
            return Err(empty_keyword(keyword));
        };
        let mut query = Query::seed(first, seed);
        for (term, p) in terms.zip(postings) {
            query = query.narrow(term, &p)?;
        }
        tracing::debug!(keys = ?query.keys(), matches = query.size(), "query seeded");
        Ok(query)
    }

    /// Narrow `query` by another keyword, returning the narrowed query.
    /// `query` itself is left untouched, so a rejected keyword can be retried.
    pub fn query_more(&self, query: &Query, keyword: &str) -> Result<Query> {
        if query.state() == QueryState::Empty {
            return Err(EngineError::InvalidInput(format!(
                "cannot narrow by {keyword:?}: query has no keywords yet"
            )));
        }
        let terms = terms_of(keyword)?;
        let postings = self.postings_all(&terms);
        let mut next = query.clone();
        for (term, p) in terms.into_iter().zip(&postings) {
            next = next.narrow(term, p)?;
        }
        tracing::debug!(keys = ?next.keys(), before = query.size(), after = next.size(), "query narrowed");
        Ok(next)
    }

    /// `query_first` on the first keyword, `query_more` on each of the rest.
    pub fn search<S: AsRef<str>>(&self, keywords: &[S]) -> Result<Query> {
        let (first, rest) = keywords
            .split_first()
            .ok_or_else(|| EngineError::InvalidInput("no search keywords".into()))?;
        let mut query = self.query_first(first.as_ref())?;
        for keyword in rest {
            query = self.query_more(&query, keyword.as_ref())?;
        }
        Ok(query)
    }

    /// Matches with their titles, best count first, ties by doc id.
    /// Every call materializes afresh, so the view can be read repeatedly.
    pub fn match_iter(&self, query: &Query) -> Result<std::vec::IntoIter<DocCount>> {
        self.materialize(query, None)
    }

    /// Like [`Engine::match_iter`] but gives up with `Timeout` once `limit` has elapsed.
    pub fn match_iter_within(&self, query: &Query, limit: Duration) -> Result<std::vec::IntoIter<DocCount>> {
        self.materialize(query, Some(limit))
    }

    fn materialize(&self, query: &Query, limit: Option<Duration>) -> Result<std::vec::IntoIter<DocCount>> {
        let started = Instant::now();
        let ranked = query.ranked()?;
        let shared = self.shared.read();
        let mut out = Vec::with_capacity(ranked.len());
        for (doc_id, count) in ranked {
            if let Some(limit) = limit {
                if started.elapsed() >= limit {
                    return Err(EngineError::Timeout { limit, produced: out.len() });
                }
            }
            let title = shared.store.title(doc_id)?.to_string();
            out.push(DocCount { doc_id, title, count });
        }
        Ok(out.into_iter())
    }
}

fn terms_of(keyword: &str) -> Result<Vec<String>> {
    let terms = keyword_terms(keyword);
    if terms.is_empty() {
        return Err(empty_keyword(keyword));
    }
    Ok(terms)
}

fn empty_keyword(keyword: &str) -> EngineError {
    EngineError::InvalidInput(format!("empty search keyword {keyword:?}"))
}
