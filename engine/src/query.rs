//! Keyword query sessions.
//!
//! A [`Query`] starts [`Query::Empty`], is seeded by its first keyword and
//! narrowed by every keyword after that. Narrowing is strict AND: a document
//! survives only if every keyword's postings contain it, and its count is the
//! sum of its frequencies for all keywords applied so far.
//!
//! Queries are plain values. Each step returns the next query and leaves the
//! previous one intact, so the engine never holds session state.

use crate::error::{EngineError, Result};
use crate::index::Postings;
use crate::DocId;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Empty,
    Seeded,
    Narrowed,
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QueryState::Empty => "empty",
            QueryState::Seeded => "seeded",
            QueryState::Narrowed => "narrowed",
        };
        f.write_str(s)
    }
}

/// Keywords applied so far and the documents matching all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matches {
    keys: Vec<String>,
    counts: BTreeMap<DocId, u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Query {
    #[default]
    Empty,
    /// Exactly one term applied.
    Seeded(Matches),
    /// Two or more terms applied.
    Narrowed(Matches),
}

impl Query {
    pub fn new() -> Self {
        Query::Empty
    }

    /// Start a query from the first keyword's postings, taken verbatim.
    pub(crate) fn seed(term: String, postings: Postings) -> Self {
        Query::Seeded(Matches { keys: vec![term], counts: postings })
    }

    /// Intersect with `postings` and add their frequencies to the survivors.
    pub(crate) fn narrow(self, term: String, postings: &Postings) -> Result<Self> {
        let mut matches = match self {
            Query::Empty => {
                return Err(EngineError::InvalidInput(format!(
                    "cannot narrow by {term:?}: query has no keywords yet"
                )))
            }
            Query::Seeded(m) | Query::Narrowed(m) => m,
        };
        matches.counts.retain(|doc_id, count| match postings.get(doc_id) {
            Some(tf) => {
                *count += tf;
                true
            }
            None => false,
        });
        matches.keys.push(term);
        Ok(Query::Narrowed(matches))
    }

    pub fn state(&self) -> QueryState {
        match self {
            Query::Empty => QueryState::Empty,
            Query::Seeded(_) => QueryState::Seeded,
            Query::Narrowed(_) => QueryState::Narrowed,
        }
    }

    fn matches(&self) -> Option<&Matches> {
        match self {
            Query::Empty => None,
            Query::Seeded(m) | Query::Narrowed(m) => Some(m),
        }
    }

    /// Number of matching documents. Zero for an empty query.
    pub fn size(&self) -> usize {
        self.matches().map_or(0, |m| m.counts.len())
    }

    /// Terms in the order they were applied.
    pub fn keys(&self) -> &[String] {
        match self.matches() {
            Some(m) => &m.keys,
            None => &[],
        }
    }

    /// Cumulative count for one document, if it still matches.
    pub fn count(&self, doc_id: DocId) -> Option<u32> {
        self.matches().and_then(|m| m.counts.get(&doc_id).copied())
    }

    /// Matches ordered by count descending, then doc id ascending.
    pub fn ranked(&self) -> Result<Vec<(DocId, u32)>> {
        let matches = self.matches().ok_or_else(|| {
            EngineError::InvalidInput("cannot list matches of a query with no keywords".into())
        })?;
        let mut ranked: Vec<(DocId, u32)> = matches.counts.iter().map(|(&id, &c)| (id, c)).collect();
        ranked.sort_by_key(|&(id, count)| (Reverse(count), id));
        Ok(ranked)
    }
}

/// A matching document paired with its cumulative keyword count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocCount {
    pub doc_id: DocId,
    pub title: String,
    pub count: u32,
}
