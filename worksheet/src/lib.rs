pub mod customer;
pub mod ingest;

use anyhow::Result;
use customer::{by_name, Record};
use kengine::{DocCount, Engine, Query};
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: Vec<String>,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<DocCount>,
}

/// Customers kept in name order, each also indexed in the engine.
#[derive(Default)]
pub struct Worksheet {
    records: Vec<Record>,
    engine: Engine,
}

impl Worksheet {
    pub fn new() -> Self { Self::default() }

    pub fn with_records<I: IntoIterator<Item = Record>>(records: I) -> Self {
        let mut ws = Self::new();
        for r in records {
            ws.add(r);
        }
        tracing::info!(records = ws.records.len(), terms = ws.engine.num_terms(), "worksheet ready");
        ws
    }

    pub fn add(&mut self, record: Record) {
        let doc_id = self.engine.add(&record);
        tracing::debug!(doc_id, %record, "added");
        let at = self.records.partition_point(|r| by_name(r, &record).is_le());
        self.records.insert(at, record);
    }

    pub fn records(&self) -> &[Record] { &self.records }

    pub fn engine(&self) -> &Engine { &self.engine }

    /// One line per customer in name order, or `empty`.
    pub fn report(&self) -> Vec<String> {
        if self.records.is_empty() {
            return vec!["empty".to_string()];
        }
        self.records.iter().map(|r| r.to_string()).collect()
    }

    pub fn search<S: AsRef<str>>(&self, keywords: &[S]) -> Result<Query> {
        Ok(self.engine.search(keywords)?)
    }

    /// Run a search and collect its ranked matches.
    pub fn respond<S: AsRef<str>>(&self, keywords: &[S], timeout: Option<Duration>) -> Result<SearchResponse> {
        let start = Instant::now();
        let query = self.search(keywords)?;
        let results: Vec<DocCount> = match timeout {
            Some(limit) => self.engine.match_iter_within(&query, limit)?.collect(),
            None => self.engine.match_iter(&query)?.collect(),
        };
        Ok(SearchResponse {
            query: query.keys().to_vec(),
            took_s: start.elapsed().as_secs_f64(),
            total_hits: query.size(),
            results,
        })
    }
}
