//! In-memory keyword search over indexed documents.
//!
//! Documents go in through [`Engine::add_document`] (or [`Engine::add`] for
//! anything implementing [`Indexable`]). A search opens a [`Query`] with one
//! keyword and narrows it with more; matches are ranked by the summed
//! frequency of all keywords.

pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod tokenizer;

pub type DocId = u32;

pub use document::{Document, DocumentStore};
pub use engine::{Engine, Indexable};
pub use error::{EngineError, Result};
pub use index::{InvertedIndex, Postings};
pub use query::{DocCount, Query, QueryState};
