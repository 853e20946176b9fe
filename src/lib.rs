//! kbq - Knowledge Base Query
//!
//! A local-first CLI tool for searching a markdown knowledge base built from
//! podcast and video transcripts.
//!
//! # Overview
//!
//! kbq lets you:
//! - Browse entries by topic folder
//! - Find entries by speaker or by the month in their file name
//! - Find inline claims such as `**[PREDICTION]**` and count them
//! - Run case-insensitive full-text searches
//! - Trace which entries confirm, contradict or extend another entry
//!
//! There is no index: every query rescans the directory tree, so results
//! always reflect the files as they are on disk.
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `knowledge` - Entry parsing and the query engine
//! - `cli` - Command-line surface and output formatting
//!
//! # Example
//!
//! ```rust,no_run
//! use kbq::knowledge::{ClaimType, KnowledgeSearcher};
//!
//! fn main() -> anyhow::Result<()> {
//!     let searcher = KnowledgeSearcher::new("learning/knowledge");
//!
//!     for hit in searcher.search_by_claim_type(ClaimType::Prediction)? {
//!         println!("{} ({} predictions)", hit.document.title, hit.matching_claims.unwrap_or(0));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod knowledge;

pub use error::{KbError, Result};
