//! cdpbot Common Library
//!
//! Shared code for the cdpbot crates including:
//! - Domain model (platforms, tasks, documentation snippets, answers)
//! - Error types and handling
//! - Configuration management
//! - Flat-file documentation cache
//! - Keyword relevance scoring
//! - Metrics helpers

pub mod cache;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod scoring;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use model::{AnswerError, AnswerResult, DocumentSnippet, Platform, Task};
pub use scoring::RelevanceScorer;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cache entries older than this many seconds are treated as absent
pub const CACHE_TTL_SECS: u64 = 24 * 60 * 60;

/// Per-request fetch timeout ceiling in seconds
pub const FETCH_TIMEOUT_SECS: u64 = 10;
