//! cdpbot Documentation Extraction
//!
//! Scrapes the public documentation of the supported CDP vendors and turns
//! pages into scored [`cdpbot_common::model::DocumentSnippet`]s:
//! - A content fetcher with timeout and User-Agent spoofing
//! - The `PlatformDocs` capability trait with one variant per vendor
//! - A shared heading-walk extraction pipeline with per-vendor heuristics
//! - The docs orchestrator mapping (platform, task) to extractions

pub mod extractors;
pub mod fetcher;
pub mod orchestrator;

pub use extractors::{
    ExtractorCore, LyticsExtractor, MparticleExtractor, PlatformDocs, SegmentExtractor,
    ZeotapExtractor,
};
pub use fetcher::Fetcher;
pub use orchestrator::DocsOrchestrator;
