//! Per-vendor documentation extractors
//!
//! One capability contract (`PlatformDocs`) shared by four vendor
//! variants. The shared pipeline does the heading-walk extraction; each
//! variant contributes its URL table and selection heuristics through a
//! [`VendorProfile`], plus the occasional vendor-specific override.
//! Composition over inheritance: every variant owns an [`ExtractorCore`]
//! (fetcher, cache, scorer) injected at construction.

pub mod lytics;
pub mod mparticle;
pub(crate) mod pipeline;
pub mod segment;
pub mod zeotap;

pub use lytics::LyticsExtractor;
pub use mparticle::MparticleExtractor;
pub use segment::SegmentExtractor;
pub use zeotap::ZeotapExtractor;

use async_trait::async_trait;
use cdpbot_common::cache::FileCache;
use cdpbot_common::errors::Result;
use cdpbot_common::model::{DocumentSnippet, Platform, Task};
use cdpbot_common::scoring::RelevanceScorer;

use crate::fetcher::Fetcher;

/// How a variant walks forward from a matched heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStrategy {
    /// Follow document order through every following node
    Document,
    /// Follow direct siblings only
    Siblings,
}

/// Which container (`div`) nodes a variant admits as content-bearing
#[derive(Debug, Clone, Copy)]
pub enum DivPolicy {
    /// Containers are never collected
    Skip,
    /// Collected when the first class is in the allow-list
    FirstClassIn(&'static [&'static str]),
    /// Collected when classless, or when any class is in the allow-list
    ClasslessOrAllowed(&'static [&'static str]),
    /// Collected only with a class from the allow-list
    ClassIn(&'static [&'static str]),
}

/// Tag/class filter for sub-artifact extraction (code, config, API blocks).
///
/// An empty class list means any element with a matching tag qualifies;
/// otherwise the element must also carry one of the listed classes.
#[derive(Debug, Clone, Copy)]
pub struct BlockSpec {
    pub tags: &'static [&'static str],
    pub classes: &'static [&'static str],
}

/// Classifier entry for vendor-specific content typing
#[derive(Debug, Clone, Copy)]
pub struct ContentMarker {
    pub name: &'static str,
    pub classes: &'static [&'static str],
    pub text_markers: &'static [&'static str],
}

/// Static selection heuristics for one vendor
#[derive(Debug, Clone, Copy)]
pub struct VendorProfile {
    pub platform: Platform,
    pub base_url: &'static str,
    /// Documentation paths per task
    pub doc_sections: &'static [(Task, &'static [&'static str])],
    pub walk: WalkStrategy,
    pub div_policy: DivPolicy,
    /// Scope extraction to the page's `main` element when present
    pub prefer_main: bool,
    /// Discard blocks naming another vendor without naming this one
    pub cross_vendor_guard: bool,
    pub code_examples: Option<BlockSpec>,
    pub configuration_examples: Option<BlockSpec>,
    pub api_details: Option<BlockSpec>,
    pub content_markers: &'static [ContentMarker],
}

/// Shared collaborators injected into every vendor variant
#[derive(Debug, Clone)]
pub struct ExtractorCore {
    pub fetcher: Fetcher,
    pub cache: FileCache,
    pub scorer: RelevanceScorer,
}

/// The capability contract every vendor extractor provides
#[async_trait]
pub trait PlatformDocs: Send + Sync {
    /// Static selection heuristics for this vendor
    fn profile(&self) -> &'static VendorProfile;

    /// Shared fetcher/cache/scorer
    fn core(&self) -> &ExtractorCore;

    /// Documentation root; overridable so tests can point variants at an
    /// unreachable host
    fn base_url(&self) -> &str;

    fn platform(&self) -> Platform {
        self.profile().platform
    }

    /// Documentation paths for a task; empty for the generic actions
    fn task_paths(&self, task: Task) -> Vec<&'static str> {
        self.profile()
            .doc_sections
            .iter()
            .find(|(t, _)| *t == task)
            .map(|(_, paths)| paths.to_vec())
            .unwrap_or_default()
    }

    /// Extract documentation snippets for a task.
    ///
    /// Checks the cache first; on a miss, fetches every task path, locates
    /// sections whose headings match the keywords, collects and scores the
    /// following content, and caches any non-empty result. A failing path
    /// is skipped, never fatal: the result degrades to whatever subset of
    /// paths succeeded.
    async fn extract_docs(&self, task: Task, sections: &[&str]) -> Result<Vec<DocumentSnippet>> {
        pipeline::run_extract_docs(
            self.core(),
            self.profile(),
            self.base_url(),
            &self.task_paths(task),
            task,
            sections,
        )
        .await
    }

    /// Search every known documentation path for this vendor, scoring
    /// against the whitespace-split lowercase tokens of the query
    async fn search(&self, query: &str) -> Result<Vec<DocumentSnippet>> {
        let mut paths = Vec::new();
        for task in Task::SPECIFIC {
            paths.extend(self.task_paths(task));
        }
        pipeline::run_search(self.core(), self.profile(), self.base_url(), &paths, query).await
    }

    /// Drop every cached entry for this vendor
    fn invalidate(&self) {
        self.core().cache.clear(Some(self.platform()));
    }
}
