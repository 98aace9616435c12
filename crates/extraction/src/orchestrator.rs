//! Docs orchestrator
//!
//! Maps a (platform, task) pair to its relevant-section keywords,
//! dispatches to the matching vendor extractor, and post-processes the
//! results: strip residual HTML, collapse whitespace, stable sort
//! descending by relevance. Free-text search fans out to one or all
//! vendors sequentially.

use cdpbot_common::config::AppConfig;
use cdpbot_common::errors::Result;
use cdpbot_common::model::{DocumentSnippet, Platform, Task};
use cdpbot_common::scoring;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::extractors::{
    pipeline, LyticsExtractor, MparticleExtractor, PlatformDocs, SegmentExtractor, ZeotapExtractor,
};

/// Relevant documentation section keywords for a (task, platform) pair.
///
/// Generic action tasks have no mapping and return an empty slice, which
/// callers treat as "no documentation to extract".
pub fn section_keywords(task: Task, platform: Platform) -> &'static [&'static str] {
    match (task, platform) {
        (Task::SourceSetup, Platform::Segment) => &["sources", "setup", "configuration"],
        (Task::SourceSetup, Platform::Mparticle) => &["sources", "inputs", "data-sources"],
        (Task::SourceSetup, Platform::Lytics) => &["sources", "connections", "inputs"],
        (Task::SourceSetup, Platform::Zeotap) => &["sources", "integrations", "inputs"],
        (Task::ProfileCreation, _) => &["profiles", "identity", "users"],
        (Task::AudienceSegment, _) => &["audiences", "segments", "targeting"],
        (Task::DataIntegration, Platform::Mparticle) => &["integrations", "outputs", "destinations"],
        (Task::DataIntegration, _) => &["integrations", "destinations", "connections"],
        _ => &[],
    }
}

/// Dispatches extraction across the vendor extractors
pub struct DocsOrchestrator {
    extractors: Vec<Arc<dyn PlatformDocs>>,
}

impl DocsOrchestrator {
    /// Build the standard set of four vendor extractors
    pub fn new(config: &AppConfig) -> Result<Self> {
        let extractors: Vec<Arc<dyn PlatformDocs>> = vec![
            Arc::new(SegmentExtractor::new(config)?),
            Arc::new(MparticleExtractor::new(config)?),
            Arc::new(LyticsExtractor::new(config)?),
            Arc::new(ZeotapExtractor::new(config)?),
        ];
        Ok(Self { extractors })
    }

    /// Build from an explicit extractor set (tests, partial deployments)
    pub fn from_extractors(extractors: Vec<Arc<dyn PlatformDocs>>) -> Self {
        Self { extractors }
    }

    fn extractor(&self, platform: Platform) -> Option<&Arc<dyn PlatformDocs>> {
        self.extractors.iter().find(|e| e.platform() == platform)
    }

    /// Get relevant documentation snippets for a platform and task.
    ///
    /// Unknown mappings produce an empty list, never an error.
    pub async fn get_relevant_docs(
        &self,
        platform: Platform,
        task: Task,
    ) -> Result<Vec<DocumentSnippet>> {
        let sections = section_keywords(task, platform);
        if sections.is_empty() {
            debug!(platform = %platform, task = %task, "No documentation mapping for task");
            return Ok(Vec::new());
        }

        let Some(extractor) = self.extractor(platform) else {
            debug!(platform = %platform, "No extractor registered for platform");
            return Ok(Vec::new());
        };

        let docs = extractor.extract_docs(task, sections).await?;
        Ok(post_process(docs))
    }

    /// Search documentation with a free-text query, across one platform or
    /// all of them
    pub async fn search_docs(
        &self,
        query: &str,
        platform: Option<Platform>,
    ) -> Result<Vec<DocumentSnippet>> {
        let mut results = Vec::new();

        for extractor in self.targets(platform) {
            match extractor.search(query).await {
                Ok(snippets) => results.extend(snippets),
                Err(e) => {
                    warn!(platform = %extractor.platform(), error = %e, "Search failed for platform");
                }
            }
        }

        Ok(post_process(results))
    }

    /// Invalidate cached documentation for one platform or all of them
    pub async fn refresh(&self, platform: Option<Platform>) {
        for extractor in self.targets(platform) {
            extractor.invalidate();
        }
    }

    fn targets(&self, platform: Option<Platform>) -> Vec<&Arc<dyn PlatformDocs>> {
        match platform {
            Some(platform) => self.extractor(platform).into_iter().collect(),
            None => self.extractors.iter().collect(),
        }
    }
}

/// Clean and order extracted snippets: strip any residual HTML, collapse
/// whitespace, and sort descending by relevance (stable)
fn post_process(mut snippets: Vec<DocumentSnippet>) -> Vec<DocumentSnippet> {
    for snippet in &mut snippets {
        snippet.content = pipeline::strip_html(&snippet.content);
    }
    scoring::sort_by_relevance(&mut snippets);
    snippets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_keywords_table() {
        assert_eq!(
            section_keywords(Task::SourceSetup, Platform::Segment),
            &["sources", "setup", "configuration"]
        );
        assert_eq!(
            section_keywords(Task::DataIntegration, Platform::Mparticle),
            &["integrations", "outputs", "destinations"]
        );
        assert_eq!(
            section_keywords(Task::ProfileCreation, Platform::Zeotap),
            &["profiles", "identity", "users"]
        );
        assert!(section_keywords(Task::WhatIs, Platform::Segment).is_empty());
    }

    #[test]
    fn test_post_process_strips_html_and_sorts() {
        let snippets = vec![
            DocumentSnippet::new("<p>low  match</p>", "u1", 0.2),
            DocumentSnippet::new("<b>high</b>   match", "u2", 0.8),
        ];
        let processed = post_process(snippets);

        assert_eq!(processed[0].content, "high match");
        assert_eq!(processed[0].relevance, 0.8);
        assert_eq!(processed[1].content, "low match");
    }

    #[tokio::test]
    async fn test_generic_task_has_no_docs() {
        let orchestrator = DocsOrchestrator::new(&AppConfig::default()).unwrap();
        let docs = orchestrator
            .get_relevant_docs(Platform::Mparticle, Task::WhatIs)
            .await
            .unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_missing_extractor_yields_empty() {
        let orchestrator = DocsOrchestrator::from_extractors(Vec::new());
        let docs = orchestrator
            .get_relevant_docs(Platform::Segment, Task::SourceSetup)
            .await
            .unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_all_is_safe_without_cache_dir() {
        let orchestrator = DocsOrchestrator::new(&AppConfig::default()).unwrap();
        orchestrator.refresh(None).await;
        orchestrator.refresh(Some(Platform::Lytics)).await;
    }
}
