//! Lytics documentation extractor
//!
//! Walks siblings only (Lytics doc pages keep section content flat next to
//! its heading), scopes to the `main` container when present, and guards
//! against cross-vendor noise: blocks naming another vendor without naming
//! Lytics are discarded. The guard is heuristic and can drop legitimate
//! comparative content.

use async_trait::async_trait;
use cdpbot_common::cache::FileCache;
use cdpbot_common::config::AppConfig;
use cdpbot_common::errors::Result;
use cdpbot_common::model::{Platform, Task};
use cdpbot_common::scoring::RelevanceScorer;

use super::{
    BlockSpec, ContentMarker, DivPolicy, ExtractorCore, PlatformDocs, VendorProfile, WalkStrategy,
};
use crate::fetcher::Fetcher;

static DOC_SECTIONS: &[(Task, &[&str])] = &[
    (
        Task::SourceSetup,
        &[
            "/data-sources/",
            "/integrations/sources/",
            "/getting-started/data-collection/",
        ],
    ),
    (
        Task::ProfileCreation,
        &["/profiles/", "/user-identity/", "/identity-resolution/"],
    ),
    (
        Task::AudienceSegment,
        &[
            "/segments/",
            "/audiences/",
            "/behavioral-scoring/",
            "/content-affinity/",
        ],
    ),
    (
        Task::DataIntegration,
        &["/integrations/", "/destinations/", "/apis/integrations/"],
    ),
];

static SECTION_MARKERS: &[ContentMarker] = &[
    ContentMarker {
        name: "tutorial",
        classes: &[],
        text_markers: &["Tutorial", "Step-by-Step Guide", "Walkthrough"],
    },
    ContentMarker {
        name: "configuration",
        classes: &[],
        text_markers: &["Configuration", "Settings", "Setup"],
    },
    ContentMarker {
        name: "api",
        classes: &[],
        text_markers: &["API Reference", "API Documentation", "Endpoints"],
    },
    ContentMarker {
        name: "examples",
        classes: &[],
        text_markers: &["Examples", "Use Cases", "Implementations"],
    },
];

pub(crate) static PROFILE: VendorProfile = VendorProfile {
    platform: Platform::Lytics,
    base_url: "https://docs.lytics.com/",
    doc_sections: DOC_SECTIONS,
    walk: WalkStrategy::Siblings,
    div_policy: DivPolicy::ClasslessOrAllowed(&["content", "documentation", "example", "tutorial"]),
    prefer_main: true,
    cross_vendor_guard: true,
    code_examples: Some(BlockSpec {
        tags: &["pre", "code", "div"],
        classes: &["highlight", "code-block", "example"],
    }),
    configuration_examples: Some(BlockSpec {
        tags: &["pre", "code", "div"],
        classes: &["configuration", "config", "json", "yaml"],
    }),
    api_details: None,
    content_markers: SECTION_MARKERS,
};

pub struct LyticsExtractor {
    core: ExtractorCore,
    base_url: String,
}

impl LyticsExtractor {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let core = ExtractorCore {
            fetcher: Fetcher::new(&config.fetcher, Platform::Lytics)?,
            cache: FileCache::new(config.cache.clone()),
            scorer: RelevanceScorer::new(),
        };
        Ok(Self {
            core,
            base_url: PROFILE.base_url.to_string(),
        })
    }

    /// Point the extractor at a different documentation root (tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl PlatformDocs for LyticsExtractor {
    fn profile(&self) -> &'static VendorProfile {
        &PROFILE
    }

    fn core(&self) -> &ExtractorCore {
        &self.core
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Audience segmentation is restricted to the primary doc page; the
    /// secondary pages drown the results in loosely related content
    fn task_paths(&self, task: Task) -> Vec<&'static str> {
        let paths = PROFILE
            .doc_sections
            .iter()
            .find(|(t, _)| *t == task)
            .map(|(_, paths)| paths.to_vec())
            .unwrap_or_default();

        if task == Task::AudienceSegment {
            paths.into_iter().take(1).collect()
        } else {
            paths
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audience_segment_uses_primary_path_only() {
        let extractor = LyticsExtractor::new(&AppConfig::default()).unwrap();
        assert_eq!(extractor.task_paths(Task::AudienceSegment), vec!["/segments/"]);
    }

    #[test]
    fn test_other_tasks_keep_all_paths() {
        let extractor = LyticsExtractor::new(&AppConfig::default()).unwrap();
        assert_eq!(extractor.task_paths(Task::SourceSetup).len(), 3);
    }

    #[tokio::test]
    async fn test_unreachable_docs_yield_empty_not_error() {
        let extractor = LyticsExtractor::new(&AppConfig::default())
            .unwrap()
            .with_base_url("http://127.0.0.1:9");

        let docs = extractor
            .extract_docs(Task::AudienceSegment, &["audiences", "segments", "targeting"])
            .await
            .unwrap();
        assert!(docs.is_empty());
    }
}
