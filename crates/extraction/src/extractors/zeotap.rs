//! Zeotap documentation extractor
//!
//! Containers count as content only when classed with one of Zeotap's
//! content identifiers; extracted blocks get a content-type tag and API
//! call details are sniffed from `api`/`endpoint`/`method` classed blocks.

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
            "/data-onboarding/",
            "/data-ingestion/",
            "/getting-started/data-sources/",
        ],
    ),
    (
        Task::ProfileCreation,
        &["/identity/", "/user-profiles/", "/identity-resolution/"],
    ),
    (
        Task::AudienceSegment,
        &["/audience-builder/", "/segments/", "/targeting-rules/"],
    ),
    (
        Task::DataIntegration,
        &["/integrations/", "/connections/", "/destinations/"],
    ),
];

/// Zeotap-specific content identifiers: class allow-list plus the heading
/// texts that mark each kind of section
static CONTENT_IDENTIFIERS: &[ContentMarker] = &[
    ContentMarker {
        name: "tutorial",
        classes: &["tutorial", "guide", "walkthrough"],
        text_markers: &["Tutorial", "Guide", "Step by Step"],
    },
    ContentMarker {
        name: "api",
        classes: &["api", "endpoint", "reference"],
        text_markers: &["API Reference", "Endpoints", "Methods"],
    },
    ContentMarker {
        name: "configuration",
        classes: &["configuration", "settings", "setup"],
        text_markers: &["Configuration", "Settings", "Setup"],
    },
];

pub(crate) static PROFILE: VendorProfile = VendorProfile {
    platform: Platform::Zeotap,
    base_url: "https://docs.zeotap.com/",
    doc_sections: DOC_SECTIONS,
    walk: WalkStrategy::Document,
    div_policy: DivPolicy::ClassIn(&[
        "tutorial",
        "guide",
        "walkthrough",
        "api",
        "endpoint",
        "reference",
        "configuration",
        "settings",
        "setup",
    ]),
    prefer_main: false,
    cross_vendor_guard: false,
    code_examples: Some(BlockSpec {
        tags: &["pre", "code", "div"],
        classes: &["code", "example", "snippet", "highlight"],
    }),
    configuration_examples: None,
    api_details: Some(BlockSpec {
        tags: &["div", "pre", "code"],
        classes: &["api", "endpoint", "method"],
    }),
    content_markers: CONTENT_IDENTIFIERS,
};

pub struct ZeotapExtractor {
    core: ExtractorCore,
    base_url: String,
}

impl ZeotapExtractor {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let core = ExtractorCore {
            fetcher: Fetcher::new(&config.fetcher, Platform::Zeotap)?,
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
impl PlatformDocs for ZeotapExtractor {
    fn profile(&self) -> &'static VendorProfile {
        &PROFILE
    }

    fn core(&self) -> &ExtractorCore {
        &self.core
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_per_task() {
        let extractor = ZeotapExtractor::new(&AppConfig::default()).unwrap();
        assert_eq!(
            extractor.task_paths(Task::SourceSetup),
            vec![
                "/data-onboarding/",
                "/data-ingestion/",
                "/getting-started/data-sources/"
            ]
        );
    }

    #[test]
    fn test_platform_identity() {
        let extractor = ZeotapExtractor::new(&AppConfig::default()).unwrap();
        assert_eq!(extractor.platform(), Platform::Zeotap);
    }
}
