//! mParticle documentation extractor
//!
//! Plain fetcher; containers count as content only when their first class
//! marks them as a content block, and code examples come from
//! `highlight` / `code-block` classed elements.

use async_trait::async_trait;
use cdpbot_common::cache::FileCache;
use cdpbot_common::config::AppConfig;
use cdpbot_common::errors::Result;
use cdpbot_common::model::{Platform, Task};
use cdpbot_common::scoring::RelevanceScorer;

use super::{BlockSpec, DivPolicy, ExtractorCore, PlatformDocs, VendorProfile, WalkStrategy};
use crate::fetcher::Fetcher;

static DOC_SECTIONS: &[(Task, &[&str])] = &[
    (
        Task::SourceSetup,
        &[
            "/developers/sdk/",
            "/integrations/data-sources/",
            "/guides/platform-guide/data-sources/",
        ],
    ),
    (
        Task::ProfileCreation,
        &[
            "/guides/platform-guide/profiles/",
            "/guides/platform-guide/users/",
            "/guides/platform-guide/identity/",
        ],
    ),
    (
        Task::AudienceSegment,
        &[
            "/guides/platform-guide/audiences/",
            "/guides/platform-guide/segments/",
            "/guides/platform-guide/calculated-attributes/",
        ],
    ),
    (
        Task::DataIntegration,
        &[
            "/integrations/",
            "/developers/integration/",
            "/guides/platform-guide/connections/",
        ],
    ),
];

pub(crate) static PROFILE: VendorProfile = VendorProfile {
    platform: Platform::Mparticle,
    base_url: "https://docs.mparticle.com/",
    doc_sections: DOC_SECTIONS,
    walk: WalkStrategy::Document,
    div_policy: DivPolicy::FirstClassIn(&["content", "description"]),
    prefer_main: false,
    cross_vendor_guard: false,
    code_examples: Some(BlockSpec {
        tags: &["pre", "code", "div"],
        classes: &["highlight", "code-block"],
    }),
    configuration_examples: None,
    api_details: None,
    content_markers: &[],
};

pub struct MparticleExtractor {
    core: ExtractorCore,
    base_url: String,
}

impl MparticleExtractor {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let core = ExtractorCore {
            fetcher: Fetcher::new(&config.fetcher, Platform::Mparticle)?,
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
impl PlatformDocs for MparticleExtractor {
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
