//! Segment documentation extractor
//!
//! Segment's docs sit behind aggressive bot protection, so this variant
//! uses the browser-profile fetcher (extended headers, multiple attempts
//! per URL). It also carries a specialized source-setup extraction that
//! aggregates the getting-started page into a single instruction snippet.

use async_trait::async_trait;
use cdpbot_common::cache::{keys, FileCache};
use cdpbot_common::config::AppConfig;
use cdpbot_common::errors::Result;
use cdpbot_common::model::{DocumentSnippet, Platform, Task};
use cdpbot_common::scoring::RelevanceScorer;
use regex_lite::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use super::pipeline;
use super::{BlockSpec, DivPolicy, ExtractorCore, PlatformDocs, VendorProfile, WalkStrategy};
use crate::fetcher::Fetcher;

static DOC_SECTIONS: &[(Task, &[&str])] = &[
    (Task::SourceSetup, &["/getting-started/sources/"]),
    (
        Task::ProfileCreation,
        &["/profiles/", "/personas/", "/identity-resolution/"],
    ),
    (
        Task::AudienceSegment,
        &["/audiences/", "/computed-traits/", "/personas/audiences/"],
    ),
    (
        Task::DataIntegration,
        &["/connections/destinations/", "/destinations/", "/integrations/"],
    ),
];

pub(crate) static PROFILE: VendorProfile = VendorProfile {
    platform: Platform::Segment,
    base_url: "https://segment.com/docs/",
    doc_sections: DOC_SECTIONS,
    walk: WalkStrategy::Document,
    div_policy: DivPolicy::Skip,
    prefer_main: false,
    cross_vendor_guard: false,
    code_examples: Some(BlockSpec {
        tags: &["pre", "code"],
        classes: &[],
    }),
    configuration_examples: None,
    api_details: None,
    content_markers: &[],
};

/// Action phrases the specialized source-setup extraction looks for
const SOURCE_SETUP_PHRASES: &str = "add source|set up|create source|configure source";

pub struct SegmentExtractor {
    core: ExtractorCore,
    base_url: String,
}

impl SegmentExtractor {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let core = ExtractorCore {
            fetcher: Fetcher::browser(&config.fetcher, Platform::Segment)?,
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

    /// Aggregate the getting-started page into one instruction snippet
    async fn extract_source_setup(&self) -> Vec<DocumentSnippet> {
        let url = pipeline::join_docs_url(&self.base_url, "/getting-started/sources/");
        let html = match self.core.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %url, error = %e, "Skipping unreachable documentation page");
                return Vec::new();
            }
        };
        quickstart_snippets(&html, &url)
    }
}

#[async_trait]
impl PlatformDocs for SegmentExtractor {
    fn profile(&self) -> &'static VendorProfile {
        &PROFILE
    }

    fn core(&self) -> &ExtractorCore {
        &self.core
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn extract_docs(&self, task: Task, sections: &[&str]) -> Result<Vec<DocumentSnippet>> {
        if task == Task::SourceSetup {
            let key = keys::task(task);
            if let Some(cached) = self
                .core
                .cache
                .get::<Vec<DocumentSnippet>>(Platform::Segment, &key)
            {
                return Ok(cached);
            }

            let results = self.extract_source_setup().await;
            if !results.is_empty() {
                self.core.cache.set(Platform::Segment, &key, &results);
            }
            return Ok(results);
        }

        pipeline::run_extract_docs(
            &self.core,
            &PROFILE,
            &self.base_url,
            &self.task_paths(task),
            task,
            sections,
        )
        .await
    }
}

/// Pull source-setup instructions out of the getting-started page.
///
/// Matches action phrases against headings and intro elements, gathers the
/// paragraph/list text following each match up to the next heading, and
/// falls back to the page's `main` text when nothing matched. The result
/// is a single aggregated snippet at full relevance.
fn quickstart_snippets(html: &str, url: &str) -> Vec<DocumentSnippet> {
    let doc = Html::parse_document(html);
    let Ok(re) = Regex::new(&format!("(?i){}", SOURCE_SETUP_PHRASES)) else {
        return Vec::new();
    };

    let candidates = match Selector::parse("h1, h2, h3, p, li") {
        Ok(sel) => doc.select(&sel).collect::<Vec<_>>(),
        Err(_) => Vec::new(),
    };

    let mut instructions: Vec<String> = Vec::new();
    for el in candidates
        .iter()
        .filter(|el| re.is_match(&pipeline::element_text(el)))
    {
        // Walk from the matched element through its following siblings,
        // stopping at the next prominent heading
        let mut node = Some(**el);
        while let Some(n) = node {
            if let Some(current) = ElementRef::wrap(n) {
                let name = current.value().name();
                if matches!(name, "h1" | "h2" | "h3") {
                    break;
                }
                if matches!(name, "p" | "ul" | "ol") {
                    let text = pipeline::element_text(&current);
                    if !text.is_empty() {
                        instructions.push(text);
                    }
                }
            }
            node = n.next_sibling();
        }
    }

    if instructions.is_empty() {
        let main = Selector::parse("main")
            .ok()
            .and_then(|sel| doc.select(&sel).next())
            .unwrap_or_else(|| doc.root_element());
        let text = pipeline::element_text(&main);
        if !text.is_empty() {
            instructions.push(text);
        }
    }

    if instructions.is_empty() {
        return Vec::new();
    }

    vec![DocumentSnippet::new(instructions.join("\n\n"), url, 1.0)]
}
