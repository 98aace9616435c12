//! Domain model shared across the cdpbot crates
//!
//! Provides:
//! - The fixed CDP platform enumeration
//! - Task categories recognized by the question interpreter
//! - Extracted documentation snippets with optional sub-artifacts
//! - The terminal answer payload returned to callers

use serde::{Deserialize, Serialize};
use std::fmt;

/// The supported CDP vendors, in the fixed identification order.
///
/// Platform identification scans this order and the first name found in a
/// question wins, so the declaration order is part of the contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Segment,
    Mparticle,
    Lytics,
    Zeotap,
}

impl Platform {
    /// All platforms in identification order
    pub const ALL: [Platform; 4] = [
        Platform::Segment,
        Platform::Mparticle,
        Platform::Lytics,
        Platform::Zeotap,
    ];

    /// Lowercase platform name, used in questions, cache keys, and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Segment => "segment",
            Platform::Mparticle => "mparticle",
            Platform::Lytics => "lytics",
            Platform::Zeotap => "zeotap",
        }
    }

    /// Human-facing vendor name
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Segment => "Segment",
            Platform::Mparticle => "mParticle",
            Platform::Lytics => "Lytics",
            Platform::Zeotap => "Zeotap",
        }
    }

    /// Landing page for the vendor's documentation, used as the answer
    /// source link
    pub fn docs_home(&self) -> &'static str {
        match self {
            Platform::Segment => "https://segment.com/docs/?ref=nav",
            Platform::Mparticle => "https://docs.mparticle.com/",
            Platform::Lytics => "https://docs.lytics.com/",
            Platform::Zeotap => "https://docs.zeotap.com/home/en-us/",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized user intent category.
///
/// The four specific tasks map to documentation paths per platform. The
/// generic actions are the fallback table the interpreter consults when no
/// task-specific pattern matches; they have no documentation path mapping
/// and extraction for them always comes back empty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    SourceSetup,
    ProfileCreation,
    AudienceSegment,
    DataIntegration,
    HowTo,
    WhatIs,
    Setup,
    Create,
    Integrate,
}

impl Task {
    /// The four tasks with documentation path tables
    pub const SPECIFIC: [Task; 4] = [
        Task::SourceSetup,
        Task::ProfileCreation,
        Task::AudienceSegment,
        Task::DataIntegration,
    ];

    /// Snake-case task name, used in cache keys and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::SourceSetup => "source_setup",
            Task::ProfileCreation => "profile_creation",
            Task::AudienceSegment => "audience_segment",
            Task::DataIntegration => "data_integration",
            Task::HowTo => "how_to",
            Task::WhatIs => "what_is",
            Task::Setup => "setup",
            Task::Create => "create",
            Task::Integrate => "integrate",
        }
    }

    /// Whether this task has per-platform documentation paths
    pub fn is_specific(&self) -> bool {
        Task::SPECIFIC.contains(self)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API call details sniffed out of a documentation block
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiDetails {
    /// HTTP method (GET, POST, PUT, DELETE)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Endpoint path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Example request body or call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_example: Option<String>,

    /// Example response body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_example: Option<String>,
}

impl ApiDetails {
    pub fn is_empty(&self) -> bool {
        self.method.is_none()
            && self.endpoint.is_none()
            && self.request_example.is_none()
            && self.response_example.is_none()
    }
}

/// A unit of extracted documentation content.
///
/// Created fresh per extraction call; the only mutation after creation is
/// the orchestrator's post-processing pass over `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSnippet {
    /// Plain-text content of the block
    pub content: String,

    /// Page the block was extracted from
    pub url: String,

    /// Heuristic relevance score in [0, 1]
    pub relevance: f32,

    /// Code examples found within the block's markup
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code_examples: Vec<String>,

    /// Configuration examples found within the block's markup
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configuration_examples: Vec<String>,

    /// API call details found within the block's markup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_details: Option<ApiDetails>,

    /// Vendor-specific content classification (tutorial, api, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl DocumentSnippet {
    pub fn new(content: impl Into<String>, url: impl Into<String>, relevance: f32) -> Self {
        Self {
            content: content.into(),
            url: url.into(),
            relevance,
            code_examples: Vec::new(),
            configuration_examples: Vec::new(),
            api_details: None,
            content_type: None,
        }
    }
}

/// Machine-readable tag for the conversational failure modes.
///
/// These are not faults: they ride inside [`AnswerResult`] next to a
/// best-effort natural-language answer and never cross the boundary as an
/// error value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnswerError {
    PlatformNotFound,
    TaskNotFound,
    DocsFetchError,
    NoDocsFound,
    GeneralError,
}

/// Terminal artifact returned to the caller for a question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Natural-language answer text
    pub answer: String,

    /// Identified platform, when one was recognized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,

    /// Identified task, when one was recognized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,

    /// Documentation landing page for the identified platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Failure tag when the pipeline degraded to a fallback answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AnswerError>,

    /// Code examples from the top-ranked snippet carrying any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code_examples: Vec<String>,

    /// API details from the top-ranked snippet carrying any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_details: Option<ApiDetails>,
}

impl AnswerResult {
    /// An answer with no metadata attached
    pub fn plain(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            platform: None,
            task: None,
            source_url: None,
            error: None,
            code_examples: Vec::new(),
            api_details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_order_is_fixed() {
        let names: Vec<_> = Platform::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["segment", "mparticle", "lytics", "zeotap"]);
    }

    #[test]
    fn test_platform_serde_names() {
        let json = serde_json::to_string(&Platform::Mparticle).unwrap();
        assert_eq!(json, "\"mparticle\"");
    }

    #[test]
    fn test_task_specificity() {
        assert!(Task::SourceSetup.is_specific());
        assert!(!Task::WhatIs.is_specific());
    }

    #[test]
    fn test_snippet_serialization_skips_empty_fields() {
        let snippet = DocumentSnippet::new("Add a source", "https://example.com", 0.5);
        let json = serde_json::to_string(&snippet).unwrap();
        assert!(!json.contains("code_examples"));
        assert!(!json.contains("api_details"));
    }

    #[test]
    fn test_answer_error_tags() {
        let json = serde_json::to_string(&AnswerError::PlatformNotFound).unwrap();
        assert_eq!(json, "\"platform_not_found\"");
    }
}
