//! Chatbot answer assembly
//!
//! Wires the question interpreter and the docs orchestrator together.
//! Every failure path converts to a best-effort natural-language answer
//! plus a machine-readable error tag; nothing crosses this boundary as a
//! raised fault.

use cdpbot_common::errors::Result;
use cdpbot_common::metrics;
use cdpbot_common::model::{AnswerError, AnswerResult, DocumentSnippet};
use cdpbot_extraction::DocsOrchestrator;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::fallback::fallback_response;
use crate::interpreter::QuestionInterpreter;

/// Answers natural-language questions about the supported CDP platforms
pub struct Chatbot {
    interpreter: QuestionInterpreter,
    docs: Arc<DocsOrchestrator>,
}

impl Chatbot {
    pub fn new(docs: Arc<DocsOrchestrator>) -> Self {
        Self {
            interpreter: QuestionInterpreter::new(),
            docs,
        }
    }

    /// Process a question and return an answer.
    ///
    /// Infallible by contract: unexpected internal conditions degrade to a
    /// generic apology with the `general_error` tag.
    pub async fn get_answer(&self, question: &str) -> AnswerResult {
        let start = Instant::now();
        let result = match self.answer_inner(question).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "Unexpected failure while answering question");
                AnswerResult {
                    error: Some(AnswerError::GeneralError),
                    ..AnswerResult::plain(
                        "I apologize, but I encountered an error while processing your \
                         question. Please try rephrasing it or ask something else.",
                    )
                }
            }
        };

        let outcome = match result.error {
            None => "answered",
            Some(AnswerError::PlatformNotFound) => "platform_not_found",
            Some(AnswerError::TaskNotFound) => "task_not_found",
            Some(AnswerError::DocsFetchError) => "docs_fetch_error",
            Some(AnswerError::NoDocsFound) => "no_docs_found",
            Some(AnswerError::GeneralError) => "general_error",
        };
        metrics::record_question(start.elapsed().as_secs_f64(), outcome);
        result
    }

    async fn answer_inner(&self, question: &str) -> Result<AnswerResult> {
        let normalized = self.interpreter.normalize(question);

        let Some(platform) = self.interpreter.identify_platform(&normalized) else {
            return Ok(AnswerResult {
                error: Some(AnswerError::PlatformNotFound),
                ..AnswerResult::plain(
                    "I couldn't identify which CDP platform you're asking about. Please \
                     specify if your question is about Segment, mParticle, Lytics, or Zeotap.",
                )
            });
        };

        let Some(task) = self.interpreter.extract_task(&normalized) else {
            return Ok(AnswerResult {
                platform: Some(platform),
                error: Some(AnswerError::TaskNotFound),
                ..AnswerResult::plain(format!(
                    "I understand you're asking about {}, but could you please be more \
                     specific about what you'd like to do? For example, you can ask about \
                     setting up sources, creating profiles, building segments, or \
                     integrating data.",
                    platform.as_str()
                ))
            });
        };

        info!(platform = %platform, task = %task, "Classified question");

        let docs = match self.docs.get_relevant_docs(platform, task).await {
            Ok(docs) => docs,
            Err(e) => {
                error!(platform = %platform, task = %task, error = %e, "Documentation extraction failed");
                return Ok(AnswerResult {
                    platform: Some(platform),
                    task: Some(task),
                    error: Some(AnswerError::DocsFetchError),
                    ..AnswerResult::plain(fallback_response(platform, task))
                });
            }
        };

        if docs.is_empty() {
            return Ok(AnswerResult {
                platform: Some(platform),
                task: Some(task),
                error: Some(AnswerError::NoDocsFound),
                ..AnswerResult::plain(fallback_response(platform, task))
            });
        }

        // Surface the top-ranked sub-artifacts so the presentation layer
        // can append its optional display blocks
        let code_examples = docs
            .iter()
            .find(|d| !d.code_examples.is_empty())
            .map(|d| d.code_examples.clone())
            .unwrap_or_default();
        let api_details = docs.iter().find_map(|d| d.api_details.clone());

        Ok(AnswerResult {
            answer: format_answer(&docs),
            platform: Some(platform),
            task: Some(task),
            source_url: Some(platform.docs_home().to_string()),
            error: None,
            code_examples,
            api_details,
        })
    }
}

/// Combine snippets into a numbered answer body
fn format_answer(docs: &[DocumentSnippet]) -> String {
    if docs.is_empty() {
        return "I'm sorry, I couldn't find specific information about that. Please try \
                rephrasing your question or check the platform's documentation directly."
            .to_string();
    }

    let mut answer = String::from("Here's how you can do that:\n\n");
    for (i, doc) in docs.iter().enumerate() {
        answer.push_str(&format!("{}. {}\n", i + 1, doc.content));
    }
    answer
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdpbot_common::config::AppConfig;
    use cdpbot_common::model::{Platform, Task};
    use cdpbot_extraction::{LyticsExtractor, PlatformDocs};

    fn chatbot() -> Chatbot {
        let docs = DocsOrchestrator::new(&AppConfig::default()).unwrap();
        Chatbot::new(Arc::new(docs))
    }

    #[tokio::test]
    async fn test_unknown_platform_asks_for_one() {
        let bot = chatbot();
        let result = bot.get_answer("Tell me about segments").await;

        assert_eq!(result.error, Some(AnswerError::PlatformNotFound));
        assert!(result.platform.is_none());
        assert!(result.answer.contains("Segment, mParticle, Lytics, or Zeotap"));
    }

    #[tokio::test]
    async fn test_missing_task_asks_for_specifics() {
        let bot = chatbot();
        let result = bot.get_answer("zeotap pricing").await;

        assert_eq!(result.error, Some(AnswerError::TaskNotFound));
        assert_eq!(result.platform, Some(Platform::Zeotap));
        assert!(result.answer.contains("asking about zeotap"));
    }

    #[tokio::test]
    async fn test_what_is_resolves_but_yields_fallback() {
        // "what is" hits the generic action table, which has no
        // documentation mapping, so extraction is empty by construction
        let bot = chatbot();
        let result = bot.get_answer("What is mParticle?").await;

        assert_eq!(result.platform, Some(Platform::Mparticle));
        assert_eq!(result.task, Some(Task::WhatIs));
        assert_eq!(result.error, Some(AnswerError::NoDocsFound));
        assert!(result.answer.contains("having trouble accessing the documentation"));
    }

    #[tokio::test]
    async fn test_all_fetches_failing_yields_static_fallback() {
        let lytics = LyticsExtractor::new(&AppConfig::default())
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let extractors: Vec<Arc<dyn PlatformDocs>> = vec![Arc::new(lytics)];
        let bot = Chatbot::new(Arc::new(DocsOrchestrator::from_extractors(extractors)));

        let result = bot.get_answer("How do I build segments in Lytics?").await;

        assert_eq!(result.platform, Some(Platform::Lytics));
        assert_eq!(result.task, Some(Task::AudienceSegment));
        assert_eq!(result.error, Some(AnswerError::NoDocsFound));
        assert_eq!(
            result.answer,
            fallback_response(Platform::Lytics, Task::AudienceSegment)
        );
    }

    #[test]
    fn test_format_answer_numbers_snippets() {
        let docs = vec![
            DocumentSnippet::new("First step", "u1", 0.9),
            DocumentSnippet::new("Second step", "u2", 0.5),
        ];
        let answer = format_answer(&docs);

        assert!(answer.starts_with("Here's how you can do that:"));
        assert!(answer.contains("1. First step"));
        assert!(answer.contains("2. Second step"));
    }
}
