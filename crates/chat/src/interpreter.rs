//! Question interpreter
//!
//! Normalizes free-text questions and classifies them into a platform and
//! a task category using ordered regular-expression pattern tables. Pure
//! and deterministic; absence is a `None`, never an error.

use cdpbot_common::model::{Platform, Task};
use regex_lite::Regex;

/// Paraphrases rewritten to the canonical "how to" during normalization
const PARAPHRASES: [&str; 3] = [r"how\s+do\s+you", r"how\s+can\s+i", r"how\s+do\s+i"];

/// Task-specific patterns, tried in order; the first matching task wins
const TASK_PATTERNS: [(Task, [&str; 4]); 4] = [
    (
        Task::SourceSetup,
        [
            r"set\s*up.*source",
            r"add.*source",
            r"create.*source",
            r"configure.*source",
        ],
    ),
    (
        Task::ProfileCreation,
        [
            r"create.*profile",
            r"set\s*up.*profile",
            r"build.*profile",
            r"establish.*profile",
        ],
    ),
    (
        Task::AudienceSegment,
        [
            r"build.*segment",
            r"create.*segment",
            r"define.*segment",
            r"set\s*up.*segment",
        ],
    ),
    (
        Task::DataIntegration,
        [
            r"integrate.*data",
            r"connect.*data",
            r"sync.*data",
            r"link.*data",
        ],
    ),
];

/// Generic action patterns, consulted only when no task pattern matched
const ACTION_PATTERNS: [(Task, &str); 5] = [
    (Task::HowTo, r"how\s+(?:do|can|should|would|to)\s+(?:i|we|you)"),
    (Task::WhatIs, r"what\s+(?:is|are)"),
    (Task::Setup, r"set\s*up|configure|install"),
    (Task::Create, r"create|make|build|establish"),
    (Task::Integrate, r"integrate|connect|link|sync"),
];

/// Free-text question classifier
pub struct QuestionInterpreter {
    paraphrases: Vec<Regex>,
    task_patterns: Vec<(Task, Vec<Regex>)>,
    action_patterns: Vec<(Task, Regex)>,
    platform_patterns: Vec<(Platform, Regex)>,
}

impl QuestionInterpreter {
    /// Compile the pattern tables
    pub fn new() -> Self {
        let paraphrases = PARAPHRASES
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect();

        let task_patterns = TASK_PATTERNS
            .iter()
            .map(|(task, patterns)| {
                let compiled = patterns
                    .iter()
                    .filter_map(|p| Regex::new(&format!("(?i){}", p)).ok())
                    .collect();
                (*task, compiled)
            })
            .collect();

        let action_patterns = ACTION_PATTERNS
            .iter()
            .filter_map(|(task, pattern)| {
                Regex::new(&format!("(?i){}", pattern)).map(|re| (*task, re)).ok()
            })
            .collect();

        let platform_patterns = Platform::ALL
            .iter()
            .filter_map(|platform| {
                Regex::new(&format!(r"(?i)\b{}\b", platform.as_str()))
                    .map(|re| (*platform, re))
                    .ok()
            })
            .collect();

        Self {
            paraphrases,
            task_patterns,
            action_patterns,
            platform_patterns,
        }
    }

    /// Normalize a question: lowercase, collapse whitespace runs, rewrite
    /// known paraphrases to the canonical "how to". Idempotent.
    pub fn normalize(&self, question: &str) -> String {
        let lowered = question.to_lowercase();
        let mut normalized = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

        for re in &self.paraphrases {
            normalized = re.replace_all(&normalized, "how to").into_owned();
        }

        normalized
    }

    /// Identify the platform a question is about: the first platform in
    /// the fixed declaration order whose name appears as a whole word.
    ///
    /// No disambiguation when several platforms are named; the
    /// declaration order decides.
    pub fn identify_platform(&self, normalized: &str) -> Option<Platform> {
        self.platform_patterns
            .iter()
            .find(|(_, re)| re.is_match(normalized))
            .map(|(platform, _)| *platform)
    }

    /// Extract the task a question asks about. Task-specific patterns are
    /// tried first in table order; the generic action table is the
    /// fallback.
    pub fn extract_task(&self, normalized: &str) -> Option<Task> {
        for (task, patterns) in &self.task_patterns {
            if patterns.iter().any(|re| re.is_match(normalized)) {
                return Some(*task);
            }
        }

        self.action_patterns
            .iter()
            .find(|(_, re)| re.is_match(normalized))
            .map(|(task, _)| *task)
    }
}

impl Default for QuestionInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_collapses() {
        let interpreter = QuestionInterpreter::new();
        assert_eq!(
            interpreter.normalize("  How   DO I   do this  "),
            "how to do this"
        );
    }

    #[test]
    fn test_normalize_rewrites_paraphrases() {
        let interpreter = QuestionInterpreter::new();
        assert_eq!(
            interpreter.normalize("How do you add a source?"),
            "how to add a source?"
        );
        assert_eq!(
            interpreter.normalize("How can I build segments?"),
            "how to build segments?"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let interpreter = QuestionInterpreter::new();
        let questions = [
            "How do I set up a source in Segment?",
            "What is mParticle?",
            "  BUILD   segments ",
        ];
        for q in questions {
            let once = interpreter.normalize(q);
            assert_eq!(interpreter.normalize(&once), once);
        }
    }

    #[test]
    fn test_identify_platform() {
        let interpreter = QuestionInterpreter::new();
        let normalized = interpreter.normalize("What is mParticle?");
        assert_eq!(
            interpreter.identify_platform(&normalized),
            Some(Platform::Mparticle)
        );
    }

    #[test]
    fn test_identify_platform_order_deterministic() {
        let interpreter = QuestionInterpreter::new();
        // Whichever order the names appear in, the fixed declaration
        // order decides
        assert_eq!(
            interpreter.identify_platform("is segment better than mparticle"),
            Some(Platform::Segment)
        );
        assert_eq!(
            interpreter.identify_platform("is mparticle better than segment"),
            Some(Platform::Segment)
        );
    }

    #[test]
    fn test_platform_name_must_be_a_whole_word() {
        let interpreter = QuestionInterpreter::new();
        // "segments" names no platform
        assert_eq!(interpreter.identify_platform("tell me about segments"), None);
    }

    #[test]
    fn test_extract_task_scenario_source_setup() {
        let interpreter = QuestionInterpreter::new();
        let normalized = interpreter.normalize("How do I set up a source in Segment?");
        assert_eq!(interpreter.extract_task(&normalized), Some(Task::SourceSetup));
        assert_eq!(
            interpreter.identify_platform(&normalized),
            Some(Platform::Segment)
        );
    }

    #[test]
    fn test_extract_task_specific_before_generic() {
        let interpreter = QuestionInterpreter::new();
        // "create" alone would hit the generic table, but the profile
        // pattern wins
        assert_eq!(
            interpreter.extract_task("create a profile in lytics"),
            Some(Task::ProfileCreation)
        );
    }

    #[test]
    fn test_extract_task_generic_fallback() {
        let interpreter = QuestionInterpreter::new();
        assert_eq!(interpreter.extract_task("what is mparticle?"), Some(Task::WhatIs));
        assert_eq!(interpreter.extract_task("install the sdk"), Some(Task::Setup));
    }

    #[test]
    fn test_extract_task_none_when_nothing_matches() {
        let interpreter = QuestionInterpreter::new();
        assert_eq!(interpreter.extract_task("zeotap pricing"), None);
    }

    #[test]
    fn test_audience_segment_patterns() {
        let interpreter = QuestionInterpreter::new();
        assert_eq!(
            interpreter.extract_task("build segments in lytics"),
            Some(Task::AudienceSegment)
        );
        assert_eq!(
            interpreter.extract_task("define a segment for my campaign"),
            Some(Task::AudienceSegment)
        );
    }

    #[test]
    fn test_data_integration_patterns() {
        let interpreter = QuestionInterpreter::new();
        assert_eq!(
            interpreter.extract_task("how to sync data with zeotap"),
            Some(Task::DataIntegration)
        );
    }
}
