//! cdpbot Chat Core
//!
//! Turns free-text questions into answers:
//! - The question interpreter normalizes and classifies questions into a
//!   platform and task via regular-expression pattern tables
//! - The chatbot wires interpreter and docs orchestrator together and
//!   assembles the answer, degrading to hand-authored fallback text when
//!   extraction comes back empty or fails

pub mod chatbot;
pub mod fallback;
pub mod interpreter;

pub use chatbot::Chatbot;
pub use interpreter::QuestionInterpreter;
