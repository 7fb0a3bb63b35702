//! # tutor-engine
//!
//! The adaptive conversation engine of the VTA: per-conversation bounded
//! [`HistoryStore`]s, the lazy [`SessionRegistry`] that owns them, and
//! [`TutorEngine::respond`] — one tutoring turn against the LLM backend with
//! fallback on failure.
//!
//! Quiz generation is a separate, stateless concern; see the `quiz-gen` crate.

pub mod engine;
pub mod history;
pub mod registry;

pub use engine::{TutorEngine, CHAT_TEMPERATURE, FALLBACK_TEXT};
pub use history::{HistoryStore, MAX_HISTORY};
pub use registry::SessionRegistry;
