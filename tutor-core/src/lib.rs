//! # tutor-core
//!
//! Core types and infrastructure for the VTA (Virtual Teaching Assistant):
//! [`ConversationId`], the chat-side error taxonomy, and tracing
//! initialization. Transport-agnostic; used by tutor-engine, quiz-gen,
//! and tutor-cli.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{Result, TutorError};
pub use logger::init_tracing;
pub use types::ConversationId;
