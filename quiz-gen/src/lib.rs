//! # quiz-gen
//!
//! Stateless quiz synthesis for the VTA: one strict-JSON LLM call over a
//! conversation transcript, followed by structural repair (fence stripping,
//! key case-folding), strict schema validation, and truncation to the
//! requested question count.
//!
//! Independent of the conversation engine: [`QuizGenerator::generate`] never
//! touches any history store. All failures come back as a tagged
//! [`QuizError`] value so the route layer can branch on quiz failure
//! distinctly from chat failure.

use std::sync::Arc;

use llm_client::LlmClient;
use prompt::{quiz_instruction, quiz_request, ChatMessage};
use tracing::{error, info, instrument};

mod error;
mod repair;
mod types;

pub use error::{QuizError, Result};
pub use repair::{normalize_questions_key, parse_quiz, strip_code_fences};
pub use types::{CorrectAnswer, Quiz, QuizQuestion, OPTIONS_PER_QUESTION};

/// Sampling temperature for quiz generation.
pub const QUIZ_TEMPERATURE: f32 = 0.7;

/// Stateless quiz synthesizer over an [`LlmClient`].
pub struct QuizGenerator {
    llm: Arc<dyn LlmClient>,
}

impl QuizGenerator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Generates a quiz from a conversation transcript at the given
    /// difficulty, with exactly `question_count` questions.
    ///
    /// One backend call; the instruction tells the backend to fall back to a
    /// general-knowledge quiz when the transcript is short or empty. The raw
    /// reply goes through [`parse_quiz`]; every failure — transport, parse,
    /// schema — is logged and returned as a [`QuizError`].
    #[instrument(skip(self, transcript))]
    pub async fn generate(
        &self,
        transcript: &str,
        difficulty: &str,
        question_count: usize,
    ) -> Result<Quiz> {
        let messages = vec![
            ChatMessage::system(quiz_instruction(difficulty, question_count)),
            ChatMessage::user(quiz_request(transcript, difficulty)),
        ];

        let raw = self
            .llm
            .complete(messages, QUIZ_TEMPERATURE)
            .await
            .map_err(|e| {
                let cause = QuizError::BackendUnavailable(e.to_string());
                error!(error = %cause, "Quiz generation failed before parsing");
                cause
            })?;

        match parse_quiz(&raw, question_count) {
            Ok(quiz) => {
                info!(
                    title = %quiz.title,
                    questions = quiz.questions.len(),
                    "Quiz generated"
                );
                Ok(quiz)
            }
            Err(e) => {
                error!(error = %e, reply_len = raw.len(), "Quiz output rejected");
                Err(e)
            }
        }
    }
}
