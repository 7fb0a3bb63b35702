//! Quiz output types, one-to-one with the JSON contract the generator
//! demands from the backend.

use serde::{Deserialize, Serialize};

/// Number of options every question must carry.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// A validated quiz: title plus exactly the requested number of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(default)]
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

/// One multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(default)]
    pub id: i64,
    /// The question text. Accepts the `prompt` spelling some models produce.
    #[serde(alias = "prompt")]
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`, or one of the option strings verbatim.
    #[serde(rename = "correct_index", alias = "correct", alias = "answer")]
    pub correct: CorrectAnswer,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// The correct-answer indicator: either an index or a verbatim option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Index(usize),
    Text(String),
}

impl QuizQuestion {
    /// Resolves the correct answer to an index into `options`, if valid.
    pub fn correct_option_index(&self) -> Option<usize> {
        match &self.correct {
            CorrectAnswer::Index(i) if *i < self.options.len() => Some(*i),
            CorrectAnswer::Text(text) => self.options.iter().position(|o| o == text),
            _ => None,
        }
    }
}
