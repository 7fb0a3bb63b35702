use thiserror::Error;

/// Quiz-side failure taxonomy. `generate` returns these as values so the
/// caller can branch on quiz failure distinctly from chat failure; nothing
/// here panics or escapes as an exception.
#[derive(Error, Debug)]
pub enum QuizError {
    /// Transport, auth, or timeout failure reaching the LLM backend.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend's output is not parseable as JSON, even after fence
    /// stripping.
    #[error("Malformed quiz output: {0}")]
    MalformedOutput(String),

    /// The JSON parsed but violates the quiz schema (missing fields, wrong
    /// option count, out-of-range answer, wrong question count).
    #[error("Quiz schema violation: {0}")]
    SchemaViolation(String),
}

pub type Result<T> = std::result::Result<T, QuizError>;
