use thiserror::Error;

/// Chat-side failure taxonomy. `respond` absorbs all of these into the
/// fallback text; they exist so the absorption site can log what happened.
/// Quiz-side failures live in `quiz-gen` and are surfaced to the caller.
#[derive(Error, Debug)]
pub enum TutorError {
    /// Transport, auth, or timeout failure reaching the LLM backend.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend replied, but the content is empty, whitespace, or
    /// self-flagged as failed.
    #[error("Degraded response: {0}")]
    DegradedResponse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TutorError>;
