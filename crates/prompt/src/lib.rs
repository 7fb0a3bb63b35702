//! # Prompt
//!
//! Pure prompt formatting for the VTA (Virtual Teaching Assistant).
//!
//! Owns the chat message primitives ([`MessageRole`], [`ChatMessage`]), the
//! learner context bundle ([`LearnerContext`]), and the builders for every
//! instruction string the engine sends to the LLM:
//!
//! - [`system_instruction`] — the emotion- and topic-aware tutoring prompt
//! - [`quiz_instruction`] / [`quiz_request`] — the strict-JSON quiz prompt pair
//! - [`welcome_message`] / [`topic_acknowledgment`] — fixed session texts the
//!   route layer sends on session creation and topic selection
//!
//! Everything here is a pure function of its inputs: identical inputs produce
//! byte-identical output. No dependencies, no I/O, no state.
//!
//! ## External interactions
//!
//! - **AI models**: instruction strings are sent to an OpenAI-compatible
//!   chat-completions API by the `llm-client` crate.

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of the API `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Per-call learner context, supplied fresh by the route layer and never
/// persisted here. `emotion` is whatever label the external classifier
/// produced; unrecognized labels fall into the affirming tone band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnerContext {
    /// Free-text description of the learner (e.g. "a third-year CS student").
    pub context: String,
    /// Free-text interests, used for the opening analogy.
    pub interests: String,
    /// Session topic; `None` means general tutoring.
    pub topic: Option<String>,
    /// Detected emotion label (e.g. "Sad", "bored", "Neutral").
    pub emotion: String,
}

impl LearnerContext {
    pub fn new(context: impl Into<String>, interests: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            interests: interests.into(),
            topic: None,
            emotion: "Neutral".to_string(),
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotion = emotion.into();
        self
    }
}

impl Default for LearnerContext {
    fn default() -> Self {
        Self::new("a student", "learning")
    }
}

/// Coarse response-style category derived from the detected emotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneBand {
    /// Sad, angry, or confused: gentle and supportive.
    Supportive,
    /// Bored: energetic and challenging.
    Energizing,
    /// Happy, neutral, focused, or anything unrecognized: academic and encouraging.
    Affirming,
}

impl ToneBand {
    /// Classifies an emotion label, case-insensitively. Unrecognized labels
    /// default to [`ToneBand::Affirming`].
    pub fn from_emotion(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "sad" | "angry" | "confused" => Self::Supportive,
            "bored" => Self::Energizing,
            _ => Self::Affirming,
        }
    }

    /// The tone directive embedded in the system instruction.
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::Supportive => {
                "Be gentle, patient, and supportive; acknowledge the difficulty before explaining."
            }
            Self::Energizing => {
                "Be energetic and challenging; pick up the pace and push the learner with something new."
            }
            Self::Affirming => {
                "Be academic and encouraging; affirm the learner's progress and build on it."
            }
        }
    }
}

/// Builds the tutoring system instruction from the learner context.
///
/// Pure function: no hidden state, no randomness. Encodes the tone band for
/// the detected emotion, the session topic (with an off-topic redirect rule)
/// or general tutoring, the interests-based opening analogy, and the fixed
/// response shape (opener, interest bridge, headed body, closing question).
pub fn system_instruction(ctx: &LearnerContext) -> String {
    let tone = ToneBand::from_emotion(&ctx.emotion);
    let mut out = String::new();

    out.push_str("You are the **Emotion-Aware Virtual Teaching Assistant (VTA)**. ");
    out.push_str(&format!(
        "Learner context: {}. Interests: {}. ",
        ctx.context, ctx.interests
    ));
    out.push_str(&format!(
        "Current emotional state: **{}**. {} ",
        ctx.emotion,
        tone.guidance()
    ));

    match &ctx.topic {
        Some(topic) => out.push_str(&format!(
            "This session's topic is \"{topic}\". Keep the discussion on \"{topic}\"; \
             if the learner asks about something unrelated, gently redirect them back to \"{topic}\". "
        )),
        None => out.push_str(
            "This is a general tutoring session; help the learner with whatever they want to study. ",
        ),
    }

    out.push_str(&format!(
        "Open with an analogy drawn from the learner's interests ({}). ",
        ctx.interests
    ));
    out.push_str(
        "Shape every reply as: an attention-grabbing opening line, a bridge linking the subject \
         to the learner's interests, body content under clear Markdown headings, and a closing \
         reflective question or challenge. Always use Markdown formatting.",
    );

    out
}

/// Builds the quiz-generator system instruction.
///
/// Demands strictly valid raw JSON (no prose, no code fences), the fixed
/// top-level shape, exactly 4 options per question, and exactly
/// `question_count` questions. Short or empty transcripts fall back to a
/// general-knowledge quiz at the requested difficulty.
pub fn quiz_instruction(difficulty: &str, question_count: usize) -> String {
    format!(
        "You are a strict Quiz Generator API. \
         Your task is to generate a {question_count}-question quiz based on the provided CHAT TRANSCRIPT. \
         The difficulty level MUST be: **{difficulty}**.\n\
         If the transcript is short or empty, generate a General Knowledge quiz at this difficulty level. \
         Output MUST be strictly valid raw JSON. No markdown formatting. No code fences. No extra text. \
         Every question MUST have exactly 4 options. \
         The \"questions\" array MUST contain exactly {question_count} questions.\
         \n\nJSON structure:\
         \n{{\
         \n  \"title\": \"Subject of the Quiz\",\
         \n  \"questions\": [\
         \n    {{\
         \n      \"id\": 1,\
         \n      \"question\": \"Question?\",\
         \n      \"options\": [\"A\", \"B\", \"C\", \"D\"],\
         \n      \"correct_index\": 0,\
         \n      \"explanation\": \"Brief explanation.\"\
         \n    }}\
         \n  ]\
         \n}}"
    )
}

/// Builds the user message paired with [`quiz_instruction`].
pub fn quiz_request(transcript: &str, difficulty: &str) -> String {
    format!(
        "Generate a {difficulty} level quiz based on this transcript:\n\n{transcript}\n\n\
         Ensure the questions align with the '{difficulty}' difficulty level."
    )
}

/// Fixed welcome text sent when the route layer opens a new session.
pub fn welcome_message(username: &str) -> String {
    format!(
        "Hello {username}! 👋 Welcome to your new learning session. \
         I'm your Emotion-Aware Virtual Teaching Assistant.\n\n\
         What would you like to study today? Please tell me the topic or subject \
         you want to focus on in this session."
    )
}

/// Fixed acknowledgment text sent when the learner sets the session topic.
pub fn topic_acknowledgment(topic: &str) -> String {
    format!(
        "Perfect! Let's dive into **{topic}**. I'm here to help you learn and \
         understand this topic thoroughly. What would you like to know first?"
    )
}

/// Session title derived from the topic: truncated to 50 characters with an
/// ellipsis, as shown in the session list.
pub fn session_title(topic: &str) -> String {
    if topic.chars().count() > 50 {
        let truncated: String = topic.chars().take(50).collect();
        format!("{truncated}...")
    } else {
        topic.to_string()
    }
}
