//! Integration tests for `QuizGenerator::generate`.
//!
//! Covers: fence-wrapped and capitalized-key repair, truncation of
//! over-produced quizzes, and the tagged failures for unparseable JSON,
//! schema violations, and under-production. Uses a canned-reply mock
//! LlmClient; does not call any real backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use llm_client::LlmClient;
use prompt::{ChatMessage, MessageRole};
use quiz_gen::{CorrectAnswer, QuizError, QuizGenerator};

/// Mock LLM returning one canned reply, capturing the request it received.
struct CannedLlm {
    reply: std::result::Result<String, String>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl CannedLlm {
    fn ok(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn err(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl LlmClient for CannedLlm {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        _temperature: f32,
    ) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(messages);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => anyhow::bail!("{message}"),
        }
    }
}

/// A valid quiz body with `n` questions, correct answers as indexes.
fn quiz_json(n: usize) -> String {
    let questions: Vec<String> = (1..=n)
        .map(|i| {
            format!(
                r#"{{"id": {i}, "question": "Question {i}?", "options": ["A{i}", "B{i}", "C{i}", "D{i}"], "correct_index": 0, "explanation": "Because."}}"#
            )
        })
        .collect();
    format!(
        r#"{{"title": "Sample Quiz", "questions": [{}]}}"#,
        questions.join(",")
    )
}

#[tokio::test]
async fn valid_reply_yields_validated_quiz() {
    let gen = QuizGenerator::new(CannedLlm::ok(&quiz_json(5)));
    let quiz = gen.generate("some transcript", "Easy", 5).await.unwrap();
    assert_eq!(quiz.title, "Sample Quiz");
    assert_eq!(quiz.questions.len(), 5);
    assert_eq!(quiz.questions[0].correct, CorrectAnswer::Index(0));
    assert_eq!(quiz.questions[0].correct_option_index(), Some(0));
}

#[tokio::test]
async fn overproduced_quiz_is_truncated_in_order() {
    let gen = QuizGenerator::new(CannedLlm::ok(&quiz_json(8)));
    let quiz = gen.generate("transcript", "Medium", 5).await.unwrap();
    assert_eq!(quiz.questions.len(), 5);
    for (i, q) in quiz.questions.iter().enumerate() {
        assert_eq!(q.question, format!("Question {}?", i + 1));
    }
}

#[tokio::test]
async fn fenced_reply_parses_like_unfenced() {
    let fenced = format!("```json\n{}\n```", quiz_json(3));
    let gen = QuizGenerator::new(CannedLlm::ok(&fenced));
    let quiz = gen.generate("transcript", "Hard", 3).await.unwrap();
    assert_eq!(quiz.questions.len(), 3);
}

#[tokio::test]
async fn capitalized_questions_key_is_normalized() {
    let reply = quiz_json(2).replace("\"questions\"", "\"Questions\"");
    let gen = QuizGenerator::new(CannedLlm::ok(&reply));
    let quiz = gen.generate("transcript", "Easy", 2).await.unwrap();
    assert_eq!(quiz.questions.len(), 2);
}

#[tokio::test]
async fn invalid_json_is_malformed_output_not_a_panic() {
    let gen = QuizGenerator::new(CannedLlm::ok("Sure! Here is your quiz: {title..."));
    let err = gen.generate("transcript", "Easy", 5).await.unwrap_err();
    assert!(matches!(err, QuizError::MalformedOutput(_)), "{err}");
}

#[tokio::test]
async fn wrong_option_count_is_schema_violation() {
    let reply = r#"{"title": "t", "questions": [
        {"id": 1, "question": "Q?", "options": ["A", "B", "C"], "correct_index": 0}
    ]}"#;
    let gen = QuizGenerator::new(CannedLlm::ok(reply));
    let err = gen.generate("transcript", "Easy", 1).await.unwrap_err();
    assert!(matches!(err, QuizError::SchemaViolation(_)), "{err}");
}

#[tokio::test]
async fn missing_questions_key_is_schema_violation() {
    let gen = QuizGenerator::new(CannedLlm::ok(r#"{"title": "no questions here"}"#));
    let err = gen.generate("transcript", "Easy", 5).await.unwrap_err();
    assert!(matches!(err, QuizError::SchemaViolation(_)), "{err}");
}

#[tokio::test]
async fn underproduced_quiz_is_schema_violation() {
    let gen = QuizGenerator::new(CannedLlm::ok(&quiz_json(3)));
    let err = gen.generate("transcript", "Easy", 5).await.unwrap_err();
    assert!(matches!(err, QuizError::SchemaViolation(_)), "{err}");
}

#[tokio::test]
async fn verbatim_option_as_correct_answer_validates() {
    let reply = r#"{"title": "t", "questions": [
        {"id": 1, "question": "Q?", "options": ["A", "B", "C", "D"], "correct": "C"}
    ]}"#;
    let gen = QuizGenerator::new(CannedLlm::ok(reply));
    let quiz = gen.generate("transcript", "Easy", 1).await.unwrap();
    assert_eq!(quiz.questions[0].correct_option_index(), Some(2));
}

#[tokio::test]
async fn correct_answer_matching_no_option_is_schema_violation() {
    let reply = r#"{"title": "t", "questions": [
        {"id": 1, "question": "Q?", "options": ["A", "B", "C", "D"], "correct": "E"}
    ]}"#;
    let gen = QuizGenerator::new(CannedLlm::ok(reply));
    let err = gen.generate("transcript", "Easy", 1).await.unwrap_err();
    assert!(matches!(err, QuizError::SchemaViolation(_)), "{err}");
}

#[tokio::test]
async fn backend_failure_is_backend_unavailable() {
    let gen = QuizGenerator::new(CannedLlm::err("request timed out"));
    let err = gen.generate("transcript", "Easy", 5).await.unwrap_err();
    assert!(matches!(err, QuizError::BackendUnavailable(_)), "{err}");
}

#[tokio::test]
async fn request_carries_difficulty_count_and_transcript() {
    let llm = CannedLlm::ok(&quiz_json(2));
    let gen = QuizGenerator::new(llm.clone());
    gen.generate("User: what is osmosis?", "Hard", 2)
        .await
        .unwrap();

    let request = llm.calls.lock().unwrap()[0].clone();
    assert_eq!(request.len(), 2);
    assert_eq!(request[0].role, MessageRole::System);
    assert!(request[0].content.contains("**Hard**"));
    assert!(request[0].content.contains("2-question quiz"));
    assert_eq!(request[1].role, MessageRole::User);
    assert!(request[1].content.contains("what is osmosis?"));
}
