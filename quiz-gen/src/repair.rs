//! Two-stage recovery of the backend's quiz output: permissive structural
//! repair (fence stripping, key case-folding) followed by strict schema
//! validation. The split keeps tolerance of a non-contractual backend out of
//! the validation rules.

use serde_json::Value;

use crate::error::{QuizError, Result};
use crate::types::{Quiz, OPTIONS_PER_QUESTION};

/// Strips code-fence markers models add despite instructions: a leading
/// ```` ``` ```` (optionally language-tagged) and a trailing ```` ``` ````.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut s = raw.trim();
    for fence in ["```json", "```JSON", "```"] {
        if let Some(rest) = s.strip_prefix(fence) {
            s = rest.trim_start();
            break;
        }
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest.trim_end();
    }
    s
}

/// Rebinds a case-variant top-level `questions` key (e.g. `"Questions"`) to
/// the canonical spelling. First case-insensitive match wins; an exact key
/// is left untouched.
pub fn normalize_questions_key(value: &mut Value) {
    let Some(obj) = value.as_object_mut() else {
        return;
    };
    if obj.contains_key("questions") {
        return;
    }
    let variant = obj
        .keys()
        .find(|k| k.eq_ignore_ascii_case("questions"))
        .cloned();
    if let Some(key) = variant {
        if let Some(questions) = obj.remove(&key) {
            obj.insert("questions".to_string(), questions);
        }
    }
}

/// Parses, repairs, validates, and count-enforces one raw backend reply.
///
/// Unparseable text → [`QuizError::MalformedOutput`]. Parseable but
/// structurally invalid (missing fields, option count ≠ 4, unresolvable
/// correct answer, fewer questions than requested) →
/// [`QuizError::SchemaViolation`]. Over-production is truncated to the first
/// `question_count` questions in original order.
pub fn parse_quiz(raw: &str, question_count: usize) -> Result<Quiz> {
    let stripped = strip_code_fences(raw);
    let mut value: Value = serde_json::from_str(stripped)
        .map_err(|e| QuizError::MalformedOutput(e.to_string()))?;

    normalize_questions_key(&mut value);

    let mut quiz: Quiz =
        serde_json::from_value(value).map_err(|e| QuizError::SchemaViolation(e.to_string()))?;

    validate(&quiz)?;

    if quiz.questions.len() < question_count {
        return Err(QuizError::SchemaViolation(format!(
            "expected {question_count} questions, backend produced {}",
            quiz.questions.len()
        )));
    }
    quiz.questions.truncate(question_count);
    Ok(quiz)
}

fn validate(quiz: &Quiz) -> Result<()> {
    for (i, q) in quiz.questions.iter().enumerate() {
        if q.question.trim().is_empty() {
            return Err(QuizError::SchemaViolation(format!(
                "question {i} has empty text"
            )));
        }
        if q.options.len() != OPTIONS_PER_QUESTION {
            return Err(QuizError::SchemaViolation(format!(
                "question {i} has {} options, expected {OPTIONS_PER_QUESTION}",
                q.options.len()
            )));
        }
        if q.correct_option_index().is_none() {
            return Err(QuizError::SchemaViolation(format!(
                "question {i} has a correct answer that matches no option"
            )));
        }
    }
    Ok(())
}
