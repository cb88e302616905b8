//! Question bank loading and schema validation.
//!
//! The wire format is a single JSON object:
//!
//! ```json
//! {
//!   "topics": {
//!     "Logic": [
//!       { "type": "single", "question": "...", "options": ["A", "B"], "answer": 1 }
//!     ]
//!   }
//! }
//! ```
//!
//! `type` is one of `single`, `multiple`, `tf`, `input`, and the shape of
//! `answer` follows it. The loader validates the whole document before
//! returning; it never hands out a partially valid bank.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use quiz_core::model::{Question, QuestionBank, QuestionKind, TopicName};

use crate::error::{LoadError, SchemaError};

/// Load and validate a question bank from a JSON file.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read, `LoadError::Parse`
/// if it is not valid JSON, and `LoadError::Schema` for any rule violation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<QuestionBank, LoadError> {
    let raw = fs::read_to_string(path)?;
    load_from_str(&raw)
}

/// Load and validate a question bank from a JSON string.
///
/// # Errors
///
/// Returns `LoadError::Parse` for malformed JSON and `LoadError::Schema`
/// for any rule violation.
pub fn load_from_str(raw: &str) -> Result<QuestionBank, LoadError> {
    let value: Value = serde_json::from_str(raw)?;
    Ok(from_value(&value)?)
}

/// Validate an already-parsed JSON document into a question bank.
///
/// Fail-fast: stops at the first violation and names the offending topic
/// and 1-based question index in the error.
///
/// # Errors
///
/// Returns `SchemaError` describing the first violated rule.
pub fn from_value(value: &Value) -> Result<QuestionBank, SchemaError> {
    let topics = value
        .get("topics")
        .and_then(Value::as_object)
        .ok_or(SchemaError::MissingTopics)?;

    let mut bank = QuestionBank::new();
    for (name, entries) in topics {
        let topic = TopicName::new(name.as_str()).map_err(|_| SchemaError::EmptyTopicName)?;
        let entries = entries
            .as_array()
            .ok_or_else(|| SchemaError::TopicNotAList {
                topic: name.clone(),
            })?;

        let mut questions = Vec::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            questions.push(parse_question(name, position + 1, entry)?);
        }
        bank.insert_topic(topic, questions);
    }

    Ok(bank)
}

/// Raw shape of one question entry; `answer` stays untyped until the
/// question type is known.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(rename = "type")]
    kind: Option<String>,
    question: Option<String>,
    options: Option<Vec<String>>,
    answer: Option<Value>,
}

fn parse_question(topic: &str, index: usize, entry: &Value) -> Result<Question, SchemaError> {
    if !entry.is_object() {
        return Err(SchemaError::NotAnObject {
            topic: topic.to_string(),
            index,
        });
    }

    let raw: RawQuestion =
        serde_json::from_value(entry.clone()).map_err(|source| SchemaError::MalformedFields {
            topic: topic.to_string(),
            index,
            source,
        })?;

    let answer = raw.answer.as_ref();
    let kind = match raw.kind.as_deref() {
        Some("single") => QuestionKind::SingleChoice {
            options: raw.options.unwrap_or_default(),
            answer: answer_index(topic, index, answer)?,
        },
        Some("multiple") => QuestionKind::MultipleChoice {
            options: raw.options.unwrap_or_default(),
            answer: answer_index_set(topic, index, answer)?,
        },
        Some("tf") => QuestionKind::TrueFalse {
            answer: answer
                .and_then(Value::as_bool)
                .ok_or_else(|| bad_answer(topic, index, "a boolean"))?,
        },
        Some("input") => QuestionKind::FreeText {
            answer: answer
                .and_then(Value::as_str)
                .ok_or_else(|| bad_answer(topic, index, "a string"))?
                .to_string(),
        },
        other => {
            return Err(SchemaError::UnknownKind {
                topic: topic.to_string(),
                index,
                kind: other.unwrap_or_default().to_string(),
            });
        }
    };

    // Missing prompt and missing options fall through as empty values, so
    // the core invariants produce the load-time rejection for them too.
    Question::new(raw.question.unwrap_or_default(), kind).map_err(|source| {
        SchemaError::InvalidQuestion {
            topic: topic.to_string(),
            index,
            source,
        }
    })
}

fn answer_index(topic: &str, index: usize, answer: Option<&Value>) -> Result<usize, SchemaError> {
    answer
        .and_then(Value::as_u64)
        .and_then(|i| usize::try_from(i).ok())
        .ok_or_else(|| bad_answer(topic, index, "an integer option index"))
}

fn answer_index_set(
    topic: &str,
    index: usize,
    answer: Option<&Value>,
) -> Result<BTreeSet<usize>, SchemaError> {
    let expected = "a list of integer option indices";
    let entries = answer
        .and_then(Value::as_array)
        .ok_or_else(|| bad_answer(topic, index, expected))?;

    entries
        .iter()
        .map(|entry| {
            entry
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .ok_or_else(|| bad_answer(topic, index, expected))
        })
        .collect()
}

fn bad_answer(topic: &str, index: usize, expected: &'static str) -> SchemaError {
    SchemaError::BadAnswer {
        topic: topic.to_string(),
        index,
        expected,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
