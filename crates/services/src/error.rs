//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuestionError;

/// Errors emitted while loading a question bank.
///
/// Loading is all-or-nothing: any of these aborts the load and no partial
/// bank is ever returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("question bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// A schema rule violated by a specific part of the question bank.
///
/// Validation is fail-fast: the first violation is reported, with the topic
/// name and the 1-based question index where applicable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemaError {
    #[error("question bank must have a 'topics' object at the root")]
    MissingTopics,

    #[error("topic names cannot be empty")]
    EmptyTopicName,

    #[error("topic '{topic}' must contain a list of questions")]
    TopicNotAList { topic: String },

    #[error("question {index} in '{topic}' is not an object")]
    NotAnObject { topic: String, index: usize },

    #[error("question {index} in '{topic}' has malformed fields: {source}")]
    MalformedFields {
        topic: String,
        index: usize,
        source: serde_json::Error,
    },

    #[error("question {index} in '{topic}': unknown question type '{kind}'")]
    UnknownKind {
        topic: String,
        index: usize,
        kind: String,
    },

    #[error("question {index} in '{topic}': 'answer' must be {expected}")]
    BadAnswer {
        topic: String,
        index: usize,
        expected: &'static str,
    },

    #[error("question {index} in '{topic}': {source}")]
    InvalidQuestion {
        topic: String,
        index: usize,
        source: QuestionError,
    },
}

/// Errors emitted by the session state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions selected for session")]
    Empty,

    #[error("session is already completed")]
    Completed,

    #[error("position {position} is out of range for {len} questions")]
    PositionOutOfRange { position: usize, len: usize },
}
