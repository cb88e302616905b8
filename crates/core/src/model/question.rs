use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::response::Response;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyPrompt,

    #[error("'options' must be a non-empty list")]
    NoOptions,

    #[error("answer index {index} is out of range for {len} options")]
    AnswerOutOfRange { index: usize, len: usize },
}

//
// ─── QUESTION KIND ─────────────────────────────────────────────────────────────
//

/// The four evaluable question variants, each carrying its answer key.
///
/// Keeping the key inside the variant makes evaluation exhaustive: there is
/// no "unknown type" left to dispatch on once a `Question` exists. Type tags
/// outside this set are rejected when the bank is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Exactly one correct option, identified by index.
    SingleChoice {
        options: Vec<String>,
        answer: usize,
    },
    /// A set of correct option indices; credit requires an exact match.
    MultipleChoice {
        options: Vec<String>,
        answer: BTreeSet<usize>,
    },
    /// True/false statement.
    TrueFalse { answer: bool },
    /// Free text, compared ignoring case and surrounding whitespace.
    FreeText { answer: String },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One evaluable item of the bank.
///
/// Construction validates the invariants the evaluator relies on, so
/// `evaluate` and `correct_answer_text` never have to handle malformed keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    kind: QuestionKind,
}

impl Question {
    /// Create a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` if the prompt is blank,
    /// `QuestionError::NoOptions` if a choice variant has no options, and
    /// `QuestionError::AnswerOutOfRange` if any answer index does not point
    /// into the options list.
    pub fn new(prompt: impl Into<String>, kind: QuestionKind) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        match &kind {
            QuestionKind::SingleChoice { options, answer } => {
                check_options(options)?;
                check_index(*answer, options.len())?;
            }
            QuestionKind::MultipleChoice { options, answer } => {
                check_options(options)?;
                for &index in answer {
                    check_index(index, options.len())?;
                }
            }
            QuestionKind::TrueFalse { .. } | QuestionKind::FreeText { .. } => {}
        }

        Ok(Self { prompt, kind })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Option labels for choice variants, `None` otherwise.
    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            QuestionKind::SingleChoice { options, .. }
            | QuestionKind::MultipleChoice { options, .. } => Some(options),
            QuestionKind::TrueFalse { .. } | QuestionKind::FreeText { .. } => None,
        }
    }

    /// Score a response against this question's answer key.
    ///
    /// Total over all inputs: an absent response, or a response whose shape
    /// does not match the question kind, scores `false` rather than failing.
    #[must_use]
    pub fn evaluate(&self, response: Option<&Response>) -> bool {
        let Some(response) = response else {
            return false;
        };

        match (&self.kind, response) {
            (QuestionKind::SingleChoice { answer, .. }, Response::Choice(choice)) => {
                choice == answer
            }
            (QuestionKind::MultipleChoice { answer, .. }, Response::Selection(selection)) => {
                // Exact set match only; no partial credit for subsets or supersets.
                !selection.is_empty() && selection == answer
            }
            (QuestionKind::TrueFalse { answer }, Response::Bool(value)) => value == answer,
            (QuestionKind::FreeText { answer }, Response::Text(text)) => {
                text.trim().to_lowercase() == answer.trim().to_lowercase()
            }
            _ => false,
        }
    }

    /// Human-readable rendering of the correct answer for the results view.
    ///
    /// Choice variants resolve indices to option labels; the other variants
    /// stringify the stored key.
    #[must_use]
    pub fn correct_answer_text(&self) -> String {
        match &self.kind {
            // Indices were validated in `new`, so label lookups cannot miss.
            QuestionKind::SingleChoice { options, answer } => options[*answer].clone(),
            QuestionKind::MultipleChoice { options, answer } => answer
                .iter()
                .map(|&index| options[index].as_str())
                .collect::<Vec<_>>()
                .join(", "),
            QuestionKind::TrueFalse { answer } => answer.to_string(),
            QuestionKind::FreeText { answer } => answer.clone(),
        }
    }
}

fn check_options(options: &[String]) -> Result<(), QuestionError> {
    if options.is_empty() {
        return Err(QuestionError::NoOptions);
    }
    Ok(())
}

fn check_index(index: usize, len: usize) -> Result<(), QuestionError> {
    if index >= len {
        return Err(QuestionError::AnswerOutOfRange { index, len });
    }
    Ok(())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn single(options: &[&str], answer: usize) -> Question {
        Question::new(
            "Pick one",
            QuestionKind::SingleChoice {
                options: options.iter().map(ToString::to_string).collect(),
                answer,
            },
        )
        .unwrap()
    }

    fn multiple(options: &[&str], answer: &[usize]) -> Question {
        Question::new(
            "Pick all that apply",
            QuestionKind::MultipleChoice {
                options: options.iter().map(ToString::to_string).collect(),
                answer: answer.iter().copied().collect(),
            },
        )
        .unwrap()
    }

    #[test]
    fn rejects_blank_prompt() {
        let err = Question::new("   ", QuestionKind::TrueFalse { answer: true }).unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }

    #[test]
    fn rejects_empty_options() {
        let err = Question::new(
            "Pick one",
            QuestionKind::SingleChoice {
                options: vec![],
                answer: 0,
            },
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::NoOptions);
    }

    #[test]
    fn rejects_out_of_range_single_answer() {
        let err = Question::new(
            "Pick one",
            QuestionKind::SingleChoice {
                options: vec!["A".into(), "B".into()],
                answer: 5,
            },
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::AnswerOutOfRange { index: 5, len: 2 });
    }

    #[test]
    fn rejects_out_of_range_multiple_answer() {
        let err = Question::new(
            "Pick all",
            QuestionKind::MultipleChoice {
                options: vec!["A".into(), "B".into()],
                answer: [0, 2].into_iter().collect(),
            },
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::AnswerOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn single_choice_matches_exact_index() {
        let q = single(&["A", "B"], 1);
        assert!(q.evaluate(Some(&Response::Choice(1))));
        assert!(!q.evaluate(Some(&Response::Choice(0))));
        assert!(!q.evaluate(Some(&Response::Choice(5))));
        assert!(!q.evaluate(None));
    }

    #[test]
    fn multiple_choice_requires_exact_set() {
        let q = multiple(&["A", "B", "C"], &[0, 2]);
        assert!(q.evaluate(Some(&Response::selection([2, 0]))));
        // Subset and superset both fail.
        assert!(!q.evaluate(Some(&Response::selection([0]))));
        assert!(!q.evaluate(Some(&Response::selection([0, 1, 2]))));
        assert!(!q.evaluate(Some(&Response::selection([]))));
        assert!(!q.evaluate(None));
    }

    #[test]
    fn true_false_matches_value() {
        let q = Question::new("Is it so?", QuestionKind::TrueFalse { answer: false }).unwrap();
        assert!(q.evaluate(Some(&Response::Bool(false))));
        assert!(!q.evaluate(Some(&Response::Bool(true))));
        assert!(!q.evaluate(None));
    }

    #[test]
    fn free_text_ignores_case_and_surrounding_whitespace() {
        let q = Question::new(
            "Capital of France?",
            QuestionKind::FreeText {
                answer: "paris".into(),
            },
        )
        .unwrap();
        assert!(q.evaluate(Some(&Response::text("  Paris "))));
        assert!(!q.evaluate(Some(&Response::text("Paris!"))));
        assert!(!q.evaluate(None));
    }

    #[test]
    fn free_text_empty_key_matches_empty_response() {
        // Literal rule preserved from the source behavior: trimmed equality,
        // so a blank response matches a blank key.
        let q = Question::new(
            "Leave blank",
            QuestionKind::FreeText { answer: " ".into() },
        )
        .unwrap();
        assert!(q.evaluate(Some(&Response::text(""))));
        assert!(q.evaluate(Some(&Response::text("   "))));
        assert!(!q.evaluate(None));
    }

    #[test]
    fn mismatched_response_shape_scores_false() {
        let q = single(&["A", "B"], 0);
        assert!(!q.evaluate(Some(&Response::text("A"))));
        assert!(!q.evaluate(Some(&Response::Bool(true))));
    }

    #[test]
    fn correct_answer_text_resolves_labels() {
        assert_eq!(single(&["A", "B"], 1).correct_answer_text(), "B");
        assert_eq!(
            multiple(&["A", "B", "C"], &[0, 2]).correct_answer_text(),
            "A, C"
        );

        let tf = Question::new("Is it so?", QuestionKind::TrueFalse { answer: true }).unwrap();
        assert_eq!(tf.correct_answer_text(), "true");

        let text = Question::new(
            "Capital?",
            QuestionKind::FreeText {
                answer: "Paris".into(),
            },
        )
        .unwrap();
        assert_eq!(text.correct_answer_text(), "Paris");
    }
}
