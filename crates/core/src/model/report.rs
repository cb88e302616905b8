use serde::Serialize;

use crate::model::{Question, Response};

/// Aggregate score for a session, with per-question detail in sequence order.
///
/// Derived on demand; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    total: usize,
    correct: usize,
    detail: Vec<bool>,
}

impl ScoreReport {
    /// Score a sequence of `(question, response)` pairs.
    ///
    /// An absent response scores `false` through the evaluator; scoring is
    /// total and never fails.
    #[must_use]
    pub fn from_answers<'a>(
        answers: impl IntoIterator<Item = (&'a Question, Option<&'a Response>)>,
    ) -> Self {
        let mut detail = Vec::new();
        let mut correct = 0;
        for (question, response) in answers {
            let is_correct = question.evaluate(response);
            if is_correct {
                correct += 1;
            }
            detail.push(is_correct);
        }
        Self {
            total: detail.len(),
            correct,
            detail,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Per-question correctness, in question-sequence order.
    #[must_use]
    pub fn detail(&self) -> &[bool] {
        &self.detail
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.correct == self.total
    }
}
