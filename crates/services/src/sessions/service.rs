use chrono::{DateTime, Utc};

use quiz_core::model::{Response, ScoreReport};

use super::plan::{PlannedQuestion, SessionPlan};
use crate::error::SessionError;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

/// In-memory state for one evaluation attempt.
///
/// Holds the fixed question sequence, a cursor, and the responses recorded
/// so far. Owned by the caller; restarting means constructing a fresh
/// session. Timestamps come from the caller's clock so tests stay
/// deterministic.
#[derive(Debug)]
pub struct SessionService {
    questions: Vec<PlannedQuestion>,
    current: usize,
    responses: Vec<Option<Response>>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl SessionService {
    /// Begin a session over the planned sequence, in progress at position 0.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the plan has no questions.
    pub fn start(plan: SessionPlan, started_at: DateTime<Utc>) -> Result<Self, SessionError> {
        if plan.is_empty() {
            return Err(SessionError::Empty);
        }

        let responses = vec![None; plan.total()];
        Ok(Self {
            questions: plan.questions,
            current: 0,
            responses,
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[PlannedQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Cursor position, in `[0, total)`.
    #[must_use]
    pub fn position(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&PlannedQuestion> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn response_at(&self, position: usize) -> Option<&Response> {
        self.responses.get(position).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Number of positions with a recorded response.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.responses.iter().filter(|r| r.is_some()).count()
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.total_questions();
        let answered = self.answered_count();
        SessionProgress {
            total,
            answered,
            remaining: total - answered,
            is_complete: self.is_complete(),
        }
    }

    /// Record (or overwrite) the response at a position; the cursor does not
    /// move. Overwriting supports "go back and change the answer".
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after completion and
    /// `SessionError::PositionOutOfRange` for a position past the sequence.
    pub fn record_response(
        &mut self,
        position: usize,
        response: Response,
    ) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        let len = self.responses.len();
        let slot = self
            .responses
            .get_mut(position)
            .ok_or(SessionError::PositionOutOfRange { position, len })?;
        *slot = Some(response);
        Ok(())
    }

    /// Record (or overwrite) the response at the cursor.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after completion.
    pub fn record_current(&mut self, response: Response) -> Result<(), SessionError> {
        let position = self.current;
        self.record_response(position, response)
    }

    /// Move the cursor forward; invoked at the last position this completes
    /// the session, freezing it at `now`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session already finished.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        } else {
            self.completed_at = Some(now);
        }
        Ok(())
    }

    /// Move the cursor back one position, floored at 0 (no-op at 0).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session already finished.
    pub fn retreat(&mut self) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        self.current = self.current.saturating_sub(1);
        Ok(())
    }

    /// Score the session as it stands.
    ///
    /// Valid while in progress (partial preview) or after completion;
    /// unanswered positions score as incorrect, never as an error.
    #[must_use]
    pub fn score(&self) -> ScoreReport {
        ScoreReport::from_answers(
            self.questions
                .iter()
                .map(|planned| &planned.question)
                .zip(self.responses.iter().map(Option::as_ref)),
        )
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Question, QuestionKind};
    use quiz_core::time::fixed_now;

    fn logic_plan() -> SessionPlan {
        // One single-choice question: options ["A", "B"], answer index 1.
        let question = Question::new(
            "Which one?",
            QuestionKind::SingleChoice {
                options: vec!["A".into(), "B".into()],
                answer: 1,
            },
        )
        .unwrap();
        SessionPlan {
            questions: vec![PlannedQuestion {
                question,
                source_topic: None,
            }],
        }
    }

    fn three_question_plan() -> SessionPlan {
        let questions = (0..3)
            .map(|i| PlannedQuestion {
                question: Question::new(format!("Q{i}"), QuestionKind::TrueFalse { answer: true })
                    .unwrap(),
                source_topic: None,
            })
            .collect();
        SessionPlan { questions }
    }

    #[test]
    fn empty_plan_cannot_start() {
        let err = SessionService::start(SessionPlan::default(), fixed_now()).unwrap_err();
        assert_eq!(err, SessionError::Empty);
    }

    #[test]
    fn correct_response_scores_one_of_one() {
        let mut session = SessionService::start(logic_plan(), fixed_now()).unwrap();
        session.record_response(0, Response::Choice(1)).unwrap();
        session.advance(fixed_now()).unwrap();

        assert!(session.is_complete());
        let report = session.score();
        assert_eq!((report.total(), report.correct()), (1, 1));
        assert_eq!(report.detail(), &[true]);
    }

    #[test]
    fn wrong_response_scores_zero_of_one() {
        let mut session = SessionService::start(logic_plan(), fixed_now()).unwrap();
        session.record_response(0, Response::Choice(0)).unwrap();
        session.advance(fixed_now()).unwrap();

        let report = session.score();
        assert_eq!((report.total(), report.correct()), (1, 0));
    }

    #[test]
    fn unanswered_position_scores_incorrect_without_error() {
        let mut session = SessionService::start(logic_plan(), fixed_now()).unwrap();
        session.advance(fixed_now()).unwrap();

        let report = session.score();
        assert_eq!((report.total(), report.correct()), (1, 0));
        assert_eq!(report.detail(), &[false]);
    }

    #[test]
    fn recording_overwrites_previous_response() {
        let mut session = SessionService::start(logic_plan(), fixed_now()).unwrap();
        session.record_current(Response::Choice(0)).unwrap();
        session.record_current(Response::Choice(1)).unwrap();
        session.advance(fixed_now()).unwrap();

        assert_eq!(session.score().correct(), 1);
    }

    #[test]
    fn advance_steps_then_completes_at_the_end() {
        let mut session = SessionService::start(three_question_plan(), fixed_now()).unwrap();
        assert_eq!(session.position(), 0);

        session.advance(fixed_now()).unwrap();
        session.advance(fixed_now()).unwrap();
        assert_eq!(session.position(), 2);
        assert!(!session.is_complete());

        session.advance(fixed_now()).unwrap();
        assert!(session.is_complete());
        assert_eq!(session.completed_at(), Some(fixed_now()));
        // Cursor is frozen where the session finished.
        assert_eq!(session.position(), 2);
    }

    #[test]
    fn retreat_is_floored_at_zero() {
        let mut session = SessionService::start(three_question_plan(), fixed_now()).unwrap();
        session.retreat().unwrap();
        assert_eq!(session.position(), 0);

        session.advance(fixed_now()).unwrap();
        session.retreat().unwrap();
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn completed_session_rejects_mutation() {
        let mut session = SessionService::start(logic_plan(), fixed_now()).unwrap();
        session.advance(fixed_now()).unwrap();

        assert_eq!(
            session.record_response(0, Response::Choice(1)),
            Err(SessionError::Completed)
        );
        assert_eq!(session.advance(fixed_now()), Err(SessionError::Completed));
        assert_eq!(session.retreat(), Err(SessionError::Completed));
    }

    #[test]
    fn recording_past_the_sequence_is_rejected() {
        let mut session = SessionService::start(logic_plan(), fixed_now()).unwrap();
        assert_eq!(
            session.record_response(3, Response::Choice(0)),
            Err(SessionError::PositionOutOfRange { position: 3, len: 1 })
        );
    }

    #[test]
    fn partial_score_previews_in_progress_state() {
        let mut session = SessionService::start(three_question_plan(), fixed_now()).unwrap();
        session.record_current(Response::Bool(true)).unwrap();

        let report = session.score();
        assert_eq!((report.total(), report.correct()), (3, 1));

        let progress = session.progress();
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.remaining, 2);
        assert!(!progress.is_complete);
    }
}
