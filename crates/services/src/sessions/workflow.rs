use rand::Rng;

use quiz_core::Clock;
use quiz_core::model::{QuestionBank, Response, ScoreReport};

use super::plan::{ExamPlanner, PracticePlanner};
use super::service::SessionService;
use crate::error::SessionError;

/// Result of answering the current question in a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionAnswerResult {
    pub is_complete: bool,
    /// Final score report, present once the session completed.
    pub report: Option<ScoreReport>,
}

/// Orchestrates session start and the answer-then-advance loop.
///
/// This is the surface the presentation layer talks to: it owns the clock
/// and the shuffle preference, while randomness stays an explicit parameter
/// so callers can pass a seeded RNG (production passes `rand::rng()`).
#[derive(Debug, Clone)]
pub struct QuizService {
    clock: Clock,
    shuffle: bool,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            shuffle: false,
        }
    }

    /// Enable or disable shuffling for practice sessions.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Start a practice session over one topic, capped at `limit` questions
    /// (`0` means no cap).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the topic is unknown or has no
    /// questions.
    pub fn start_practice<R: Rng + ?Sized>(
        &self,
        bank: &QuestionBank,
        topic: &str,
        limit: usize,
        rng: &mut R,
    ) -> Result<SessionService, SessionError> {
        let plan = PracticePlanner::new(bank, topic)
            .with_shuffle(self.shuffle)
            .with_limit(limit)
            .plan(rng);
        SessionService::start(plan, self.clock.now())
    }

    /// Start an exam session: one question per non-empty topic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the bank has no questions at all.
    pub fn start_exam<R: Rng + ?Sized>(
        &self,
        bank: &QuestionBank,
        rng: &mut R,
    ) -> Result<SessionService, SessionError> {
        let plan = ExamPlanner::new(bank).plan(rng);
        SessionService::start(plan, self.clock.now())
    }

    /// Record a response at the cursor, then advance; completing the last
    /// question yields the final report.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session already finished.
    pub fn answer_and_advance(
        &self,
        session: &mut SessionService,
        response: Response,
    ) -> Result<SessionAnswerResult, SessionError> {
        session.record_current(response)?;
        self.advance(session)
    }

    /// Advance without recording, leaving the current position unanswered.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session already finished.
    pub fn skip_and_advance(
        &self,
        session: &mut SessionService,
    ) -> Result<SessionAnswerResult, SessionError> {
        self.advance(session)
    }

    fn advance(&self, session: &mut SessionService) -> Result<SessionAnswerResult, SessionError> {
        session.advance(self.clock.now())?;
        let is_complete = session.is_complete();
        Ok(SessionAnswerResult {
            is_complete,
            report: is_complete.then(|| session.score()),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
