mod plan;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use plan::{ExamPlanner, PlannedQuestion, PracticePlanner, SessionPlan};
pub use service::{SessionProgress, SessionService};
pub use workflow::{QuizService, SessionAnswerResult};
