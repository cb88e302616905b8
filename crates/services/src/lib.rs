#![forbid(unsafe_code)]

pub mod bank;
pub mod error;
pub mod sessions;

pub use quiz_core::Clock;

pub use bank::{load_from_path, load_from_str};
pub use error::{LoadError, SchemaError, SessionError};

pub use sessions::{
    ExamPlanner, PlannedQuestion, PracticePlanner, QuizService, SessionAnswerResult, SessionPlan,
    SessionProgress, SessionService,
};
