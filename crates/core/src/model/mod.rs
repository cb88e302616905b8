mod bank;
mod question;
mod report;
mod response;
mod topic;

pub use bank::QuestionBank;
pub use question::{Question, QuestionError, QuestionKind};
pub use report::ScoreReport;
pub use response::Response;
pub use topic::{TopicError, TopicName};
