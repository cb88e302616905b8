use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use quiz_core::model::{Question, QuestionBank, TopicName};

/// A question drawn into a session sequence.
///
/// `source_topic` is the provenance tag for exam draws, which mix topics;
/// practice sequences come from a single chosen topic and carry no tag.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedQuestion {
    pub question: Question,
    pub source_topic: Option<TopicName>,
}

/// The ordered question sequence selected for one attempt.
///
/// Fixed once built; the session steps through it and never re-derives it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionPlan {
    pub questions: Vec<PlannedQuestion>,
}

impl SessionPlan {
    /// Total number of questions in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Returns true when no questions were selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Builds a practice sequence from one topic's bucket.
///
/// Selection is a pure function of the bank and the provided RNG; the bank
/// is never mutated. An unknown topic yields an empty plan, not an error.
pub struct PracticePlanner<'a> {
    bank: &'a QuestionBank,
    topic: &'a str,
    shuffle: bool,
    limit: usize,
}

impl<'a> PracticePlanner<'a> {
    #[must_use]
    pub fn new(bank: &'a QuestionBank, topic: &'a str) -> Self {
        Self {
            bank,
            topic,
            shuffle: false,
            limit: 0,
        }
    }

    /// Enable or disable shuffling of the topic's questions.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Cap the sequence length; `0` means no cap.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Build the practice plan.
    ///
    /// Shuffling is a Fisher-Yates permutation, uniform over orderings; the
    /// cap is applied after shuffling so a capped plan is a uniform draw.
    pub fn plan<R: Rng + ?Sized>(self, rng: &mut R) -> SessionPlan {
        let mut questions: Vec<Question> = self.bank.questions(self.topic).to_vec();
        if self.shuffle {
            questions.shuffle(rng);
        }
        if self.limit > 0 && questions.len() > self.limit {
            questions.truncate(self.limit);
        }

        SessionPlan {
            questions: questions
                .into_iter()
                .map(|question| PlannedQuestion {
                    question,
                    source_topic: None,
                })
                .collect(),
        }
    }
}

/// Builds an exam sequence: one uniform draw per non-empty topic, tagged
/// with its source topic, in a uniformly random overall order.
pub struct ExamPlanner<'a> {
    bank: &'a QuestionBank,
}

impl<'a> ExamPlanner<'a> {
    #[must_use]
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self { bank }
    }

    pub fn plan<R: Rng + ?Sized>(self, rng: &mut R) -> SessionPlan {
        let mut drawn = Vec::new();
        for (topic, questions) in self.bank.topics() {
            // `choose` returns None for an empty bucket, which contributes nothing.
            if let Some(question) = questions.choose(rng) {
                drawn.push(PlannedQuestion {
                    question: question.clone(),
                    source_topic: Some(topic.clone()),
                });
            }
        }
        drawn.shuffle(rng);

        SessionPlan { questions: drawn }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
