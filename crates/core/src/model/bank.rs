use std::collections::BTreeMap;

use crate::model::{Question, TopicName};

/// Topic-bucketed question bank.
///
/// Built once by the loader and treated as read-only afterwards; sessions
/// and planners only ever borrow from it. Topic iteration order is the name
/// order, which keeps seeded-RNG selection reproducible in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionBank {
    topics: BTreeMap<TopicName, Vec<Question>>,
}

impl QuestionBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a bucket of questions to a topic, replacing any existing bucket.
    pub fn insert_topic(&mut self, name: TopicName, questions: Vec<Question>) {
        self.topics.insert(name, questions);
    }

    /// Names of all topics, including empty ones.
    pub fn topic_names(&self) -> impl Iterator<Item = &TopicName> {
        self.topics.keys()
    }

    /// All topic buckets as `(name, questions)` pairs.
    pub fn topics(&self) -> impl Iterator<Item = (&TopicName, &[Question])> {
        self.topics.iter().map(|(name, qs)| (name, qs.as_slice()))
    }

    /// Questions for one topic; empty slice if the topic is unknown.
    #[must_use]
    pub fn questions(&self, topic: &str) -> &[Question] {
        self.topics.get(topic).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn contains_topic(&self, topic: &str) -> bool {
        self.topics.contains_key(topic)
    }

    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.topics.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
