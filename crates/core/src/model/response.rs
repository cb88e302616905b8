use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A typed user response, mirroring the answer shapes of the question kinds.
///
/// This is the value the presentation layer hands back to the core; absence
/// of a response is modeled as `Option<Response>` at the session level, not
/// as a variant here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    /// Selected option index for a single-choice question.
    Choice(usize),
    /// Selected option indices for a multiple-choice question.
    Selection(BTreeSet<usize>),
    /// Answer to a true/false question.
    Bool(bool),
    /// Raw text for a free-text question.
    Text(String),
}

impl Response {
    /// Convenience constructor for a multiple-choice selection.
    #[must_use]
    pub fn selection(indices: impl IntoIterator<Item = usize>) -> Self {
        Self::Selection(indices.into_iter().collect())
    }

    /// Convenience constructor for a free-text response.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}
