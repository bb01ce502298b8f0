//! Scored attempt model

use serde::{Deserialize, Serialize};

/// Outcome of a single question within an attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    /// Position of the question in the quiz
    pub question_index: usize,
    /// Choice the taker selected; `None` when unanswered or timed out
    pub selected: Option<usize>,
    /// The correct choice index
    pub correct_index: usize,
    /// Whether the selection matched
    pub is_correct: bool,
}

/// One scored run through a quiz, kept in the quiz's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    /// Questions answered correctly
    pub score: usize,
    /// Total questions asked
    pub total: usize,
    /// Per-question breakdown in question order
    pub outcomes: Vec<QuestionOutcome>,
    /// When the attempt finished (Unix ms)
    pub taken_at: i64,
}

impl Attempt {
    /// Score as a percentage, rounded down; 0 for an empty quiz
    #[must_use]
    pub const fn percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.score * 100 / self.total
        }
    }
}
