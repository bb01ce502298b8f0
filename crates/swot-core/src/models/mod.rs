//! Data models for swot

mod attempt;
mod quiz;

pub use attempt::{Attempt, QuestionOutcome};
pub use quiz::{Question, Quiz, QuizId};
