//! In-memory quiz store

use crate::db::QuizStore;
use crate::error::{Error, Result};
use crate::models::{Quiz, QuizId};

/// Vec-backed `QuizStore` keeping insertion order, for the api's
/// volatile mode and for tests
#[derive(Debug, Default)]
pub struct MemoryQuizStore {
    quizzes: Vec<Quiz>,
}

impl MemoryQuizStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuizStore for MemoryQuizStore {
    fn list(&self) -> Result<Vec<Quiz>> {
        Ok(self.quizzes.clone())
    }

    fn get(&self, id: &QuizId) -> Result<Option<Quiz>> {
        Ok(self.quizzes.iter().find(|quiz| quiz.id == *id).cloned())
    }

    fn upsert(&mut self, quiz: &Quiz) -> Result<()> {
        match self.quizzes.iter_mut().find(|held| held.id == quiz.id) {
            Some(held) => *held = quiz.clone(),
            None => self.quizzes.push(quiz.clone()),
        }
        Ok(())
    }

    fn delete(&mut self, id: &QuizId) -> Result<()> {
        let before = self.quizzes.len();
        self.quizzes.retain(|quiz| quiz.id != *id);

        if self.quizzes.len() == before {
            return Err(Error::NotFound(id.to_string()));
        }

        Ok(())
    }
}
