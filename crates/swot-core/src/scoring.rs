//! Grading of answer sheets against a quiz.

use crate::error::{Error, Result};
use crate::models::{Attempt, QuestionOutcome, Quiz};

/// Grade an answer sheet against `quiz` and produce a scored attempt.
///
/// `answers` holds one entry per question in question order; `None` marks
/// a question left unanswered (e.g. the countdown ran out). A sheet with
/// the wrong length is rejected rather than padded.
pub fn grade(quiz: &Quiz, answers: &[Option<usize>]) -> Result<Attempt> {
    if answers.len() != quiz.questions.len() {
        return Err(Error::InvalidInput(format!(
            "expected {} answers, got {}",
            quiz.questions.len(),
            answers.len()
        )));
    }

    let mut outcomes = Vec::with_capacity(quiz.questions.len());
    for (question_index, (question, &selected)) in
        quiz.questions.iter().zip(answers.iter()).enumerate()
    {
        if let Some(choice) = selected {
            if choice >= question.choices.len() {
                return Err(Error::InvalidInput(format!(
                    "answer {choice} for question {question_index} is out of range"
                )));
            }
        }
        outcomes.push(QuestionOutcome {
            question_index,
            selected,
            correct_index: question.correct,
            is_correct: selected == Some(question.correct),
        });
    }

    let score = outcomes.iter().filter(|outcome| outcome.is_correct).count();
    Ok(Attempt {
        score,
        total: quiz.questions.len(),
        outcomes,
        taken_at: chrono::Utc::now().timestamp_millis(),
    })
}

/// Grade and append the attempt to the quiz's history as a content edit.
pub fn record_attempt(quiz: &mut Quiz, answers: &[Option<usize>]) -> Result<Attempt> {
    let attempt = grade(quiz, answers)?;
    quiz.history.push(attempt.clone());
    quiz.touch();
    Ok(attempt)
}
