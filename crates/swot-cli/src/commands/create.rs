use std::path::Path;

use chrono::Utc;

use swot_core::{Quiz, QuizId};

use crate::commands::common::{load_quizzes, open_store, read_input_text, save_quizzes};
use crate::error::CliError;

pub fn run_create(file: Option<&Path>, data_dir: &Path) -> Result<(), CliError> {
    let Some(text) = read_input_text(file)? else {
        return Err(CliError::EmptyContent);
    };

    let mut quiz: Quiz = serde_json::from_str(&text)?;
    quiz.validate()?;

    // Authoring always mints fresh metadata, whatever the file carried.
    quiz.id = QuizId::new();
    quiz.version = 1;
    let now = Utc::now().timestamp_millis();
    quiz.created_at = now;
    quiz.updated_at = now;
    quiz.history.clear();

    let mut store = open_store(data_dir)?;
    let mut quizzes = load_quizzes(&store);
    quizzes.push(quiz.clone());
    save_quizzes(&mut store, &quizzes)?;

    println!("{}", quiz.id);
    Ok(())
}
