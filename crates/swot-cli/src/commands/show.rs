use std::path::Path;

use swot_core::Quiz;

use crate::commands::common::{load_quizzes, open_store, resolve_quiz_index};
use crate::error::CliError;

pub fn run_show(id: &str, as_json: bool, data_dir: &Path) -> Result<(), CliError> {
    let store = open_store(data_dir)?;
    let quizzes = load_quizzes(&store);
    let index = resolve_quiz_index(&quizzes, id)?;
    let quiz = &quizzes[index];

    if as_json {
        println!("{}", serde_json::to_string_pretty(quiz)?);
        return Ok(());
    }

    for line in format_quiz_details(quiz) {
        println!("{line}");
    }
    Ok(())
}

fn format_quiz_details(quiz: &Quiz) -> Vec<String> {
    let mut lines = vec![
        format!("{}  (v{})", quiz.title, quiz.version),
        format!("id: {}", quiz.id),
    ];
    if !quiz.description.is_empty() {
        lines.push(format!("description: {}", quiz.description));
    }
    if !quiz.category.is_empty() {
        lines.push(format!("category: {}", quiz.category));
    }
    lines.push(format!(
        "time limit: {}s per question; visibility: {}{}",
        quiz.time_limit_secs,
        if quiz.public { "public" } else { "private" },
        if quiz.is_locked() {
            "; password protected"
        } else {
            ""
        },
    ));

    lines.push(String::new());
    for (index, question) in quiz.questions.iter().enumerate() {
        lines.push(format!("{}. {}", index + 1, question.prompt));
        if let Some(url) = &question.image_url {
            lines.push(format!("   image: {url}"));
        }
        for (choice_index, choice) in question.choices.iter().enumerate() {
            lines.push(format!("   {}) {choice}", choice_index + 1));
        }
    }

    if !quiz.history.is_empty() {
        lines.push(String::new());
        lines.push(format!("attempts: {}", quiz.history.len()));
        for attempt in &quiz.history {
            lines.push(format!(
                "  {}/{} ({}%)",
                attempt.score,
                attempt.total,
                attempt.percent()
            ));
        }
    }

    lines
}
