use std::path::Path;

use crate::commands::common::{
    format_quiz_lines, load_quizzes, open_store, quiz_to_list_item, QuizListItem,
};
use crate::error::CliError;

pub fn run_list(limit: usize, as_json: bool, data_dir: &Path) -> Result<(), CliError> {
    let store = open_store(data_dir)?;
    let mut quizzes = load_quizzes(&store);
    quizzes.truncate(limit);

    if as_json {
        let json_items = quizzes
            .iter()
            .map(quiz_to_list_item)
            .collect::<Vec<QuizListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
        return Ok(());
    }

    if quizzes.is_empty() {
        println!("No quizzes stored. Create one with `swot create`.");
        return Ok(());
    }

    for line in format_quiz_lines(&quizzes) {
        println!("{line}");
    }
    Ok(())
}
