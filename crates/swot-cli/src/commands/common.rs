use std::io::{self, IsTerminal, Read};
use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use swot_core::store::{ChunkedStore, FileStore};
use swot_core::Quiz;

use crate::error::CliError;

/// Logical storage key for the whole local collection
pub const QUIZZES_KEY: &str = "quizzes";

/// Open the chunked local store rooted in the data directory
pub fn open_store(data_dir: &Path) -> Result<ChunkedStore<FileStore>, CliError> {
    Ok(ChunkedStore::new(FileStore::open(data_dir)?))
}

/// Load the local collection, falling back to empty when nothing is
/// stored or the stored blob cannot be read back
pub fn load_quizzes(store: &ChunkedStore<FileStore>) -> Vec<Quiz> {
    store.load_or_default(QUIZZES_KEY)
}

/// Persist the whole collection wholesale
pub fn save_quizzes(
    store: &mut ChunkedStore<FileStore>,
    quizzes: &[Quiz],
) -> Result<(), CliError> {
    store.save(QUIZZES_KEY, quizzes)?;
    Ok(())
}

/// Resolve a quiz by exact ID or unique ID prefix
pub fn resolve_quiz_index(quizzes: &[Quiz], query: &str) -> Result<usize, CliError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CliError::EmptyQuizId);
    }

    let matching: Vec<usize> = quizzes
        .iter()
        .enumerate()
        .filter(|(_, quiz)| quiz.id.as_str().starts_with(query))
        .map(|(index, _)| index)
        .collect();

    match matching.len() {
        0 => Err(CliError::QuizNotFound(query.to_string())),
        1 => Ok(matching[0]),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|&index| quizzes[index].id.as_str().chars().take(13).collect::<String>())
                .collect::<Vec<_>>()
                .join(", ");
            Err(CliError::AmbiguousQuizId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizListItem {
    pub id: String,
    pub title: String,
    pub category: String,
    pub questions: usize,
    pub version: u64,
    pub updated_at: i64,
    pub relative_time: String,
}

pub fn quiz_to_list_item(quiz: &Quiz) -> QuizListItem {
    let now_ms = Utc::now().timestamp_millis();
    QuizListItem {
        id: quiz.id.to_string(),
        title: quiz.title.clone(),
        category: quiz.category.clone(),
        questions: quiz.questions.len(),
        version: quiz.version,
        updated_at: quiz.updated_at,
        relative_time: format_relative_time(quiz.updated_at, now_ms),
    }
}

pub fn format_quiz_lines(quizzes: &[Quiz]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    quizzes
        .iter()
        .map(|quiz| {
            let short_id = quiz.id.as_str().chars().take(13).collect::<String>();
            let lock = if quiz.is_locked() { " [locked]" } else { "" };
            format!(
                "{short_id:<13}  {:<32}  {:>3} q  v{:<4}  {}{lock}",
                truncate(&quiz.title, 32),
                quiz.questions.len(),
                quiz.version,
                format_relative_time(quiz.updated_at, now_ms),
            )
        })
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    shortened.push_str("...");
    shortened
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else {
        format!("{}d ago", diff / day)
    }
}

/// Read input text from a file or piped stdin
pub fn read_input_text(path: Option<&Path>) -> Result<Option<String>, CliError> {
    if let Some(path) = path {
        return Ok(Some(std::fs::read_to_string(path)?));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    if buffer.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(buffer))
    }
}
