use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use swot_core::Quiz;

use crate::commands::common::{load_quizzes, open_store, resolve_quiz_index, save_quizzes};
use crate::error::CliError;

pub fn run_edit(id: &str, data_dir: &Path) -> Result<(), CliError> {
    let mut store = open_store(data_dir)?;
    let mut quizzes = load_quizzes(&store);
    let index = resolve_quiz_index(&quizzes, id)?;
    let original = quizzes[index].clone();

    let initial = serde_json::to_string_pretty(&original)?;
    let edited_text = capture_editor_input(&initial)?;
    if edited_text.trim() == initial.trim() {
        println!("{}", original.id);
        return Ok(());
    }

    let mut edited: Quiz = serde_json::from_str(&edited_text)?;
    edited.validate()?;

    // Identity and lineage are not editable; the edit itself bumps the
    // version by exactly 1.
    edited.id = original.id;
    edited.created_at = original.created_at;
    edited.version = original.version;
    edited.touch();

    quizzes[index] = edited;
    save_quizzes(&mut store, &quizzes)?;

    println!("{}", quizzes[index].id);
    Ok(())
}

fn capture_editor_input(initial_content: &str) -> Result<String, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_quiz_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let edited = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(edited)
}

fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            // Fallback for editor commands with args, e.g. "code --wait"
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let mut command = Command::new(program);
            command.args(parts).arg(file_path);

            let status = command.status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

fn create_temp_quiz_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("swot-quiz-{}-{now}.json", std::process::id()))
}
