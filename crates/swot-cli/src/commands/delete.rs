use std::path::Path;

use crate::commands::common::{load_quizzes, open_store, resolve_quiz_index, save_quizzes};
use crate::error::CliError;

pub fn run_delete(id: &str, data_dir: &Path) -> Result<(), CliError> {
    let mut store = open_store(data_dir)?;
    let mut quizzes = load_quizzes(&store);
    let index = resolve_quiz_index(&quizzes, id)?;

    // Hard delete, no tombstone: a peer that never saw this delete can
    // reintroduce the quiz on the next sync.
    let removed = quizzes.remove(index);
    save_quizzes(&mut store, &quizzes)?;

    println!("{}", removed.id);
    Ok(())
}
