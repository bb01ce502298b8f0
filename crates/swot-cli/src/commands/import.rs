use std::path::Path;

use swot_core::export::parse_import;
use swot_core::reconcile::reconcile;

use crate::commands::common::{load_quizzes, open_store, read_input_text, save_quizzes};
use crate::error::CliError;

pub fn run_import(file: Option<&Path>, data_dir: &Path) -> Result<(), CliError> {
    let Some(text) = read_input_text(file)? else {
        return Err(CliError::EmptyContent);
    };
    let incoming = parse_import(&text)?;

    let mut store = open_store(data_dir)?;
    let mut quizzes = load_quizzes(&store);
    let report = reconcile(&mut quizzes, incoming);
    if report.changed() {
        save_quizzes(&mut store, &quizzes)?;
    }

    println!(
        "Imported: {} added, {} updated, {} stale, {} rejected",
        report.added.len(),
        report.updated.len(),
        report.skipped_stale.len(),
        report.rejected.len()
    );
    for (index, reason) in &report.rejected {
        eprintln!("  record {index} rejected: {reason}");
    }
    Ok(())
}
