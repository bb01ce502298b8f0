use std::path::Path;

use swot_core::export::render_export;

use crate::cli::ExportFormat;
use crate::commands::common::{load_quizzes, open_store};
use crate::error::CliError;

pub fn run_export(
    format: ExportFormat,
    output_path: Option<&Path>,
    data_dir: &Path,
) -> Result<(), CliError> {
    let store = open_store(data_dir)?;
    let quizzes = load_quizzes(&store);
    let rendered = render_export(&quizzes, format.into())?;

    if let Some(path) = output_path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
