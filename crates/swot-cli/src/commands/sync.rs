use std::env;
use std::path::Path;

use crate::client::ApiClient;
use crate::commands::common::{load_quizzes, open_store, save_quizzes};
use crate::error::CliError;

pub async fn run_sync(server: Option<&str>, data_dir: &Path) -> Result<(), CliError> {
    let server = resolve_server(server)?;
    let client = ApiClient::new(server)?;
    let mut store = open_store(data_dir)?;
    let local = load_quizzes(&store);

    let outcome = client.sync(&local).await?;
    tracing::debug!(
        sent = local.len(),
        received = outcome.quizzes.len(),
        "sync response received"
    );

    // The server response is the reconciled whole; adopt it wholesale so
    // both sides hold the same collection afterwards.
    save_quizzes(&mut store, &outcome.quizzes)?;

    println!(
        "Sync completed: {} quizzes ({} added, {} updated, {} stale, {} rejected)",
        outcome.quizzes.len(),
        outcome.report.added.len(),
        outcome.report.updated.len(),
        outcome.report.skipped_stale.len(),
        outcome.report.rejected.len()
    );
    for (index, reason) in &outcome.report.rejected {
        eprintln!("  record {index} rejected: {reason}");
    }
    Ok(())
}

fn resolve_server(flag: Option<&str>) -> Result<String, CliError> {
    if let Some(server) = flag {
        return Ok(server.to_string());
    }
    env::var("SWOT_SERVER_URL")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or(CliError::SyncNotConfigured)
}
