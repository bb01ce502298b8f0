//! swot CLI - author quizzes, take them, and sync them across devices

mod cli;
mod client;
mod commands;
mod error;

use std::env;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands};
use commands::{completions, create, delete, edit, export, import, list, show, sync, take};
use error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("swot=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir);

    match cli.command {
        Some(Commands::Create { file }) => create::run_create(file.as_deref(), &data_dir)?,
        Some(Commands::List { limit, json }) => list::run_list(limit, json, &data_dir)?,
        Some(Commands::Show { id, json }) => show::run_show(&id, json, &data_dir)?,
        Some(Commands::Edit { id }) => edit::run_edit(&id, &data_dir)?,
        Some(Commands::Take {
            id,
            answers,
            password,
        }) => take::run_take(&id, &answers, password.as_deref(), &data_dir)?,
        Some(Commands::Delete { id }) => delete::run_delete(&id, &data_dir)?,
        Some(Commands::Export { format, output }) => {
            export::run_export(format, output.as_deref(), &data_dir)?;
        }
        Some(Commands::Import { file }) => import::run_import(file.as_deref(), &data_dir)?,
        Some(Commands::Sync { server }) => sync::run_sync(server.as_deref(), &data_dir).await?,
        Some(Commands::Completions { shell, output }) => {
            completions::run_completions(shell, output.as_deref())?;
        }
        None => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
        }
    }

    Ok(())
}

fn resolve_data_dir(cli_data_dir: Option<PathBuf>) -> PathBuf {
    cli_data_dir
        .or_else(|| env::var_os("SWOT_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(default_data_dir)
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("swot")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_data_dir_prefers_cli_flag() {
        let resolved = resolve_data_dir(Some(PathBuf::from("/tmp/override")));
        assert_eq!(resolved, PathBuf::from("/tmp/override"));
    }

    #[test]
    fn default_data_dir_ends_with_swot() {
        assert!(default_data_dir().ends_with("swot"));
    }
}
