use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "swot")]
#[command(about = "Author quizzes, take them, and sync them across devices")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to the local data directory
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new quiz from a JSON file (stdin when omitted)
    #[command(alias = "new")]
    Create {
        /// Path to the quiz JSON
        #[arg(value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// List stored quizzes
    List {
        /// Number of quizzes to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one quiz in full
    Show {
        /// Quiz ID or unique ID prefix
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an existing quiz in $EDITOR
    Edit {
        /// Quiz ID or unique ID prefix
        id: String,
    },
    /// Take a quiz and record the scored attempt
    Take {
        /// Quiz ID or unique ID prefix
        id: String,
        /// Comma-separated 1-based answers, `-` for unanswered (e.g. `2,1,-,3`)
        #[arg(short, long, value_name = "SHEET")]
        answers: String,
        /// Password for locked quizzes
        #[arg(long, value_name = "PASSWORD")]
        password: Option<String>,
    },
    /// Delete a quiz
    Delete {
        /// Quiz ID or unique ID prefix
        id: String,
    },
    /// Export the quiz collection
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Import quizzes from an exported file (stdin when omitted)
    Import {
        /// Path to the exported text (plain or encoded, auto-detected)
        #[arg(value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Merge the local collection with a swot-api server
    Sync {
        /// Server base URL, e.g. http://127.0.0.1:8080 (falls back to SWOT_SERVER_URL)
        #[arg(long, value_name = "URL")]
        server: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Encoded,
}

impl From<ExportFormat> for swot_core::export::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Encoded => Self::Encoded,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
