use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] swot_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No quiz content provided")]
    EmptyContent,
    #[error("Quiz ID cannot be empty")]
    EmptyQuizId,
    #[error("Quiz not found for id/prefix: {0}")]
    QuizNotFound(String),
    #[error("{0}")]
    AmbiguousQuizId(String),
    #[error("Invalid answer sheet: {0}")]
    InvalidAnswers(String),
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
    #[error("This quiz is password protected; pass --password")]
    PasswordRequired,
    #[error("Wrong password for this quiz")]
    WrongPassword,
    #[error("Sync request failed: {0}")]
    SyncTransport(#[from] reqwest::Error),
    #[error("Sync server error: {0}")]
    SyncServer(String),
    #[error("Sync is not configured. Pass --server or set SWOT_SERVER_URL.")]
    SyncNotConfigured,
}
