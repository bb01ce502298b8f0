//! Database layer for swot

mod connection;
mod memory;
mod migrations;
mod repository;

pub use connection::Database;
pub use memory::MemoryQuizStore;
pub use repository::{sync_into, QuizStore, SqliteQuizStore};
