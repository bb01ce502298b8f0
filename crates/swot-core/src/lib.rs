//! swot-core - Core library for swot
//!
//! This crate contains the shared models, reconciliation engine,
//! persistence layers, and scoring logic used by the swot API server
//! and CLI.

pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod reconcile;
pub mod scoring;
pub mod store;

pub use error::{Error, Result};
pub use models::{Quiz, QuizId};
pub use reconcile::{reconcile, MergeReport};
