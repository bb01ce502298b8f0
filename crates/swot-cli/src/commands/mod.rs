//! CLI command implementations

pub mod common;
pub mod completions;
pub mod create;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod show;
pub mod sync;
pub mod take;
