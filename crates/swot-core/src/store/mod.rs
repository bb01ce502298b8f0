//! Key-value persistence for the client-side quiz collection.
//!
//! [`StoragePort`] abstracts the backend (memory for tests and the api's
//! volatile mode, one-file-per-key on disk for the CLI). [`ChunkedStore`]
//! sits on top and transparently splits payloads that exceed a per-entry
//! size ceiling into numbered chunks, reassembling them on load.

mod chunked;
mod file;
mod memory;

pub use chunked::ChunkedStore;
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// A string key-value backend with a bounded per-entry size.
///
/// Implementations must report a missing key as `Ok(None)`, never as an
/// empty string, and surface quota rejections as
/// [`Error::StorageCapacity`](crate::Error::StorageCapacity).
pub trait StoragePort {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous entry.
    fn put(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the entry under `key`. Removing a missing key is a no-op.
    fn remove(&mut self, key: &str) -> Result<()>;
}
