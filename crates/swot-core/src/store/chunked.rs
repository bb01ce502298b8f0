//! Chunked persistence adapter.
//!
//! Backends cap how large a single entry may be, so a save first
//! serializes the payload and then picks one of two physical layouts:
//!
//! - **direct**: the JSON stored under the logical key;
//! - **chunked**: fixed-size slices under `key:chunk:i`, the slice count
//!   under `key:chunks`, and a short sentinel under the logical key so a
//!   reader can tell the layouts apart without probing.
//!
//! Every save rewrites the blob wholesale and clears chunk entries left
//! over from a previous, larger save. A load that finds the sentinel but
//! not every recorded chunk fails hard rather than returning a truncated
//! payload.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::store::StoragePort;

/// Serialized payloads below this many characters are stored directly.
const DIRECT_LIMIT: usize = 2_000_000;

/// Characters per chunk entry when the direct limit is exceeded.
const CHUNK_SIZE: usize = 1_000_000;

/// Marker stored under the logical key for the chunked layout. The
/// leading NUL can never open a serialized JSON document, so a direct
/// payload is never mistaken for a sentinel. The chunk count follows the
/// prefix, redundant with the `key:chunks` entry.
const SENTINEL_PREFIX: &str = "\u{0}swot-chunked:";

/// Adapter storing serializable payloads through a [`StoragePort`],
/// chunking payloads too large for a single entry.
#[derive(Debug)]
pub struct ChunkedStore<P: StoragePort> {
    port: P,
    direct_limit: usize,
    chunk_size: usize,
}

impl<P: StoragePort> ChunkedStore<P> {
    /// Wrap a backend with the default size limits
    pub fn new(port: P) -> Self {
        Self::with_limits(port, DIRECT_LIMIT, CHUNK_SIZE)
    }

    /// Wrap a backend with tuned limits (mainly for tests); `chunk_size`
    /// must not be zero and must not exceed `direct_limit`
    pub fn with_limits(port: P, direct_limit: usize, chunk_size: usize) -> Self {
        debug_assert!(chunk_size > 0 && chunk_size <= direct_limit);
        Self {
            port,
            direct_limit,
            chunk_size,
        }
    }

    /// Borrow the underlying backend
    pub const fn port(&self) -> &P {
        &self.port
    }

    /// Serialize `value` and persist it under `key`, chunking if needed.
    ///
    /// Serialization failures and backend write rejections are returned
    /// as errors without leaving a partially written direct entry; stale
    /// chunks from an earlier larger save are always cleared.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let serialized = serde_json::to_string(value)?;
        let previous_chunks = self.stored_chunk_count(key);
        let length = serialized.chars().count();

        if length < self.direct_limit {
            self.port.put(key, &serialized)?;
            self.clear_chunks(key, 0, previous_chunks)?;
            return Ok(());
        }

        let chunks = split_chars(&serialized, self.chunk_size);
        for (index, chunk) in chunks.iter().enumerate() {
            self.port.put(&chunk_key(key, index), chunk)?;
        }
        self.port.put(&count_key(key), &chunks.len().to_string())?;
        self.port
            .put(key, &format!("{SENTINEL_PREFIX}{}", chunks.len()))?;
        self.clear_chunks(key, chunks.len(), previous_chunks)?;

        tracing::debug!(key, chunks = chunks.len(), length, "saved chunked payload");
        Ok(())
    }

    /// Load the payload stored under `key`, reassembling chunks.
    ///
    /// Returns `Ok(None)` when nothing is stored under `key`. A missing
    /// chunk or inconsistent chunk count is a [`Error::ChunkIntegrity`]
    /// failure, never a truncated result.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(entry) = self.port.get(key)? else {
            return Ok(None);
        };

        let serialized = if let Some(sentinel_count) = entry.strip_prefix(SENTINEL_PREFIX) {
            self.reassemble(key, sentinel_count)?
        } else {
            entry
        };

        Ok(Some(serde_json::from_str(&serialized)?))
    }

    /// Load the payload under `key`, falling back to `T::default()` when
    /// the key is missing or the stored blob cannot be read back.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.load(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(error) => {
                tracing::warn!(key, %error, "failed to load stored payload, using default");
                T::default()
            }
        }
    }

    /// Remove the payload under `key`, including any chunk entries
    pub fn remove(&mut self, key: &str) -> Result<()> {
        let previous_chunks = self.stored_chunk_count(key);
        self.port.remove(key)?;
        self.clear_chunks(key, 0, previous_chunks)
    }

    fn reassemble(&self, key: &str, sentinel_count: &str) -> Result<String> {
        let recorded = self
            .port
            .get(&count_key(key))?
            .ok_or_else(|| Error::ChunkIntegrity {
                key: key.to_string(),
                detail: "chunk count entry is missing".to_string(),
            })?;
        let count: usize = recorded.parse().map_err(|_| Error::ChunkIntegrity {
            key: key.to_string(),
            detail: format!("unreadable chunk count '{recorded}'"),
        })?;
        if sentinel_count.parse::<usize>() != Ok(count) {
            return Err(Error::ChunkIntegrity {
                key: key.to_string(),
                detail: format!(
                    "sentinel records {sentinel_count} chunks but count entry records {count}"
                ),
            });
        }

        let mut serialized = String::new();
        for index in 0..count {
            let chunk =
                self.port
                    .get(&chunk_key(key, index))?
                    .ok_or_else(|| Error::ChunkIntegrity {
                        key: key.to_string(),
                        detail: format!("chunk {index} of {count} is missing"),
                    })?;
            serialized.push_str(&chunk);
        }
        Ok(serialized)
    }

    /// Best-effort read of the previously recorded chunk count, used only
    /// to bound stale-chunk cleanup.
    fn stored_chunk_count(&self, key: &str) -> usize {
        self.port
            .get(&count_key(key))
            .ok()
            .flatten()
            .and_then(|count| count.parse().ok())
            .unwrap_or(0)
    }

    fn clear_chunks(&mut self, key: &str, from: usize, to: usize) -> Result<()> {
        for index in from..to {
            self.port.remove(&chunk_key(key, index))?;
        }
        if from == 0 && to > 0 {
            self.port.remove(&count_key(key))?;
        }
        Ok(())
    }
}

fn chunk_key(key: &str, index: usize) -> String {
    format!("{key}:chunk:{index}")
}

fn count_key(key: &str) -> String {
    format!("{key}:chunks")
}

/// Split on `char` boundaries so multi-byte text never lands torn across
/// two entries.
fn split_chars(serialized: &str, chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = serialized.chars();
    loop {
        let chunk: String = rest.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        chunks.push(chunk);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Payload {
        items: Vec<String>,
    }

    fn payload_of_serialized_length(target: usize) -> Payload {
        // {"items":["aaa...a"]} has 14 characters of scaffolding.
        let fill = target - 14;
        Payload {
            items: vec!["a".repeat(fill)],
        }
    }

    fn store() -> ChunkedStore<MemoryStore> {
        ChunkedStore::new(MemoryStore::new())
    }

    #[test]
    fn small_payload_round_trips_directly() {
        let mut store = store();
        let payload = payload_of_serialized_length(500);

        store.save("k", &payload).unwrap();
        let loaded: Payload = store.load("k").unwrap().unwrap();

        assert_eq!(loaded, payload);
        assert_eq!(store.port().len(), 1);
        assert!(!store.port().contains_key("k:chunks"));
    }

    #[test]
    fn large_payload_is_chunked_and_reassembled() {
        let mut store = store();
        let payload = payload_of_serialized_length(3_500_000);

        store.save("k", &payload).unwrap();

        // 3.5M characters at 1M per slice: 4 chunks, a count, a sentinel.
        assert!(store.port().contains_key("k:chunk:0"));
        assert!(store.port().contains_key("k:chunk:3"));
        assert!(!store.port().contains_key("k:chunk:4"));
        assert_eq!(
            store.port().get("k:chunks").unwrap().as_deref(),
            Some("4")
        );
        let sentinel = store.port().get("k").unwrap().unwrap();
        assert!(sentinel.starts_with('\u{0}'));

        let loaded: Payload = store.load("k").unwrap().unwrap();
        assert_eq!(loaded, payload);
    }

    #[test]
    fn chunk_splitting_respects_char_boundaries() {
        let mut store = ChunkedStore::with_limits(MemoryStore::new(), 8, 4);
        let payload = vec!["あいうえおかきくけこ".to_string()];

        store.save("k", &payload).unwrap();
        let loaded: Vec<String> = store.load("k").unwrap().unwrap();
        assert_eq!(loaded, payload);
    }

    #[test]
    fn smaller_save_clears_stale_chunks() {
        let mut store = ChunkedStore::with_limits(MemoryStore::new(), 20, 10);

        store.save("k", &"x".repeat(40)).unwrap();
        assert!(store.port().contains_key("k:chunk:0"));

        store.save("k", &"tiny").unwrap();
        assert!(!store.port().contains_key("k:chunks"));
        for index in 0..8 {
            assert!(!store.port().contains_key(&format!("k:chunk:{index}")));
        }
        let loaded: String = store.load("k").unwrap().unwrap();
        assert_eq!(loaded, "tiny");
    }

    #[test]
    fn shrinking_chunked_save_clears_higher_indices() {
        let mut store = ChunkedStore::with_limits(MemoryStore::new(), 20, 10);

        store.save("k", &"x".repeat(60)).unwrap();
        let before = store.port().get("k:chunks").unwrap().unwrap();

        store.save("k", &"y".repeat(25)).unwrap();
        let after = store.port().get("k:chunks").unwrap().unwrap();
        assert!(after.parse::<usize>().unwrap() < before.parse::<usize>().unwrap());

        let highest_stale = before.parse::<usize>().unwrap() - 1;
        assert!(!store
            .port()
            .contains_key(&format!("k:chunk:{highest_stale}")));

        let loaded: String = store.load("k").unwrap().unwrap();
        assert_eq!(loaded, "y".repeat(25));
    }

    #[test]
    fn missing_key_loads_as_none_and_defaults() {
        let store = store();
        let loaded: Option<Payload> = store.load("missing-key").unwrap();
        assert_eq!(loaded, None);

        let defaulted: Vec<String> = store.load_or_default("missing-key");
        assert!(defaulted.is_empty());
    }

    #[test]
    fn missing_chunk_is_an_integrity_failure_not_a_partial_read() {
        let mut store = ChunkedStore::with_limits(MemoryStore::new(), 20, 10);
        store.save("k", &"x".repeat(40)).unwrap();

        let mut port = store.port().clone();
        port.remove("k:chunk:2").unwrap();
        let broken = ChunkedStore::with_limits(port, 20, 10);

        let error = broken.load::<String>("k").unwrap_err();
        assert!(matches!(error, Error::ChunkIntegrity { .. }));

        // The caller-facing fallback substitutes the default.
        let defaulted: String = broken.load_or_default("k");
        assert_eq!(defaulted, String::new());
    }

    #[test]
    fn inconsistent_chunk_count_is_an_integrity_failure() {
        let mut store = ChunkedStore::with_limits(MemoryStore::new(), 20, 10);
        store.save("k", &"x".repeat(40)).unwrap();

        let mut port = store.port().clone();
        port.put("k:chunks", "2").unwrap();
        let broken = ChunkedStore::with_limits(port, 20, 10);

        assert!(matches!(
            broken.load::<String>("k").unwrap_err(),
            Error::ChunkIntegrity { .. }
        ));
    }

    #[test]
    fn quota_rejection_surfaces_as_save_failure() {
        let mut store = ChunkedStore::with_limits(MemoryStore::with_entry_quota(8), 100, 50);

        let error = store.save("k", &"x".repeat(40)).unwrap_err();
        assert!(matches!(error, Error::StorageCapacity { .. }));
    }

    #[test]
    fn malformed_stored_data_fails_load_and_falls_back() {
        let mut port = MemoryStore::new();
        port.put("k", "{not json").unwrap();
        let store = ChunkedStore::new(port);

        assert!(matches!(
            store.load::<Payload>("k").unwrap_err(),
            Error::Serialization(_)
        ));
        let defaulted: Payload = store.load_or_default("k");
        assert_eq!(defaulted, Payload::default());
    }

    #[test]
    fn remove_clears_all_physical_entries() {
        let mut store = ChunkedStore::with_limits(MemoryStore::new(), 20, 10);
        store.save("k", &"x".repeat(40)).unwrap();

        store.remove("k").unwrap();
        assert!(store.port().is_empty());
    }
}
