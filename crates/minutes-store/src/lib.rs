//! Minutes Dedup Store
//!
//! Idempotency cache for processed transcripts, backed by a JSON file in
//! the output directory. Inputs are keyed by a content-identity hash
//! derived from file metadata (path, modification time, size) rather than
//! file bytes: hashing is constant-time for large transcripts, and a
//! resumed session appending to a log changes its mtime and size, so it is
//! correctly seen as new input.
//!
//! Cache hits are gated on the extraction schema version, so bumping
//! [`SCHEMA_VERSION`] invalidates every prior entry at once.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use thiserror::Error;
use tracing::debug;

/// Version tag attached to cached outputs; bump when extraction output
/// changes shape or semantics.
pub const SCHEMA_VERSION: &str = "1.0";

/// File name of the store inside the output directory.
const STORE_FILE: &str = ".dedup.json";

/// Errors that can occur in the dedup store
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// One processed-input record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DedupEntry {
    output_file: String,
    schema_version: String,
    #[serde(default)]
    input_file: String,
}

/// Content-identity cache of processed inputs.
#[derive(Debug)]
pub struct DedupStore {
    store_path: PathBuf,
    entries: HashMap<String, DedupEntry>,
}

impl DedupStore {
    /// Open the store for an output directory, loading prior entries if
    /// the store file exists.
    pub fn open(output_dir: &Path) -> Result<Self, StoreError> {
        let store_path = output_dir.join(STORE_FILE);
        let entries = if store_path.exists() {
            let contents = fs::read_to_string(&store_path)?;
            serde_json::from_str(&contents)?
        } else {
            HashMap::new()
        };

        Ok(Self { store_path, entries })
    }

    /// Compute the content-identity hash for an input file.
    ///
    /// SHA-256 over `"{canonical_path}:{mtime_ns}:{size}"`. The file is
    /// never read; only its metadata contributes to the identity.
    pub fn content_hash(path: &Path) -> Result<String, StoreError> {
        let canonical = path.canonicalize()?;
        let metadata = fs::metadata(&canonical)?;
        let mtime_ns = metadata
            .modified()?
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();

        let identity = format!("{}:{}:{}", canonical.display(), mtime_ns, metadata.len());
        let digest = Sha256::digest(identity.as_bytes());
        Ok(hex::encode(digest))
    }

    /// Prior output path for a hash, only when the schema version matches
    /// exactly.
    pub fn is_processed(&self, file_hash: &str, schema_version: &str) -> Option<&str> {
        self.entries
            .get(file_hash)
            .filter(|entry| entry.schema_version == schema_version)
            .map(|entry| entry.output_file.as_str())
    }

    /// Record a processed input and persist the store.
    pub fn record(
        &mut self,
        file_hash: &str,
        output_file: &str,
        schema_version: &str,
        input_file: &Path,
    ) -> Result<(), StoreError> {
        let input_file = input_file
            .canonicalize()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| input_file.display().to_string());

        self.entries.insert(
            file_hash.to_string(),
            DedupEntry {
                output_file: output_file.to_string(),
                schema_version: schema_version.to_string(),
                input_file,
            },
        );
        self.save()
    }

    /// Locate prior output for an input path regardless of hash; used to
    /// find the previous notes when a changed file is reprocessed.
    pub fn find_by_input(&self, input_file: &Path) -> Option<&str> {
        let resolved = input_file
            .canonicalize()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| input_file.display().to_string());

        self.entries
            .values()
            .find(|entry| entry.input_file == resolved)
            .map(|entry| entry.output_file.as_str())
    }

    /// Persist with an atomic replace so readers never observe a partial
    /// store.
    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.store_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.store_path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(&self.entries)?)?;
        fs::rename(&tmp_path, &self.store_path)?;

        debug!(entries = self.entries.len(), "dedup store saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_input(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_open_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = DedupStore::open(dir.path()).unwrap();
        assert!(store.is_processed("missing", SCHEMA_VERSION).is_none());
    }

    #[test]
    fn test_record_and_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "session.txt", "hello");
        let hash = DedupStore::content_hash(&input).unwrap();

        let mut store = DedupStore::open(dir.path()).unwrap();
        store
            .record(&hash, "out/2026-08-08.md", SCHEMA_VERSION, &input)
            .unwrap();

        assert_eq!(
            store.is_processed(&hash, SCHEMA_VERSION),
            Some("out/2026-08-08.md")
        );
    }

    #[test]
    fn test_schema_mismatch_misses() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "session.txt", "hello");
        let hash = DedupStore::content_hash(&input).unwrap();

        let mut store = DedupStore::open(dir.path()).unwrap();
        store.record(&hash, "out.md", "0.9", &input).unwrap();

        assert!(store.is_processed(&hash, SCHEMA_VERSION).is_none());
        assert_eq!(store.is_processed(&hash, "0.9"), Some("out.md"));
    }

    #[test]
    fn test_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "session.txt", "hello");
        let hash = DedupStore::content_hash(&input).unwrap();

        {
            let mut store = DedupStore::open(dir.path()).unwrap();
            store.record(&hash, "out.md", SCHEMA_VERSION, &input).unwrap();
        }

        let store = DedupStore::open(dir.path()).unwrap();
        assert_eq!(store.is_processed(&hash, SCHEMA_VERSION), Some("out.md"));
    }

    #[test]
    fn test_find_by_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "session.jsonl", "{}");
        let hash = DedupStore::content_hash(&input).unwrap();

        let mut store = DedupStore::open(dir.path()).unwrap();
        store.record(&hash, "prior.md", SCHEMA_VERSION, &input).unwrap();

        assert_eq!(store.find_by_input(&input), Some("prior.md"));
        assert!(store.find_by_input(Path::new("other.jsonl")).is_none());
    }

    #[test]
    fn test_hash_is_stable_without_changes() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "session.txt", "hello");

        let h1 = DedupStore::content_hash(&input).unwrap();
        let h2 = DedupStore::content_hash(&input).unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }

    #[test]
    fn test_hash_differs_for_different_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_input(dir.path(), "a.txt", "hello");
        let b = write_input(dir.path(), "b.txt", "hello");

        assert_ne!(
            DedupStore::content_hash(&a).unwrap(),
            DedupStore::content_hash(&b).unwrap()
        );
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(DedupStore::content_hash(Path::new("/no/such/file")).is_err());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "session.txt", "hello");
        let hash = DedupStore::content_hash(&input).unwrap();

        let mut store = DedupStore::open(dir.path()).unwrap();
        store.record(&hash, "out.md", SCHEMA_VERSION, &input).unwrap();

        assert!(dir.path().join(STORE_FILE).exists());
        assert!(!dir.path().join(".dedup.json.tmp").exists());
    }
}
