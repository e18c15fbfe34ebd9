//! Board persistence
//!
//! Only `(id, number)` pairs are stored. Snapshots live in a key-value store
//! under a key that carries the schema version, so a format change simply
//! starts from a fresh key.

use crate::board::Board;
use anyhow::Context;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current snapshot schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Key the board snapshot is stored under
pub fn storage_key() -> String {
    format!("hextri.board.v{}", SCHEMA_VERSION)
}

/// One persisted cell. The id is kept as raw text so a bad entry can be
/// skipped on restore instead of failing the whole snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCell {
    pub id: String,
    pub number: Option<u8>,
}

/// Persisted board
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub cells: Vec<SavedCell>,
}

impl Snapshot {
    pub fn new(cells: Vec<SavedCell>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            cells,
        }
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let snapshot = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(snapshot)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// String key-value storage owned by the caller
pub trait KeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn put(&mut self, key: &str, value: String) -> anyhow::Result<()>;
    fn remove(&mut self, key: &str) -> anyhow::Result<()>;
}

/// In-process store
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed store: one `<key>.json` file per key
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store in `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create store directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn put(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}

/// Persist the board's numbers
pub fn save_board<S: KeyValueStore + ?Sized>(store: &mut S, board: &Board) -> anyhow::Result<()> {
    save_snapshot(store, &board.snapshot())
}

/// Persist a snapshot taken earlier
pub fn save_snapshot<S: KeyValueStore + ?Sized>(
    store: &mut S,
    snapshot: &Snapshot,
) -> anyhow::Result<()> {
    let content = serde_json::to_string(snapshot)?;
    store.put(&storage_key(), content)
}

/// Restore a saved board, if there is one for the current schema
pub fn load_board<S: KeyValueStore + ?Sized>(store: &S) -> anyhow::Result<Option<Board>> {
    let Some(content) = store.get(&storage_key())? else {
        return Ok(None);
    };
    let snapshot: Snapshot =
        serde_json::from_str(&content).context("Failed to parse saved board")?;

    if snapshot.version != SCHEMA_VERSION {
        tracing::warn!(
            "Ignoring saved board with schema version {} (expected {})",
            snapshot.version,
            SCHEMA_VERSION
        );
        return Ok(None);
    }

    Ok(Some(Board::from_snapshot(&snapshot)))
}
