//! Server state management
//!
//! One shared board session plus an optional on-disk store. Snapshots are
//! taken under the session lock but written to disk after it is released.

use hextri_core::{load_board, save_snapshot, Board, FileStore, GridError, Snapshot, Threshold};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

/// The board and a counter bumped on every change
#[derive(Clone, Debug, Default)]
pub struct BoardSession {
    pub board: Board,
    pub version: u64,
}

/// File store plus the newest version already written to it
struct SavedStore {
    store: FileStore,
    saved_version: u64,
}

impl SavedStore {
    /// Write `snapshot` unless a newer version already landed.
    /// Returns whether anything was written.
    fn write_if_newer(&mut self, version: u64, snapshot: &Snapshot) -> anyhow::Result<bool> {
        if version <= self.saved_version {
            return Ok(false);
        }
        save_snapshot(&mut self.store, snapshot)?;
        self.saved_version = version;
        Ok(true)
    }
}

/// Server-wide shared state
pub struct ServerState {
    pub session: RwLock<BoardSession>,
    pub threshold: Threshold,
    store: Option<Arc<Mutex<SavedStore>>>,
}

impl ServerState {
    pub fn new() -> Self {
        Self::with_threshold(Threshold::default())
    }

    pub fn with_threshold(threshold: Threshold) -> Self {
        Self {
            session: RwLock::new(BoardSession::default()),
            threshold,
            store: None,
        }
    }

    /// State backed by `store`, restoring the saved board if present
    pub fn with_store(threshold: Threshold, store: FileStore) -> anyhow::Result<Self> {
        let board = match load_board(&store)? {
            Some(board) => {
                tracing::info!(
                    "Restored {} numbered cells from {}",
                    board.numbered().count(),
                    store.dir().display()
                );
                board
            }
            None => Board::new(),
        };

        Ok(Self {
            session: RwLock::new(BoardSession { board, version: 0 }),
            threshold,
            store: Some(Arc::new(Mutex::new(SavedStore {
                store,
                saved_version: 0,
            }))),
        })
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// Apply a board command. When it reports a change the version is
    /// bumped and the board persisted.
    ///
    /// Returns whether anything changed and the resulting version.
    pub async fn mutate<F>(&self, command: F) -> Result<(bool, u64), GridError>
    where
        F: FnOnce(&mut Board) -> Result<bool, GridError>,
    {
        let (changed, version, snapshot) = {
            let mut session = self.session.write().await;
            let changed = command(&mut session.board)?;
            if changed {
                session.version += 1;
            }
            let snapshot = (changed && self.store.is_some()).then(|| session.board.snapshot());
            (changed, session.version, snapshot)
        };

        if let Some(snapshot) = snapshot {
            self.persist(version, snapshot).await;
        }
        Ok((changed, version))
    }

    /// Write a snapshot on the blocking pool
    async fn persist(&self, version: u64, snapshot: Snapshot) {
        let Some(store) = &self.store else {
            return;
        };
        let store = Arc::clone(store);

        let result = tokio::task::spawn_blocking(move || {
            let mut store = match store.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            store.write_if_newer(version, &snapshot)
        })
        .await;

        match result {
            Ok(Ok(true)) => tracing::debug!("Saved board version {}", version),
            Ok(Ok(false)) => tracing::debug!("Skipped stale board version {}", version),
            Ok(Err(e)) => tracing::error!("Failed to save board: {:#}", e),
            Err(e) => tracing::error!("Save task failed: {}", e),
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
