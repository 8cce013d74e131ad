//! The sheep record store.
//!
//! [`SheepStore`] is the single owner of the sheep list and of its persisted
//! snapshot. Every mutation goes through it and rewrites the whole snapshot
//! before the lock is released, so there is exactly one writer.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::db::Database;
use crate::fixtures::Fixtures;
use crate::models::{NewSheep, Sheep, SheepStatus};
use crate::sale::{ensure_available, SaleError};

/// Key the snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "sheep";

#[derive(Debug, Default)]
struct StoreState {
    sheep: Vec<Sheep>,
    load_error: Option<String>,
}

/// In-memory sheep list backed by a snapshot in the key-value table.
#[derive(Clone)]
pub struct SheepStore {
    db: Database,
    state: Arc<Mutex<StoreState>>,
}

impl SheepStore {
    /// Create an empty store. Call [`SheepStore::initialize`] to load data.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            state: Arc::new(Mutex::new(StoreState::default())),
        }
    }

    /// Load the persisted snapshot, or seed from the sheep fixture when there
    /// is none. A fixture failure leaves the list empty and is remembered for
    /// the dashboard.
    pub async fn initialize(&self, fixtures: &Fixtures) {
        if self.load_persisted() {
            return;
        }

        match fixtures.load_sheep().await {
            Ok(sheep) => self.adopt_fixture(sheep),
            Err(e) => {
                tracing::error!("Failed to load sheep fixture: {}", e);
                self.record_load_error(format!("Failed to load sheep data: {}", e));
            }
        }
    }

    /// Adopt the persisted snapshot if one exists and parses.
    ///
    /// Returns `false` when there is nothing usable; unreadable or malformed
    /// snapshots count as absent.
    pub fn load_persisted(&self) -> bool {
        let raw = match self.db.get_value(SNAPSHOT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!("Could not read persisted snapshot: {}", e);
                return false;
            }
        };

        match serde_json::from_str::<Vec<Sheep>>(&raw) {
            Ok(sheep) => {
                tracing::info!("Loaded {} sheep from persisted snapshot", sheep.len());
                let mut state = self.state.lock().expect("store lock poisoned");
                state.sheep = sheep;
                state.load_error = None;
                true
            }
            Err(e) => {
                tracing::warn!("Discarding malformed persisted snapshot: {}", e);
                false
            }
        }
    }

    /// Replace the list with fixture data and persist it.
    ///
    /// Records repeating an earlier id are dropped.
    pub fn adopt_fixture(&self, sheep: Vec<Sheep>) {
        let mut seen = HashSet::new();
        let sheep: Vec<Sheep> = sheep
            .into_iter()
            .filter(|s| {
                let fresh = seen.insert(s.id.clone());
                if !fresh {
                    tracing::warn!("Dropping fixture record with duplicate id {}", s.id);
                }
                fresh
            })
            .collect();

        tracing::info!("Seeded {} sheep from fixture", sheep.len());
        let mut state = self.state.lock().expect("store lock poisoned");
        state.sheep = sheep;
        state.load_error = None;
        self.persist(&state.sheep);
    }

    pub fn record_load_error(&self, message: impl Into<String>) {
        let mut state = self.state.lock().expect("store lock poisoned");
        state.load_error = Some(message.into());
    }

    pub fn load_error(&self) -> Option<String> {
        let state = self.state.lock().expect("store lock poisoned");
        state.load_error.clone()
    }

    // ============================================================
    // Queries
    // ============================================================

    pub fn list(&self) -> Vec<Sheep> {
        let state = self.state.lock().expect("store lock poisoned");
        state.sheep.clone()
    }

    pub fn get(&self, id: &str) -> Option<Sheep> {
        let state = self.state.lock().expect("store lock poisoned");
        state.sheep.iter().find(|s| s.id == id).cloned()
    }

    // ============================================================
    // Mutations
    // ============================================================

    /// Append a record under a freshly generated id. Never fails.
    pub fn add(&self, input: NewSheep) -> Sheep {
        let mut state = self.state.lock().expect("store lock poisoned");

        let id = loop {
            let candidate = Uuid::new_v4().to_string();
            if !state.sheep.iter().any(|s| s.id == candidate) {
                break candidate;
            }
        };

        let sheep = Sheep::from_new(id, input);
        tracing::debug!("Adding sheep {} ({})", sheep.tag, sheep.id);
        state.sheep.push(sheep.clone());
        self.persist(&state.sheep);
        sheep
    }

    /// Replace the record with the same id in place.
    ///
    /// Returns `false` and leaves the list untouched when no record matches.
    /// The snapshot is written either way.
    pub fn update(&self, sheep: Sheep) -> bool {
        let mut state = self.state.lock().expect("store lock poisoned");

        let matched = match state.sheep.iter_mut().find(|s| s.id == sheep.id) {
            Some(slot) => {
                tracing::debug!("Updating sheep {} ({})", sheep.tag, sheep.id);
                *slot = sheep;
                true
            }
            None => false,
        };

        self.persist(&state.sheep);
        matched
    }

    /// Mark an available record Sold and return it.
    ///
    /// The availability check and the status change happen under one lock, so
    /// a record is sold at most once.
    pub fn mark_sold(&self, id: &str) -> Result<Sheep, SaleError> {
        let mut state = self.state.lock().expect("store lock poisoned");

        let slot = state
            .sheep
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| SaleError::SheepNotFound(id.to_string()))?;
        ensure_available(slot)?;
        slot.status = SheepStatus::Sold;
        let sold = slot.clone();

        self.persist(&state.sheep);
        Ok(sold)
    }

    /// Remove the record with the given id. Returns whether one was removed.
    pub fn delete(&self, id: &str) -> bool {
        let mut state = self.state.lock().expect("store lock poisoned");

        let before = state.sheep.len();
        state.sheep.retain(|s| s.id != id);
        let removed = state.sheep.len() != before;
        if removed {
            tracing::debug!("Deleted sheep {}", id);
        }

        self.persist(&state.sheep);
        removed
    }

    /// Write the full list. Failures are logged and dropped.
    fn persist(&self, sheep: &[Sheep]) {
        let json = match serde_json::to_string(sheep) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize sheep snapshot: {}", e);
                return;
            }
        };

        if let Err(e) = self.db.set_value(SNAPSHOT_KEY, &json) {
            tracing::error!("Failed to persist sheep snapshot: {}", e);
        }
    }
}
