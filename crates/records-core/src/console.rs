//! Plain-text facade over [`RecordStore`].
//!
//! Each method runs one store operation and returns the status line a user
//! should see. Errors never leave this layer: reported conditions become their
//! message, storage failures are logged and rendered as `Storage error: ...`.

use crate::config::PathsConfig;
use crate::error::{Operation, StoreError};
use crate::store::RecordStore;
use tracing::error;

pub const ADDED: &str = "Record added successfully.";
pub const REMOVED: &str = "Record removed successfully.";

/// Message-producing wrapper around a store.
pub struct Console {
    store: RecordStore,
}

impl Console {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Seed the data file if needed and rebuild the index.
    ///
    /// Returns a message only when something went wrong.
    pub async fn initialize(&self) -> Option<String> {
        match self.store.initialize().await {
            Ok(_) => None,
            Err(e) => Some(render(e, Operation::Initialize)),
        }
    }

    pub async fn add(&self, id: i64, name: &str, age: i64) -> String {
        match self.store.add(id, name, age).await {
            Ok(_) => ADDED.to_string(),
            Err(e) => render(e, Operation::Add),
        }
    }

    /// Matching lines joined by the line ending, or a not-found message.
    pub async fn search(&self, name: &str) -> String {
        match self.store.search(name).await {
            Ok(lines) => lines.join(PathsConfig::LINE_ENDING),
            Err(e) => render(e, Operation::Search),
        }
    }

    pub async fn remove(&self, name: &str) -> String {
        match self.store.remove(name).await {
            Ok(_) => REMOVED.to_string(),
            Err(e) => render(e, Operation::Remove),
        }
    }

    pub async fn rebuild_index(&self) -> String {
        match self.store.rebuild_index().await {
            Ok(count) => format!("Index rebuilt with {} entries.", count),
            Err(e) => render(e, Operation::RebuildIndex),
        }
    }
}

fn render(err: StoreError, op: Operation) -> String {
    if !err.is_reported_condition() {
        error!("{:?} failed: {}", op, err);
    }
    err.user_message(op)
}
