//! Concurrency-guarded status snapshots
//!
//! A [`StatusRecord`] holds the latest snapshot of one tracked service.
//! Records are handed out as a split pair: a single [`RecordWriter`] that is
//! moved into whichever task owns updates, and any number of cloned
//! [`RecordReader`]s for the publication layer. The writer is deliberately
//! not `Clone`, so a second writer role cannot be created for the same record.

use std::sync::{Arc, RwLock};

/// Latest-value cell with whole-value replacement
///
/// Every write replaces the snapshot in one assignment under the write lock,
/// and every read clones it under the read lock, so a reader can never
/// observe fields from two different updates.
#[derive(Debug, Default)]
pub struct StatusRecord<T> {
    snapshot: RwLock<T>,
}

impl<T: Clone> StatusRecord<T> {
    pub fn new(initial: T) -> Self {
        Self {
            snapshot: RwLock::new(initial),
        }
    }

    /// Returns an owned copy of the current snapshot
    pub fn read(&self) -> T {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replaces the current snapshot (last write wins)
    pub fn update(&self, value: T) {
        let mut snapshot = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        *snapshot = value;
    }

    /// Splits a fresh record into its owning writer and a shareable reader
    pub fn split(initial: T) -> (RecordWriter<T>, RecordReader<T>) {
        let record = Arc::new(StatusRecord::new(initial));
        (
            RecordWriter {
                record: record.clone(),
            },
            RecordReader { record },
        )
    }
}

/// Exclusive write handle for one record
#[derive(Debug)]
pub struct RecordWriter<T> {
    record: Arc<StatusRecord<T>>,
}

impl<T: Clone> RecordWriter<T> {
    pub fn update(&self, value: T) {
        self.record.update(value);
    }

    /// The owning writer may look at its own last value, e.g. to carry
    /// forward fields an event does not touch.
    pub fn read(&self) -> T {
        self.record.read()
    }
}

/// Read-only handle shared with the HTTP layer
#[derive(Debug)]
pub struct RecordReader<T> {
    record: Arc<StatusRecord<T>>,
}

impl<T> Clone for RecordReader<T> {
    fn clone(&self) -> Self {
        Self {
            record: self.record.clone(),
        }
    }
}

impl<T: Clone> RecordReader<T> {
    pub fn read(&self) -> T {
        self.record.read()
    }
}
