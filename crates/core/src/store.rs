//! Ordered record store with a clamped cursor.

use thiserror::Error;
use tracing::debug;

use crate::models::{default_seed, Cat, Variant};

/// Errors raised while building a store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store must hold at least one record at all times.
    #[error("cannot build a cat store from an empty seed")]
    EmptySeed,
}

/// Owner of the cat sequence and the current position within it.
///
/// The sequence is append-only and never empty, so `cursor` always points
/// at a valid record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatStore {
    cats: Vec<Cat>,
    cursor: usize,
}

impl CatStore {
    /// Build a store from seed records with the cursor on the first one.
    pub fn new(seed: Vec<Cat>) -> Result<Self, StoreError> {
        if seed.is_empty() {
            return Err(StoreError::EmptySeed);
        }
        Ok(Self {
            cats: seed,
            cursor: 0,
        })
    }

    /// Store populated with the built-in seed for `variant`.
    pub fn seeded(variant: Variant) -> Self {
        Self {
            cats: default_seed(variant),
            cursor: 0,
        }
    }

    /// Move to the following record, staying put on the last one.
    pub fn next(&mut self) {
        self.cursor = (self.cursor + 1).min(self.last_index());
        debug!(cursor = self.cursor, "Moved to next cat");
    }

    /// Move to the preceding record, staying put on the first one.
    pub fn previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        debug!(cursor = self.cursor, "Moved to previous cat");
    }

    /// Append a living cat and make it current. No validation happens here.
    pub fn add(&mut self, name: impl Into<String>, colour: Option<String>) {
        let cat = Cat::new(name, colour);
        debug!(name = cat.name(), "Adding cat");
        self.cats.push(cat);
        self.cursor = self.last_index();
    }

    /// Mark the current cat as dead. Killing a dead cat changes nothing.
    pub fn kill(&mut self) {
        let cursor = self.cursor;
        let cat = &mut self.cats[cursor];
        if cat.is_alive() {
            cat.kill();
            debug!(cursor, name = cat.name(), "Cat killed");
        }
    }

    /// The record under the cursor.
    pub fn current(&self) -> &Cat {
        &self.cats[self.cursor]
    }

    /// Zero-based position of the current record.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.cats.len()
    }

    /// Always `false`; kept alongside `len` for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.cats.is_empty()
    }

    /// All records in insertion order.
    pub fn cats(&self) -> &[Cat] {
        &self.cats
    }

    /// Cursor sits on the first record.
    pub fn at_first(&self) -> bool {
        self.cursor == 0
    }

    /// Cursor sits on the last record.
    pub fn at_last(&self) -> bool {
        self.cursor == self.last_index()
    }

    fn last_index(&self) -> usize {
        self.cats.len().saturating_sub(1)
    }
}
