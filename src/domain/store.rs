// In-memory collection stores.
// The only place records are added, updated, or removed.

use tracing::{debug, info};

use crate::error::{ConsoleError, Result};
use crate::state::table::{Record, RecordId};

/// A record whose id is assigned by its store.
pub trait Entity: Record + Clone {
    fn assign_id(&mut self, id: RecordId);
}

/// Ordered collection owned by the session. Order only changes on add.
#[derive(Debug, Clone)]
pub struct CollectionStore<R> {
    records: Vec<R>,
}

impl<R> Default for CollectionStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Entity> CollectionStore<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    /// Read-only snapshot handed to table engines.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    fn next_id(&self) -> RecordId {
        self.records.iter().map(|r| r.id()).max().unwrap_or(0) + 1
    }

    /// Append a record with a fresh id and return the stored copy.
    pub fn add(&mut self, mut record: R) -> R {
        let id = self.next_id();
        record.assign_id(id);
        info!(entity = R::ENTITY, id, "record added");
        self.records.push(record.clone());
        record
    }

    /// Apply `patch` to the record with `id` and return the updated copy.
    pub fn update(&mut self, id: RecordId, patch: impl FnOnce(&mut R)) -> Result<R> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(ConsoleError::NotFound {
                entity: R::ENTITY,
                id,
            })?;
        patch(record);
        // Ids are owned by the store
        record.assign_id(id);
        debug!(entity = R::ENTITY, id, "record updated");
        Ok(record.clone())
    }

    /// Remove the record with `id`. Returns false if it was not present.
    pub fn remove(&mut self, id: RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        let removed = self.records.len() != before;
        if removed {
            info!(entity = R::ENTITY, id, "record removed");
        }
        removed
    }
}
