//! A repository that keeps objects in memory.

use std::collections::HashMap;

use flate2::Compression;

use super::Repo;
use crate::object::Id;
use crate::{Error, Result};

/// Implementation of `gitobj::Repo` backed by a `HashMap`.
///
/// Intended for tests and embedding. Objects are held in their compressed
/// stored form, exactly as the on-disk repository would write them.
#[derive(Debug, Default)]
pub struct InMemory {
    objects: HashMap<Id, Vec<u8>>,
    compression: Compression,
}

impl InMemory {
    /// Create a new, empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given compression level for newly written objects.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if no objects are stored.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Return a sorted list of all object IDs in the repository.
    pub fn ids(&self) -> Vec<Id> {
        let mut ids: Vec<Id> = self.objects.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Repo for InMemory {
    fn contains(&self, id: &Id) -> Result<bool> {
        Ok(self.objects.contains_key(id))
    }

    fn put_stored(&mut self, id: &Id, stored: &[u8]) -> Result<bool> {
        if self.objects.contains_key(id) {
            return Ok(false);
        }

        self.objects.insert(*id, stored.to_vec());
        Ok(true)
    }

    fn get_stored(&self, id: &Id) -> Result<Vec<u8>> {
        self.objects
            .get(id)
            .cloned()
            .ok_or_else(|| Error::ObjectNotFound {
                id: *id,
                path: None,
            })
    }

    fn compression(&self) -> Compression {
        self.compression
    }
}
