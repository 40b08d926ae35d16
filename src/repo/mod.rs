//! Represents an abstract git object repository.
//!
//! ## Design Goals
//!
//! Gitobj intends to allow objects to be stored in multiple different mechanisms.
//! It includes built-in support for local on-disk repositories
//! (see `gitobj::repo::on_disk`) and an in-memory store
//! (see `gitobj::repo::memory`). You could envision repositories stored on a
//! remote file system or database as well.

use flate2::Compression;
use tracing::trace;

use crate::object::{codec, hasher, Id, Kind, Object};
use crate::Result;

pub mod memory;
pub mod on_disk;

/// A struct that implements the `Repo` trait represents a particular mechanism
/// for storing and accessing git objects.
///
/// The required methods on this trait represent the most primitive operations
/// which must be defined for a given storage architecture: they move opaque,
/// already-compressed bytes in and out of storage under an ID.
///
/// The provided methods on this trait layer the object encoding on top of
/// those primitives, regardless of storage mechanism.
pub trait Repo {
    /// Returns true if an object with this ID is stored.
    fn contains(&self, id: &Id) -> Result<bool>;

    /// Store the compressed bytes of an object under `id`.
    ///
    /// If an object with this ID is already stored, the existing copy is left
    /// untouched and this returns `Ok(false)`. Returns `Ok(true)` if the
    /// bytes were written.
    fn put_stored(&mut self, id: &Id, stored: &[u8]) -> Result<bool>;

    /// Return the compressed bytes stored under `id`, without decoding them.
    ///
    /// Fails with `Error::ObjectNotFound` if there is no such object.
    fn get_stored(&self, id: &Id) -> Result<Vec<u8>>;

    /// Compression level used when writing new objects.
    fn compression(&self) -> Compression {
        Compression::default()
    }

    /// Store a framed object (`<kind> <size>\0<payload>`) and return its ID.
    ///
    /// The ID is returned whether or not the object was already present.
    fn put_framed(&mut self, framed: &[u8]) -> Result<Id> {
        let id = hasher::hash(framed);

        if self.contains(&id)? {
            trace!(%id, "object already stored");
            return Ok(id);
        }

        let stored = codec::compress(framed, self.compression())?;
        self.put_stored(&id, &stored)?;

        Ok(id)
    }

    /// Store `payload` as an object of the given kind and return its ID.
    ///
    /// Analogous to [`git hash-object -w`](https://git-scm.com/docs/git-hash-object).
    fn put(&mut self, kind: Kind, payload: &[u8]) -> Result<Id> {
        self.put_framed(&codec::frame(kind, payload))
    }

    /// Store an existing object and return its ID.
    fn put_object(&mut self, object: &Object) -> Result<Id> {
        self.put_framed(&object.framed())
    }

    /// Read and decode the object stored under `id`.
    ///
    /// Analogous to [`git cat-file`](https://git-scm.com/docs/git-cat-file).
    fn get(&self, id: &Id) -> Result<Object> {
        let stored = self.get_stored(id)?;
        codec::decode(&stored).map_err(|err| err.for_object(id))
    }
}
