//! Represents the git concept of an "object" which is a tuple of
//! object type and binary data identified by the hash of the binary data.

pub mod codec;
pub mod hasher;

mod id;
pub use id::{Id, ParseIdError, HEX_LEN, ID_LEN};

mod kind;
pub use kind::{Kind, ParseKindError};

/// Describes a single object stored (or about to be stored) in a git repository.
///
/// Objects are transient: they exist in memory for the duration of a single
/// read or write. Only the stored form ever reaches the repository.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Object {
    kind: Kind,
    payload: Vec<u8>,
}

impl Object {
    /// Create a new Object.
    pub fn new(kind: Kind, payload: Vec<u8>) -> Object {
        Object { kind, payload }
    }

    /// Return the kind of the object.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Return the object's content, without header.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Return the size (in bytes) of the object.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Returns true if the object is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the object, returning its kind and content.
    pub fn into_parts(self) -> (Kind, Vec<u8>) {
        (self.kind, self.payload)
    }

    /// Return the framed form `<kind> <size>\0<payload>`.
    pub fn framed(&self) -> Vec<u8> {
        codec::frame(self.kind, &self.payload)
    }

    /// Computes the object's ID from its content, size, and type.
    ///
    /// This is functionally equivalent to the
    /// [`git hash-object`](https://git-scm.com/docs/git-hash-object) command
    /// without the `-w` option that would write the object to the repo.
    pub fn id(&self) -> Id {
        hasher::hash_object(self.kind, &self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_vec() {
        let o = Object::new(Kind::Blob, vec![]);

        assert_eq!(o.kind(), Kind::Blob);
        assert_eq!(o.len(), 0);
        assert!(o.is_empty());
        assert_eq!(o.framed(), b"blob 0\0".to_vec());
        assert_eq!(
            o.id().to_string(),
            "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391"
        );
    }

    #[test]
    fn vec_with_content() {
        let o = Object::new(Kind::Blob, vec![2, 3, 0, 67]);

        assert_eq!(o.len(), 4);
        assert!(!o.is_empty());
        assert_eq!(o.payload(), &[2u8, 3, 0, 67]);
        assert_eq!(o.framed(), b"blob 4\0\x02\x03\0C".to_vec());
    }

    #[test]
    fn id() {
        // $ echo 'test content' | git hash-object --stdin
        // d670460b4b4aece5915caf5c68d12f560a9fe3e4

        let o = Object::new(Kind::Blob, b"test content\n".to_vec());
        assert_eq!(
            o.id().to_string(),
            "d670460b4b4aece5915caf5c68d12f560a9fe3e4"
        );

        // Nothing changes on a second computation.
        assert_eq!(
            o.id().to_string(),
            "d670460b4b4aece5915caf5c68d12f560a9fe3e4"
        );
    }

    #[test]
    fn id_depends_on_kind() {
        let blob = Object::new(Kind::Blob, b"abcd".to_vec());
        let commit = Object::new(Kind::Commit, b"abcd".to_vec());

        assert_ne!(blob.id(), commit.id());
        assert_eq!(
            commit.id().to_string(),
            "b08d7bc4e03ac698c7f8fe33284bf853a0fd952d"
        );
    }

    #[test]
    fn into_parts() {
        let o = Object::new(Kind::Tag, b"v1".to_vec());
        assert_eq!(o.into_parts(), (Kind::Tag, b"v1".to_vec()));
    }
}
