//! Computes content addresses.

use sha1::{Digest, Sha1};

use super::{Id, Kind, ID_LEN};

/// Hash a complete framed object (`<kind> <size>\0<payload>`).
pub fn hash(framed: &[u8]) -> Id {
    let mut hasher = Sha1::new();
    hasher.update(framed);
    finish(hasher)
}

/// Hash the framed form of `payload` without building it in memory first.
///
/// Produces the same ID as `hash(&codec::frame(kind, payload))`.
pub fn hash_object(kind: Kind, payload: &[u8]) -> Id {
    let mut hasher = Sha1::new();

    hasher.update(kind.name());
    hasher.update(b" ");
    hasher.update(payload.len().to_string());
    hasher.update(b"\0");
    hasher.update(payload);

    finish(hasher)
}

fn finish(hasher: Sha1) -> Id {
    let digest = hasher.finalize();

    // SHA-1 digests are always 20 bytes; copy_from_slice panics otherwise.
    let mut id = [0; ID_LEN];
    id.copy_from_slice(digest.as_slice());

    Id::from(id)
}
