//! A minimal content-addressable object store that uses git's loose object
//! format.
//!
//! Content is framed with a type and size header, identified by the SHA-1
//! hash of the framed bytes, compressed with zlib, and stored at
//! `.git/objects/<first two hex digits>/<remaining 38 hex digits>`.
//!
//! ```no_run
//! use gitobj::object::Kind;
//! use gitobj::repo::{on_disk::OnDisk, Repo};
//!
//! # fn main() -> gitobj::Result<()> {
//! let mut repo = OnDisk::new(std::path::Path::new("."))?;
//! let id = repo.put(Kind::Blob, b"hello world\n")?;
//! assert_eq!(id.to_string(), "3b18e512dba79e4c8300dd08aeb37f8e728b8dad");
//!
//! let object = repo.get(&id)?;
//! assert_eq!(object.payload(), b"hello world\n");
//! # Ok(())
//! # }
//! ```

mod error;
pub use error::{Corruption, Error, Result};

pub mod object;
pub mod repo;
