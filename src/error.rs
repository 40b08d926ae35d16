use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::object::Id;

/// Describes the potential error conditions that might arise from gitobj operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The compressor failed while encoding an object.
    #[error("unable to compress object: {0}")]
    Encoding(#[source] io::Error),

    /// Stored bytes could not be decoded back into the framed object.
    #[error("corrupt object{}: {reason}", for_id(.id))]
    CorruptObject { id: Option<Id>, reason: Corruption },

    /// Decoded bytes do not have the `<kind> <size>\0` structure.
    #[error("malformed object{}: {reason}", for_id(.id))]
    MalformedObject { id: Option<Id>, reason: String },

    /// No object is stored under the requested ID.
    #[error("object {id} not found{}", at_path(.path))]
    ObjectNotFound { id: Id, path: Option<PathBuf> },

    #[error("I/O error at {}: {source}", .path.display())]
    StorageIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("work dir doesn't exist: {0}")]
    WorkDirDoesntExist(PathBuf),

    #[error("git dir doesn't exist: {0}")]
    GitDirDoesntExist(PathBuf),

    #[error("git dir shouldn't exist: {0}")]
    GitDirShouldntExist(PathBuf),
}

/// The specific way in which a stored object failed validation.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Corruption {
    #[error("invalid zlib stream ({0})")]
    Inflate(String),

    #[error("zlib stream ends before its end-of-stream marker")]
    Truncated,

    #[error("garbage at end of zlib stream")]
    TrailingGarbage,

    #[error("header declares {declared} bytes but {actual} follow")]
    SizeMismatch { declared: usize, actual: usize },
}

impl Error {
    pub(crate) fn corrupt(reason: Corruption) -> Self {
        Error::CorruptObject { id: None, reason }
    }

    pub(crate) fn malformed<S: Into<String>>(reason: S) -> Self {
        Error::MalformedObject {
            id: None,
            reason: reason.into(),
        }
    }

    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Error::StorageIo {
            path: path.into(),
            source,
        }
    }

    /// Attach the ID of the object being decoded, if the error is about
    /// object content and doesn't already name one.
    pub(crate) fn for_object(self, object_id: &Id) -> Self {
        match self {
            Error::CorruptObject { id: None, reason } => Error::CorruptObject {
                id: Some(*object_id),
                reason,
            },
            Error::MalformedObject { id: None, reason } => Error::MalformedObject {
                id: Some(*object_id),
                reason,
            },
            err => err,
        }
    }

    /// Returns true if the error means stored content failed validation.
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            Error::CorruptObject { .. } | Error::MalformedObject { .. }
        )
    }

    /// Returns true if the error means the object doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ObjectNotFound { .. })
    }
}

fn for_id(id: &Option<Id>) -> String {
    match id {
        Some(id) => format!(" {}", id),
        None => String::new(),
    }
}

fn at_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" at {}", path.display()),
        None => String::new(),
    }
}

/// A specialized `Result` type for gitobj operations.
pub type Result<T> = std::result::Result<T, Error>;
