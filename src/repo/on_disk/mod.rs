//! A repository that stores content on the local file system.
//!
//! **IMPORTANT NOTE:** This is intended as a reference implementation largely
//! for testing purposes and may not necessarily handle all of the edge cases that
//! the traditional `git` command-line interface will handle.
//!
//! That said, it does intentionally use the same `.git/objects` format as
//! command-line git so that results may be compared for similar operations.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use tracing::{debug, trace, warn};

use super::Repo;
use crate::object::Id;
use crate::{Error, Result};

/// Implementation of `gitobj::Repo` that stores content on the local file system.
///
/// Each object lives in its own file at
/// `.git/objects/<first two hex digits>/<remaining 38 hex digits>`.
/// Files are written once and never modified or removed.
#[derive(Debug)]
pub struct OnDisk {
    work_dir: PathBuf,
    git_dir: PathBuf,
    compression: Compression,
}

impl OnDisk {
    /// Open an existing on-disk git repository.
    ///
    /// `work_dir` should be the top-level working directory. A `.git` directory should
    /// exist at this path. Use `init` function to create an empty on-disk repository if
    /// necessary.
    pub fn new(work_dir: &Path) -> Result<Self> {
        let work_dir = work_dir.to_path_buf();
        if !work_dir.exists() {
            return Err(Error::WorkDirDoesntExist(work_dir));
        }

        let git_dir = work_dir.join(".git");
        if !git_dir.is_dir() {
            return Err(Error::GitDirDoesntExist(git_dir));
        }

        Ok(OnDisk {
            work_dir,
            git_dir,
            compression: Compression::default(),
        })
    }

    /// Creates a new, empty git repository on the local file system.
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init).
    pub fn init(work_dir: &Path) -> Result<Self> {
        let git_dir = work_dir.join(".git");
        if git_dir.exists() {
            return Err(Error::GitDirShouldntExist(git_dir));
        }

        create_dir_all(&git_dir)?;
        create_head(&git_dir)?;
        create_objects_dir(&git_dir)?;
        create_refs_dir(&git_dir)?;

        debug!(git_dir = %git_dir.display(), "initialized repository");

        Ok(OnDisk {
            work_dir: work_dir.to_path_buf(),
            git_dir,
            compression: Compression::default(),
        })
    }

    /// Use the given compression level for newly written objects.
    ///
    /// Objects already in the repository are unaffected. The default level
    /// produces the same bytes as command-line git.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Return the working directory for this repo.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.git_dir.as_path()
    }

    /// Return the path to the `.git/objects` directory.
    pub fn objects_dir(&self) -> PathBuf {
        self.git_dir.join("objects")
    }

    /// Return the path where the object with the given ID is stored.
    pub fn object_path(&self, id: &Id) -> PathBuf {
        self.objects_dir()
            .join(id.fan_out_dir())
            .join(id.fan_out_file())
    }
}

impl Repo for OnDisk {
    fn contains(&self, id: &Id) -> Result<bool> {
        Ok(self.object_path(id).is_file())
    }

    fn put_stored(&mut self, id: &Id, stored: &[u8]) -> Result<bool> {
        let path = self.object_path(id);
        if path.is_file() {
            trace!(%id, "loose object exists; not rewriting");
            return Ok(false);
        }

        if path.exists() {
            warn!(path = %path.display(), "object path exists but is not a file");
            return Err(Error::io(
                path,
                io::Error::new(io::ErrorKind::AlreadyExists, "object path is not a file"),
            ));
        }

        let dir = self.objects_dir().join(id.fan_out_dir());
        create_fan_out_dir(&dir)?;

        // Write the whole object beside its final path, then link it into
        // place. The final path never holds a partial file.
        let mut temp = tempfile::Builder::new()
            .prefix("tmp_obj_")
            .tempfile_in(&dir)
            .map_err(|e| Error::io(&dir, e))?;

        temp.write_all(stored)
            .map_err(|e| Error::io(temp.path(), e))?;

        match temp.persist_noclobber(&path) {
            Ok(_) => {
                debug!(%id, path = %path.display(), bytes = stored.len(), "wrote loose object");
                Ok(true)
            }
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                // Another writer got there first with the same content.
                debug!(%id, "loose object appeared during write");
                Ok(false)
            }
            Err(err) => Err(Error::io(path, err.error)),
        }
    }

    fn get_stored(&self, id: &Id) -> Result<Vec<u8>> {
        let path = self.object_path(id);
        trace!(%id, path = %path.display(), "reading loose object");

        match fs::read(&path) {
            Ok(stored) => Ok(stored),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(Error::ObjectNotFound {
                id: *id,
                path: Some(path),
            }),
            Err(err) => Err(Error::io(path, err)),
        }
    }

    fn compression(&self) -> Compression {
        self.compression
    }
}

// The objects directory itself belongs to `init`; only the fan-out level is
// created here, and an existing directory counts as success.
fn create_fan_out_dir(dir: &Path) -> Result<()> {
    match fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(err) => {
            if err.kind() == io::ErrorKind::AlreadyExists {
                warn!(path = %dir.display(), "fan-out path exists but is not a directory");
            }
            Err(Error::io(dir, err))
        }
    }
}

fn create_dir_all(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}

fn create_head(git_dir: &Path) -> Result<()> {
    let head_path = git_dir.join("HEAD");
    let head_txt = "ref: refs/heads/main\n";

    fs::write(&head_path, head_txt).map_err(|e| Error::io(head_path, e))
}

fn create_objects_dir(git_dir: &Path) -> Result<()> {
    create_dir_all(&git_dir.join("objects/info"))?;
    create_dir_all(&git_dir.join("objects/pack"))
}

fn create_refs_dir(git_dir: &Path) -> Result<()> {
    create_dir_all(&git_dir.join("refs/heads"))?;
    create_dir_all(&git_dir.join("refs/tags"))
}

#[cfg(test)]
mod tests;
