use std::path::Path;

use gitobj::repo::on_disk::OnDisk;
use gitobj::{Error, Result};

// Discover a git repo starting from the given path.
//
// The path itself and then each of its ancestors is checked for a
// `.git` directory; the first one found wins. Git supports many more
// discovery options (`GIT_DIR`, `.git` files, bare repos), none of
// which are handled here.
//
// Returns a `Result` with `gitobj::repo::on_disk::OnDisk` or
// `gitobj::Error` if no such repo exists.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<OnDisk> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::WorkDirDoesntExist(path.to_path_buf()));
    }

    match path.ancestors().find(|dir| dir.join(".git").is_dir()) {
        Some(work_dir) => OnDisk::new(work_dir),
        None => Err(Error::GitDirDoesntExist(path.join(".git"))),
    }
}
