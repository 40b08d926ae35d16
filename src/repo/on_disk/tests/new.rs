use std::fs;

use super::super::*;

use crate::object::Id;
use crate::Error;

#[test]
fn happy_path() {
    let temp = tempfile::tempdir().unwrap();
    let work_dir = temp.path();
    OnDisk::init(work_dir).unwrap();

    let r = OnDisk::new(work_dir).unwrap();
    assert_eq!(r.work_dir(), work_dir);
    assert_eq!(r.git_dir(), work_dir.join(".git").as_path());
    assert_eq!(r.objects_dir(), work_dir.join(".git/objects"));
}

#[test]
fn error_no_work_dir() {
    let temp = tempfile::tempdir().unwrap();
    let work_dir = temp.path().join("bogus");

    let err = OnDisk::new(&work_dir).unwrap_err();
    if let Error::WorkDirDoesntExist(path) = err {
        assert_eq!(path, work_dir);
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn error_no_git_dir() {
    let temp = tempfile::tempdir().unwrap();
    let work_dir = temp.path();

    let err = OnDisk::new(work_dir).unwrap_err();
    if let Error::GitDirDoesntExist(path) = err {
        assert_eq!(path, work_dir.join(".git"));
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn error_git_dir_is_a_file() {
    let temp = tempfile::tempdir().unwrap();
    let work_dir = temp.path();
    fs::write(work_dir.join(".git"), "gitdir: elsewhere\n").unwrap();

    let err = OnDisk::new(work_dir).unwrap_err();
    if let Error::GitDirDoesntExist(_) = err {
        // expected
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn object_path_uses_fan_out() {
    let temp = tempfile::tempdir().unwrap();
    let r = OnDisk::init(temp.path()).unwrap();

    let id: Id = "3b18e512dba79e4c8300dd08aeb37f8e728b8dad".parse().unwrap();
    assert_eq!(
        r.object_path(&id),
        temp.path()
            .join(".git/objects/3b/18e512dba79e4c8300dd08aeb37f8e728b8dad")
    );
}
