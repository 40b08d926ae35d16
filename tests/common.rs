use std::path::Path;

use assert_cmd::Command;

pub fn gitobj(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gitobj").unwrap();
    cmd.current_dir(dir).env_remove("GITOBJ_LOG");
    cmd
}

#[allow(dead_code)]
pub fn init_empty_repo(dir: &Path) {
    gitobj(dir).arg("init").assert().success();
}

#[allow(dead_code)]
pub fn hash_stdin(dir: &Path, content: &[u8]) -> String {
    let output = gitobj(dir)
        .args(&["hash-object", "-w", "--stdin"])
        .write_stdin(content)
        .output()
        .unwrap();

    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim_end().to_string()
}
