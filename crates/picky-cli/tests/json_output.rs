#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::json;

fn stub(dir: &Path, name: &str, output: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\ncat <<'PICKY_EOF'\n{output}PICKY_EOF\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

#[test]
fn json_findings_are_the_only_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let pip = stub(dir.path(), "pip", "b==4.1\n");
    fs::write(dir.path().join("conda_versions.txt"), "x=1\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_picky"))
        .current_dir(dir.path())
        .args(["requirements", "--format", "json", "--update", "--pip"])
        .arg(&pip)
        .arg("--conda")
        .arg(dir.path().join("conda"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let findings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        findings,
        json!([
            {
                "kind": "added",
                "package": "b",
                "version": "4.1",
                "missing_from": "requirements.txt",
            },
            {
                "kind": "removed",
                "package": "x",
                "version": "1",
                "missing_from": "conda list -e",
            },
        ])
    );

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("'conda_versions.txt' found but conda missing"));
    assert!(stderr.contains("Updating 'requirements.txt'"));
    assert!(!stderr.contains("Updating 'conda_versions.txt'"));
    assert_eq!(
        fs::read_to_string(dir.path().join("conda_versions.txt")).unwrap(),
        "x=1\n"
    );
}
