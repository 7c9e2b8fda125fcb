use std::path::PathBuf;
use std::process::Command;

use assert_cmd::prelude::*;

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

fn combine(args: &[&str]) -> std::process::Output {
    Command::cargo_bin("shamir-combine")
        .unwrap()
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn prints_secret_per_file() {
    let canonical = fixture("canonical.json");
    let large = fixture("large.json");
    let out = combine(&[&canonical, &large]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains(&format!("The secret (constant term) for {} is: 3", canonical)));
    assert!(stdout.contains("339718555404937321798972737547867036729871146562748202194111"));
}

#[test]
fn hex_output() {
    let out = combine(&["--hex", &fixture("canonical.json")]);
    assert!(out.status.success());
    assert!(String::from_utf8(out.stdout).unwrap().trim_end().ends_with("is: 03"));
}

#[test]
fn bad_file_fails_but_others_still_print() {
    let out = combine(&[&fixture("tampered.json"), &fixture("canonical.json"), "no-such-file.json"]);
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8(out.stdout).unwrap();
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stderr.contains("disagree"));
    assert!(stderr.contains("majority value"));
    assert!(stderr.contains("unable to open no-such-file.json"));
}

#[test]
fn validation_can_be_turned_off() {
    let out = combine(&["--validate", "off", &fixture("tampered.json")]);
    assert!(out.status.success());
}

#[test]
fn rejects_unknown_mode() {
    let out = combine(&["--validate", "sometimes", &fixture("canonical.json")]);
    assert!(!out.status.success());
}
