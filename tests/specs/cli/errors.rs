//! Error reporting specs

use crate::prelude::*;

#[test]
fn missing_wal_is_reported() {
    let temp = Project::empty();
    temp.walt_bare()
        .args(&["range"])
        .fails()
        .stderr_has("no WAL file");
}

#[test]
fn wal_can_come_from_config() {
    let temp = Project::empty();
    temp.file(".config/walt/config.toml", "wal = \"data/wal.jsonl\"\n");
    temp.walt_bare().args(&["range"]).passes().stdout_eq("0 0\n");

    assert!(temp.path().join("data/wal.jsonl").is_file());
}

#[test]
fn missing_explicit_config_is_reported() {
    let temp = Project::empty();
    temp.walt()
        .args(&["--config", "nope.toml", "range"])
        .fails()
        .stderr_has("cannot read config");
}

#[test]
fn malformed_batches_are_rejected() {
    let temp = Project::empty();
    temp.file("batches.json", r#"{"op": "put"}"#);
    temp.walt()
        .args(&["append", "batches.json"])
        .fails()
        .stderr_has("JSON array of record batches");
}

#[test]
fn invalid_log_level_is_reported() {
    let temp = Project::empty();
    temp.walt()
        .args(&["--log-level", "walt=verbose", "range"])
        .fails()
        .stderr_has("invalid log level");
}
