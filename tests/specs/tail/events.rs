//! Tail output specs

use crate::prelude::*;

#[test]
fn tail_prints_one_event_per_line() {
    let temp = Project::with_batches();

    temp.walt()
        .args(&["tail"])
        .passes()
        .stdout_eq(concat!(
            r#"{"tick":"1","type":2200,"database":"1","tid":"7"}"#,
            "\n",
            r#"{"tick":"3","type":2300,"database":"1","cid":"5","tid":"7","data":{"_key":"a"}}"#,
            "\n",
            r#"{"tick":"3","type":2201,"database":"1","tid":"7"}"#,
            "\n",
            r#"{"tick":"7","type":2300,"database":"1","cid":"5","tid":"0","data":{"_key":"b"}}"#,
            "\n",
        ))
        .stderr_has("lastTick 7");
}

#[test]
fn include_system_reports_system_collections() {
    let temp = Project::with_batches();

    temp.walt()
        .args(&["tail", "--include-system"])
        .passes()
        .stdout_has(r#"{"tick":"5","type":2300,"database":"1","cid":"9","tid":"0","data":{"_key":"root"}}"#);
}

#[test]
fn empty_wal_prints_nothing() {
    let temp = Project::empty();

    temp.walt()
        .args(&["tail", "--from", "12"])
        .passes()
        .stdout_eq("")
        .stderr_has("lastTick 12");
}
