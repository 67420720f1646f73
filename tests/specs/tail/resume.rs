//! Chunking and resumption specs

use crate::prelude::*;

#[test]
fn chunk_ends_on_a_batch_boundary() {
    let temp = Project::with_batches();

    temp.walt()
        .args(&["tail", "--chunk-size", "1"])
        .passes()
        .stdout_has(r#""type":2201"#)
        .stderr_has("lastTick 3");
}

#[test]
fn resuming_from_last_tick_continues() {
    let temp = Project::with_batches();

    temp.walt()
        .args(&["tail", "--from", "3", "--chunk-size", "1"])
        .passes()
        .stdout_eq(concat!(
            r#"{"tick":"7","type":2300,"database":"1","cid":"5","tid":"0","data":{"_key":"b"}}"#,
            "\n"
        ))
        .stderr_has("lastTick 7");
}

#[test]
fn follow_matches_a_single_unbounded_call() {
    let temp = Project::with_batches();
    let all = temp.walt().args(&["tail"]).passes().stdout();

    temp.walt()
        .args(&["tail", "--chunk-size", "1", "--follow"])
        .passes()
        .stdout_eq(&all)
        .stderr_has("lastTick 7");
}

#[test]
fn end_tick_leaves_later_batches() {
    let temp = Project::with_batches();

    temp.walt()
        .args(&["tail", "--from", "3", "--to", "5"])
        .passes()
        .stdout_eq("")
        .stderr_has("lastTick 5");
}
