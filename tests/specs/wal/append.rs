//! Append specs

use crate::prelude::*;

#[test]
fn append_prints_batch_sequences() {
    let temp = Project::empty();
    temp.file("batches.json", BATCHES);

    temp.walt()
        .args(&["append", "batches.json"])
        .passes()
        .stdout_eq("1\n4\n6\n");
}

#[test]
fn append_continues_after_existing_batches() {
    let temp = Project::with_batches();
    temp.file("empty.json", "[[]]");

    temp.walt()
        .args(&["append", "empty.json"])
        .passes()
        .stdout_eq("8\n");
}
