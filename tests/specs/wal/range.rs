//! Range and latest specs

use crate::prelude::*;

#[test]
fn empty_wal_range_is_zero() {
    let temp = Project::empty();
    temp.walt().args(&["range"]).passes().stdout_eq("0 0\n");
}

#[test]
fn range_spans_all_batches() {
    let temp = Project::with_batches();
    temp.walt().args(&["range"]).passes().stdout_eq("1 7\n");
}

#[test]
fn latest_prints_newest_tick() {
    let temp = Project::with_batches();
    temp.walt().args(&["latest"]).passes().stdout_eq("7\n");
}
