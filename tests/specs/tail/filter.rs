//! Filter specs

use crate::prelude::*;

#[test]
fn filter_limits_collections() {
    let temp = Project::with_batches();
    temp.file(
        "walt.toml",
        &format!("include_system = true\n\n[[filter]]\ndatabase = 1\ncollections = [9]\n{}", CATALOG),
    );

    temp.walt()
        .args(&["tail"])
        .passes()
        .stdout_eq(concat!(
            r#"{"tick":"5","type":2300,"database":"1","cid":"9","tid":"0","data":{"_key":"root"}}"#,
            "\n"
        ));
}

#[test]
fn excluded_collections_stay_hidden() {
    let temp = Project::with_batches();
    temp.file(
        "walt.toml",
        &format!("excluded_collections = [\"_users\"]\n{}", CATALOG),
    );

    temp.walt()
        .args(&["tail", "--include-system"])
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
        ));
}
