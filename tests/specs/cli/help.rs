//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    let temp = Project::empty();
    temp.walt_bare()
        .args(&["--help"])
        .passes()
        .stdout_has("append")
        .stdout_has("tail")
        .stdout_has("range")
        .stdout_has("latest");
}

#[test]
fn tail_help_lists_bounds() {
    let temp = Project::empty();
    temp.walt_bare()
        .args(&["tail", "--help"])
        .passes()
        .stdout_has("--from")
        .stdout_has("--to")
        .stdout_has("--chunk-size")
        .stdout_has("--follow");
}
