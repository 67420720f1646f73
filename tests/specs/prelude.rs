//! Shared helpers for CLI specs

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// Catalog with one database and two collections, one of them a system one
pub const CATALOG: &str = r#"
[[databases]]
id = 1
name = "shop"

[[databases.collections]]
id = 5
name = "orders"
uuid = "h1/5"

[[databases.collections]]
id = 9
name = "_users"
uuid = "h1/9"
"#;

/// A transaction writing to `orders`, then a single put to `_users`
pub const BATCHES: &str = r#"[
  [
    {"op": "log_metadata", "value": {"type": "begin_transaction", "database_id": 1, "transaction_id": 7}},
    {"op": "log_metadata", "value": {"type": "document_operations_prologue", "collection_id": 5}},
    {"op": "put", "cf": "documents", "key": "00000000000000050000000000000001", "value": {"_key": "a"}}
  ],
  [
    {"op": "log_metadata", "value": {"type": "single_put", "database_id": 1, "collection_id": 9}},
    {"op": "put", "cf": "documents", "key": "00000000000000090000000000000002", "value": {"_key": "root"}}
  ],
  [
    {"op": "log_metadata", "value": {"type": "single_put", "database_id": 1, "collection_id": 5}},
    {"op": "put", "cf": "documents", "key": "00000000000000050000000000000003", "value": {"_key": "b"}}
  ]
]"#;

/// A scratch directory with its own config home
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Project with the shared catalog configured and `BATCHES` in `wal.jsonl`
    pub fn with_batches() -> Self {
        let project = Self::empty();
        project.file("walt.toml", CATALOG);
        project.file("batches.json", BATCHES);
        project
            .walt()
            .args(&["append", "batches.json"])
            .passes();
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, path: &str, content: &str) {
        let path = self.dir.path().join(path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// `walt` with `--wal wal.jsonl --config walt.toml` when that file exists
    pub fn walt(&self) -> Walt {
        let mut cmd = Command::cargo_bin("walt").unwrap();
        cmd.current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("RUST_LOG")
            .args(["--wal", "wal.jsonl"]);
        if self.path().join("walt.toml").is_file() {
            cmd.args(["--config", "walt.toml"]);
        }
        Walt { cmd }
    }

    /// `walt` without any default arguments
    pub fn walt_bare(&self) -> Walt {
        let mut cmd = Command::cargo_bin("walt").unwrap();
        cmd.current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("RUST_LOG");
        Walt { cmd }
    }
}

pub struct Walt {
    cmd: Command,
}

impl Walt {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn passes(mut self) -> Run {
        let output = self.cmd.output().unwrap();
        let run = Run { output };
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstdout:\n{}\nstderr:\n{}",
            run.output.status,
            run.stdout(),
            run.stderr()
        );
        run
    }

    pub fn fails(mut self) -> Run {
        let output = self.cmd.output().unwrap();
        let run = Run { output };
        assert!(
            !run.output.status.success(),
            "expected failure\nstdout:\n{}",
            run.stdout()
        );
        run
    }
}

pub struct Run {
    output: std::process::Output,
}

impl Run {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout lacks {:?}:\n{}", needle, stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr lacks {:?}:\n{}", needle, stderr);
        self
    }
}
