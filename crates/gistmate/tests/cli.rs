//! End-to-end tests for the `gistmate` binary.
//!
//! Every command runs with an isolated home, git config, gistmate config,
//! and cache file, and with an API URL nothing listens on.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("gitconfig"), "").unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn cache_file(&self) -> std::path::PathBuf {
        self.path().join("gists")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gistmate"));
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("GIT_CONFIG_GLOBAL", self.path().join("gitconfig"))
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GISTMATE_CONFIG_DIR", self.path().join("config"))
            .env("GISTMATE_CACHE_FILE", self.cache_file())
            .env("GISTMATE_API_URL", "http://127.0.0.1:9/")
            .env("GISTMATE_WEB_URL", "https://gist.example.com")
            .env("GISTMATE_CLIPBOARD", "true")
            .env("GISTMATE_PROMPT_DISABLED", "1")
            .env_remove("GITHUB_USER")
            .env_remove("GITHUB_PASSWORD")
            .env_remove("GISTMATE_EDITOR")
            .env_remove("GISTMATE_DEBUG");
        cmd
    }
}

#[test]
fn test_should_list_actions_in_help() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_should_print_help_without_command() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Usage: gistmate"));
}

#[test]
fn test_should_print_version() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_should_exit_4_without_credentials() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.path().join("notes.md"), "hello").unwrap();
    sandbox
        .cmd()
        .args(["create", "notes.md"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("no GitHub credentials found"))
        .stderr(predicate::str::contains("GITHUB_USER"));
    assert!(!sandbox.cache_file().exists());
}

#[test]
fn test_should_exit_1_for_untracked_file() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["id", "notes.md"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'notes.md' is not in the gist cache"));
}

#[test]
fn test_should_read_existing_cache_file() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.cache_file(), "abc123: notes.md,todo.txt\n1234567: old.rb\n").unwrap();
    sandbox
        .cmd()
        .args(["id", "todo.txt"])
        .assert()
        .success()
        .stdout("abc123\n");
    sandbox
        .cmd()
        .args(["id", "old.rb"])
        .assert()
        .success()
        .stdout("1234567\n");
}

#[test]
fn test_should_print_url_for_tracked_file() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.cache_file(), "abc123: notes.md\n").unwrap();
    sandbox
        .cmd()
        .args(["url", "notes.md"])
        .assert()
        .success()
        .stdout("https://gist.example.com/abc123\n");
}

#[test]
fn test_should_reject_invalid_gist_id() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["get", "not a gist"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid gist id"));
}

#[test]
fn test_should_report_network_failure() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["get", "abc123"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to fetch gist 'abc123'"));
    assert!(!sandbox.path().join("notes.md").exists());
}

#[test]
fn test_should_round_trip_config_value() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "set", "editor", "nvim"])
        .assert()
        .success();
    sandbox
        .cmd()
        .args(["config", "get", "editor"])
        .assert()
        .success()
        .stdout("nvim\n");
    assert!(sandbox.path().join("config").join("config.yml").exists());
}

#[test]
fn test_should_reject_unknown_config_key() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "set", "git_protocol", "ssh"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("git_protocol"));
}
