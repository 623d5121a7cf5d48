//! Integration tests for the prols CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn touch(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// A project directory plus an isolated HOME holding the global config
struct Fixture {
    project: TempDir,
    home: TempDir,
}

impl Fixture {
    fn new(global_config: &str) -> Self {
        let fixture = Self {
            project: TempDir::new().unwrap(),
            home: TempDir::new().unwrap(),
        };
        touch(
            fixture.home.path(),
            ".config/prols/prols.conf",
            global_config.as_bytes(),
        );
        fixture
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("prols").unwrap();
        cmd.current_dir(self.project.path())
            .env("HOME", self.home.path())
            .env_remove("RUST_LOG")
            .env_remove("PROLS_GLOBAL");
        cmd
    }

    fn stdout(&self, args: &[&str]) -> String {
        let output = self.command().args(args).output().unwrap();
        assert!(output.status.success(), "prols failed: {:?}", output);
        String::from_utf8(output.stdout).unwrap()
    }
}

const GO_RULES: &str = r#"
ignore_dirs: [.git, node_modules]
rules:
  - suffix: .go
    score: 10
  - prefix: vendor/
    score: -100
"#;

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("prols").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rules and scores"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("prols").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("prols"));
}

#[test]
fn test_scores_order_output() {
    let fixture = Fixture::new(GO_RULES);
    touch(fixture.project.path(), "main.go", b"package main\n");
    touch(fixture.project.path(), "vendor/lib.go", b"package lib\n");
    touch(fixture.project.path(), "README.md", b"# readme\n");

    let stdout = fixture.stdout(&[]);
    assert_eq!(stdout, "vendor/lib.go\nREADME.md\nmain.go\n");
}

#[test]
fn test_hide_negative_and_reverse() {
    let fixture = Fixture::new(GO_RULES);
    touch(fixture.project.path(), "main.go", b"package main\n");
    touch(fixture.project.path(), "vendor/lib.go", b"package lib\n");
    touch(fixture.project.path(), "README.md", b"# readme\n");

    let stdout = fixture.stdout(&["--hide-negative", "--reverse"]);
    assert_eq!(stdout, "main.go\nREADME.md\n");
}

#[test]
fn test_ignore_dirs_from_config() {
    let fixture = Fixture::new(GO_RULES);
    touch(fixture.project.path(), "node_modules/pkg/index.js", b"");
    touch(fixture.project.path(), "web/node_modules/pkg/index.js", b"");
    touch(fixture.project.path(), "node_modules.txt", b"");
    touch(fixture.project.path(), ".git/HEAD", b"ref: refs/heads/main\n");

    let stdout = fixture.stdout(&[]);
    assert_eq!(stdout, "node_modules.txt\n");
}

#[test]
fn test_gitignore_flag() {
    let fixture = Fixture::new("rules: []\n");
    touch(fixture.project.path(), ".gitignore", b"*.log\n");
    touch(fixture.project.path(), "app.log", b"");
    touch(fixture.project.path(), "app.rs", b"");

    assert_eq!(fixture.stdout(&[]), ".gitignore\napp.log\napp.rs\n");
    assert_eq!(fixture.stdout(&["--use-gitignore"]), ".gitignore\napp.rs\n");
}

#[test]
fn test_inline_rule_and_presort() {
    let fixture = Fixture::new("presort:\n  - field: depth\n    reverse: true\n");
    touch(fixture.project.path(), "c.txt", b"");
    touch(fixture.project.path(), "a/b.txt", b"");
    touch(fixture.project.path(), "a/z.rs", b"");

    assert_eq!(fixture.stdout(&[]), "a/b.txt\na/z.rs\nc.txt\n");
    assert_eq!(
        fixture.stdout(&["-r", "suffix: .rs, score: 5"]),
        "a/b.txt\nc.txt\na/z.rs\n"
    );
}

#[test]
fn test_binary_rule() {
    let fixture = Fixture::new("rules:\n  - binary: true\n    score: -1\n");
    touch(fixture.project.path(), "tool", &[0x7F, 0x45, 0x4C, 0x46, 0x02, 0x01, 0x00, 0x00]);
    touch(fixture.project.path(), "main.c", b"int main(void) { return 0; }\n");

    assert_eq!(fixture.stdout(&["--hide-negative"]), "main.c\n");
}

#[test]
fn test_score_dirs() {
    let fixture = Fixture::new(
        "rules:\n  - prefix: lib/\n    score: 1\n  - suffix: main.rs\n    score: 3\n",
    );
    touch(fixture.project.path(), "lib/a.rs", b"");
    touch(fixture.project.path(), "lib/b.rs", b"");
    touch(fixture.project.path(), "main.rs", b"");

    assert_eq!(fixture.stdout(&[]), "lib/a.rs\nlib/b.rs\nmain.rs\n");
    // lib/ files: 1 + 2, main.rs: 3 + 3
    assert_eq!(fixture.stdout(&["--score-dirs"]), "lib/a.rs\nlib/b.rs\nmain.rs\n");
    assert_eq!(
        fixture.stdout(&["--score-dirs", "--reverse"]),
        "main.rs\nlib/b.rs\nlib/a.rs\n"
    );
}

#[test]
fn test_concurrency_does_not_change_output() {
    let fixture = Fixture::new("rules:\n  - suffix: .rs\n    score: 1\n  - depth: \">2\"\n    score: -1\n");
    for dir in 0..5 {
        for file in 0..4 {
            let ext = if file % 2 == 0 { "rs" } else { "md" };
            touch(
                fixture.project.path(),
                &format!("d{}/s{}/f{}.{}", dir, file % 3, file, ext),
                b"",
            );
        }
    }

    let single = fixture.stdout(&["-j", "1"]);
    let parallel = fixture.stdout(&["-j", "8"]);
    let inline = fixture.stdout(&["-j", "-1"]);

    assert_eq!(single.lines().count(), 20);
    assert_eq!(single, parallel);
    assert_eq!(single, inline);
}

#[test]
fn test_invalid_rule_is_fatal() {
    let fixture = Fixture::new("rules:\n  - depth: \"<\"\n    score: 1\n");
    touch(fixture.project.path(), "main.go", b"");

    fixture
        .command()
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid config rule #1"));
}

#[test]
fn test_explicit_global_path() {
    let fixture = Fixture::new("reverse: true\n");
    let other = fixture.home.path().join("other.conf");
    fs::write(&other, "reverse: false\nrules:\n  - suffix: .md\n    score: 2\n").unwrap();
    touch(fixture.project.path(), "a.md", b"");
    touch(fixture.project.path(), "b.txt", b"");

    assert_eq!(fixture.stdout(&[]), "b.txt\na.md\n");
    assert_eq!(fixture.stdout(&["-c", other.to_str().unwrap()]), "b.txt\na.md\n");
    assert_eq!(fixture.stdout(&["--reverse"]), "b.txt\na.md\n");
}

#[test]
fn test_show_config_merges_layers() {
    let fixture = Fixture::new("reverse: true\nrules:\n  - suffix: .go\n    score: 10\n");
    touch(fixture.project.path(), ".prols.yml", b"score_dirs: true\n");
    touch(fixture.project.path(), "main.go", b"");

    fixture
        .command()
        .args(["--show-config", "--hide-negative"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reverse: true"))
        .stdout(predicate::str::contains("score_dirs: true"))
        .stdout(predicate::str::contains("hide_negative: true"))
        .stdout(predicate::str::contains("main.go").not());
}

#[test]
fn test_runs_without_any_config_file() {
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    touch(project.path(), "src/main.rs", b"fn main() {}\n");
    touch(project.path(), "Cargo.toml", b"[package]\n");
    touch(project.path(), ".git/HEAD", b"ref: refs/heads/main\n");

    Command::cargo_bin("prols")
        .unwrap()
        .current_dir(project.path())
        .env("HOME", home.path())
        .env_remove("RUST_LOG")
        .env_remove("PROLS_GLOBAL")
        .assert()
        .success()
        .stdout("Cargo.toml\nsrc/main.rs\n");
}
