#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

struct TestSandbox {
    root: PathBuf,
}

impl TestSandbox {
    fn new(prefix: &str) -> Self {
        let root = unique_temp_dir(prefix);
        fs::create_dir_all(&root).expect("create sandbox dir");
        Self { root }
    }

    fn write_stub(&self, name: &str, script: &str) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, script).expect("write stub script");
        let mut perms = fs::metadata(&path).expect("stat stub script").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("chmod stub script");
        path
    }

    fn stub_pip(&self) -> PathBuf {
        self.write_stub(
            "pip",
            r#"#!/bin/sh
case "$2" in
  app) echo "Requires: web, db" ;;
  web) echo "Requires: http" ;;
  db) echo "Requires:" ;;
  http) echo "Requires:" ;;
  loopA) echo "Requires: loopB" ;;
  loopB) echo "Requires: loopA" ;;
  *) echo "WARNING: Package(s) not found: $2" >&2; exit 1 ;;
esac
"#,
        )
    }

    fn run_show(&self, args: &[&str]) -> std::process::Output {
        Command::new(depict_bin())
            .current_dir(&self.root)
            .args(args)
            .output()
            .expect("run depict show")
    }
}

impl Drop for TestSandbox {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

fn depict_bin() -> PathBuf {
    if let Ok(path) = std::env::var("CARGO_BIN_EXE_depict") {
        return PathBuf::from(path);
    }

    let current_exe = std::env::current_exe().expect("resolve current test binary path");
    let target_dir = current_exe
        .parent()
        .and_then(|path| path.parent())
        .expect("derive cargo target dir from test binary path");
    let fallback = target_dir.join("depict");

    if fallback.is_file() {
        fallback
    } else {
        panic!(
            "CARGO_BIN_EXE_depict is not set and fallback binary not found at {}",
            fallback.display()
        );
    }
}

fn stdout_of(output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    assert!(output.status.success(), "show failed\nstderr:\n{stderr}");
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn tree_format_nests_dependencies() {
    let sandbox = TestSandbox::new("show-tree");
    let pip = sandbox.stub_pip();

    let output = sandbox.run_show(&[
        "show",
        "--package",
        "app",
        "--pip",
        pip.to_str().expect("utf8 path"),
    ]);
    let stdout = stdout_of(&output);
    assert_eq!(
        stdout,
        "app\n\
         |-- db\n\
         `-- web\n\
         \x20\x20\x20\x20`-- http\n"
    );
}

#[test]
fn cycles_are_marked_not_looped() {
    let sandbox = TestSandbox::new("show-cycle");
    let pip = sandbox.stub_pip();

    let output = sandbox.run_show(&[
        "show",
        "--package",
        "loopA",
        "--pip",
        pip.to_str().expect("utf8 path"),
        "--max-depth",
        "10",
    ]);
    let stdout = stdout_of(&output);
    assert!(stdout.contains("(cycle)"), "stdout:\n{stdout}");
}

#[test]
fn dot_format_declares_root_first() {
    let sandbox = TestSandbox::new("show-dot");
    let pip = sandbox.stub_pip();

    let output = sandbox.run_show(&[
        "show",
        "--package",
        "app",
        "--format",
        "dot",
        "--pip",
        pip.to_str().expect("utf8 path"),
    ]);
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "digraph \"app dependencies\" {");
    assert_eq!(lines[1], "  \"app\";");
    assert!(stdout.contains("  \"app\" -> \"web\";"));
    assert!(stdout.contains("  \"web\" -> \"http\";"));
}

#[test]
fn json_format_lists_root_and_edges() {
    let sandbox = TestSandbox::new("show-json");
    let pip = sandbox.stub_pip();

    let output = sandbox.run_show(&[
        "show",
        "--package",
        "app",
        "--format",
        "json",
        "--pip",
        pip.to_str().expect("utf8 path"),
    ]);
    let stdout = stdout_of(&output);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("parse show json");
    assert_eq!(value["root"], "app");
    assert_eq!(value["edges"]["app"][0], "web");
    assert_eq!(value["edges"]["app"][1], "db");
    assert_eq!(value["edges"]["web"][0], "http");
}

#[test]
fn max_depth_zero_prints_only_the_root() {
    let sandbox = TestSandbox::new("show-depth-zero");
    let pip = sandbox.stub_pip();

    let output = sandbox.run_show(&[
        "show",
        "--package",
        "app",
        "--max-depth",
        "0",
        "--pip",
        pip.to_str().expect("utf8 path"),
    ]);
    let stdout = stdout_of(&output);
    assert_eq!(stdout, "app\n");
}

#[test]
fn apt_source_parses_depends_lines() {
    let sandbox = TestSandbox::new("show-apt");
    let apt_cache = sandbox.write_stub(
        "apt-cache",
        r#"#!/bin/sh
case "$2" in
  bash)
    echo "bash"
    echo "  Depends: base-files"
    echo "  Depends: libc6"
    echo "  Depends: <awk-virtual>"
    ;;
  base-files) echo "base-files" ;;
  libc6) echo "libc6" ;;
  *) echo "E: No packages found" >&2; exit 100 ;;
esac
"#,
    );

    let output = sandbox.run_show(&[
        "show",
        "--package",
        "bash",
        "--source",
        "apt",
        "--apt-cache",
        apt_cache.to_str().expect("utf8 path"),
    ]);
    let stdout = stdout_of(&output);
    assert_eq!(
        stdout,
        "bash\n\
         |-- base-files\n\
         `-- libc6\n"
    );
}

#[test]
fn config_file_supplies_defaults_and_flags_override() {
    let sandbox = TestSandbox::new("show-config");
    let pip = sandbox.stub_pip();
    fs::write(
        sandbox.root.join("depict.toml"),
        "[defaults]\nmax_depth = 1\n",
    )
    .expect("write depict.toml");

    // config caps the walk at depth 1: http is never reached
    let shallow = sandbox.run_show(&[
        "show",
        "--package",
        "app",
        "--pip",
        pip.to_str().expect("utf8 path"),
    ]);
    let stdout = stdout_of(&shallow);
    assert!(stdout.contains("web"));
    assert!(!stdout.contains("http"), "stdout:\n{stdout}");

    // an explicit flag wins over the config file
    let deep = sandbox.run_show(&[
        "show",
        "--package",
        "app",
        "--max-depth",
        "3",
        "--pip",
        pip.to_str().expect("utf8 path"),
    ]);
    let stdout = stdout_of(&deep);
    assert!(stdout.contains("http"), "stdout:\n{stdout}");
}

#[test]
fn unknown_package_warns_and_continues_for_siblings() {
    let sandbox = TestSandbox::new("show-partial");
    let pip = sandbox.write_stub(
        "pip",
        r#"#!/bin/sh
case "$2" in
  app) echo "Requires: ghost, real" ;;
  real) echo "Requires:" ;;
  *) echo "WARNING: Package(s) not found: $2" >&2; exit 1 ;;
esac
"#,
    );

    let output = sandbox.run_show(&[
        "--no-color",
        "show",
        "--package",
        "app",
        "--pip",
        pip.to_str().expect("utf8 path"),
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    assert!(output.status.success());
    assert!(stderr.contains("package 'ghost' not found by pip"));
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    assert!(stdout.contains("ghost"));
    assert!(stdout.contains("real"));
}

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_nanos();
    let pid = std::process::id();
    std::env::temp_dir().join(format!("depict-{prefix}-{pid}-{nanos}"))
}
