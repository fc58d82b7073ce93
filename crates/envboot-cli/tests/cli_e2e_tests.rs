//! CLI end-to-end tests that invoke the compiled `envboot` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use rstest::rstest;
use tempfile::TempDir;

const PYPROJECT: &str = r#"
[project]
name = "myia-backend-relay"

[custom.tool.conda.cpu-dependencies]
numpy = "^1.16"
cffi = ""
tvm = { version = "0.7", channel = "pip" }

[custom.tool.conda.gpu-dependencies]
numpy = "^1.16"
cupy = "~7.0"
"#;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("pyproject.toml"), PYPROJECT).unwrap();
    dir
}

fn envboot(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("envboot").unwrap();
    cmd.current_dir(dir).env_remove("ENVBOOT_MANIFEST").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_exits_zero() {
    let dir = project();
    envboot(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"));
}

#[test]
fn test_extract_dotted_path() {
    let dir = project();
    envboot(dir.path())
        .args(["extract", "custom.tool.conda.cpu-dependencies"])
        .assert()
        .success()
        .stdout("numpy=1.16\ncffi\ntvm=0.7\n")
        .stderr("");
}

#[rstest]
#[case("cpu", "numpy=1.16\ncffi\ntvm=0.7\n")]
#[case("gpu", "numpy=1.16\ncupy=7.0\n")]
#[case("GPU", "numpy=1.16\ncupy=7.0\n")]
fn test_extract_variant(#[case] variant: &str, #[case] expected: &str) {
    let dir = project();
    envboot(dir.path())
        .args(["extract", "--variant", variant])
        .assert()
        .success()
        .stdout(expected.to_string());
}

#[test]
fn test_extract_unknown_variant_is_usage_error() {
    let dir = project();
    envboot(dir.path())
        .args(["extract", "--variant", "tpu"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tpu"));
}

#[test]
fn test_extract_pip_only_records() {
    let dir = project();
    envboot(dir.path())
        .args([
            "extract",
            "--variant",
            "cpu",
            "--channel",
            "pip",
            "--target",
            "pip",
        ])
        .assert()
        .success()
        .stdout("tvm==0.7\n");
}

#[test]
fn test_extract_missing_section_fails() {
    let dir = project();
    envboot(dir.path())
        .args(["extract", "custom.tool.conda.tpu-dependencies"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("tpu-dependencies"));
}

#[test]
fn test_extract_not_a_leaf_fails() {
    let dir = project();
    envboot(dir.path())
        .args(["extract", "custom.tool"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a dependency list"));
}

#[test]
fn test_extract_with_manifest_env() {
    let dir = project();
    fs::rename(
        dir.path().join("pyproject.toml"),
        dir.path().join("deps.toml"),
    )
    .unwrap();
    envboot(dir.path())
        .env("ENVBOOT_MANIFEST", "deps.toml")
        .args(["extract", "--variant", "gpu"])
        .assert()
        .success()
        .stdout("numpy=1.16\ncupy=7.0\n");
}

#[test]
fn test_config_file_sets_target() {
    let dir = project();
    fs::write(dir.path().join("envboot.toml"), "[extract]\ntarget = \"pip\"\n").unwrap();
    envboot(dir.path())
        .args(["extract", "--variant", "gpu"])
        .assert()
        .success()
        .stdout("numpy>=1.16,<2\ncupy>=7.0,<7.1\n");
}

#[test]
fn test_sections_lists_variants() {
    let dir = project();
    envboot(dir.path())
        .arg("sections")
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.tool.conda.cpu-dependencies"))
        .stdout(predicate::str::contains("custom.tool.conda.gpu-dependencies"));
}

#[test]
fn test_env_file_to_disk() {
    let dir = project();
    envboot(dir.path())
        .args(["env-file", "--variant", "cpu", "-o", "environment.yml"])
        .assert()
        .success();

    let written = fs::read_to_string(dir.path().join("environment.yml")).unwrap();
    assert!(written.starts_with("name: myia-backend-relay\n"));
    assert!(written.contains("numpy=1.16"));
    assert!(written.contains("tvm==0.7"));
}
