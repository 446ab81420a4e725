use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Isolated working directory so no stray sandtable.yaml or env var leaks in.
struct SandtableTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl SandtableTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let root = tmp.path().to_path_buf();
        Ok(Self { _tmp: tmp, root })
    }

    fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    fn sandtable(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sandtable"));
        cmd.current_dir(&self.root)
            .env_remove("SANDTABLE_LANGUAGE")
            .env_remove("SANDTABLE_ENV")
            .env_remove("SANDTABLE_CONFIG");
        cmd
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

#[test]
fn test_validate_accepts_valid_assignment() -> Result<()> {
    let env = SandtableTestEnv::new()?;
    env.sandtable()
        .args([
            "validate",
            "--operation",
            "assignUser",
            "--data",
            r#"{"userId":"u1","activityId":"a1"}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""isValid": true"#));
    Ok(())
}

#[test]
fn test_validate_rejects_long_reason() -> Result<()> {
    let env = SandtableTestEnv::new()?;
    let reason = "x".repeat(501);
    let request = env.write(
        "assign.json",
        &format!(r#"{{"userId":"u1","activityId":"a1","reason":"{}"}}"#, reason),
    )?;

    env.sandtable()
        .args(["validate", "-o", "assignUser", "--input"])
        .arg(&request)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""isValid": false"#))
        .stdout(predicate::str::contains(r#""codeName": "FIELD_TOO_LONG""#))
        .stdout(predicate::str::contains("1011"))
        .stderr(predicate::str::contains("1 validation error(s)"));
    Ok(())
}

#[test]
fn test_validate_unknown_operation_is_a_result() -> Result<()> {
    let env = SandtableTestEnv::new()?;
    env.sandtable()
        .args(["validate", "-o", "not-a-real-operation", "--data", "{}"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1023"));
    Ok(())
}

#[test]
fn test_validate_malformed_json_fails() -> Result<()> {
    let env = SandtableTestEnv::new()?;
    env.sandtable()
        .args(["validate", "-o", "export", "--data", "{nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON Parsing Error"));
    Ok(())
}

#[test]
fn test_classify_business_code_override() -> Result<()> {
    let env = SandtableTestEnv::new()?;
    env.sandtable()
        .args([
            "classify",
            "--status",
            "400",
            "--business-code",
            "1001",
            "--endpoint",
            "/admin/users/assign",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "BUSINESS_LOGIC""#))
        .stdout(predicate::str::contains("already assigned"))
        .stderr(predicate::str::contains("Do not retry"));
    Ok(())
}

#[test]
fn test_classify_timeout_is_retryable() -> Result<()> {
    let env = SandtableTestEnv::new()?;
    env.sandtable()
        .args([
            "classify",
            "--transport-code",
            "ECONNABORTED",
            "--message",
            "timeout of 10000ms exceeded",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "TIMEOUT""#))
        .stderr(predicate::str::contains("Retry advised"));
    Ok(())
}

#[test]
fn test_classify_uses_configured_language() -> Result<()> {
    let env = SandtableTestEnv::new()?;
    env.write("sandtable.yaml", "language: zh-CN\nenvironment: test\n")?;

    env.sandtable()
        .args(["classify", "--status", "404", "--business-code", "4003"])
        .assert()
        .success()
        .stdout(predicate::str::contains("团队不存在。"));
    Ok(())
}

#[test]
fn test_lang_flag_overrides_config() -> Result<()> {
    let env = SandtableTestEnv::new()?;
    env.write("sandtable.yaml", "language: zh\n")?;

    env.sandtable()
        .args(["--lang", "en", "classify", "--status", "404", "--business-code", "4003"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The team was not found."));
    Ok(())
}

#[test]
fn test_lang_flag_is_bounds_checked() -> Result<()> {
    let env = SandtableTestEnv::new()?;
    env.sandtable()
        .args(["--lang", "x", "codes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
    Ok(())
}

#[test]
fn test_explicit_config_must_exist() -> Result<()> {
    let env = SandtableTestEnv::new()?;
    env.sandtable()
        .arg("--config")
        .arg(env.root().join("missing.yaml"))
        .arg("codes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn test_codes_lists_every_family() -> Result<()> {
    let env = SandtableTestEnv::new()?;
    env.sandtable()
        .arg("codes")
        .assert()
        .success()
        .stdout(predicate::str::contains("INVALID_USER_ID"))
        .stdout(predicate::str::contains("UNAUTHORIZED"))
        .stdout(predicate::str::contains("USER_ALREADY_ASSIGNED"))
        .stdout(predicate::str::contains("ASSIGNMENT_NOT_FOUND"))
        .stdout(predicate::str::contains("DUPLICATE_ASSIGNMENT"))
        .stdout(predicate::str::contains("SERVICE_UNAVAILABLE"));
    Ok(())
}
