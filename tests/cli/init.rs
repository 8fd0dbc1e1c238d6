use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (output, stdout, _) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;
    assert!(output.status.success());
    assert!(stdout.contains("Created .dipgenrc.json"));

    let content = test.read_file(".dipgenrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["output"], "Dip.generated.swift");
    assert_eq!(parsed["mode"], "combined");
    assert_eq!(parsed["defaultContainer"], "base");
    assert_eq!(parsed["defaultScope"], "Shared");
    assert_eq!(parsed["ignoreGeneratedFiles"], true);
    assert!(content.contains("  "), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".dipgenrc.json", "{}")?;

    let (output, _, stderr) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains(".dipgenrc.json already exists"));
    assert_eq!(test.read_file(".dipgenrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let (output, stdout, _) = run(test.command())?;
    assert!(output.status.success());
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("inspect"));

    Ok(())
}
