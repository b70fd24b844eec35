use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use anyhow::Result;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn salestally(args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_salestally")).args(args).env_remove("RUST_LOG").output()?)
}

fn sales_dir() -> Result<TempDir> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("branch.lst"), "001,Tokyo\n002,Osaka\n")?;
    fs::write(dir.path().join("commodity.lst"), "SFTW0001,Office Suite\n")?;
    Ok(dir)
}

fn path_arg(dir: &Path) -> String {
    dir.display().to_string()
}

#[test]
fn test_no_arguments() -> Result<()> {
    let output = salestally(&[])?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(String::from_utf8(output.stderr)?, "an unexpected error occurred\n");
    assert_eq!(output.stdout.is_empty(), true);

    Ok(())
}

#[test]
fn test_too_many_arguments() -> Result<()> {
    let dir = sales_dir()?;
    let path = path_arg(dir.path());

    let output = salestally(&[path.as_str(), path.as_str()])?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(String::from_utf8(output.stderr)?, "an unexpected error occurred\n");
    assert_eq!(dir.path().join("branch.out").exists(), false);

    Ok(())
}

#[test]
fn test_invalid_sales_file_exit_code() -> Result<()> {
    let dir = sales_dir()?;
    fs::write(dir.path().join("00000001.rcd"), "001\n")?;

    let output = salestally(&[path_arg(dir.path()).as_str()])?;

    assert_eq!(output.status.code(), Some(7));
    assert_eq!(String::from_utf8(output.stderr)?, "00000001.rcd has an invalid format\n");

    Ok(())
}

#[test]
fn test_missing_definitions_exit_code() -> Result<()> {
    let dir = TempDir::new()?;

    let output = salestally(&[path_arg(dir.path()).as_str()])?;

    assert_eq!(output.status.code(), Some(3));
    assert_eq!(String::from_utf8(output.stderr)?, "branch definition file does not exist\n");

    Ok(())
}

#[test]
fn test_successful_run_is_silent() -> Result<()> {
    let dir = sales_dir()?;
    let record = if cfg!(feature = "commodity") { "002\nSFTW0001\n70\n" } else { "002\n70\n" };
    fs::write(dir.path().join("00000001.rcd"), record)?;

    let output = salestally(&[path_arg(dir.path()).as_str()])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stderr.is_empty(), true);
    assert_eq!(fs::read_to_string(dir.path().join("branch.out"))?, "001,Tokyo,0\n002,Osaka,70\n");

    Ok(())
}
