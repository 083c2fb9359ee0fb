// tests/errors.rs

mod common;

use assert_cmd::prelude::*;
use common::{create_file, dirscribe_cmd};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_missing_root_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    for tool in ["consolidate", "snapshot", "check-images"] {
        dirscribe_cmd()
            .args([tool, "does-not-exist"])
            .current_dir(temp.path())
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains(
                "Failed to resolve root path 'does-not-exist'",
            ));
    }

    temp.close()?;
    Ok(())
}

#[test]
fn test_root_must_be_a_directory() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    create_file(temp.path(), "file.txt", "not a dir")?;

    dirscribe_cmd()
        .args(["retarget", "--root", "file.txt"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("is not a directory"));

    temp.close()?;
    Ok(())
}

#[test]
fn test_conflicting_ignore_flags() -> Result<(), Box<dyn std::error::Error>> {
    dirscribe_cmd()
        .args(["snapshot", "--ignore-file", "x", "--no-ignore-file"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
    Ok(())
}

#[test]
fn test_subcommand_is_required() -> Result<(), Box<dyn std::error::Error>> {
    dirscribe_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn test_logs_go_to_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    create_file(temp.path(), "a.txt", "A")?;

    dirscribe_cmd()
        .args(["-v", "consolidate", "-o", "-"])
        .current_dir(temp.path())
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("="))
        .stderr(predicate::str::contains("Starting dirscribe"));

    temp.close()?;
    Ok(())
}
