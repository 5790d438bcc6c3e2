// Smoke tests for the binary surface.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd_with_env_file(dir: &TempDir) -> Command {
    let env_file = dir.path().join(".env");
    if !env_file.exists() {
        fs::write(&env_file, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("vaultwarden-backup").unwrap();
    cmd.arg("--env-file").arg(&env_file);
    cmd
}

#[test]
fn help_mentions_the_subcommands() {
    Command::cargo_bin("vaultwarden-backup")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("notify"));
}

#[test]
fn config_dump_redacts_secrets() {
    let dir = TempDir::new().unwrap();

    cmd_with_env_file(&dir)
        .env("ZIP_PASSWORD", "supersecret")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("supersecret").not())
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("BitwardenBackup"));
}

#[test]
fn notify_is_a_no_op_with_all_channels_disabled() {
    let dir = TempDir::new().unwrap();

    cmd_with_env_file(&dir)
        .env_remove("MAIL_SMTP_ENABLE")
        .env_remove("NTFY_ENABLE")
        .args([
            "notify",
            "--outcome",
            "success",
            "--subject",
            "vaultwarden backup",
            "--body",
            "backup finished",
        ])
        .assert()
        .success();
}

#[test]
fn ping_without_a_url_is_silent() {
    let dir = TempDir::new().unwrap();

    cmd_with_env_file(&dir)
        .env_remove("PING_URL")
        .args(["ping", "--stage", "success"])
        .assert()
        .success();
}

#[test]
fn enabled_push_without_server_exits_nonzero() {
    let dir = TempDir::new().unwrap();

    cmd_with_env_file(&dir)
        .env("NTFY_ENABLE", "true")
        .env_remove("NTFY_SERVER")
        .args([
            "notify",
            "--outcome",
            "failure",
            "--subject",
            "s",
            "--body",
            "b",
        ])
        .assert()
        .failure();
}
