// Integration tests for configuration loading over the real process
// environment and an env file. Serialized because the environment is shared.

use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

use vaultwarden_backup::config::{self, ArchiveType};

struct EnvGuard {
    keys: Vec<&'static str>,
}

impl EnvGuard {
    fn set(entries: &[(&'static str, &str)]) -> Self {
        for (key, value) in entries {
            env::set_var(key, value);
        }
        Self {
            keys: entries.iter().map(|(k, _)| *k).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn dotenv_values_apply_when_env_is_unset() {
    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join(".env");
    fs::write(
        &env_file,
        "# backup settings\nZIP_TYPE=7z\nRCLONE_REMOTE_NAME=offsite\nRCLONE_REMOTE_DIR=/vault/\n",
    )
    .unwrap();

    let config = config::load_config(&env_file).unwrap();

    assert_eq!(config.archive.archive_type, ArchiveType::SevenZ);
    assert_eq!(config.remotes.len(), 1);
    assert_eq!(config.remotes[0].address(), "offsite:/vault");
}

#[test]
#[serial]
fn native_environment_beats_the_env_file() {
    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join(".env");
    fs::write(&env_file, "ZIP_TYPE=7z\n").unwrap();

    let _guard = EnvGuard::set(&[("ZIP_TYPE", "zip")]);
    let config = config::load_config(&env_file).unwrap();

    assert_eq!(config.archive.archive_type, ArchiveType::Zip);
}

#[test]
#[serial]
fn secret_file_reference_resolves_to_file_content() {
    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join(".env");
    fs::write(&env_file, "").unwrap();

    let secret_path = dir.path().join("zip-password");
    fs::write(&secret_path, "s3cret").unwrap();

    let _guard = EnvGuard::set(&[("ZIP_PASSWORD_FILE", secret_path.to_str().unwrap())]);
    let config = config::load_config(&env_file).unwrap();

    assert_eq!(config.archive.password, "s3cret");
}

#[test]
#[serial]
fn unreadable_secret_file_fails_loading() {
    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join(".env");
    fs::write(&env_file, "").unwrap();

    let _guard = EnvGuard::set(&[("ZIP_PASSWORD_FILE", "/nonexistent/zip-password")]);
    let result = config::load_config(&env_file);

    assert!(result.is_err());
}

#[test]
#[serial]
fn indexed_remotes_resolve_through_the_env_file() {
    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join(".env");
    fs::write(
        &env_file,
        concat!(
            "RCLONE_REMOTE_NAME_0=primary\n",
            "RCLONE_REMOTE_DIR_0=/a/\n",
            "RCLONE_REMOTE_NAME_1=secondary\n",
            "RCLONE_REMOTE_DIR_1=/b/\n",
            "RCLONE_REMOTE_NAME_2=orphan\n",
        ),
    )
    .unwrap();

    let config = config::load_config(&env_file).unwrap();

    let addresses: Vec<String> = config.remotes.iter().map(|r| r.address()).collect();
    assert_eq!(addresses, vec!["primary:/a", "secondary:/b"]);
}

#[test]
#[serial]
fn missing_env_file_loads_pure_defaults() {
    let dir = TempDir::new().unwrap();
    let config = config::load_config(&dir.path().join("absent.env")).unwrap();

    assert_eq!(config.schedule, config::DEFAULT_CRON);
    assert_eq!(config.remotes[0].name, config::DEFAULT_REMOTE_NAME);
    assert!(!config.mail.enabled);
    assert!(!config.push.enabled);
}
