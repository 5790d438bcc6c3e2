//! rclone subprocess utilities
//!
//! The narrow interface to the sync tool: everything the preflight needs,
//! nothing more. The transfer itself is driven elsewhere.

use anyhow::{Context, Result};
use std::time::Duration;

use super::command;

const PROBE_TIMEOUT: Duration = Duration::from_secs(300);

/// Locate the rclone binary on PATH.
pub fn rclone_binary() -> Result<String> {
    let path = which::which("rclone").context("rclone not found in PATH")?;
    Ok(path.display().to_string())
}

/// Check whether a named rclone configuration profile exists.
pub fn profile_exists(name: &str, global_flags: &[String]) -> Result<bool> {
    let bin = rclone_binary()?;
    let mut args = vec!["config", "show", name];
    args.extend(global_flags.iter().map(String::as_str));

    let output = command::run_unchecked(&bin, &args, Some(PROBE_TIMEOUT))?;
    Ok(output.status.success())
}

/// Create the remote directory if it does not exist yet.
///
/// `rclone mkdir` is idempotent, which makes it a cheap reachability probe.
pub fn mkdir(address: &str, global_flags: &[String]) -> Result<()> {
    let bin = rclone_binary()?;
    let mut args = vec!["mkdir", address];
    args.extend(global_flags.iter().map(String::as_str));

    command::run_command(&bin, &args, Some(PROBE_TIMEOUT)).map(|_| ())
}
