//! Utilities for running commands with proper error handling and timeouts

use anyhow::{Context, Result};
use std::process::{Command, Output, Stdio};
use std::time::Duration;
use tracing::{debug, error};

/// Run a command and return its raw output without interpreting the status.
pub fn run_unchecked(program: &str, args: &[&str], timeout: Option<Duration>) -> Result<Output> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    debug!("Running command: {} {}", program, args.join(" "));

    if let Some(timeout_duration) = timeout {
        // The binary is synchronous end to end; a throwaway current-thread
        // runtime drives the timeout.
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build timeout runtime")?;

        runtime.block_on(async {
            let result =
                tokio::time::timeout(timeout_duration, tokio::process::Command::from(cmd).output())
                    .await;

            match result {
                Ok(output) => output.context(format!("Failed to execute {}", program)),
                Err(_) => Err(anyhow::anyhow!(
                    "Command timed out after {:?}",
                    timeout_duration
                )),
            }
        })
    } else {
        cmd.output()
            .context(format!("Failed to execute {}", program))
    }
}

/// Run a command, failing with the captured stderr on a non-zero exit.
pub fn run_command(program: &str, args: &[&str], timeout: Option<Duration>) -> Result<Output> {
    let output = run_unchecked(program, args, timeout)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("Command failed: {} {}", program, args.join(" "));
        error!("Stderr: {}", stderr);
        anyhow::bail!(
            "Command failed with exit code {:?}: {}",
            output.status.code(),
            stderr
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.is_empty() {
        debug!("Command output: {}", stdout);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_command_returns_output() {
        let output = run_command("true", &[], None).unwrap();
        assert!(output.status.success());
    }

    #[test]
    fn failing_command_is_an_error() {
        assert!(run_command("false", &[], None).is_err());
    }

    #[test]
    fn unchecked_reports_status_without_failing() {
        let output = run_unchecked("false", &[], None).unwrap();
        assert!(!output.status.success());
    }

    #[test]
    fn timeout_interrupts_a_slow_command() {
        let result = run_unchecked("sleep", &["5"], Some(Duration::from_millis(100)));
        assert!(result.is_err());
    }
}
