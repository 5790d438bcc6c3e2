//! Connectivity preflight
//!
//! Validates every discovered remote before any backup work begins. The
//! rclone profile check fails fast; the per-remote reachability probes are
//! accumulated so a single run surfaces every unreachable destination.

use anyhow::Result;
use tracing::{error, info};

use crate::config::{NormalizedConfig, RemoteTarget};
use crate::utils::rclone;

/// Validate reachability of every configured remote.
///
/// Returns an aggregated error naming every unreachable destination; the
/// caller treats any error as fatal.
pub fn check_connectivity(config: &NormalizedConfig) -> Result<()> {
    check_remotes(&config.remotes, &config.rclone_global_flags)
}

pub fn check_remotes(remotes: &[RemoteTarget], flags: &[String]) -> Result<()> {
    // A missing profile means nothing downstream can succeed.
    let mut seen: Vec<&str> = Vec::new();
    for remote in remotes {
        if seen.contains(&remote.name.as_str()) {
            continue;
        }
        seen.push(remote.name.as_str());

        if !rclone::profile_exists(&remote.name, flags)? {
            anyhow::bail!(
                "rclone configuration profile '{}' not found; run 'rclone config' first",
                remote.name
            );
        }
    }

    let failures = probe_all(remotes, |remote| rclone::mkdir(&remote.address(), flags));

    if failures.is_empty() {
        Ok(())
    } else {
        anyhow::bail!(
            "{} remote(s) unreachable: {}",
            failures.len(),
            failures.join(", ")
        )
    }
}

/// Probe every remote in enumeration order, never stopping early.
fn probe_all<F>(remotes: &[RemoteTarget], mut probe: F) -> Vec<String>
where
    F: FnMut(&RemoteTarget) -> Result<()>,
{
    let mut failures = Vec::new();

    for remote in remotes {
        let address = remote.address();
        info!("Checking connectivity for {}", address);
        match probe(remote) {
            Ok(()) => info!("Remote {} is reachable", address),
            Err(e) => {
                error!("Cannot reach remote {}: {:#}", address, e);
                failures.push(address);
            }
        }
    }

    failures
}
