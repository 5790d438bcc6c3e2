//! Remote backup destination discovery.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::resolver::{Result, VarPool};

pub const DEFAULT_REMOTE_NAME: &str = "BitwardenBackup";
pub const DEFAULT_REMOTE_DIR: &str = "/BitwardenBackup/";

/// One named rclone destination with its directory path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteTarget {
    pub name: String,
    pub dir: String,
}

impl RemoteTarget {
    /// rclone address in `name:dir` form with trailing path separators stripped.
    pub fn address(&self) -> String {
        format!("{}:{}", self.name, self.dir)
            .trim_end_matches('/')
            .to_string()
    }
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address())
    }
}

/// Discover remotes from `RCLONE_REMOTE_NAME_i` / `RCLONE_REMOTE_DIR_i`
/// pairs, index ascending from 0.
///
/// Index 0 also aliases the unsuffixed pair, which carries defaults, so at
/// least one remote is always discovered. Enumeration stops at the first
/// incomplete pair; later indices are excluded even if fully populated.
pub fn enumerate(pool: &mut VarPool) -> Result<Vec<RemoteTarget>> {
    let mut targets = Vec::new();

    for index in 0.. {
        let mut name = pool.resolve(&format!("RCLONE_REMOTE_NAME_{index}"))?;
        let mut dir = pool.resolve(&format!("RCLONE_REMOTE_DIR_{index}"))?;

        if index == 0 {
            if name.is_none() {
                name = pool.resolve("RCLONE_REMOTE_NAME")?;
            }
            if dir.is_none() {
                dir = pool.resolve("RCLONE_REMOTE_DIR")?;
            }
            name = name.or_else(|| Some(DEFAULT_REMOTE_NAME.to_string()));
            dir = dir.or_else(|| Some(DEFAULT_REMOTE_DIR.to_string()));
        }

        match (name, dir) {
            (Some(name), Some(dir)) => {
                debug!("Discovered remote {}: {}:{}", index, name, dir);
                targets.push(RemoteTarget { name, dir });
            }
            // The first incomplete pair ends discovery; no gap-filling.
            _ => break,
        }
    }

    Ok(targets)
}
