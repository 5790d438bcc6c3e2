//! Optional dotenv-style configuration file.
//!
//! Loaded once at startup; parsed entries are exposed to the resolver under
//! the `DOTENV_` prefix. Precedence against native environment variables is
//! owned by the resolver, so the loader never touches bare names.

use std::path::Path;
use tracing::{debug, info};

use super::resolver::{ConfigError, Result, VarPool, DOTENV_PREFIX};

/// Default location of the optional env file inside the backup container.
pub const DEFAULT_DOTENV_PATH: &str = "/.env";

/// Parse the env file at `path` and inject its entries into the pool.
///
/// A missing file is not an error; the step is skipped with an
/// informational log. Comment and blank lines are ignored. Entries never
/// overwrite a pool variable that already carries the same prefixed name.
pub fn load_into(pool: &mut VarPool, path: &Path) -> Result<()> {
    if !path.exists() {
        info!("No env file at {}, skipping", path.display());
        return Ok(());
    }

    let entries = dotenvy::from_path_iter(path).map_err(|source| ConfigError::EnvFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut count = 0;
    for entry in entries {
        let (key, value) = entry.map_err(|source| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        })?;
        pool.insert_if_absent(format!("{DOTENV_PREFIX}{key}"), value);
        count += 1;
    }

    debug!("Loaded {} entries from {}", count, path.display());
    Ok(())
}
