//! Configuration module for vaultwarden-backup
//!
//! This module resolves configuration from the process environment and an
//! optional dotenv file, discovers backup remotes, and normalizes every raw
//! value into a total, defaulted [`NormalizedConfig`].
//!
//! ## Resolution order
//!
//! Each setting is resolved through a fixed cascade (first non-empty wins):
//! 1. Native environment variable `NAME`
//! 2. File reference `NAME_FILE`
//! 3. Dotenv-sourced file reference `DOTENV_NAME_FILE`
//! 4. Dotenv-sourced value `DOTENV_NAME`
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use vaultwarden_backup::config;
//!
//! let cfg = config::load_config(Path::new("/.env"))?;
//! for remote in &cfg.remotes {
//!     println!("Remote: {}", remote.address());
//! }
//! # Ok::<(), config::ConfigError>(())
//! ```

pub mod dotenv;
mod loader;
mod remotes;
mod resolver;
mod types;

pub use loader::{
    load_config, load_from_pool, validate_cron_schedule, DEFAULT_CRON, DEFAULT_DATE_FORMAT,
};
pub use remotes::{enumerate, RemoteTarget, DEFAULT_REMOTE_DIR, DEFAULT_REMOTE_NAME};
pub use resolver::{ConfigError, Result, VarPool, DOTENV_PREFIX};
pub use types::*;
