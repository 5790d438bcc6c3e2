//! Vaultwarden Backup Library
//!
//! This library provides the configuration-resolution and
//! notification-dispatch core of the scheduled vaultwarden backup agent.

pub mod config;
pub mod managers;
pub mod utils;

// Re-export commonly used types
pub use config::{load_config, ConfigError, NormalizedConfig, RemoteTarget, VarPool};
pub use managers::notification::{NotificationManager, Outcome, PingStage};
pub use managers::preflight::check_connectivity;
