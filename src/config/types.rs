use serde::{Serialize, Serializer};

use super::remotes::RemoteTarget;

/// Parse a flag that is enabled unless explicitly set to `"false"`.
///
/// Per-field channel booleans (`MAIL_WHEN_*`, `NTFY_WHEN_*`, ...) follow
/// this convention: unset and empty both count as enabled.
pub fn flag_default_on(raw: Option<&str>) -> bool {
    !matches!(raw, Some(v) if v.trim().eq_ignore_ascii_case("false"))
}

/// Parse a flag that is disabled unless explicitly set to `"true"`.
///
/// Channel master switches (`MAIL_SMTP_ENABLE`, `NTFY_ENABLE`) follow this
/// convention; the asymmetry against [`flag_default_on`] is deliberate.
pub fn flag_default_off(raw: Option<&str>) -> bool {
    matches!(raw, Some(v) if v.trim().eq_ignore_ascii_case("true"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArchiveType {
    #[serde(rename = "zip")]
    Zip,
    #[serde(rename = "7z")]
    SevenZ,
}

impl ArchiveType {
    /// Case-insensitive `"7z"` selects that type; anything else is zip.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(v) if v.trim().eq_ignore_ascii_case("7z") => ArchiveType::SevenZ,
            _ => ArchiveType::Zip,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveType::Zip => "zip",
            ArchiveType::SevenZ => "7z",
        }
    }
}

/// Settings consumed by the external archiver.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveConfig {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub archive_type: ArchiveType,
    #[serde(serialize_with = "redact")]
    pub password: String,
    /// Sanitized date-format token string for backup file names.
    pub file_format: String,
    /// 0 means backups never expire by age.
    pub keep_days: u32,
}

/// Mail channel policy.
#[derive(Debug, Clone, Serialize)]
pub struct MailPolicy {
    pub enabled: bool,
    pub to: String,
    /// SMTP URL (`smtp[s]://user:pass@host:port[?tls=...]`); may embed credentials.
    #[serde(serialize_with = "redact")]
    pub smtp_url: String,
    pub when_success: bool,
    pub when_failure: bool,
}

/// Push (ntfy) channel policy.
#[derive(Debug, Clone, Serialize)]
pub struct PushPolicy {
    pub enabled: bool,
    pub server: String,
    pub topic: String,
    pub username: String,
    #[serde(serialize_with = "redact")]
    pub password: String,
    #[serde(serialize_with = "redact")]
    pub token: String,
    pub priority_success: String,
    pub priority_failure: String,
    pub when_success: bool,
    pub when_failure: bool,
}

/// Liveness ping URLs, one per stage.
#[derive(Debug, Clone, Serialize)]
pub struct PingPolicy {
    /// Legacy completion ping; serves as the success-stage fallback.
    pub url: String,
    pub url_when_start: String,
    pub url_when_success: String,
    pub url_when_failure: String,
}

/// Connection settings for the database behind the vault, carried for the
/// external dump step.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatabaseConfig {
    Sqlite,
    Mysql(DbServer),
    Postgresql(DbServer),
}

#[derive(Debug, Clone, Serialize)]
pub struct DbServer {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    #[serde(serialize_with = "redact")]
    pub password: String,
}

/// The complete set of derived operational settings.
///
/// Built once at startup and passed by reference; every field carries a
/// total default, so construction cannot leave anything unset.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedConfig {
    /// Cron expression consumed by the external scheduler.
    pub schedule: String,
    pub timezone: String,
    pub debug: bool,
    pub archive: ArchiveConfig,
    /// Discovered destinations, in discovery order.
    pub remotes: Vec<RemoteTarget>,
    /// Extra arguments appended to every rclone invocation.
    pub rclone_global_flags: Vec<String>,
    pub database: DatabaseConfig,
    pub mail: MailPolicy,
    pub push: PushPolicy,
    pub ping: PingPolicy,
}

fn redact<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_empty() {
        serializer.serialize_str("")
    } else {
        serializer.serialize_str("********")
    }
}
