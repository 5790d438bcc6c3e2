use std::path::Path;
use tracing::{info, warn};

use super::dotenv;
use super::remotes;
use super::resolver::{Result, VarPool};
use super::types::*;

pub const DEFAULT_CRON: &str = "5 * * * *";
pub const DEFAULT_DATE_FORMAT: &str = "%Y%m%d";
pub const DEFAULT_ZIP_PASSWORD: &str = "WHEREISMYPASSWORD?";
pub const DEFAULT_NTFY_PRIORITY_SUCCESS: &str = "default";
pub const DEFAULT_NTFY_PRIORITY_FAILURE: &str = "high";

const ZONEINFO_DIR: &str = "/usr/share/zoneinfo";

/// Load the effective configuration: snapshot the process environment,
/// merge the optional env file, and normalize every setting.
pub fn load_config(env_file: &Path) -> Result<NormalizedConfig> {
    let mut pool = VarPool::from_env();
    dotenv::load_into(&mut pool, env_file)?;
    load_from_pool(&mut pool)
}

/// Normalize raw resolved values into a total [`NormalizedConfig`].
///
/// Apart from secret-file read errors surfaced by the resolver, this never
/// fails: every rule falls back to a safe default.
pub fn load_from_pool(pool: &mut VarPool) -> Result<NormalizedConfig> {
    let schedule = normalize_schedule(pool.resolve("CRON")?);
    let timezone = normalize_timezone(pool.resolve("TIMEZONE")?);
    let debug = flag_default_off(pool.resolve("DEBUG")?.as_deref());

    let archive = ArchiveConfig {
        enabled: flag_default_on(pool.resolve("ZIP_ENABLE")?.as_deref()),
        archive_type: ArchiveType::from_raw(pool.resolve("ZIP_TYPE")?.as_deref()),
        password: pool.resolve_or("ZIP_PASSWORD", DEFAULT_ZIP_PASSWORD)?,
        file_format: normalize_file_format(
            pool.resolve("BACKUP_FILE_DATE")?.as_deref(),
            pool.resolve("BACKUP_FILE_DATE_SUFFIX")?.as_deref(),
            pool.resolve("BACKUP_FILE_SUFFIX")?.as_deref(),
        ),
        keep_days: normalize_keep_days(pool.resolve("BACKUP_KEEP_DAYS")?.as_deref()),
    };

    let remotes = remotes::enumerate(pool)?;
    let rclone_global_flags = split_flags(pool.resolve("RCLONE_GLOBAL_FLAG")?.as_deref());
    let database = normalize_database(pool)?;

    let mail = MailPolicy {
        enabled: flag_default_off(pool.resolve("MAIL_SMTP_ENABLE")?.as_deref()),
        to: pool.resolve("MAIL_TO")?.unwrap_or_default(),
        smtp_url: pool.resolve("MAIL_SMTP_VARIABLES")?.unwrap_or_default(),
        when_success: flag_default_on(pool.resolve("MAIL_WHEN_SUCCESS")?.as_deref()),
        when_failure: flag_default_on(pool.resolve("MAIL_WHEN_FAILURE")?.as_deref()),
    };

    let push = PushPolicy {
        enabled: flag_default_off(pool.resolve("NTFY_ENABLE")?.as_deref()),
        server: pool.resolve("NTFY_SERVER")?.unwrap_or_default(),
        topic: pool.resolve("NTFY_TOPIC")?.unwrap_or_default(),
        username: pool.resolve("NTFY_USERNAME")?.unwrap_or_default(),
        password: pool.resolve("NTFY_PASSWORD")?.unwrap_or_default(),
        token: pool.resolve("NTFY_TOKEN")?.unwrap_or_default(),
        priority_success: pool
            .resolve_or("NTFY_PRIORITY_SUCCESS", DEFAULT_NTFY_PRIORITY_SUCCESS)?,
        priority_failure: pool
            .resolve_or("NTFY_PRIORITY_FAILURE", DEFAULT_NTFY_PRIORITY_FAILURE)?,
        when_success: flag_default_on(pool.resolve("NTFY_WHEN_SUCCESS")?.as_deref()),
        when_failure: flag_default_on(pool.resolve("NTFY_WHEN_FAILURE")?.as_deref()),
    };

    let ping = PingPolicy {
        url: pool.resolve("PING_URL")?.unwrap_or_default(),
        url_when_start: pool.resolve("PING_URL_WHEN_START")?.unwrap_or_default(),
        url_when_success: pool.resolve("PING_URL_WHEN_SUCCESS")?.unwrap_or_default(),
        url_when_failure: pool.resolve("PING_URL_WHEN_FAILURE")?.unwrap_or_default(),
    };

    Ok(NormalizedConfig {
        schedule,
        timezone,
        debug,
        archive,
        remotes,
        rclone_global_flags,
        database,
        mail,
        push,
        ping,
    })
}

/// Validate cron schedule syntax: 5 whitespace-separated fields.
pub fn validate_cron_schedule(schedule: &str) -> bool {
    schedule.split_whitespace().count() == 5
}

fn normalize_schedule(raw: Option<String>) -> String {
    match raw {
        Some(schedule) if validate_cron_schedule(&schedule) => schedule,
        Some(schedule) => {
            warn!(
                "Invalid cron schedule '{}', using default '{}'",
                schedule, DEFAULT_CRON
            );
            DEFAULT_CRON.to_string()
        }
        None => DEFAULT_CRON.to_string(),
    }
}

fn normalize_timezone(raw: Option<String>) -> String {
    match raw {
        Some(tz) if timezone_exists(&tz) => tz,
        Some(tz) => {
            info!("Unknown timezone '{}', falling back to UTC", tz);
            "UTC".to_string()
        }
        None => "UTC".to_string(),
    }
}

/// The identifier must name exactly one tzfile in the system zoneinfo tree.
fn timezone_exists(tz: &str) -> bool {
    if tz.is_empty() || tz.starts_with('/') || tz.contains("..") {
        return false;
    }
    Path::new(ZONEINFO_DIR).join(tz).is_file()
}

/// Build the backup file name format.
///
/// `BACKUP_FILE_SUFFIX`, when set, replaces the date format entirely and
/// only loses its path separators. Otherwise the date format plus optional
/// suffix is stripped to alphanumerics, `%`, `_`, and `-`.
fn normalize_file_format(
    date: Option<&str>,
    date_suffix: Option<&str>,
    file_suffix: Option<&str>,
) -> String {
    if let Some(suffix) = file_suffix {
        return suffix.chars().filter(|c| !matches!(c, '/' | '\\')).collect();
    }

    let mut format = String::from(date.unwrap_or(DEFAULT_DATE_FORMAT));
    if let Some(suffix) = date_suffix {
        format.push_str(suffix);
    }
    format
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '%' | '_' | '-'))
        .collect()
}

fn normalize_keep_days(raw: Option<&str>) -> u32 {
    match raw {
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid BACKUP_KEEP_DAYS '{}', using 0", v);
            0
        }),
        None => 0,
    }
}

fn split_flags(raw: Option<&str>) -> Vec<String> {
    raw.map(|flags| flags.split_whitespace().map(String::from).collect())
        .unwrap_or_default()
}

fn normalize_database(pool: &mut VarPool) -> Result<DatabaseConfig> {
    let db_type = pool.resolve("DB_TYPE")?.unwrap_or_default();
    match db_type.trim().to_ascii_lowercase().as_str() {
        "mysql" => Ok(DatabaseConfig::Mysql(db_server(
            pool,
            "MYSQL",
            "MYSQL_DATABASE",
            3306,
        )?)),
        "postgresql" | "postgres" => Ok(DatabaseConfig::Postgresql(db_server(
            pool, "PG", "PG_DBNAME", 5432,
        )?)),
        "" | "sqlite" => Ok(DatabaseConfig::Sqlite),
        other => {
            warn!("Unknown DB_TYPE '{}', assuming sqlite", other);
            Ok(DatabaseConfig::Sqlite)
        }
    }
}

fn db_server(
    pool: &mut VarPool,
    prefix: &str,
    database_var: &str,
    default_port: u16,
) -> Result<DbServer> {
    Ok(DbServer {
        host: pool.resolve_or(&format!("{prefix}_HOST"), "localhost")?,
        port: normalize_port(
            pool.resolve(&format!("{prefix}_PORT"))?.as_deref(),
            default_port,
        ),
        database: pool.resolve(database_var)?.unwrap_or_default(),
        username: pool.resolve(&format!("{prefix}_USERNAME"))?.unwrap_or_default(),
        password: pool.resolve(&format!("{prefix}_PASSWORD"))?.unwrap_or_default(),
    })
}

fn normalize_port(raw: Option<&str>, default: u16) -> u16 {
    match raw {
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid port '{}', using {}", v, default);
            default
        }),
        None => default,
    }
}
