//! libpq-style `key=value` connection strings.

use crate::config::postgres::ConnectionConfig;
use crate::error::AppError;
use std::str::FromStr;
use tokio_postgres::config::Host;

pub const SSL_MODE: &str = "disable";

const REDACTED: &str = "***";

/// Builds `host=.. port=.. user=.. [password=..] dbname=.. sslmode=disable`.
///
/// The `password` pair is left out entirely when the password is empty.
/// Values are written verbatim, without quoting.
pub fn build(config: &ConnectionConfig) -> String {
    render(config, &config.password)
}

/// Same layout as [`build`], with the password value masked. For log lines.
pub fn redacted(config: &ConnectionConfig) -> String {
    let password = if config.has_password() { REDACTED } else { "" };
    render(config, password)
}

fn render(config: &ConnectionConfig, password: &str) -> String {
    if password.is_empty() {
        format!(
            "host={} port={} user={} dbname={} sslmode={}",
            config.host, config.port, config.user, config.dbname, SSL_MODE
        )
    } else {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode={}",
            config.host, config.port, config.user, password, config.dbname, SSL_MODE
        )
    }
}

/// Parses the built string with the driver's own parser and checks that every
/// value reads back unchanged. Nothing is connected.
pub fn to_pg_config(config: &ConnectionConfig) -> Result<tokio_postgres::Config, AppError> {
    let conn_str = build(config);
    let invalid = |reason: String| {
        AppError::InvalidConnectionString(format!("{}: {}", redacted(config), reason))
    };

    let pg = tokio_postgres::Config::from_str(&conn_str).map_err(|e| invalid(e.to_string()))?;

    if let Some(field) = mismatched_field(config, &pg) {
        return Err(invalid(format!("driver reads a different {}", field)));
    }

    Ok(pg)
}

fn mismatched_field(
    config: &ConnectionConfig,
    pg: &tokio_postgres::Config,
) -> Option<&'static str> {
    let password = Some(config.password.as_bytes()).filter(|p| !p.is_empty());

    if !matches!(pg.get_hosts(), [host] if host_is(host, &config.host)) {
        Some("host")
    } else if config.port.parse::<u16>().ok().as_slice() != pg.get_ports() {
        Some("port")
    } else if pg.get_user() != Some(config.user.as_str()) {
        Some("user")
    } else if pg.get_password() != password {
        Some("password")
    } else if pg.get_dbname() != Some(config.dbname.as_str()) {
        Some("dbname")
    } else {
        None
    }
}

fn host_is(host: &Host, expected: &str) -> bool {
    match host {
        Host::Tcp(h) => h == expected,
        #[cfg(unix)]
        Host::Unix(path) => path.as_os_str() == expected,
        #[allow(unreachable_patterns)]
        _ => false,
    }
}
