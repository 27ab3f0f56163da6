use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::ffi::OsString;
use std::fmt;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: &str = "5432";
pub const DEFAULT_USER: &str = "postgres";
pub const DEFAULT_PASSWORD: &str = "";
pub const DEFAULT_DBNAME: &str = "akinweb";

const ENV_PREFIX: &str = "DB_";

#[derive(Deserialize)]
struct ConfigFlat {
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    // DB_NAME
    pub name: Option<String>,
}

/// Resolved connection parameters, every field populated.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub dbname: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT.to_string(),
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            dbname: DEFAULT_DBNAME.to_string(),
        }
    }
}

impl ConnectionConfig {
    pub fn connection_string(&self) -> String {
        crate::connection::build(self)
    }

    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.has_password() { "***" } else { "" };

        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &password)
            .field("dbname", &self.dbname)
            .finish()
    }
}

impl From<ConfigFlat> for ConnectionConfig {
    fn from(flat: ConfigFlat) -> Self {
        Self {
            host: or_default(flat.host, DEFAULT_HOST),
            port: or_default(flat.port, DEFAULT_PORT),
            user: or_default(flat.user, DEFAULT_USER),
            password: or_default(flat.password, DEFAULT_PASSWORD),
            dbname: or_default(flat.name, DEFAULT_DBNAME),
        }
    }
}

/// An unset variable and a variable set to "" both fall back to the default.
fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Reads `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME` from the process environment.
pub fn load() -> Result<ConnectionConfig> {
    load_from_os_iter(std::env::vars_os())
}

/// Only `DB_*` variables are looked at; a non-unicode value among them is an error,
/// anything else in the environment is skipped.
pub fn load_from_os_iter<I>(iter: I) -> Result<ConnectionConfig>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let vars = iter
        .into_iter()
        .filter_map(|(key, value)| match key.into_string() {
            Ok(key) if key.starts_with(ENV_PREFIX) => Some((key, value)),
            _ => None,
        })
        .map(|(key, value)| {
            value
                .into_string()
                .map(|value| (key.clone(), value))
                .map_err(|_| anyhow!("{} is not valid unicode", key))
        })
        .collect::<Result<Vec<_>>>()?;

    load_from_iter(vars)
}

pub fn load_from_iter<I>(iter: I) -> Result<ConnectionConfig>
where
    I: IntoIterator<Item = (String, String)>,
{
    let config_flat = envy::prefixed(ENV_PREFIX).from_iter::<_, ConfigFlat>(iter)?;

    Ok(config_flat.into())
}
