use std::env;
use std::num::ParseIntError;

use thiserror::Error;

const DEFAULT_SUCCESS_COLOR: u32 = 0x57F287;
const DEFAULT_ERROR_COLOR: u32 = 0xED4245;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a bracketed list of ids, e.g. [123456789]")]
    NotAList { var: &'static str },
    #[error("{var} contains an invalid id: {source}")]
    InvalidId {
        var: &'static str,
        source: ParseIntError,
    },
    #[error("{var} is not a valid colour code: {value:?}")]
    InvalidColor { var: &'static str, value: String },
}

/// Immutable snapshot of the environment configuration.
///
/// Loaded once at startup and passed by reference to everything that needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub token: String,
    pub database_url: String,
    pub database_cluster: String,
    pub database_users: String,
    pub database_servers: String,
    pub owner: Vec<u64>,
    pub staff: Vec<u64>,
    pub vip: Vec<u64>,
    pub servers: Vec<u64>,
    pub success_color: u32,
    pub error_color: u32,
}

impl Default for Settings {
    /// The values an empty environment resolves to.
    fn default() -> Self {
        Self {
            token: String::new(),
            database_url: String::new(),
            database_cluster: String::new(),
            database_users: "users".to_string(),
            database_servers: "servers".to_string(),
            owner: Vec::new(),
            staff: Vec::new(),
            vip: Vec::new(),
            servers: Vec::new(),
            success_color: DEFAULT_SUCCESS_COLOR,
            error_color: DEFAULT_ERROR_COLOR,
        }
    }
}

impl Settings {
    /// Read configuration from the process environment.
    ///
    /// A malformed list or colour literal is fatal; callers propagate it and
    /// let startup fail.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            token: get("TOKEN").unwrap_or_default(),
            database_url: get("DATABASE_URL").unwrap_or_default(),
            database_cluster: get("DATABASE_CLUSTER").unwrap_or_default(),
            database_users: get("DATABASE_USERS").unwrap_or_else(|| "users".to_string()),
            database_servers: get("DATABASE_SERVERS").unwrap_or_else(|| "servers".to_string()),
            owner: parse_id_list("OWNER", get("OWNER").as_deref())?,
            staff: parse_id_list("STAFF", get("STAFF").as_deref())?,
            vip: parse_id_list("VIP", get("VIP").as_deref())?,
            servers: parse_id_list("SERVERS", get("SERVERS").as_deref())?,
            success_color: parse_color(
                "SUCCESS_COLOR",
                get("SUCCESS_COLOR").as_deref(),
                DEFAULT_SUCCESS_COLOR,
            )?,
            error_color: parse_color(
                "ERROR_COLOR",
                get("ERROR_COLOR").as_deref(),
                DEFAULT_ERROR_COLOR,
            )?,
        })
    }
}

/// Parse a bracketed id list literal such as `[123, 456]`.
///
/// An absent variable is an empty list; a present but malformed one is an
/// error. A single trailing comma is accepted.
fn parse_id_list(var: &'static str, raw: Option<&str>) -> Result<Vec<u64>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    let inner = raw
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(ConfigError::NotAList { var })?
        .trim();
    let inner = inner.strip_suffix(',').unwrap_or(inner);

    if inner.is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|id| {
            id.trim()
                .parse()
                .map_err(|source| ConfigError::InvalidId { var, source })
        })
        .collect()
}

/// Colour codes may be decimal (`5763719`), hex (`0x57F287`) or css-style
/// (`#57F287`). Absent values fall back to the given default.
fn parse_color(var: &'static str, raw: Option<&str>, default: u32) -> Result<u32, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    let raw = raw.trim();
    let parsed = if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix('#')) {
        u32::from_str_radix(hex, 16)
    } else {
        raw.parse()
    };

    parsed.map_err(|_| ConfigError::InvalidColor {
        var,
        value: raw.to_string(),
    })
}
