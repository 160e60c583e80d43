use std::env::{self, VarError};
use std::str::FromStr;

use chrono::Utc;

use crate::error::ConfigError;
use crate::services::run::RunConfig;

pub const DEFAULT_COUNT: u64 = 1_000_000;

// TOTP_SECRET, TOTP_START, TOTP_COUNT, TOTP_KEEP_CODES, TOTP_WORKERS, TOTP_REPORT_JSON
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub secret: Option<String>,
    pub run: RunConfig,
    pub report_json: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok(); // Load .env file
        Self::from_vars(|name| env::var(name))
    }

    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<String, VarError>,
    {
        let secret = lookup(&var, "TOTP_SECRET")?.filter(|s| !s.trim().is_empty());
        let start = parse_or(&var, "TOTP_START", || Utc::now().timestamp())?;
        let count = parse_or(&var, "TOTP_COUNT", || DEFAULT_COUNT)?;
        let keep_codes = parse_or(&var, "TOTP_KEEP_CODES", || true)?;
        let workers = parse_or(&var, "TOTP_WORKERS", || 1usize)?;
        let report_json = parse_or(&var, "TOTP_REPORT_JSON", || false)?;

        Ok(Self {
            secret,
            run: RunConfig::new(start, count).keep_codes(keep_codes).workers(workers),
            report_json,
        })
    }
}

fn lookup<F>(var: &F, name: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&'static str) -> Result<String, VarError>,
{
    match var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { name }),
    }
}

fn parse_or<F, T>(var: &F, name: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError>
where
    F: Fn(&'static str) -> Result<String, VarError>,
    T: FromStr,
{
    match lookup(var, name)? {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Unparseable { name, value }),
        None => Ok(default()),
    }
}
