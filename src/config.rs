// src/config.rs

use crate::domain::filters::MalformedNumberPolicy;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_DATABASE_PATH: &str = "properties.sqlite3";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_WORKERS: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Options that change how requests are answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApiOptions {
    pub malformed_numbers: MalformedNumberPolicy,
    /// Wrap list responses in `{success, message, body}`.
    pub list_envelope: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub max_workers: usize,
    pub seed_file: Option<PathBuf>,
    pub api: ApiOptions,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from an arbitrary variable source. Unset or blank
    /// variables fall back to defaults; set but invalid ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        fn parse<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
        where
            T: std::str::FromStr,
            T::Err: std::fmt::Display,
        {
            match raw {
                None => Ok(default),
                Some(value) => value.parse().map_err(|e: T::Err| ConfigError {
                    var,
                    reason: e.to_string(),
                    value,
                }),
            }
        }

        let max_workers = parse("MAX_WORKERS", get("MAX_WORKERS"), DEFAULT_MAX_WORKERS)?;
        if max_workers == 0 {
            return Err(ConfigError {
                var: "MAX_WORKERS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let list_envelope = match get("LIST_ENVELOPE") {
            None => false,
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => {
                    return Err(ConfigError {
                        var: "LIST_ENVELOPE",
                        value,
                        reason: "expected true, false, 1 or 0".to_string(),
                    })
                }
            },
        };

        Ok(Config {
            database_path: get("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            host: parse("HOST", get("HOST"), IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: parse("PORT", get("PORT"), DEFAULT_PORT)?,
            max_workers,
            seed_file: get("SEED_FILE").map(PathBuf::from),
            api: ApiOptions {
                malformed_numbers: parse(
                    "MALFORMED_FILTERS",
                    get("MALFORMED_FILTERS"),
                    MalformedNumberPolicy::default(),
                )?,
                list_envelope,
            },
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
