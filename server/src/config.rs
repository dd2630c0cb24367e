//! Server configuration read from environment variables.

use std::{net::IpAddr, path::PathBuf, str::FromStr};

use thiserror::Error;

pub const BIND_VAR: &str = "PETCLINIC_BIND";
pub const PORT_VAR: &str = "PORT";
pub const STORE_VAR: &str = "PETCLINIC_STORE";
pub const STRICT_NOT_FOUND_VAR: &str = "PETCLINIC_STRICT_NOT_FOUND";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Which record store backend to open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    /// A JSON document file at the given path.
    File(PathBuf),
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            None if s == "memory" => Ok(StoreKind::Memory),
            Some(("file", path)) if !path.is_empty() => Ok(StoreKind::File(PathBuf::from(path))),
            _ => Err("expected `memory` or `file:<path>`".to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
    pub store: StoreKind,
    /// Answer a lookup of a missing id with 404 instead of `200 null`.
    pub strict_not_found: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            store: StoreKind::Memory,
            strict_not_found: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from any variable source; unset variables keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(BIND_VAR) {
            config.bind = parse(BIND_VAR, value)?;
        }
        if let Some(value) = lookup(PORT_VAR) {
            config.port = parse(PORT_VAR, value)?;
        }
        if let Some(value) = lookup(STORE_VAR) {
            config.store = parse(STORE_VAR, value)?;
        }
        if let Some(value) = lookup(STRICT_NOT_FOUND_VAR) {
            config.strict_not_found = parse_flag(STRICT_NOT_FOUND_VAR, value)?;
        }
        Ok(config)
    }

    pub fn addr(&self) -> (IpAddr, u16) {
        (self.bind, self.port)
    }
}

fn parse<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value,
    })
}

fn parse_flag(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value,
            reason: "expected a boolean".to_string(),
        }),
    }
}
