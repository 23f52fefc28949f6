//! Process configuration read from the environment at startup.

use std::net::SocketAddr;
use std::str::FromStr;

use backoffice_core::page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

pub const BIND_ADDR_VAR: &str = "BACKOFFICE_BIND_ADDR";
pub const DEFAULT_PAGE_SIZE_VAR: &str = "BACKOFFICE_DEFAULT_PAGE_SIZE";
pub const MAX_PAGE_SIZE_VAR: &str = "BACKOFFICE_MAX_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Page size used when a listing request omits `pageSize`.
    pub default_page_size: u32,
    /// Upper bound applied to any requested `pageSize`.
    pub max_page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl ApiConfig {
    /// Read the configuration from the process environment.
    ///
    /// Unset variables take their defaults; unparsable ones fall back to the
    /// default with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let bind_addr = parse_or(&lookup, BIND_ADDR_VAR, defaults.bind_addr);
        let max_page_size =
            parse_or(&lookup, MAX_PAGE_SIZE_VAR, defaults.max_page_size).clamp(1, MAX_PAGE_SIZE);
        let mut default_page_size =
            parse_or(&lookup, DEFAULT_PAGE_SIZE_VAR, defaults.default_page_size);
        if default_page_size == 0 || default_page_size > max_page_size {
            tracing::warn!(
                default_page_size,
                max_page_size,
                "{DEFAULT_PAGE_SIZE_VAR} out of range; clamping"
            );
            default_page_size = default_page_size.clamp(1, max_page_size);
        }

        Self {
            bind_addr,
            default_page_size,
            max_page_size,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "{key} is not valid; using default {default}");
            default
        }),
    }
}
