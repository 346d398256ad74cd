//! Configuration Module
//!
//! Handles loading and managing cache and server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Default number of bits in the membership filter.
pub const DEFAULT_BLOOM_SIZE: usize = 1000;

/// Default number of hash derivations per key.
pub const DEFAULT_HASH_COUNT: usize = 5;

/// Page cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of bit slots in the membership filter
    pub bloom_size: usize,
    /// Number of hash derivations per key
    pub hash_count: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Timeout in seconds for a single remote fetch
    pub fetch_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `BLOOM_SIZE` - Filter size in bits (default: 1000)
    /// - `HASH_COUNT` - Hash derivations per key (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `FETCH_TIMEOUT_SECS` - Remote fetch timeout in seconds (default: 30)
    ///
    /// Unparseable values fall back to the default. A parsed zero is kept so that
    /// cache construction can reject it.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bloom_size: env_or("BLOOM_SIZE", defaults.bloom_size),
            hash_count: env_or("HASH_COUNT", defaults.hash_count),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            fetch_timeout: env_or("FETCH_TIMEOUT_SECS", defaults.fetch_timeout),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bloom_size: DEFAULT_BLOOM_SIZE,
            hash_count: DEFAULT_HASH_COUNT,
            server_port: 3000,
            fetch_timeout: 30,
        }
    }
}
