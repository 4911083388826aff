//! Configuration for the maze server.
//!
//! Defaults can be overridden via environment variables:
//!
//! - `MAZE_BIND_ADDR`           (default: "0.0.0.0")
//! - `MAZE_PORT`                (default: "8080")  playback stream
//! - `MAZE_HTTP_PORT`           (default: "8081")  synchronous solve
//! - `MAZE_MAX_CLIENTS`         (default: "1024")
//! - `MAZE_DEFAULT_PACE_MS`     (default: "100")
//! - `MAZE_STREAM_REJECT_WALLS` (default: "false")

use std::env;
use std::str::FromStr;
use std::time::Duration;

use maze_protocol::ValidationPolicy;
use thiserror::Error;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// IP address / interface to bind to (e.g. "0.0.0.0" or "127.0.0.1").
    pub bind_addr: String,

    /// TCP port for the playback stream.
    pub port: u16,

    /// TCP port for the HTTP solve endpoint.
    pub http_port: u16,

    /// Maximum number of simultaneously connected stream clients.
    pub max_clients: usize,

    /// Pace for solves that do not specify one.
    pub default_pace: Duration,

    /// Reject stream solves whose start or goal is a wall.
    pub stream_reject_walls: bool,
}

#[derive(Debug, Error)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    key: &'static str,
    value: String,
    reason: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
            http_port: 8081,
            max_clients: 1024,
            default_pace: maze_core::DEFAULT_PACE,
            stream_reject_walls: false,
        }
    }
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let bind_addr = env::var("MAZE_BIND_ADDR").unwrap_or(defaults.bind_addr);
        let port = read_env_or_default("MAZE_PORT", defaults.port)?;
        let http_port = read_env_or_default("MAZE_HTTP_PORT", defaults.http_port)?;
        let max_clients = read_env_or_default("MAZE_MAX_CLIENTS", defaults.max_clients)?;
        let pace_ms = read_env_or_default(
            "MAZE_DEFAULT_PACE_MS",
            defaults.default_pace.as_millis() as u64,
        )?;
        let stream_reject_walls =
            read_env_or_default("MAZE_STREAM_REJECT_WALLS", defaults.stream_reject_walls)?;

        Ok(Config {
            bind_addr,
            port,
            http_port,
            max_clients,
            default_pace: Duration::from_millis(pace_ms),
            stream_reject_walls,
        })
    }

    /// `addr:port` of the playback stream.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// `addr:port` of the HTTP endpoint.
    pub fn http_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.http_port)
    }

    /// Validation applied to solves arriving on the stream.
    pub fn stream_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            reject_walls: self.stream_reject_walls,
        }
    }
}

fn read_env_or_default<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val.trim().parse::<T>().map_err(|e| ConfigError {
            key,
            reason: e.to_string(),
            value: val,
        }),
        Err(_) => Ok(default),
    }
}
