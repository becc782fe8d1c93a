/*!
 * Runtime Configuration
 *
 * Both demos take no flags; everything tunable is read from the environment.
 */

use super::errors::ConfigError;
use super::limits::{DEFAULT_PAYLOAD, DEFAULT_SHUTDOWN_GRACE, MAX_SHUTDOWN_GRACE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_TRACE_JSON: &str = "DEMO_TRACE_JSON";
pub const ENV_SHUTDOWN_GRACE_MS: &str = "DEMO_SHUTDOWN_GRACE_MS";
pub const ENV_WAIT_BACKEND: &str = "DEMO_WAIT_BACKEND";
pub const ENV_PIPE_PAYLOAD: &str = "DEMO_PIPE_PAYLOAD";

/// How the interrupt waiter blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitBackend {
    /// tokio signal stream awaited on a current-thread runtime
    #[default]
    Async,
    /// SIGINT blocked in the thread mask and collected with sigwait(2)
    Sigwait,
}

impl FromStr for WaitBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "async" => Ok(WaitBackend::Async),
            "sigwait" => Ok(WaitBackend::Sigwait),
            other => Err(format!("unknown backend '{}', expected async or sigwait", other)),
        }
    }
}

impl fmt::Display for WaitBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitBackend::Async => write!(f, "async"),
            WaitBackend::Sigwait => write!(f, "sigwait"),
        }
    }
}

/// Configuration shared by both demo programs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Emit JSON logs instead of compact human-readable ones
    pub trace_json: bool,

    /// Pause between the interrupt and exit (default: 1s)
    #[serde(with = "duration_ms")]
    pub shutdown_grace: Duration,

    /// Blocking strategy for the interrupt waiter
    pub wait_backend: WaitBackend,

    /// Value the relay child sends to its parent (default: 3)
    pub payload: i32,
}

impl DemoConfig {
    /// Create default configuration
    pub fn new() -> Self {
        Self {
            trace_json: false,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
            wait_backend: WaitBackend::Async,
            payload: DEFAULT_PAYLOAD,
        }
    }

    /// Resolve configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup
    ///
    /// Unset keys fall back to defaults; set-but-invalid keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(raw) = lookup(ENV_TRACE_JSON) {
            config.trace_json = parse_flag(ENV_TRACE_JSON, &raw)?;
        }

        if let Some(raw) = lookup(ENV_SHUTDOWN_GRACE_MS) {
            let ms: u64 = parse_value(ENV_SHUTDOWN_GRACE_MS, &raw)?;
            let grace = Duration::from_millis(ms);
            if grace > MAX_SHUTDOWN_GRACE {
                return Err(ConfigError::InvalidValue {
                    key: ENV_SHUTDOWN_GRACE_MS,
                    value: raw,
                    reason: format!("exceeds maximum of {}ms", MAX_SHUTDOWN_GRACE.as_millis()),
                });
            }
            config.shutdown_grace = grace;
        }

        if let Some(raw) = lookup(ENV_WAIT_BACKEND) {
            config.wait_backend = parse_value(ENV_WAIT_BACKEND, &raw)?;
        }

        if let Some(raw) = lookup(ENV_PIPE_PAYLOAD) {
            config.payload = parse_value(ENV_PIPE_PAYLOAD, &raw)?;
        }

        Ok(config)
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
