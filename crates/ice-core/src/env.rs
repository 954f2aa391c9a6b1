//! Environment variable helpers
//!
//! Runtime knobs (`ICE_LOG_LEVEL`, `ICE_CONTEXT_IDLE_SPINS`, ...) are read
//! through these so that a malformed value falls back to the default
//! instead of failing startup.
//!
//! ```ignore
//! use ice_core::env::{env_get, env_get_duration_ms};
//!
//! let spins: u32 = env_get("ICE_CONTEXT_IDLE_SPINS", 64);
//! let timeout = env_get_duration_ms("ICE_CONTEXT_PARK_TIMEOUT_MS");
//! ```

use std::str::FromStr;
use std::time::Duration;

/// Parse `key` as `T`, or return `default` when unset or unparsable.
#[inline]
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    env_get_opt(key).unwrap_or(default)
}

/// Parse `key` as `T`; `None` when unset or unparsable.
#[inline]
pub fn env_get_opt<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Read `key` as a flag.
///
/// `1`, `true`, `yes` and `on` (any case) are true, anything else that is
/// set is false, and an unset variable yields `default`.
#[inline]
pub fn env_get_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => matches!(
            val.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

#[inline]
pub fn env_get_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read `key` as a whole number of milliseconds.
#[inline]
pub fn env_get_duration_ms(key: &str) -> Option<Duration> {
    env_get_opt::<u64>(key).map(Duration::from_millis)
}

#[inline]
pub fn env_is_set(key: &str) -> bool {
    std::env::var_os(key).is_some()
}

// ============================================================================
// Tests
// ============================================================================
