//! Context configuration

use std::time::Duration;

use ice_core::env::{env_get, env_get_duration_ms};

/// Upper bound on `idle_spins`; beyond this spinning only burns CPU.
pub const MAX_IDLE_SPINS: u32 = 1 << 20;

/// Tuning for a [`Context`](crate::Context)'s consumer loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    /// Empty dequeues to retry before parking the consumer (default: 64)
    pub idle_spins: u32,

    /// Longest single park; `None` waits for a notification (default)
    pub park_timeout: Option<Duration>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            idle_spins: 64,
            park_timeout: None,
        }
    }
}

impl ContextConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the environment.
    ///
    /// - `ICE_CONTEXT_IDLE_SPINS` - `idle_spins`
    /// - `ICE_CONTEXT_PARK_TIMEOUT_MS` - `park_timeout` in milliseconds
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            idle_spins: env_get("ICE_CONTEXT_IDLE_SPINS", defaults.idle_spins),
            park_timeout: env_get_duration_ms("ICE_CONTEXT_PARK_TIMEOUT_MS")
                .or(defaults.park_timeout),
        }
    }

    pub fn idle_spins(mut self, n: u32) -> Self {
        self.idle_spins = n;
        self
    }

    pub fn park_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.park_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.idle_spins > MAX_IDLE_SPINS {
            return Err("idle_spins exceeds maximum");
        }
        if self.park_timeout == Some(Duration::ZERO) {
            return Err("park_timeout must be non-zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ContextConfig::default();
        assert_eq!(config.idle_spins, 64);
        assert_eq!(config.park_timeout, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ContextConfig::new()
            .idle_spins(0)
            .park_timeout(Some(Duration::from_millis(5)));
        assert_eq!(config.idle_spins, 0);
        assert_eq!(config.park_timeout, Some(Duration::from_millis(5)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects() {
        assert!(ContextConfig::new().idle_spins(u32::MAX).validate().is_err());
        assert!(ContextConfig::new()
            .park_timeout(Some(Duration::ZERO))
            .validate()
            .is_err());
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("ICE_CONTEXT_IDLE_SPINS", "7");
        std::env::set_var("ICE_CONTEXT_PARK_TIMEOUT_MS", "20");
        let config = ContextConfig::from_env();
        std::env::remove_var("ICE_CONTEXT_IDLE_SPINS");
        std::env::remove_var("ICE_CONTEXT_PARK_TIMEOUT_MS");

        assert_eq!(config.idle_spins, 7);
        assert_eq!(config.park_timeout, Some(Duration::from_millis(20)));
    }
}
