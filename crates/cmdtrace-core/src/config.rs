//! Capture configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default session name used in tracing spans
pub const DEFAULT_SESSION: &str = "capture";

/// Largest `initial_capacity` accepted by [`CaptureConfig::validate`]
pub const MAX_INITIAL_CAPACITY: usize = 1 << 20;

/// Configuration for a [`StateWriter`](crate::StateWriter)
///
/// None of these settings change what gets captured; they tune allocation
/// and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Session name attached to tracing spans
    pub session: String,
    /// Entries to reserve up front, at most [`MAX_INITIAL_CAPACITY`]
    pub initial_capacity: usize,
    /// Log a warning when an identifier is written twice
    ///
    /// Tracking keeps every identifier written so far, so memory grows by one
    /// entry per write for the lifetime of the writer. Leave this off for long
    /// sessions that only need the captured list.
    pub warn_on_duplicate_ids: bool,
}

impl CaptureConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With session name
    #[inline]
    #[must_use]
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = session.into();
        self
    }

    /// With initial capacity
    #[inline]
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// With duplicate-id warnings
    #[inline]
    #[must_use]
    pub fn with_duplicate_id_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_duplicate_ids = enabled;
        self
    }

    /// Parse and validate a TOML document
    ///
    /// Missing keys take their defaults.
    ///
    /// # Errors
    /// Returns error if the document does not parse or fails [`Self::validate`]
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants
    ///
    /// # Errors
    /// Returns error if the session name is empty or `initial_capacity`
    /// exceeds [`MAX_INITIAL_CAPACITY`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.trim().is_empty() {
            return Err(ConfigError::Invalid("session name must not be empty".to_string()));
        }
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(ConfigError::Invalid(format!(
                "initial_capacity {} exceeds maximum {MAX_INITIAL_CAPACITY}",
                self.initial_capacity
            )));
        }
        Ok(())
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            session: DEFAULT_SESSION.to_string(),
            initial_capacity: 0,
            warn_on_duplicate_ids: false,
        }
    }
}
