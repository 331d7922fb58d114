//! Error types for the capture pipeline
//!
//! Two kinds matter to callers:
//! - [`ApplyError`]: a command failed to mutate state; writers hand it back untouched
//! - [`ListError`]: a list fixture was built from an item it cannot pair with an id
//!
//! [`ReplayError`] and [`ConfigError`] cover the replay and configuration helpers.

use crate::id::CmdId;

/// Failure reported by [`Command::mutate`](crate::Command::mutate)
///
/// Writers never wrap, retry or swallow this error. A command returning it
/// must leave the state exactly as it found it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    /// Generic failure
    #[error("{0}")]
    Failed(String),

    /// State does not allow the command
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Command refused to apply under the given identifier
    #[error("command {id} rejected: {reason}")]
    Rejected {
        /// Identifier the command was written under
        id: CmdId,
        /// Why the command refused
        reason: String,
    },
}

impl ApplyError {
    /// Create a generic failure
    #[inline]
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    /// Create an invalid-state failure
    #[inline]
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}

/// Errors from normalizing list fixtures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// Item is neither an identified command nor a capture entry
    #[error("item {index} ({name}) is neither an identified command nor a capture entry")]
    UnrecognizedItem {
        /// Position of the item in the builder input
        index: usize,
        /// Command name of the rejected item
        name: &'static str,
    },
}

/// Replay stopped because an entry failed to apply
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("replay failed at entry {index} (id {id})")]
pub struct ReplayError {
    /// Position of the failing entry in the replayed list
    pub index: usize,
    /// Identifier recorded with the failing entry
    pub id: CmdId,
    /// The command's own failure
    #[source]
    pub source: ApplyError,
}

/// Errors loading a [`CaptureConfig`](crate::CaptureConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML could not be parsed into a config
    #[error("failed to parse capture config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed config violates an invariant
    #[error("invalid capture config: {0}")]
    Invalid(String),
}
