//! Command identifiers

use serde::{Deserialize, Serialize};

/// Identifier naming one applied command instance within a capture session
///
/// Always supplied by the caller; the pipeline never generates one. Ordering
/// is defined but carries no meaning for capture order: a list may hold ids
/// in any relative order.
///
/// Uniqueness within a session is the caller's responsibility and is not
/// enforced here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CmdId(pub u64);

impl CmdId {
    /// Raw value
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for CmdId {
    #[inline]
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<CmdId> for u64 {
    #[inline]
    fn from(id: CmdId) -> Self {
        id.0
    }
}

impl std::fmt::Display for CmdId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
