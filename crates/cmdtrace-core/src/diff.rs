//! Divergence between two capture lists
//!
//! Reports the first position where an actual capture differs from the
//! expected one. Later differences are not examined.

use crate::entry::CaptureEntry;
use crate::id::CmdId;
use crate::list::CaptureList;

/// What differs at the divergent position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DivergenceKind {
    /// Identifiers differ
    IdMismatch {
        /// Identifier in the expected list
        expected: CmdId,
        /// Identifier in the actual list
        actual: CmdId,
    },

    /// Identifiers match but commands differ
    CommandMismatch {
        /// Shared identifier
        id: CmdId,
        /// Debug rendering of the expected command
        expected: String,
        /// Debug rendering of the actual command
        actual: String,
    },

    /// Expected entry absent from the actual list
    Missing {
        /// Identifier of the missing entry
        id: CmdId,
    },

    /// Actual entry beyond the end of the expected list
    Unexpected {
        /// Identifier of the extra entry
        id: CmdId,
    },
}

/// First difference between two capture lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    /// Position in both lists
    pub index: usize,
    /// Kind of difference
    pub kind: DivergenceKind,
}

impl std::fmt::Display for Divergence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            DivergenceKind::IdMismatch { expected, actual } => write!(
                f,
                "entry {}: expected id {expected}, got id {actual}",
                self.index
            ),
            DivergenceKind::CommandMismatch {
                id,
                expected,
                actual,
            } => write!(
                f,
                "entry {} (id {id}): expected {expected}, got {actual}",
                self.index
            ),
            DivergenceKind::Missing { id } => {
                write!(f, "entry {}: expected id {id}, list ended", self.index)
            }
            DivergenceKind::Unexpected { id } => {
                write!(f, "entry {}: unexpected id {id}", self.index)
            }
        }
    }
}

/// Find the first divergence of `actual` from `expected`
///
/// Returns `None` when the lists are equal.
#[must_use]
pub fn diff<S: 'static>(
    expected: &CaptureList<S>,
    actual: &CaptureList<S>,
) -> Option<Divergence> {
    let mut expected_iter = expected.iter();
    let mut actual_iter = actual.iter();
    let mut index = 0;

    loop {
        let kind = match (expected_iter.next(), actual_iter.next()) {
            (None, None) => return None,
            (Some(e), None) => DivergenceKind::Missing { id: e.id() },
            (None, Some(a)) => DivergenceKind::Unexpected { id: a.id() },
            (Some(e), Some(a)) => match compare(e, a) {
                Some(kind) => kind,
                None => {
                    index += 1;
                    continue;
                }
            },
        };
        return Some(Divergence { index, kind });
    }
}

fn compare<S: 'static>(
    expected: &CaptureEntry<S>,
    actual: &CaptureEntry<S>,
) -> Option<DivergenceKind> {
    if expected.id() != actual.id() {
        return Some(DivergenceKind::IdMismatch {
            expected: expected.id(),
            actual: actual.id(),
        });
    }
    if !expected.command().eq_command(actual.command()) {
        return Some(DivergenceKind::CommandMismatch {
            id: expected.id(),
            expected: format!("{:?}", expected.command()),
            actual: format!("{:?}", actual.command()),
        });
    }
    None
}
