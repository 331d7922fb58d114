//! Append-only capture list

use crate::command::{Command, CommandRef};
use crate::entry::CaptureEntry;
use crate::error::ApplyError;
use crate::id::CmdId;
use crate::writer::Writer;
use std::collections::TryReserveError;

/// Ordered sequence of [`CaptureEntry`] values in capture order
///
/// Position reflects the order entries were appended, not identifier value.
///
/// # Invariants
/// - Append-only: no entry is removed or reordered once pushed
/// - Length equals the number of successful appends
pub struct CaptureList<S> {
    entries: Vec<CaptureEntry<S>>,
}

impl<S: 'static> CaptureList<S> {
    /// Create empty list
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create empty list with room for `capacity` entries
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append an entry
    #[inline]
    pub fn push(&mut self, entry: CaptureEntry<S>) {
        self.entries.push(entry);
    }

    /// Reserve room for `additional` entries
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
    }

    /// Reserve room for `additional` entries, reporting failure instead of panicking
    ///
    /// # Errors
    /// Returns error if the capacity overflows or the allocator fails
    #[inline]
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.entries.try_reserve(additional)
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CaptureEntry<S>> {
        self.entries.get(index)
    }

    /// Last appended entry
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&CaptureEntry<S>> {
        self.entries.last()
    }

    /// All entries in capture order
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[CaptureEntry<S>] {
        &self.entries
    }

    /// Iterate entries in capture order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, CaptureEntry<S>> {
        self.entries.iter()
    }

    /// Identifiers in capture order
    pub fn ids(&self) -> impl Iterator<Item = CmdId> + '_ {
        self.entries.iter().map(CaptureEntry::id)
    }

    /// Bare commands in capture order
    pub fn commands(&self) -> impl Iterator<Item = &dyn Command<S>> + '_ {
        self.entries.iter().map(CaptureEntry::command)
    }
}

impl<S: 'static> Default for CaptureList<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static> Clone for CaptureList<S> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<S: 'static> PartialEq for CaptureList<S> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<S: 'static> std::fmt::Debug for CaptureList<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.entries).finish()
    }
}

impl<S: 'static> FromIterator<CaptureEntry<S>> for CaptureList<S> {
    fn from_iter<I: IntoIterator<Item = CaptureEntry<S>>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<S: 'static> Extend<CaptureEntry<S>> for CaptureList<S> {
    fn extend<I: IntoIterator<Item = CaptureEntry<S>>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<'a, S: 'static> IntoIterator for &'a CaptureList<S> {
    type Item = &'a CaptureEntry<S>;
    type IntoIter = std::slice::Iter<'a, CaptureEntry<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<S: 'static> IntoIterator for CaptureList<S> {
    type Item = CaptureEntry<S>;
    type IntoIter = std::vec::IntoIter<CaptureEntry<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Capture-only writer: records without any state
impl<S: 'static> Writer<S> for CaptureList<S> {
    #[inline]
    fn state(&self) -> Option<&S> {
        None
    }

    fn write(&mut self, id: CmdId, command: CommandRef<S>) -> Result<(), ApplyError> {
        self.push(CaptureEntry::new(id, command));
        Ok(())
    }
}
