//! List normalization
//!
//! Builds a [`CaptureList`] from a mix of commands that carry their own
//! identifier and ready-made entries. Nothing is applied to any state; the
//! output is meant for expected-result fixtures and for seeding replays.

use crate::command::{Command, CommandRef};
use crate::entry::CaptureEntry;
use crate::error::ListError;
use crate::id::CmdId;
use crate::list::CaptureList;
use std::sync::Arc;

/// One input to [`ListBuilder`]
pub enum ListItem<S> {
    /// Command expected to carry an intrinsic identifier
    Command(CommandRef<S>),
    /// Entry passed through unchanged
    Entry(CaptureEntry<S>),
}

impl<S: 'static> ListItem<S> {
    /// Wrap a concrete command
    #[inline]
    #[must_use]
    pub fn command<C: Command<S>>(command: C) -> Self {
        Self::Command(Arc::new(command))
    }

    /// Wrap an explicit (identifier, command) pair
    #[inline]
    #[must_use]
    pub fn entry<C: Command<S>>(id: CmdId, command: C) -> Self {
        Self::Entry(CaptureEntry::from_command(id, command))
    }

    /// Normalize into an entry
    ///
    /// # Errors
    /// Returns error if this is a command without an intrinsic identifier
    fn into_entry(self, index: usize) -> Result<CaptureEntry<S>, ListError> {
        match self {
            Self::Entry(entry) => Ok(entry),
            Self::Command(command) => match command.intrinsic_id() {
                Some(id) => Ok(CaptureEntry::new(id, command)),
                None => Err(ListError::UnrecognizedItem {
                    index,
                    name: command.name(),
                }),
            },
        }
    }
}

impl<S: 'static> From<CaptureEntry<S>> for ListItem<S> {
    #[inline]
    fn from(entry: CaptureEntry<S>) -> Self {
        Self::Entry(entry)
    }
}

impl<S: 'static> From<CommandRef<S>> for ListItem<S> {
    #[inline]
    fn from(command: CommandRef<S>) -> Self {
        Self::Command(command)
    }
}

impl<S: 'static> std::fmt::Debug for ListItem<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Command(command) => f.debug_tuple("Command").field(command).finish(),
            Self::Entry(entry) => f.debug_tuple("Entry").field(entry).finish(),
        }
    }
}

/// Collects [`ListItem`]s and normalizes them into a [`CaptureList`]
///
/// # Example
/// ```rust,ignore
/// let expected = ListBuilder::new()
///     .command(CmdA::new(5, 1))
///     .entry(CaptureEntry::from_command(CmdId(3), Untagged::new("b")))
///     .build()?;
/// ```
pub struct ListBuilder<S> {
    items: Vec<ListItem<S>>,
}

impl<S: 'static> ListBuilder<S> {
    /// Create empty builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add an item
    #[inline]
    #[must_use]
    pub fn push(mut self, item: impl Into<ListItem<S>>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Add a command carrying its own identifier
    #[inline]
    #[must_use]
    pub fn command<C: Command<S>>(self, command: C) -> Self {
        self.push(ListItem::command(command))
    }

    /// Add a ready-made entry
    #[inline]
    #[must_use]
    pub fn entry(self, entry: CaptureEntry<S>) -> Self {
        self.push(entry)
    }

    /// Number of pending items
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if no items are pending
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Normalize all items, in order
    ///
    /// # Errors
    /// Returns [`ListError::UnrecognizedItem`] for the first command without
    /// an intrinsic identifier; no list is produced
    pub fn build(self) -> Result<CaptureList<S>, ListError> {
        build_list(self.items)
    }
}

impl<S: 'static> Default for ListBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static> Extend<ListItem<S>> for ListBuilder<S> {
    fn extend<I: IntoIterator<Item = ListItem<S>>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

/// Normalize `items` into a capture list, preserving input order
///
/// # Errors
/// Returns [`ListError::UnrecognizedItem`] for the first command without an
/// intrinsic identifier
pub fn build_list<S: 'static>(
    items: impl IntoIterator<Item = ListItem<S>>,
) -> Result<CaptureList<S>, ListError> {
    let list = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| item.into_entry(index))
        .collect::<Result<CaptureList<S>, _>>()
        .map_err(|err| {
            tracing::warn!(error = %err, "list construction aborted");
            err
        })?;

    tracing::debug!(len = list.len(), "capture list built");
    Ok(list)
}
