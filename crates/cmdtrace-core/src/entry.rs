//! Capture entries
//!
//! A [`CaptureEntry`] pairs an identifier with the command applied under it.

use crate::command::{Command, CommandRef};
use crate::id::CmdId;
use std::sync::Arc;

/// Immutable (identifier, command) pair
///
/// # Invariants
/// - Immutable after construction
/// - Cloning shares the command; there is no way to alter either field
pub struct CaptureEntry<S> {
    id: CmdId,
    command: CommandRef<S>,
}

impl<S: 'static> CaptureEntry<S> {
    /// Pair an already shared command with its identifier
    #[inline]
    #[must_use]
    pub fn new(id: CmdId, command: CommandRef<S>) -> Self {
        Self { id, command }
    }

    /// Pair a concrete command with its identifier
    #[inline]
    #[must_use]
    pub fn from_command<C: Command<S>>(id: CmdId, command: C) -> Self {
        Self::new(id, Arc::new(command))
    }

    /// Identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> CmdId {
        self.id
    }

    /// Command
    #[inline]
    #[must_use]
    pub fn command(&self) -> &dyn Command<S> {
        self.command.as_ref()
    }

    /// Shared handle to the command
    #[inline]
    #[must_use]
    pub fn command_ref(&self) -> &CommandRef<S> {
        &self.command
    }
}

impl<S: 'static> Clone for CaptureEntry<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            command: Arc::clone(&self.command),
        }
    }
}

impl<S: 'static> PartialEq for CaptureEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.command.eq_command(other.command.as_ref())
    }
}

impl<S: 'static> std::fmt::Debug for CaptureEntry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureEntry")
            .field("id", &self.id)
            .field("command", &self.command)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::AuxContext;
    use crate::error::ApplyError;

    #[derive(Debug, PartialEq)]
    struct Noop(&'static str);

    impl Command<()> for Noop {
        fn mutate(
            &self,
            _id: CmdId,
            _state: &mut (),
            _aux: Option<&mut AuxContext>,
        ) -> Result<(), ApplyError> {
            Ok(())
        }
    }

    #[test]
    fn entry_accessors() {
        let entry = CaptureEntry::<()>::from_command(CmdId(5), Noop("a"));
        assert_eq!(entry.id(), CmdId(5));
        assert!(entry.command().eq_command(&Noop("a")));
    }

    #[test]
    fn clone_shares_command() {
        let entry = CaptureEntry::<()>::from_command(CmdId(1), Noop("a"));
        let copy = entry.clone();
        assert!(Arc::ptr_eq(entry.command_ref(), copy.command_ref()));
        assert_eq!(entry, copy);
    }

    #[test]
    fn equality_needs_id_and_command() {
        let a = CaptureEntry::<()>::from_command(CmdId(1), Noop("a"));
        assert_eq!(a, CaptureEntry::from_command(CmdId(1), Noop("a")));
        assert_ne!(a, CaptureEntry::from_command(CmdId(2), Noop("a")));
        assert_ne!(a, CaptureEntry::from_command(CmdId(1), Noop("b")));
    }
}
