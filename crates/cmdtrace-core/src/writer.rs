//! Writers: apply commands to state and record them
//!
//! [`Writer`] is the only surface a producer needs. [`StateWriter`] is the
//! recording implementation; [`CaptureList`] doubles as a capture-only writer.

use crate::command::{Command, CommandRef};
use crate::config::{CaptureConfig, MAX_INITIAL_CAPACITY};
use crate::entry::CaptureEntry;
use crate::error::ApplyError;
use crate::id::CmdId;
use crate::list::CaptureList;
use std::collections::HashSet;
use std::sync::Arc;

/// Accepts commands in call order
///
/// Implementations are not required to be safe under concurrent use; callers
/// serialize their own writes.
pub trait Writer<S> {
    /// Current state, if one is attached
    fn state(&self) -> Option<&S>;

    /// Apply `command` under `id` (when state is attached) and record it
    ///
    /// Exactly one entry is recorded per successful call.
    ///
    /// # Errors
    /// Returns the command's own [`ApplyError`] unchanged; nothing is recorded
    fn write(&mut self, id: CmdId, command: CommandRef<S>) -> Result<(), ApplyError>;

    /// Write a concrete command
    ///
    /// # Errors
    /// See [`Writer::write`]
    #[inline]
    fn write_command<C: Command<S>>(&mut self, id: CmdId, command: C) -> Result<(), ApplyError>
    where
        Self: Sized,
        S: 'static,
    {
        self.write(id, Arc::new(command))
    }
}

impl<S: 'static, W: Writer<S> + ?Sized> Writer<S> for &mut W {
    #[inline]
    fn state(&self) -> Option<&S> {
        (**self).state()
    }

    #[inline]
    fn write(&mut self, id: CmdId, command: CommandRef<S>) -> Result<(), ApplyError> {
        (**self).write(id, command)
    }
}

/// Where a [`StateWriter`] keeps its state
enum StateSlot<'s, S> {
    Owned(S),
    Borrowed(&'s mut S),
}

impl<S: 'static> StateSlot<'_, S> {
    fn get(&self) -> &S {
        match self {
            Self::Owned(state) => state,
            Self::Borrowed(state) => state,
        }
    }

    fn get_mut(&mut self) -> &mut S {
        match self {
            Self::Owned(state) => state,
            Self::Borrowed(state) => state,
        }
    }
}

/// Recording writer
///
/// Applies each command to the attached state, then appends the entry. With
/// no state attached the mutation step is skipped and capture behaves
/// identically.
///
/// # Invariants
/// - The N-th successful write is the N-th entry and the N-th mutation
/// - A failed write leaves both state and list as they were
pub struct StateWriter<'s, S> {
    state: Option<StateSlot<'s, S>>,
    captured: CaptureList<S>,
    config: CaptureConfig,
    seen: Option<HashSet<CmdId>>,
}

impl<'s, S: 'static> StateWriter<'s, S> {
    /// Writer mutating a borrowed state
    #[must_use]
    pub fn new(state: &'s mut S) -> Self {
        Self::with_slot(Some(StateSlot::Borrowed(state)))
    }

    /// Writer owning its state
    #[must_use]
    pub fn owned(state: S) -> Self {
        Self::with_slot(Some(StateSlot::Owned(state)))
    }

    /// Capture-only writer with no state
    #[must_use]
    pub fn detached() -> Self {
        Self::with_slot(None)
    }

    fn with_slot(state: Option<StateSlot<'s, S>>) -> Self {
        Self {
            state,
            captured: CaptureList::new(),
            config: CaptureConfig::default(),
            seen: None,
        }
    }

    /// Apply configuration
    ///
    /// The up-front reservation is capped at [`MAX_INITIAL_CAPACITY`]; an
    /// unvalidated config never panics here.
    #[must_use]
    pub fn with_config(mut self, config: CaptureConfig) -> Self {
        let capacity = config.initial_capacity.min(MAX_INITIAL_CAPACITY);
        if let Err(err) = self.captured.try_reserve(capacity) {
            tracing::warn!(capacity, error = %err, "initial reservation failed");
        }
        self.seen = config.warn_on_duplicate_ids.then(|| {
            self.captured.ids().collect::<HashSet<_>>()
        });
        self.config = config;
        self
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Check if a state is attached
    #[inline]
    #[must_use]
    pub fn has_state(&self) -> bool {
        self.state.is_some()
    }

    /// Entries recorded so far
    #[inline]
    #[must_use]
    pub fn captured(&self) -> &CaptureList<S> {
        &self.captured
    }

    /// Consume the writer, keeping the recorded entries
    #[inline]
    #[must_use]
    pub fn into_list(self) -> CaptureList<S> {
        self.captured
    }

    /// Consume the writer into owned state (if any) and recorded entries
    ///
    /// Borrowed state is returned as `None`; the caller still holds it.
    #[must_use]
    pub fn into_parts(self) -> (Option<S>, CaptureList<S>) {
        let state = match self.state {
            Some(StateSlot::Owned(state)) => Some(state),
            Some(StateSlot::Borrowed(_)) | None => None,
        };
        (state, self.captured)
    }

    fn note_id(&mut self, id: CmdId) {
        if let Some(seen) = self.seen.as_mut() {
            if !seen.insert(id) {
                tracing::warn!(
                    session = %self.config.session,
                    %id,
                    "identifier written more than once"
                );
            }
        }
    }
}

impl<S: 'static> Writer<S> for StateWriter<'_, S> {
    #[inline]
    fn state(&self) -> Option<&S> {
        self.state.as_ref().map(StateSlot::get)
    }

    fn write(&mut self, id: CmdId, command: CommandRef<S>) -> Result<(), ApplyError> {
        let span = tracing::trace_span!("write", session = %self.config.session, %id);
        let _guard = span.enter();

        match self.state.as_mut() {
            Some(slot) => {
                command.mutate(id, slot.get_mut(), None).map_err(|err| {
                    tracing::debug!(command = command.name(), error = %err, "mutation failed");
                    err
                })?;
            }
            None => {
                tracing::debug!(command = command.name(), "no state attached, mutation skipped");
            }
        }

        self.note_id(id);
        self.captured.push(CaptureEntry::new(id, command));
        tracing::trace!(len = self.captured.len(), "entry captured");
        Ok(())
    }
}

impl<S: 'static> std::fmt::Debug for StateWriter<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateWriter")
            .field("has_state", &self.has_state())
            .field("captured", &self.captured.len())
            .field("config", &self.config)
            .finish()
    }
}
