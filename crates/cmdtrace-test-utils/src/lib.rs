//! Testing utilities for the cmdtrace workspace
//!
//! Shared test state, command fixtures, a spy writer and list helpers.

#![allow(missing_docs)]

use cmdtrace_core::{
    build_list, ApplyError, AuxContext, CaptureEntry, CaptureList, CmdId, Command, CommandRef,
    ListItem, Writer,
};
use std::sync::Once;

/// State touched by the fixture commands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestState {
    /// Running total of every `CmdA` value
    pub total: i64,
    /// (id, label) log in application order
    pub log: Vec<(CmdId, String)>,
}

impl TestState {
    pub fn labels(&self) -> Vec<&str> {
        self.log.iter().map(|(_, label)| label.as_str()).collect()
    }

    pub fn ids(&self) -> Vec<CmdId> {
        self.log.iter().map(|(id, _)| *id).collect()
    }
}

/// Adds `value` to the total; carries its own id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdA {
    pub id: CmdId,
    pub value: i64,
}

impl CmdA {
    pub fn new(id: u64, value: i64) -> Self {
        Self {
            id: CmdId(id),
            value,
        }
    }
}

impl Command<TestState> for CmdA {
    fn mutate(
        &self,
        id: CmdId,
        state: &mut TestState,
        _aux: Option<&mut AuxContext>,
    ) -> Result<(), ApplyError> {
        state.total += self.value;
        state.log.push((id, format!("A{}", self.value)));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "CmdA"
    }

    fn intrinsic_id(&self) -> Option<CmdId> {
        Some(self.id)
    }
}

/// Logs a label; carries its own id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdB {
    pub id: CmdId,
    pub label: String,
}

impl CmdB {
    pub fn new(id: u64, label: &str) -> Self {
        Self {
            id: CmdId(id),
            label: label.to_string(),
        }
    }
}

impl Command<TestState> for CmdB {
    fn mutate(
        &self,
        id: CmdId,
        state: &mut TestState,
        _aux: Option<&mut AuxContext>,
    ) -> Result<(), ApplyError> {
        state.log.push((id, format!("B{}", self.label)));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "CmdB"
    }

    fn intrinsic_id(&self) -> Option<CmdId> {
        Some(self.id)
    }
}

/// Logs a note; has no id of its own, so list fixtures reject it bare
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Untagged {
    pub note: String,
}

impl Untagged {
    pub fn new(note: &str) -> Self {
        Self {
            note: note.to_string(),
        }
    }
}

impl Command<TestState> for Untagged {
    fn mutate(
        &self,
        id: CmdId,
        state: &mut TestState,
        _aux: Option<&mut AuxContext>,
    ) -> Result<(), ApplyError> {
        state.log.push((id, format!("U{}", self.note)));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Untagged"
    }
}

/// Always fails without touching the state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdFail {
    pub reason: String,
}

impl CmdFail {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

impl Command<TestState> for CmdFail {
    fn mutate(
        &self,
        id: CmdId,
        _state: &mut TestState,
        _aux: Option<&mut AuxContext>,
    ) -> Result<(), ApplyError> {
        Err(ApplyError::Rejected {
            id,
            reason: self.reason.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "CmdFail"
    }
}

impl From<CmdA> for ListItem<TestState> {
    fn from(cmd: CmdA) -> Self {
        ListItem::command(cmd)
    }
}

impl From<CmdB> for ListItem<TestState> {
    fn from(cmd: CmdB) -> Self {
        ListItem::command(cmd)
    }
}

impl From<Untagged> for ListItem<TestState> {
    fn from(cmd: Untagged) -> Self {
        ListItem::command(cmd)
    }
}

/// Entry for `command` under `id`
pub fn entry<C: Command<TestState>>(id: u64, command: C) -> CaptureEntry<TestState> {
    CaptureEntry::from_command(CmdId(id), command)
}

/// Build a capture list, panicking on any item that cannot be paired with an id
///
/// # Panics
/// Panics on an unrecognized item; fixtures must never silently drop one
pub fn list<S: 'static>(items: impl IntoIterator<Item = ListItem<S>>) -> CaptureList<S> {
    match build_list(items) {
        Ok(list) => list,
        Err(err) => panic!("list only accepts identified commands or capture entries: {err}"),
    }
}

/// Build a capture list from commands and entries
///
/// ```rust,ignore
/// let expected = capture_list![CmdA::new(5, 1), entry(3, Untagged::new("x"))];
/// ```
#[macro_export]
macro_rules! capture_list {
    ($($item:expr),* $(,)?) => {
        $crate::list(::std::vec![$($crate::__private::ListItem::from($item)),*])
    };
}

/// Spy writer recording both the bare commands and the paired entries
///
/// Mutates `state` when one is attached, like the recording writer.
#[derive(Debug)]
pub struct SpyWriter<S: 'static> {
    pub state: Option<S>,
    pub commands: Vec<CommandRef<S>>,
    pub entries: CaptureList<S>,
}

impl<S: 'static> SpyWriter<S> {
    pub fn new(state: S) -> Self {
        Self {
            state: Some(state),
            commands: Vec::new(),
            entries: CaptureList::new(),
        }
    }

    pub fn without_state() -> Self {
        Self {
            state: None,
            commands: Vec::new(),
            entries: CaptureList::new(),
        }
    }
}

impl<S: 'static> Writer<S> for SpyWriter<S> {
    fn state(&self) -> Option<&S> {
        self.state.as_ref()
    }

    fn write(&mut self, id: CmdId, command: CommandRef<S>) -> Result<(), ApplyError> {
        if let Some(state) = self.state.as_mut() {
            command.mutate(id, state, None)?;
        }
        self.commands.push(command.clone());
        self.entries.push(CaptureEntry::new(id, command));
        Ok(())
    }
}

#[doc(hidden)]
pub mod __private {
    pub use cmdtrace_core::ListItem;
}

static TRACING: Once = Once::new();

/// Install a test tracing subscriber once per process
///
/// Honors `RUST_LOG`; defaults to `cmdtrace_core=debug`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cmdtrace_core=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
