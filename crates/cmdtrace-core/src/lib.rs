//! cmdtrace core: command capture pipeline
//!
//! Applies API commands to a state model in call order and records each one,
//! paired with its caller-supplied identifier, for later replay, diffing or
//! inspection.
//!
//! # Core Concepts
//!
//! - [`Command`]: A unit of work applied to a state `S`
//! - [`CmdId`]: Caller-assigned identifier of one applied command
//! - [`CaptureEntry`]: Immutable (identifier, command) pair
//! - [`CaptureList`]: Append-only list of entries in capture order
//! - [`Writer`]: Applies and records commands; [`StateWriter`] is the recorder
//! - [`ListBuilder`]: Normalizes mixed inputs into an expected [`CaptureList`]
//!
//! # Example
//!
//! ```rust,ignore
//! use cmdtrace_core::{CmdId, ListBuilder, StateWriter, Writer};
//!
//! let mut state = GlState::default();
//! let mut writer = StateWriter::new(&mut state);
//! writer.write_command(CmdId(5), BindBuffer::new(5, 1))?;
//! writer.write_command(CmdId(3), DrawArrays::new(3, 6))?;
//!
//! let expected = ListBuilder::new()
//!     .command(BindBuffer::new(5, 1))
//!     .command(DrawArrays::new(3, 6))
//!     .build()?;
//! assert_eq!(writer.captured(), &expected);
//! ```

#![warn(unreachable_pub)]

// Core modules
mod builder;
mod command;
mod config;
mod diff;
mod entry;
mod error;
mod id;
mod list;
mod replay;
mod writer;

// Re-exports
pub use builder::{build_list, ListBuilder, ListItem};
pub use command::{AuxContext, Command, CommandEq, CommandRef};
pub use config::{CaptureConfig, DEFAULT_SESSION, MAX_INITIAL_CAPACITY};
pub use diff::{diff, Divergence, DivergenceKind};
pub use entry::CaptureEntry;
pub use error::{ApplyError, ConfigError, ListError, ReplayError};
pub use id::CmdId;
pub use list::CaptureList;
pub use replay::{replay, replay_into};
pub use writer::{StateWriter, Writer};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving and checking a capture
    pub use crate::{
        ApplyError, AuxContext, CaptureEntry, CaptureList, CmdId, Command, CommandRef,
        ListBuilder, ListItem, StateWriter, Writer,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Stack {
        values: Vec<(CmdId, u32)>,
    }

    #[derive(Debug, PartialEq)]
    struct PushValue {
        id: CmdId,
        value: u32,
    }

    impl Command<Stack> for PushValue {
        fn mutate(
            &self,
            id: CmdId,
            state: &mut Stack,
            _aux: Option<&mut AuxContext>,
        ) -> Result<(), ApplyError> {
            state.values.push((id, self.value));
            Ok(())
        }

        fn intrinsic_id(&self) -> Option<CmdId> {
            Some(self.id)
        }
    }

    fn push(id: u64, value: u32) -> PushValue {
        PushValue {
            id: CmdId(id),
            value,
        }
    }

    #[test]
    fn writer_output_matches_built_list() {
        let mut stack = Stack::default();
        let mut writer = StateWriter::new(&mut stack);
        writer.write_command(CmdId(5), push(5, 10)).unwrap();
        writer.write_command(CmdId(3), push(3, 20)).unwrap();
        let captured = writer.into_list();

        let expected = ListBuilder::<Stack>::new()
            .command(push(5, 10))
            .command(push(3, 20))
            .build()
            .unwrap();

        assert_eq!(diff(&expected, &captured), None);
        assert_eq!(captured, expected);
        assert_eq!(stack.values, vec![(CmdId(5), 10), (CmdId(3), 20)]);
    }

    #[test]
    fn replayed_capture_rebuilds_state() {
        let mut writer = StateWriter::owned(Stack::default());
        writer.write_command(CmdId(2), push(2, 1)).unwrap();
        writer.write_command(CmdId(1), push(1, 2)).unwrap();
        let (original, captured) = writer.into_parts();

        let mut rebuilt = Stack::default();
        assert_eq!(replay(&captured, &mut rebuilt).unwrap(), 2);
        assert_eq!(original.map(|s| s.values), Some(rebuilt.values));
    }
}
