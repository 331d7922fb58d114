//! Replay captured lists
//!
//! Rebuilds state from a [`CaptureList`] by re-applying each entry, in list
//! order, under its recorded identifier.

use crate::error::{ApplyError, ReplayError};
use crate::list::CaptureList;
use crate::writer::Writer;
use std::sync::Arc;

/// Apply every entry of `list` to `state`
///
/// Stops at the first failing entry. Entries before it stay applied; there
/// is no undo.
///
/// # Errors
/// Returns [`ReplayError`] naming the failing entry
pub fn replay<S: 'static>(list: &CaptureList<S>, state: &mut S) -> Result<usize, ReplayError> {
    for (index, entry) in list.iter().enumerate() {
        entry
            .command()
            .mutate(entry.id(), state, None)
            .map_err(|source| ReplayError {
                index,
                id: entry.id(),
                source,
            })?;
    }

    tracing::debug!(applied = list.len(), "replay complete");
    Ok(list.len())
}

/// Feed every entry of `list` through `writer`
///
/// Seeds a writer (and its state, if attached) from a prepared list, e.g. one
/// built with [`ListBuilder`](crate::ListBuilder).
///
/// # Errors
/// Returns [`ReplayError`] for the first entry the writer rejects
pub fn replay_into<S, W>(list: &CaptureList<S>, writer: &mut W) -> Result<usize, ReplayError>
where
    S: 'static,
    W: Writer<S> + ?Sized,
{
    for (index, entry) in list.iter().enumerate() {
        writer
            .write(entry.id(), Arc::clone(entry.command_ref()))
            .map_err(|source: ApplyError| ReplayError {
                index,
                id: entry.id(),
                source,
            })?;
    }

    tracing::debug!(written = list.len(), "list replayed into writer");
    Ok(list.len())
}
