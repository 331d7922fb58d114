//! Command contract
//!
//! A [`Command`] is one unit of work against a state `S`. Concrete variants
//! are defined by whoever owns the API surface being traced; the pipeline only
//! ever sees them as [`CommandRef`] trait objects.

use crate::error::ApplyError;
use crate::id::CmdId;
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// Optional auxiliary context handed to [`Command::mutate`]
///
/// Writers in this crate always pass `None`.
pub type AuxContext = dyn Any + Send;

/// Shared, type-erased command
pub type CommandRef<S> = Arc<dyn Command<S>>;

/// A unit of work that applies an effect to a state `S`
///
/// # Contract
/// - `mutate` must either fully apply its effect or return an error without
///   touching `state`
/// - Variants carrying their own identifier return it from `intrinsic_id`;
///   list fixtures rely on it to pair the command with an id
///
/// Every implementor must also be `PartialEq` so captured lists can be compared
/// (see [`CommandEq`]).
///
/// Commands travel as [`CommandRef`], an `Arc<dyn Command<S> + 'static>`, so the
/// state type `S` must be `'static` as well. Every writer, list and builder in
/// this crate carries that `S: 'static` bound.
///
/// # Example
/// ```rust,ignore
/// #[derive(Debug, PartialEq)]
/// struct Push(u32);
///
/// impl Command<Vec<u32>> for Push {
///     fn mutate(&self, _id: CmdId, state: &mut Vec<u32>, _aux: Option<&mut AuxContext>)
///         -> Result<(), ApplyError>
///     {
///         state.push(self.0);
///         Ok(())
///     }
/// }
/// ```
pub trait Command<S>: CommandEq<S> + Debug + Send + Sync + 'static {
    /// Apply this command to `state` under identifier `id`
    ///
    /// # Errors
    /// Returns error if the command cannot be applied; `state` is then unchanged
    fn mutate(
        &self,
        id: CmdId,
        state: &mut S,
        aux: Option<&mut AuxContext>,
    ) -> Result<(), ApplyError>;

    /// Command name used in logs and divergence reports
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Identifier carried by the command itself, if any
    #[inline]
    fn intrinsic_id(&self) -> Option<CmdId> {
        None
    }
}

/// Equality across type-erased commands
///
/// Implemented automatically for every `Command<S> + PartialEq` type. Two
/// commands are equal only when they are the same concrete type and compare
/// equal as that type.
pub trait CommandEq<S> {
    /// Upcast for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Compare against another command
    fn eq_command(&self, other: &dyn Command<S>) -> bool;
}

impl<S, C> CommandEq<S> for C
where
    C: Command<S> + PartialEq,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_command(&self, other: &dyn Command<S>) -> bool {
        other
            .as_any()
            .downcast_ref::<C>()
            .is_some_and(|other| self == other)
    }
}
