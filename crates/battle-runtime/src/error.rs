//! Runtime error types.

use battle_core::{RosterError, SchedulerError};

/// Errors surfaced by the encounter runtime.
///
/// All are local to the failed operation; the enclosing scene layer decides
/// whether to abort the encounter.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}
