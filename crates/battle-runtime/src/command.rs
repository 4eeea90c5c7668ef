//! Commands delivered into the app event loop by delayed callbacks.

/// Deferred work scheduled by the controller's timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// The post-action delay elapsed; step the turn scheduler.
    Advance,
    /// Auto-hide the message banner, if this generation is still current.
    HideMessage { generation: u64 },
    /// The battle-over display delay elapsed; return to the overworld.
    ExitBattle,
}
