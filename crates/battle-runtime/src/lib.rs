//! Encounter orchestration over `battle-core`.
//!
//! The runtime owns one [`BattleController`] per encounter, wires battle
//! events onto a broadcast channel for the UI, and turns the core's suspend
//! points into cancellable tokio timers delivering [`Command`]s back into
//! the app's event loop.
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod timer;

pub use command::Command;
pub use config::RuntimeConfig;
pub use controller::BattleController;
pub use error::RuntimeError;
pub use timer::DelayHandle;

pub type Result<T> = std::result::Result<T, RuntimeError>;
