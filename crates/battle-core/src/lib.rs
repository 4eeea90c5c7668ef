//! Deterministic battle logic shared across the runtime and clients.
//!
//! `battle-core` defines the canonical encounter rules: combatants and their
//! hp meters, the fixed round-robin turn order, the suspend-and-resume turn
//! scheduler, and the single-focus selection menus that route player input.
//! Everything here is pure and synchronous; timers, channels, and rendering
//! live in the `battle-runtime` and `battle-client` crates.
pub mod combat;
pub mod combatant;
pub mod event;
pub mod menu;
pub mod message;
pub mod rng;
pub mod roster;
pub mod scheduler;

pub use combat::{AttackReport, resolve_attack};
pub use combatant::{Combatant, DamageOutcome, ResourceMeter, Side, UnitTemplate};
pub use event::BattleEvent;
pub use menu::{BattleMenus, MenuCommand, MenuFocus, MenuItem, MenuSignal, MenuState};
pub use message::MessageBoard;
pub use rng::{PcgRng, RngOracle};
pub use roster::{BattleOutcome, Roster, RosterError};
pub use scheduler::{Phase, SchedulerError, TurnEvent, TurnScheduler};
