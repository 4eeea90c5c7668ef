//! Runtime configuration shared by the controller and its timers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delays and channel capacities for one encounter.
///
/// Defaults mirror the reference pacing: three seconds between turns, two
/// seconds of message display, two seconds on the result screen.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Delay between a resolved action and the next turn, in milliseconds.
    pub turn_delay_ms: u64,
    /// How long a combat message stays on screen, in milliseconds.
    pub message_hide_delay_ms: u64,
    /// How long the victory/defeat banner stays before leaving the battle.
    pub battle_exit_delay_ms: u64,
    /// Broadcast buffer for battle events.
    pub event_capacity: usize,
    /// Mpsc buffer for timer commands.
    pub command_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            turn_delay_ms: 3000,
            message_hide_delay_ms: 2000,
            battle_exit_delay_ms: 2000,
            event_capacity: 64,
            command_capacity: 32,
        }
    }
}

impl RuntimeConfig {
    pub fn turn_delay(&self) -> Duration {
        Duration::from_millis(self.turn_delay_ms)
    }

    pub fn message_hide_delay(&self) -> Duration {
        Duration::from_millis(self.message_hide_delay_ms)
    }

    pub fn battle_exit_delay(&self) -> Duration {
        Duration::from_millis(self.battle_exit_delay_ms)
    }
}
