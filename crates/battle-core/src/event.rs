//! Battle events emitted toward the UI layer.
//!
//! A closed, enumerated signal set rather than an open publish/subscribe
//! namespace: these six variants are the whole surface the battle core
//! exposes to the scene layer.

use crate::combatant::Side;
use crate::roster::BattleOutcome;

/// High-level occurrences during one encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    /// A player unit's turn began; the menu layer owns input until the
    /// choice resolves. Carries the turn-order index of the actor.
    PlayerTurn { actor: usize },
    /// The action menu confirmed "Attack"; target selection is open.
    TargetingStarted,
    /// The target menu confirmed an enemy choice.
    EnemyChosen { enemy_index: usize },
    /// A combat line for the message banner.
    Message(String),
    /// A unit's hp reached zero.
    UnitDefeated { side: Side, index: usize },
    /// The encounter resolved.
    BattleOver(BattleOutcome),
}
