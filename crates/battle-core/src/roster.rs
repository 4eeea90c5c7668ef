//! Combatant roster and the fixed turn order.
//!
//! The roster exclusively owns every combatant for the lifetime of one
//! encounter. Turn order is the concatenation of players then enemies,
//! frozen at build time: dead units stay in the sequence and are skipped by
//! the scheduler, never removed.

use crate::combat::{AttackReport, resolve_attack};
use crate::combatant::{Combatant, Side, UnitTemplate};
use crate::rng::RngOracle;

/// Errors raised by roster construction and target selection.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    /// Battle started with no units on one side. Fatal to that battle start.
    #[error("cannot start a battle with no {0} units")]
    EmptySide(Side),

    /// Random target selection found no living players. Unreachable while
    /// the scheduler checks for battle end first; an invariant violation.
    #[error("no living targets remain")]
    NoLivingTargets,
}

/// Terminal result of one encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Ordered collections of player- and enemy-side combatants.
///
/// Stored as one `Vec` with players first, so a turn-order index addresses
/// any unit directly; enemy indices are offset by `player_count`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    units: Vec<Combatant>,
    player_count: usize,
}

impl Roster {
    /// Instantiates combatants in template order, players then enemies.
    pub fn build(
        players: &[UnitTemplate],
        enemies: &[UnitTemplate],
    ) -> Result<Self, RosterError> {
        if players.is_empty() {
            return Err(RosterError::EmptySide(Side::Player));
        }
        if enemies.is_empty() {
            return Err(RosterError::EmptySide(Side::Enemy));
        }

        let units = players
            .iter()
            .chain(enemies.iter())
            .map(Combatant::from_template)
            .collect();

        Ok(Self {
            units,
            player_count: players.len(),
        })
    }

    /// Total number of turn-order slots, dead units included.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn unit(&self, index: usize) -> Option<&Combatant> {
        self.units.get(index)
    }

    /// Looks up an enemy by its enemy-side index.
    pub fn enemy(&self, enemy_index: usize) -> Option<&Combatant> {
        self.enemies().get(enemy_index)
    }

    pub fn players(&self) -> &[Combatant] {
        &self.units[..self.player_count]
    }

    pub fn enemies(&self) -> &[Combatant] {
        &self.units[self.player_count..]
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn enemy_count(&self) -> usize {
        self.units.len() - self.player_count
    }

    /// Maps an enemy-side index to its turn-order index.
    pub fn enemy_turn_index(&self, enemy_index: usize) -> usize {
        self.player_count + enemy_index
    }

    /// True iff every enemy is dead.
    pub fn is_victory(&self) -> bool {
        self.enemies().iter().all(|u| !u.is_alive())
    }

    /// True iff every player is dead.
    pub fn is_defeat(&self) -> bool {
        self.players().iter().all(|u| !u.is_alive())
    }

    /// Both ends are checked: the last action kills at most one side's last
    /// member, but defeat takes precedence if both somehow hold.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        if self.is_defeat() {
            Some(BattleOutcome::Defeat)
        } else if self.is_victory() {
            Some(BattleOutcome::Victory)
        } else {
            None
        }
    }

    pub fn is_battle_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Uniform pick among currently living players, by player-side index.
    pub fn random_living_player(
        &self,
        rng: &impl RngOracle,
        seed: u64,
    ) -> Result<usize, RosterError> {
        let living: Vec<usize> = self
            .players()
            .iter()
            .enumerate()
            .filter(|(_, u)| u.is_alive())
            .map(|(i, _)| i)
            .collect();

        if living.is_empty() {
            return Err(RosterError::NoLivingTargets);
        }
        Ok(living[rng.index(seed, living.len())])
    }

    /// Resolves an attack between two turn-order slots.
    ///
    /// Returns `None` if the target is already dead (silent no-op) or either
    /// index is out of range. Attacking oneself is not a thing this game
    /// supports and also returns `None`.
    pub fn attack(&mut self, attacker: usize, target: usize) -> Option<AttackReport> {
        if attacker == target || attacker >= self.units.len() || target >= self.units.len() {
            return None;
        }

        // Disjoint borrows of two slots in the same Vec.
        let (attacker_ref, target_ref) = if attacker < target {
            let (left, right) = self.units.split_at_mut(target);
            (&left[attacker], &mut right[0])
        } else {
            let (left, right) = self.units.split_at_mut(attacker);
            (&right[0], &mut left[target])
        };

        resolve_attack(attacker_ref, target_ref, target)
    }
}
