//! Attack resolution.
//!
//! Pure functions over combatant state; no timers, no events. The roster
//! hands out disjoint borrows of attacker and target so an attack can be
//! resolved in place.

use crate::combatant::Combatant;

/// Everything the caller needs to know about one resolved attack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub attacker: String,
    pub target: String,
    /// Turn-order index of the target, so listeners can map a defeat back
    /// to its roster slot.
    pub target_index: usize,
    pub amount: u32,
    pub target_hp_after: u32,
    pub target_defeated: bool,
}

impl AttackReport {
    /// Human-readable combat line shown in the message banner.
    pub fn message(&self) -> String {
        format!(
            "{} attacks {} for {} damage",
            self.attacker, self.target, self.amount
        )
    }
}

/// Resolves one attack, applying the attacker's damage to the target.
///
/// Returns `None` when the target is already dead: the attack is a silent
/// no-op, producing neither damage nor a combat message.
pub fn resolve_attack(
    attacker: &Combatant,
    target: &mut Combatant,
    target_index: usize,
) -> Option<AttackReport> {
    if !target.is_alive() {
        return None;
    }

    let outcome = target.apply_damage(attacker.damage);
    Some(AttackReport {
        attacker: attacker.name.clone(),
        target: target.name.clone(),
        target_index,
        amount: attacker.damage,
        target_hp_after: outcome.hp_after,
        target_defeated: outcome.defeated,
    })
}
