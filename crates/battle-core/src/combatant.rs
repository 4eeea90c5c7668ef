//! Combatant state: side tags, hp meters, and damage application.

use strum::Display;

/// Allegiance of a combatant within an encounter.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

/// Integer resource meter (hp) tracked per combatant.
///
/// `current` never exceeds `maximum` and never goes below zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: u32,
    maximum: u32,
}

impl ResourceMeter {
    /// Creates a full meter.
    pub fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Reduces the meter, saturating at zero. Returns the new value.
    pub fn damage(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_sub(amount);
        self.current
    }
}

/// Blueprint for one combatant, consumed when a roster is built.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitTemplate {
    pub side: Side,
    pub name: String,
    pub max_hp: u32,
    pub damage: u32,
}

impl UnitTemplate {
    pub fn player(name: impl Into<String>, max_hp: u32, damage: u32) -> Self {
        Self {
            side: Side::Player,
            name: name.into(),
            max_hp,
            damage,
        }
    }

    pub fn enemy(name: impl Into<String>, max_hp: u32, damage: u32) -> Self {
        Self {
            side: Side::Enemy,
            name: name.into(),
            max_hp,
            damage,
        }
    }
}

/// Result of applying damage to a combatant's hp meter.
///
/// `defeated` is true only on the transition to zero hp; hitting an already
/// dead combatant reports no further defeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageOutcome {
    pub hp_before: u32,
    pub hp_after: u32,
    pub defeated: bool,
}

/// One fighting unit. Owned by the [`crate::Roster`] for the lifetime of a
/// single encounter; mutated only through [`Combatant::apply_damage`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub side: Side,
    pub name: String,
    pub hp: ResourceMeter,
    pub damage: u32,
}

impl Combatant {
    pub fn from_template(template: &UnitTemplate) -> Self {
        Self {
            side: template.side,
            name: template.name.clone(),
            hp: ResourceMeter::full(template.max_hp),
            damage: template.damage,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.hp.is_depleted()
    }

    /// Applies damage, clamped to `[0, max_hp]`.
    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        let hp_before = self.hp.current();
        let hp_after = self.hp.damage(amount);
        DamageOutcome {
            hp_before,
            hp_after,
            defeated: hp_before > 0 && hp_after == 0,
        }
    }
}
