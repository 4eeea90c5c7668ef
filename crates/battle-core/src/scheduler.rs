//! Round-robin turn scheduler.
//!
//! The scheduler walks the roster's fixed turn order circularly, skipping
//! dead units. Landing on a player suspends the machine until
//! [`TurnScheduler::resolve_player_action`] arrives from the menu layer;
//! landing on an enemy resolves its attack immediately. The caller owns the
//! post-action delay and calls [`TurnScheduler::advance`] again when it
//! elapses.

use crate::combat::AttackReport;
use crate::rng::RngOracle;
use crate::roster::{BattleOutcome, Roster, RosterError};

/// Errors raised by scheduler transitions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    /// `resolve_player_action` arrived while no player choice was pending.
    #[error("no player choice is pending")]
    NotAwaitingInput,

    /// The chosen enemy index is out of range or already dead.
    #[error("invalid target: enemy {index}")]
    InvalidTarget { index: usize },

    /// `advance` was called after the encounter already resolved.
    #[error("battle is already over")]
    BattleAlreadyOver,

    /// The cursor walked a full cycle without finding a living unit. Cannot
    /// happen while battle-over is checked first.
    #[error("no living units in turn order")]
    NoLivingUnits,

    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// Scheduler phase. `AwaitingPlayerChoice` is the single suspend point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingPlayerChoice { actor: usize },
    ResolvingEnemyAction,
    BattleOver(BattleOutcome),
}

/// What one scheduler step produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnEvent {
    /// A player unit is up; the scheduler is suspended until the menu layer
    /// resolves the choice. Carries the turn-order index of the actor.
    PlayerTurn { actor: usize },
    /// An enemy acted against a uniformly chosen living player.
    EnemyActed(AttackReport),
    /// The encounter resolved; no actor was picked.
    BattleOver(BattleOutcome),
}

/// Cyclic turn state machine over one roster.
///
/// Built fresh per encounter and discarded at battle end. Deterministic
/// given `(roster, seed)`: each enemy target roll derives its seed from the
/// battle seed and a per-roll nonce.
#[derive(Clone, Debug)]
pub struct TurnScheduler {
    /// Turn-order cursor; `None` is the before-start sentinel.
    cursor: Option<usize>,
    phase: Phase,
    seed: u64,
    roll_nonce: u64,
}

impl TurnScheduler {
    pub fn new(seed: u64) -> Self {
        Self {
            cursor: None,
            phase: Phase::Idle,
            seed,
            roll_nonce: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Turn-order index of the acting unit, if a choice is pending.
    pub fn pending_actor(&self) -> Option<usize> {
        match self.phase {
            Phase::AwaitingPlayerChoice { actor } => Some(actor),
            _ => None,
        }
    }

    fn next_roll_seed(&mut self) -> u64 {
        let nonce = self.roll_nonce;
        self.roll_nonce += 1;
        self.seed.wrapping_add(nonce)
    }

    /// Moves the cursor to the next living unit and dispatches its turn.
    ///
    /// Checks for battle end before granting any turn, so a degenerate
    /// roster that starts with one side dead resolves on the first call
    /// without anyone acting.
    pub fn advance(
        &mut self,
        roster: &mut Roster,
        rng: &impl RngOracle,
    ) -> Result<TurnEvent, SchedulerError> {
        if matches!(self.phase, Phase::BattleOver(_)) {
            return Err(SchedulerError::BattleAlreadyOver);
        }

        if let Some(outcome) = roster.outcome() {
            self.phase = Phase::BattleOver(outcome);
            return Ok(TurnEvent::BattleOver(outcome));
        }

        let len = roster.len();
        let mut index = self.cursor.map_or(0, |c| (c + 1) % len);
        let mut found = false;
        for _ in 0..len {
            if roster.unit(index).is_some_and(|u| u.is_alive()) {
                found = true;
                break;
            }
            index = (index + 1) % len;
        }
        if !found {
            return Err(SchedulerError::NoLivingUnits);
        }
        self.cursor = Some(index);

        if index < roster.player_count() {
            self.phase = Phase::AwaitingPlayerChoice { actor: index };
            return Ok(TurnEvent::PlayerTurn { actor: index });
        }

        self.phase = Phase::ResolvingEnemyAction;
        let seed = self.next_roll_seed();
        let target = roster.random_living_player(rng, seed)?;
        let report = roster
            .attack(index, target)
            .ok_or(RosterError::NoLivingTargets)?;
        self.phase = Phase::Idle;
        Ok(TurnEvent::EnemyActed(report))
    }

    /// Resolves the suspended player turn against the chosen enemy.
    ///
    /// Valid only in `AwaitingPlayerChoice`; any other phase is rejected
    /// with no state mutation, so a duplicate confirm can never act twice.
    /// A dead or out-of-range target is rejected the same way.
    pub fn resolve_player_action(
        &mut self,
        roster: &mut Roster,
        enemy_index: usize,
    ) -> Result<AttackReport, SchedulerError> {
        let Phase::AwaitingPlayerChoice { actor } = self.phase else {
            return Err(SchedulerError::NotAwaitingInput);
        };

        let alive = roster.enemy(enemy_index).is_some_and(|u| u.is_alive());
        if !alive {
            return Err(SchedulerError::InvalidTarget { index: enemy_index });
        }

        let target = roster.enemy_turn_index(enemy_index);
        let report = roster
            .attack(actor, target)
            .ok_or(SchedulerError::InvalidTarget { index: enemy_index })?;
        self.phase = Phase::Idle;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::UnitTemplate;
    use crate::rng::PcgRng;

    fn setup() -> (Roster, TurnScheduler) {
        let roster = Roster::build(
            &[
                UnitTemplate::player("Nica", 100, 20),
                UnitTemplate::player("Coder", 80, 8),
            ],
            &[UnitTemplate::enemy("Dragon", 50, 3)],
        )
        .expect("valid roster");
        (roster, TurnScheduler::new(0xABCD))
    }

    #[test]
    fn first_advance_grants_first_player_turn() {
        let (mut roster, mut scheduler) = setup();
        let event = scheduler.advance(&mut roster, &PcgRng).unwrap();
        assert_eq!(event, TurnEvent::PlayerTurn { actor: 0 });
        assert_eq!(scheduler.pending_actor(), Some(0));
    }

    #[test]
    fn round_robin_visits_every_living_unit() {
        let (mut roster, mut scheduler) = setup();
        let rng = PcgRng;
        let mut visited = Vec::new();

        for _ in 0..roster.len() {
            match scheduler.advance(&mut roster, &rng).unwrap() {
                TurnEvent::PlayerTurn { actor } => {
                    visited.push(actor);
                    scheduler.resolve_player_action(&mut roster, 0).unwrap();
                }
                TurnEvent::EnemyActed(report) => {
                    visited.push(2);
                    assert!(report.amount == 3);
                }
                TurnEvent::BattleOver(_) => break,
            }
        }
        assert_eq!(visited, vec![0, 1, 2]);
    }

    #[test]
    fn dead_units_are_skipped() {
        let (mut roster, mut scheduler) = setup();
        let rng = PcgRng;

        // Kill player 1 before the battle loop reaches them.
        while roster.unit(1).unwrap().is_alive() {
            let _ = roster.attack(2, 1);
        }

        assert_eq!(
            scheduler.advance(&mut roster, &rng).unwrap(),
            TurnEvent::PlayerTurn { actor: 0 }
        );
        scheduler.resolve_player_action(&mut roster, 0).unwrap();

        // Player 1 is dead, so the dragon acts next.
        assert!(matches!(
            scheduler.advance(&mut roster, &rng).unwrap(),
            TurnEvent::EnemyActed(_)
        ));
    }

    #[test]
    fn scripted_two_versus_one_ends_in_victory() {
        let (mut roster, mut scheduler) = setup();
        let rng = PcgRng;

        loop {
            match scheduler.advance(&mut roster, &rng).unwrap() {
                TurnEvent::PlayerTurn { .. } => {
                    scheduler.resolve_player_action(&mut roster, 0).unwrap();
                }
                TurnEvent::EnemyActed(report) => {
                    assert_eq!(report.amount, 3);
                }
                TurnEvent::BattleOver(outcome) => {
                    assert_eq!(outcome, BattleOutcome::Victory);
                    break;
                }
            }
        }
        assert!(roster.is_victory());
        assert_eq!(
            scheduler.phase(),
            Phase::BattleOver(BattleOutcome::Victory)
        );
    }

    #[test]
    fn degenerate_roster_resolves_on_first_advance() {
        let mut roster = Roster::build(
            &[UnitTemplate::player("Nica", 100, 20)],
            &[UnitTemplate::enemy("Dragon", 10, 3)],
        )
        .unwrap();
        while roster.unit(1).unwrap().is_alive() {
            let _ = roster.attack(0, 1);
        }

        let mut scheduler = TurnScheduler::new(1);
        assert_eq!(
            scheduler.advance(&mut roster, &PcgRng).unwrap(),
            TurnEvent::BattleOver(BattleOutcome::Victory)
        );
        assert!(scheduler.advance(&mut roster, &PcgRng).is_err());
    }

    #[test]
    fn resolve_outside_player_turn_mutates_nothing() {
        let (mut roster, mut scheduler) = setup();
        let before = roster.clone();

        assert_eq!(
            scheduler.resolve_player_action(&mut roster, 0),
            Err(SchedulerError::NotAwaitingInput)
        );
        assert_eq!(roster.enemies()[0].hp, before.enemies()[0].hp);
        assert_eq!(scheduler.phase(), Phase::Idle);
    }

    #[test]
    fn resolve_rejects_dead_or_out_of_range_targets() {
        let (mut roster, mut scheduler) = setup();
        scheduler.advance(&mut roster, &PcgRng).unwrap();

        assert_eq!(
            scheduler.resolve_player_action(&mut roster, 5),
            Err(SchedulerError::InvalidTarget { index: 5 })
        );
        // Still awaiting input after the rejection.
        assert_eq!(scheduler.pending_actor(), Some(0));

        let report = scheduler.resolve_player_action(&mut roster, 0).unwrap();
        assert_eq!(report.target_hp_after, 30);
    }

    #[test]
    fn duplicate_confirm_never_acts_twice() {
        let (mut roster, mut scheduler) = setup();
        scheduler.advance(&mut roster, &PcgRng).unwrap();
        scheduler.resolve_player_action(&mut roster, 0).unwrap();

        assert_eq!(
            scheduler.resolve_player_action(&mut roster, 0),
            Err(SchedulerError::NotAwaitingInput)
        );
        assert_eq!(roster.enemies()[0].hp.current(), 30);
    }

    #[test]
    fn battle_is_deterministic_for_a_fixed_seed() {
        let run = |seed: u64| -> Vec<String> {
            let (mut roster, mut scheduler) = {
                let roster = Roster::build(
                    &[
                        UnitTemplate::player("Nica", 100, 20),
                        UnitTemplate::player("Coder", 80, 8),
                    ],
                    &[
                        UnitTemplate::enemy("Dragon1", 50, 3),
                        UnitTemplate::enemy("Dragon2", 50, 3),
                    ],
                )
                .unwrap();
                (roster, TurnScheduler::new(seed))
            };
            let rng = PcgRng;
            let mut log = Vec::new();
            loop {
                match scheduler.advance(&mut roster, &rng).unwrap() {
                    TurnEvent::PlayerTurn { actor } => {
                        // Always strike the first living enemy.
                        let target = roster
                            .enemies()
                            .iter()
                            .position(|e| e.is_alive())
                            .unwrap();
                        let report = scheduler
                            .resolve_player_action(&mut roster, target)
                            .unwrap();
                        log.push(format!("p{actor}:{}", report.message()));
                    }
                    TurnEvent::EnemyActed(report) => log.push(report.message()),
                    TurnEvent::BattleOver(outcome) => {
                        log.push(format!("{outcome:?}"));
                        break;
                    }
                }
            }
            log
        };

        assert_eq!(run(99), run(99));
    }
}
