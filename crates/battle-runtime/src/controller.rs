//! Battle controller: one encounter from setup to teardown.
//!
//! Owns the roster, scheduler, menus, and message board for a single battle.
//! Nothing is pooled across battles; each encounter constructs a fresh
//! controller and drops it on exit, which also aborts any pending timers.

use battle_core::{
    BattleEvent, BattleMenus, BattleOutcome, MenuCommand, MenuSignal, MessageBoard, PcgRng,
    Phase, Roster, Side, TurnEvent, TurnScheduler, UnitTemplate,
};
use tokio::sync::{broadcast, mpsc};

use crate::command::Command;
use crate::config::RuntimeConfig;
use crate::error::RuntimeError;
use crate::timer::DelayHandle;

/// Combat messages retained for scrollback per encounter.
const MESSAGE_HISTORY: usize = 32;

/// Orchestrates one encounter over the battle core.
pub struct BattleController {
    roster: Roster,
    scheduler: TurnScheduler,
    menus: BattleMenus,
    board: MessageBoard,
    rng: PcgRng,
    config: RuntimeConfig,
    events: broadcast::Sender<BattleEvent>,
    commands: mpsc::Sender<Command>,
    turn_timer: Option<DelayHandle>,
    hide_timer: Option<DelayHandle>,
    exit_timer: Option<DelayHandle>,
}

impl BattleController {
    /// Builds the encounter with the scheduler at its before-start sentinel.
    ///
    /// `commands` is the app loop's channel; every delayed continuation
    /// (next turn, message hide, battle exit) is delivered through it.
    /// Subscribe first, then call [`BattleController::advance`] once to kick
    /// off the first turn, so no event is emitted before listeners attach.
    pub fn start(
        players: &[UnitTemplate],
        enemies: &[UnitTemplate],
        seed: u64,
        config: RuntimeConfig,
        commands: mpsc::Sender<Command>,
    ) -> Result<Self, RuntimeError> {
        let roster = Roster::build(players, enemies)?;
        let menus = BattleMenus::from_roster(&roster);
        let (events, _) = broadcast::channel(config.event_capacity);

        let controller = Self {
            roster,
            scheduler: TurnScheduler::new(seed),
            menus,
            board: MessageBoard::new(MESSAGE_HISTORY),
            rng: PcgRng,
            config,
            events,
            commands,
            turn_timer: None,
            hide_timer: None,
            exit_timer: None,
        };

        tracing::debug!(seed, "battle started");
        Ok(controller)
    }

    /// Subscribe to battle events. Call before driving the encounter.
    pub fn subscribe(&self) -> broadcast::Receiver<BattleEvent> {
        self.events.subscribe()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn menus(&self) -> &BattleMenus {
        &self.menus
    }

    pub fn board(&self) -> &MessageBoard {
        &self.board
    }

    pub fn is_over(&self) -> bool {
        matches!(self.scheduler.phase(), Phase::BattleOver(_))
    }

    /// Steps the turn scheduler. Called once at start and then from
    /// `Command::Advance` after each post-action delay.
    pub fn advance(&mut self) -> Result<(), RuntimeError> {
        if self.is_over() {
            tracing::warn!("advance after battle end ignored");
            return Ok(());
        }

        match self.scheduler.advance(&mut self.roster, &self.rng)? {
            TurnEvent::PlayerTurn { actor } => {
                // Players lead the turn order, so the turn-order index is
                // also the player-side index.
                self.menus.refresh(&self.roster);
                self.menus.begin_player_turn(actor);
                self.emit(BattleEvent::PlayerTurn { actor });
            }
            TurnEvent::EnemyActed(report) => {
                self.after_attack(report);
                self.schedule_advance();
            }
            TurnEvent::BattleOver(outcome) => self.finish(outcome),
        }
        Ok(())
    }

    /// Routes a key-derived menu command through the focus router.
    ///
    /// Input while no menu holds focus is ignored, matching permissive UI
    /// handling. A confirmed target resolves the suspended player turn.
    pub fn handle_menu_command(&mut self, command: MenuCommand) -> Result<(), RuntimeError> {
        match self.menus.handle_command(command) {
            Some(MenuSignal::TargetingStarted) => {
                self.emit(BattleEvent::TargetingStarted);
                Ok(())
            }
            Some(MenuSignal::TargetChosen { enemy_index }) => {
                self.emit(BattleEvent::EnemyChosen { enemy_index });
                self.resolve_player_action(enemy_index)
            }
            None => Ok(()),
        }
    }

    /// Hides the message banner if `generation` is still current; stale
    /// generations (from a replaced timer that fired anyway) are ignored.
    pub fn hide_message(&mut self, generation: u64) {
        self.board.hide(generation);
    }

    fn resolve_player_action(&mut self, enemy_index: usize) -> Result<(), RuntimeError> {
        match self.scheduler.resolve_player_action(&mut self.roster, enemy_index) {
            Ok(report) => {
                self.after_attack(report);
                self.schedule_advance();
                Ok(())
            }
            Err(err) => {
                // The menu layer only emits enabled indices, so this is a
                // defensive path; the roster was not touched.
                tracing::warn!(enemy_index, %err, "rejected player action");
                Err(err.into())
            }
        }
    }

    fn after_attack(&mut self, report: battle_core::AttackReport) {
        self.show_message(report.message());

        if report.target_defeated {
            let (side, index) = if report.target_index < self.roster.player_count() {
                (Side::Player, report.target_index)
            } else {
                let enemy_index = report.target_index - self.roster.player_count();
                self.menus.mark_enemy_defeated(enemy_index);
                (Side::Enemy, enemy_index)
            };
            self.emit(BattleEvent::UnitDefeated { side, index });
        }
    }

    fn finish(&mut self, outcome: BattleOutcome) {
        // Nothing scheduled may fire into the finished battle.
        self.turn_timer = None;

        self.menus.clear_focus();
        self.show_message(match outcome {
            BattleOutcome::Victory => "Victory!",
            BattleOutcome::Defeat => "Defeat...",
        });
        self.emit(BattleEvent::BattleOver(outcome));

        self.exit_timer = Some(DelayHandle::schedule(
            self.config.battle_exit_delay(),
            self.commands.clone(),
            Command::ExitBattle,
        ));
        tracing::debug!(?outcome, "battle finished");
    }

    fn schedule_advance(&mut self) {
        self.turn_timer = Some(DelayHandle::schedule(
            self.config.turn_delay(),
            self.commands.clone(),
            Command::Advance,
        ));
    }

    fn show_message(&mut self, text: impl Into<String>) {
        let text = text.into();
        let generation = self.board.show(text.clone());
        self.emit(BattleEvent::Message(text));

        // Replace any pending hide so it cannot blank this newer message.
        self.hide_timer = Some(DelayHandle::schedule(
            self.config.message_hide_delay(),
            self.commands.clone(),
            Command::HideMessage { generation },
        ));
    }

    fn emit(&self, event: BattleEvent) {
        if tracing::enabled!(tracing::Level::TRACE)
            && let Ok(json) = serde_json::to_string(&event)
        {
            tracing::trace!(event = %json, "battle event");
        }
        // Best effort: no subscribers is normal during teardown.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn templates() -> (Vec<UnitTemplate>, Vec<UnitTemplate>) {
        (
            vec![
                UnitTemplate::player("Nica", 100, 20),
                UnitTemplate::player("Coder", 80, 8),
            ],
            vec![UnitTemplate::enemy("Dragon", 50, 3)],
        )
    }

    fn start() -> (BattleController, broadcast::Receiver<BattleEvent>, mpsc::Receiver<Command>) {
        let (players, enemies) = templates();
        let (tx, rx) = mpsc::channel(32);
        let mut controller =
            BattleController::start(&players, &enemies, 7, RuntimeConfig::default(), tx)
                .expect("battle starts");
        let events = controller.subscribe();
        controller.advance().expect("kickoff");
        (controller, events, rx)
    }

    #[tokio::test]
    async fn start_rejects_empty_rosters() {
        let (players, _) = templates();
        let (tx, _rx) = mpsc::channel(32);
        assert!(
            BattleController::start(&players, &[], 7, RuntimeConfig::default(), tx).is_err()
        );
    }

    #[tokio::test]
    async fn start_grants_the_first_player_turn() {
        let (controller, _events, _rx) = start();
        assert_eq!(controller.scheduler.pending_actor(), Some(0));
        assert_eq!(
            controller.menus().focus(),
            Some(battle_core::MenuFocus::Actions)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn confirm_flow_attacks_and_schedules_the_next_turn() {
        let (mut controller, mut events, mut rx) = start();
        // Drain the initial PlayerTurn event.
        assert!(matches!(
            events.recv().await,
            Ok(BattleEvent::PlayerTurn { actor: 0 })
        ));

        controller.handle_menu_command(MenuCommand::Confirm).unwrap();
        assert!(matches!(events.recv().await, Ok(BattleEvent::TargetingStarted)));

        controller.handle_menu_command(MenuCommand::Confirm).unwrap();
        assert!(matches!(
            events.recv().await,
            Ok(BattleEvent::EnemyChosen { enemy_index: 0 })
        ));
        let Ok(BattleEvent::Message(text)) = events.recv().await else {
            panic!("expected combat message");
        };
        assert_eq!(text, "Nica attacks Dragon for 20 damage");
        assert_eq!(controller.roster().enemies()[0].hp.current(), 30);
        assert_eq!(controller.board().banner(), Some(text.as_str()));

        // Let both delay tasks register their sleeps before time moves.
        tokio::task::yield_now().await;

        // The post-action delay elapses and the hide fires first.
        tokio::time::advance(Duration::from_millis(2001)).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.recv().await, Some(Command::HideMessage { generation: 1 }));

        tokio::time::advance(Duration::from_millis(1000)).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.recv().await, Some(Command::Advance));
    }

    #[tokio::test(start_paused = true)]
    async fn battle_runs_to_victory_and_schedules_exit() {
        let (mut controller, _events, mut rx) = start();

        while !controller.is_over() {
            if controller.scheduler.pending_actor().is_some() {
                controller.handle_menu_command(MenuCommand::Confirm).unwrap();
                controller.handle_menu_command(MenuCommand::Confirm).unwrap();
            } else {
                controller.advance().unwrap();
            }
        }

        assert!(controller.roster().is_victory());
        assert_eq!(controller.board().banner(), Some("Victory!"));

        // Only the exit command may still be pending once hides are drained.
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(10_000)).await;
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        let mut saw_exit = false;
        while let Ok(command) = rx.try_recv() {
            assert!(!matches!(command, Command::Advance));
            saw_exit |= command == Command::ExitBattle;
        }
        assert!(saw_exit);
    }

    #[tokio::test]
    async fn defeated_enemy_is_disabled_in_the_target_menu() {
        let (players, _) = templates();
        let enemies = vec![
            UnitTemplate::enemy("Dragon1", 20, 3),
            UnitTemplate::enemy("Dragon2", 50, 3),
        ];
        let (tx, _rx) = mpsc::channel(32);
        let mut controller =
            BattleController::start(&players, &enemies, 7, RuntimeConfig::default(), tx).unwrap();
        let mut events = controller.subscribe();
        controller.advance().unwrap();

        // Nica (20 damage) one-shots Dragon1.
        controller.handle_menu_command(MenuCommand::Confirm).unwrap();
        controller.handle_menu_command(MenuCommand::Confirm).unwrap();

        let mut saw_defeat = false;
        while let Ok(event) = events.try_recv() {
            saw_defeat |= event
                == BattleEvent::UnitDefeated {
                    side: Side::Enemy,
                    index: 0,
                };
        }
        assert!(saw_defeat);
        assert!(!controller.menus().targets().items()[0].enabled);
        assert!(controller.menus().targets().items()[1].enabled);
    }

    #[tokio::test]
    async fn stale_hide_generation_keeps_the_newer_banner() {
        let (mut controller, _events, _rx) = start();
        controller.handle_menu_command(MenuCommand::Confirm).unwrap();
        controller.handle_menu_command(MenuCommand::Confirm).unwrap();

        controller.hide_message(0);
        assert!(controller.board().banner().is_some());
        controller.hide_message(1);
        assert_eq!(controller.board().banner(), None);
    }
}
