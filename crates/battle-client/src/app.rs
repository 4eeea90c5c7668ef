//! App event loop: overworld walking, encounters, and battle screens.
//!
//! One logical thread drives everything: keyboard polling on a frame tick,
//! delayed commands from the battle runtime's timers, and battle events for
//! the status line. An encounter constructs a fresh [`BattleController`];
//! leaving the battle drops it, which aborts any timer still pending.

use anyhow::Result;
use battle_core::{BattleEvent, UnitTemplate};
use battle_runtime::{BattleController, Command, RuntimeConfig};
use crossterm::event::{self, Event, KeyEventKind};
use rand::Rng;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{self, Duration};

use crate::input::{InputHandler, KeyAction};
use crate::terminal::Tui;
use crate::ui;
use crate::world::{StepOutcome, World};

const FRAME_INTERVAL_MS: u64 = 16;

/// One running battle screen.
pub struct BattleSession {
    pub controller: BattleController,
    pub events: broadcast::Receiver<BattleEvent>,
    /// Short prompt shown under the menus ("Choose a target", ...).
    pub hint: Option<&'static str>,
}

/// Which screen owns input and rendering.
pub enum AppMode {
    World,
    Battle(BattleSession),
}

pub struct App {
    pub mode: AppMode,
    pub world: World,
    input: InputHandler,
    config: RuntimeConfig,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            mode: AppMode::World,
            world: World::new(rand::thread_rng().r#gen()),
            input: InputHandler,
            config: RuntimeConfig::default(),
        }
    }

    /// The fixed party, as in the reference game.
    fn party() -> Vec<UnitTemplate> {
        vec![
            UnitTemplate::player("Nica", 100, 20),
            UnitTemplate::player("Coder", 80, 8),
        ]
    }

    /// Rolls the enemy group for a fresh encounter.
    fn encounter_group() -> Vec<UnitTemplate> {
        let mut rng = rand::thread_rng();
        let names = ["Blue Dragon", "Orange Dragon"];
        let count = rng.gen_range(1..=names.len());
        names[..count]
            .iter()
            .map(|name| UnitTemplate::enemy(*name, 50, 3))
            .collect()
    }

    pub async fn run(mut self, terminal: &mut Tui) -> Result<()> {
        let (tx_command, mut rx_command) =
            mpsc::channel::<Command>(self.config.command_capacity);

        self.render(terminal)?;
        loop {
            tokio::select! {
                Some(command) = rx_command.recv() => {
                    self.handle_command(command);
                }
                _ = time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)) => {
                    if self.handle_input_tick(&tx_command)? {
                        return Ok(());
                    }
                    self.drain_battle_events();
                }
            }
            self.render(terminal)?;
        }
    }

    /// Polls pending key presses without blocking the loop. Returns true on
    /// quit.
    fn handle_input_tick(&mut self, tx_command: &mpsc::Sender<Command>) -> Result<bool> {
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let action = match &self.mode {
                AppMode::World => self.input.handle_world_key(key),
                AppMode::Battle(_) => self.input.handle_battle_key(key),
            };
            match action {
                KeyAction::Quit => return Ok(true),
                KeyAction::Walk(direction) => {
                    if let AppMode::World = self.mode
                        && self.world.step(direction) == StepOutcome::Encounter
                    {
                        self.start_battle(tx_command.clone());
                    }
                }
                KeyAction::Menu(command) => {
                    if let AppMode::Battle(session) = &mut self.mode
                        && let Err(err) = session.controller.handle_menu_command(command)
                    {
                        // Defensive: the menus only emit enabled targets.
                        tracing::warn!(%err, "menu command rejected");
                    }
                }
                KeyAction::None => {}
            }
        }
        Ok(false)
    }

    fn start_battle(&mut self, tx_command: mpsc::Sender<Command>) {
        let seed: u64 = rand::thread_rng().r#gen();
        match BattleController::start(
            &Self::party(),
            &Self::encounter_group(),
            seed,
            self.config.clone(),
            tx_command,
        ) {
            Ok(mut controller) => {
                let events = controller.subscribe();
                if let Err(err) = controller.advance() {
                    tracing::error!(%err, "battle kickoff failed");
                    return;
                }
                self.mode = AppMode::Battle(BattleSession {
                    controller,
                    events,
                    hint: None,
                });
            }
            Err(err) => tracing::error!(%err, "failed to start battle"),
        }
    }

    fn handle_command(&mut self, command: Command) {
        let AppMode::Battle(session) = &mut self.mode else {
            // A stale command outlived its battle; the controller's timers
            // are aborted on drop, so this should not happen.
            tracing::warn!(?command, "command without a running battle");
            return;
        };
        match command {
            Command::Advance => {
                if let Err(err) = session.controller.advance() {
                    tracing::error!(%err, "turn advance failed");
                }
            }
            Command::HideMessage { generation } => {
                session.controller.hide_message(generation);
            }
            Command::ExitBattle => self.exit_battle(),
        }
    }

    /// Tears down the battle screen and returns to the overworld.
    fn exit_battle(&mut self) {
        self.mode = AppMode::World;
        tracing::info!("returned to overworld");
    }

    /// Applies any queued battle events to the status line.
    fn drain_battle_events(&mut self) {
        let AppMode::Battle(session) = &mut self.mode else {
            return;
        };
        while let Ok(event) = session.events.try_recv() {
            match event {
                BattleEvent::PlayerTurn { .. } => session.hint = Some("Choose an action"),
                BattleEvent::TargetingStarted => session.hint = Some("Choose a target"),
                BattleEvent::EnemyChosen { .. } => session.hint = None,
                BattleEvent::UnitDefeated { side, index } => {
                    tracing::info!(%side, index, "unit defeated");
                }
                BattleEvent::BattleOver(outcome) => {
                    tracing::info!(?outcome, "battle over");
                    session.hint = None;
                }
                BattleEvent::Message(_) => {}
            }
        }
    }

    fn render(&mut self, terminal: &mut Tui) -> Result<()> {
        terminal.draw(|frame| ui::render(frame, self))?;
        Ok(())
    }
}
