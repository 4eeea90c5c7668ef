//! Battle menu hierarchy and the single-focus input router.
//!
//! Three menus cooperate during a player turn: the action menu (a single
//! fixed "Attack" entry), the target menu (one entry per enemy, disabled as
//! enemies die), and the party status menu (highlight only, never focused).
//! At most one menu owns keyboard focus at a time; the `focus` field is the
//! single source of truth, so the invariant holds by construction.

mod state;

pub use state::{MenuItem, MenuState};

use crate::roster::Roster;

/// Which menu currently owns keyboard input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuFocus {
    Actions,
    Targets,
}

/// Navigation command decoded from a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuCommand {
    Up,
    Down,
    Confirm,
}

/// Outcome of routing one command through the focused menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuSignal {
    /// The action menu confirmed "Attack"; focus moved to the target menu.
    TargetingStarted,
    /// The target menu confirmed an enemy; all focus was cleared.
    TargetChosen { enemy_index: usize },
}

/// The three battle menus plus the focus router.
#[derive(Clone, Debug)]
pub struct BattleMenus {
    actions: MenuState,
    targets: MenuState,
    status: MenuState,
    focus: Option<MenuFocus>,
    status_active: bool,
}

impl BattleMenus {
    /// Builds the menus from a freshly constructed roster.
    pub fn from_roster(roster: &Roster) -> Self {
        let targets = roster
            .enemies()
            .iter()
            .map(|e| {
                if e.is_alive() {
                    MenuItem::new(e.name.clone())
                } else {
                    MenuItem::disabled(e.name.clone())
                }
            })
            .collect();
        let status = roster
            .players()
            .iter()
            .map(|p| MenuItem::new(p.name.clone()))
            .collect();

        Self {
            actions: MenuState::new(vec![MenuItem::new("Attack")]),
            targets: MenuState::new(targets),
            status: MenuState::new(status),
            focus: None,
            status_active: false,
        }
    }

    pub fn focus(&self) -> Option<MenuFocus> {
        self.focus
    }

    pub fn actions(&self) -> &MenuState {
        &self.actions
    }

    pub fn targets(&self) -> &MenuState {
        &self.targets
    }

    pub fn status(&self) -> &MenuState {
        &self.status
    }

    /// Player-side index highlighted in the status menu, while a turn is up.
    pub fn highlighted_player(&self) -> Option<usize> {
        self.status_active.then(|| self.status.cursor())
    }

    /// Starts a player turn: highlights the acting unit and hands focus to
    /// the action menu.
    pub fn begin_player_turn(&mut self, player_index: usize) {
        self.status.select(player_index);
        self.status_active = true;
        self.actions.select(0);
        self.focus = Some(MenuFocus::Actions);
    }

    /// Drops focus from every menu and clears the status highlight.
    pub fn clear_focus(&mut self) {
        self.focus = None;
        self.status_active = false;
    }

    /// Marks a defeated enemy's entry disabled, in the same update its hp
    /// reached zero.
    pub fn mark_enemy_defeated(&mut self, enemy_index: usize) {
        self.targets.set_enabled(enemy_index, false);
    }

    /// Re-syncs the target enabled flags with roster liveness.
    pub fn refresh(&mut self, roster: &Roster) {
        for (i, enemy) in roster.enemies().iter().enumerate() {
            self.targets.set_enabled(i, enemy.is_alive());
        }
    }

    /// Routes one command to whichever menu holds focus.
    ///
    /// Unfocused input and confirms without a valid selection are silent
    /// no-ops, matching permissive UI handling.
    pub fn handle_command(&mut self, command: MenuCommand) -> Option<MenuSignal> {
        let focus = self.focus?;
        match (focus, command) {
            (MenuFocus::Actions, MenuCommand::Up) => {
                self.actions.move_up();
                None
            }
            (MenuFocus::Actions, MenuCommand::Down) => {
                self.actions.move_down();
                None
            }
            (MenuFocus::Actions, MenuCommand::Confirm) => {
                self.actions.selected()?;
                // Focus may only move onto a confirmable target menu.
                if self.targets.select(0) {
                    self.focus = Some(MenuFocus::Targets);
                    Some(MenuSignal::TargetingStarted)
                } else {
                    None
                }
            }
            (MenuFocus::Targets, MenuCommand::Up) => {
                self.targets.move_up();
                None
            }
            (MenuFocus::Targets, MenuCommand::Down) => {
                self.targets.move_down();
                None
            }
            (MenuFocus::Targets, MenuCommand::Confirm) => {
                let enemy_index = self.targets.selected()?;
                self.clear_focus();
                Some(MenuSignal::TargetChosen { enemy_index })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::UnitTemplate;

    fn roster() -> Roster {
        Roster::build(
            &[
                UnitTemplate::player("Nica", 100, 20),
                UnitTemplate::player("Coder", 80, 8),
            ],
            &[
                UnitTemplate::enemy("Dragon1", 50, 3),
                UnitTemplate::enemy("Dragon2", 50, 3),
            ],
        )
        .expect("valid roster")
    }

    #[test]
    fn input_without_focus_is_ignored() {
        let mut menus = BattleMenus::from_roster(&roster());
        assert_eq!(menus.focus(), None);
        assert_eq!(menus.handle_command(MenuCommand::Confirm), None);
    }

    #[test]
    fn confirm_flow_hands_focus_down_the_hierarchy() {
        let mut menus = BattleMenus::from_roster(&roster());
        menus.begin_player_turn(0);
        assert_eq!(menus.focus(), Some(MenuFocus::Actions));
        assert_eq!(menus.highlighted_player(), Some(0));

        assert_eq!(
            menus.handle_command(MenuCommand::Confirm),
            Some(MenuSignal::TargetingStarted)
        );
        assert_eq!(menus.focus(), Some(MenuFocus::Targets));

        let _ = menus.handle_command(MenuCommand::Down);
        assert_eq!(
            menus.handle_command(MenuCommand::Confirm),
            Some(MenuSignal::TargetChosen { enemy_index: 1 })
        );
        assert_eq!(menus.focus(), None);
        assert_eq!(menus.highlighted_player(), None);
    }

    #[test]
    fn dead_enemies_are_skipped_by_targeting() {
        let mut menus = BattleMenus::from_roster(&roster());
        menus.mark_enemy_defeated(0);
        menus.begin_player_turn(1);

        let _ = menus.handle_command(MenuCommand::Confirm);
        assert_eq!(menus.focus(), Some(MenuFocus::Targets));
        // select(0) scanned past the dead Dragon1.
        assert_eq!(
            menus.handle_command(MenuCommand::Confirm),
            Some(MenuSignal::TargetChosen { enemy_index: 1 })
        );
    }

    #[test]
    fn all_enemies_dead_blocks_targeting() {
        let mut menus = BattleMenus::from_roster(&roster());
        menus.mark_enemy_defeated(0);
        menus.mark_enemy_defeated(1);
        menus.begin_player_turn(0);

        // The action confirm cannot hand focus to an unconfirmable menu.
        assert_eq!(menus.handle_command(MenuCommand::Confirm), None);
        assert_eq!(menus.focus(), Some(MenuFocus::Actions));
    }

    #[test]
    fn refresh_syncs_targets_with_roster() {
        let mut r = roster();
        let mut menus = BattleMenus::from_roster(&r);
        while r.unit(2).unwrap().is_alive() {
            let _ = r.attack(0, 2);
        }

        menus.refresh(&r);
        assert!(!menus.targets().items()[0].enabled);
        assert!(menus.targets().items()[1].enabled);
    }

    #[test]
    fn target_menu_mirrors_living_enemies() {
        let r = roster();
        let mut menus = BattleMenus::from_roster(&r);
        let enabled =
            |m: &BattleMenus| -> Vec<bool> { m.targets().items().iter().map(|i| i.enabled).collect() };
        assert_eq!(enabled(&menus), vec![true, true]);

        menus.mark_enemy_defeated(1);
        assert_eq!(enabled(&menus), vec![true, false]);
    }
}
