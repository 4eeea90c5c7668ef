//! Screen rendering.
//!
//! The battle layout follows the reference UI: a message banner up top, the
//! two parties in the arena, and a row of three menu panes along the bottom
//! (enemy targets, actions, party status). Disabled target entries render
//! blank, so defeated enemies vanish from the menu while keeping its shape.

use battle_core::{BattleMenus, Combatant, MenuFocus, MenuState, Roster};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, AppMode, BattleSession};
use crate::world::{WORLD_HEIGHT, WORLD_WIDTH, World};

pub fn render(frame: &mut Frame, app: &App) {
    match &app.mode {
        AppMode::World => render_world(frame, &app.world),
        AppMode::Battle(session) => render_battle(frame, session),
    }
}

fn render_world(frame: &mut Frame, world: &World) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let mut lines = Vec::with_capacity(WORLD_HEIGHT as usize);
    for y in 0..WORLD_HEIGHT {
        let mut spans = Vec::with_capacity(WORLD_WIDTH as usize);
        for x in 0..WORLD_WIDTH {
            let position = crate::world::Position::new(x, y);
            if world.player() == position {
                spans.push(Span::styled(
                    "@",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ));
            } else if world.obstacles().contains(&position) {
                spans.push(Span::styled("#", Style::default().fg(Color::Green)));
            } else {
                spans.push(Span::styled(".", Style::default().fg(Color::DarkGray)));
            }
        }
        lines.push(Line::from(spans));
    }

    let map = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Overworld "));
    frame.render_widget(map, chunks[0]);

    let help = Paragraph::new("arrows/wasd: move | q: quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[1]);
}

fn render_battle(frame: &mut Frame, session: &BattleSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // message banner
            Constraint::Min(0),    // arena
            Constraint::Length(4), // combat log
            Constraint::Length(8), // menu row
            Constraint::Length(1), // hint
        ])
        .split(frame.area());

    render_banner(frame, chunks[0], session);
    render_arena(frame, chunks[1], session.controller.roster(), session.controller.menus());
    render_log(frame, chunks[2], session);
    render_menus(frame, chunks[3], session.controller.menus());

    let hint = session.hint.unwrap_or("");
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );
}

/// Most recent combat lines, newest first.
fn render_log(frame: &mut Frame, area: Rect, session: &BattleSession) {
    let lines: Vec<Line> = session
        .controller
        .board()
        .recent(area.height.saturating_sub(2) as usize)
        .map(|text| Line::styled(text.to_owned(), Style::default().fg(Color::DarkGray)))
        .collect();
    let pane =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Log "));
    frame.render_widget(pane, area);
}

fn render_banner(frame: &mut Frame, area: Rect, session: &BattleSession) {
    let text = session.controller.board().banner().unwrap_or("");
    let banner = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(banner, area);
}

fn render_arena(frame: &mut Frame, area: Rect, roster: &Roster, menus: &BattleMenus) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let enemy_lines: Vec<Line> = roster.enemies().iter().map(|u| unit_line(u, false)).collect();
    let enemy_pane = Paragraph::new(enemy_lines)
        .block(Block::default().borders(Borders::ALL).title(" Enemies "));
    frame.render_widget(enemy_pane, columns[0]);

    let highlighted = menus.highlighted_player();
    let party_lines: Vec<Line> = roster
        .players()
        .iter()
        .enumerate()
        .map(|(i, u)| unit_line(u, highlighted == Some(i)))
        .collect();
    let party_pane = Paragraph::new(party_lines)
        .block(Block::default().borders(Borders::ALL).title(" Party "));
    frame.render_widget(party_pane, columns[1]);
}

fn unit_line(unit: &Combatant, highlighted: bool) -> Line<'_> {
    let mut style = if unit.is_alive() {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    };
    if highlighted {
        style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
    }
    Line::styled(
        format!(
            "{:<14} {:>3}/{:<3}",
            unit.name,
            unit.hp.current(),
            unit.hp.maximum()
        ),
        style,
    )
}

fn render_menus(frame: &mut Frame, area: Rect, menus: &BattleMenus) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    render_menu_pane(
        frame,
        panes[0],
        " Enemies ",
        menus.targets(),
        menus.focus() == Some(MenuFocus::Targets),
    );
    render_menu_pane(
        frame,
        panes[1],
        " Actions ",
        menus.actions(),
        menus.focus() == Some(MenuFocus::Actions),
    );

    // The party pane is a status display, never focused; the acting unit is
    // marked through the highlight instead of a cursor.
    let highlighted = menus.highlighted_player();
    let lines: Vec<Line> = menus
        .status()
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if highlighted == Some(i) {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::styled(format!("  {}", item.label), style)
        })
        .collect();
    let pane =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Party "));
    frame.render_widget(pane, panes[2]);
}

fn render_menu_pane(frame: &mut Frame, area: Rect, title: &str, menu: &MenuState, focused: bool) {
    let lines: Vec<Line> = menu
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.enabled {
                // Defeated entries disappear but hold their row.
                return Line::from("");
            }
            if focused && menu.cursor() == i {
                Line::styled(
                    format!("> {}", item.label),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )
            } else {
                Line::from(format!("  {}", item.label))
            }
        })
        .collect();

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let pane = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    frame.render_widget(pane, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{MenuCommand, UnitTemplate};
    use battle_runtime::{BattleController, RuntimeConfig};
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn battle_screen_shows_recent_combat_lines() {
        let (tx, _rx) = mpsc::channel(8);
        let mut controller = BattleController::start(
            &[UnitTemplate::player("Nica", 100, 20)],
            &[UnitTemplate::enemy("Dragon", 50, 3)],
            7,
            RuntimeConfig::default(),
            tx,
        )
        .unwrap();
        let events = controller.subscribe();
        controller.advance().unwrap();
        controller.handle_menu_command(MenuCommand::Confirm).unwrap();
        controller.handle_menu_command(MenuCommand::Confirm).unwrap();

        let session = BattleSession {
            controller,
            events,
            hint: None,
        };
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal
            .draw(|frame| render_battle(frame, &session))
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("Nica attacks Dragon for 20 damage"));
    }
}
