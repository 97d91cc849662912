//! GateScreen component — the cosmetic entry passphrase.
//!
//! Compares a shared community phrase client-side, exactly as cosmetic as
//! it sounds; the real data lives behind the public endpoint either way.
//! Shown at startup unless disabled in config.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_BG, C_MUTED, C_PANEL_BORDER, C_PRIMARY, C_TOAST_ERROR, C_TOAST_SUCCESS},
};

/// The shared phrase handed out to community members.
const SHARED_PASSPHRASE: &str = "copwes1";

pub struct GateScreen {
    input: Input,
    feedback: Option<(String, bool)>, // (message, is_error)
}

impl GateScreen {
    pub fn new() -> Self {
        Self {
            input: Input::default(),
            feedback: None,
        }
    }
}

impl Component for GateScreen {
    fn id(&self) -> ComponentId {
        ComponentId::GateScreen
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::Quit];
            }
            KeyCode::Enter => {
                if self.input.value() == SHARED_PASSPHRASE {
                    self.feedback = Some(("login successful".to_string(), false));
                    return vec![Action::Unlock];
                }
                self.feedback = Some(("incorrect passphrase — try again".to_string(), true));
                self.input = Input::default();
            }
            _ => {
                self.input
                    .handle_event(&ratatui::crossterm::event::Event::Key(key));
            }
        }
        vec![]
    }

    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        let popup = centered_box(44, 8, area);

        let masked = "•".repeat(self.input.value().chars().count());
        let feedback_line = match &self.feedback {
            Some((message, is_error)) => {
                let color = if *is_error { C_TOAST_ERROR } else { C_TOAST_SUCCESS };
                Line::from(Span::styled(format!(" {}", message), Style::default().fg(color)))
            }
            None => Line::from(""),
        };

        let lines = vec![
            Line::from(Span::styled(
                " welcome to the member directory",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(" passphrase: ", Style::default().fg(C_MUTED)),
                Span::styled(masked, Style::default().fg(C_PRIMARY)),
            ]),
            feedback_line,
            Line::from(""),
            Line::from(Span::styled(
                " enter submit · esc quit",
                Style::default().fg(C_MUTED),
            )),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(C_PANEL_BORDER))
                    .title(Span::styled(
                        " roster ",
                        Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
                    ))
                    .style(Style::default().bg(C_BG)),
            ),
            popup,
        );

        // Cursor sits after the masked text.
        let cursor_x = popup.x + 14 + self.input.value().chars().count() as u16;
        frame.set_cursor_position((
            cursor_x.min(popup.x + popup.width.saturating_sub(2)),
            popup.y + 3,
        ));
    }
}

impl Default for GateScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn centered_box(width: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(gate: &mut GateScreen, code: KeyCode) -> Vec<Action> {
        gate.handle_key(KeyEvent::from(code), &AppState::new(false))
    }

    fn type_str(gate: &mut GateScreen, text: &str) {
        for c in text.chars() {
            press(gate, KeyCode::Char(c));
        }
    }

    #[test]
    fn correct_passphrase_unlocks() {
        let mut gate = GateScreen::new();
        type_str(&mut gate, "copwes1");
        let actions = press(&mut gate, KeyCode::Enter);
        assert!(matches!(actions.as_slice(), [Action::Unlock]));
    }

    #[test]
    fn wrong_passphrase_shows_error_and_clears() {
        let mut gate = GateScreen::new();
        type_str(&mut gate, "nope");
        let actions = press(&mut gate, KeyCode::Enter);
        assert!(actions.is_empty());
        assert!(matches!(&gate.feedback, Some((_, true))));
        assert!(gate.input.value().is_empty());
    }

    #[test]
    fn esc_quits() {
        let mut gate = GateScreen::new();
        let actions = press(&mut gate, KeyCode::Esc);
        assert!(matches!(actions.as_slice(), [Action::Quit]));
    }
}
