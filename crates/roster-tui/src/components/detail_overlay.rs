//! DetailOverlay component — centered popup with a member's full record.
//!
//! Shows every non-empty field except the photo reference, labels
//! humanized. Closes on Esc/q, or a mouse click outside the popup.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use roster_core::member::{display_label, Member};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_BG, C_MUTED, C_PANEL_BORDER, C_PRIMARY, C_SECONDARY},
};

pub struct DetailOverlay {
    /// Original index into the member set; None when hidden.
    member_idx: Option<usize>,
    scroll: u16,
    /// Last-drawn popup rect, for outside-click detection.
    area: Rect,
}

impl DetailOverlay {
    pub fn new() -> Self {
        Self {
            member_idx: None,
            scroll: 0,
            area: Rect::default(),
        }
    }

    pub fn open(&mut self, idx: usize) {
        self.member_idx = Some(idx);
        self.scroll = 0;
    }

    pub fn close(&mut self) {
        self.member_idx = None;
        self.area = Rect::default();
    }

    pub fn is_open(&self) -> bool {
        self.member_idx.is_some()
    }

    fn detail_lines(member: &Member) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (field, value) in member.fields() {
            if field == "photo" || value.is_empty() {
                continue;
            }
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", display_label(field)),
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                ),
                Span::styled(value.to_string(), Style::default().fg(C_SECONDARY)),
            ]));
        }
        lines
    }
}

impl Component for DetailOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::DetailOverlay
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.is_open() {
            return vec![];
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
                return vec![Action::CloseDetail];
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::Char('y') => {
                if let Some(member) = self.member_idx.and_then(|i| state.members.get(i)) {
                    if !member.email.is_empty() {
                        return vec![Action::CopyToClipboard(member.email.clone())];
                    }
                }
            }
            KeyCode::Char('Y') => {
                if let Some(member) = self.member_idx.and_then(|i| state.members.get(i)) {
                    if !member.websites.is_empty() {
                        return vec![Action::CopyToClipboard(member.websites.clone())];
                    }
                }
            }
            _ => {}
        }
        // Consume all other keys while open.
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if !self.is_open() {
            return vec![];
        }
        match event.kind {
            MouseEventKind::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            MouseEventKind::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            MouseEventKind::Down(_) => {
                if !self.area.contains(Position::new(event.column, event.row)) {
                    return vec![Action::CloseDetail];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::OpenDetail(idx) => self.open(*idx),
            Action::CloseDetail => self.close(),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let Some(member) = self.member_idx.and_then(|i| state.members.get(i)) else {
            return;
        };

        let popup = centered_rect(64, area.height.saturating_sub(6).clamp(10, 30), area);
        self.area = popup;

        let title = if member.name.is_empty() {
            "member".to_string()
        } else {
            member.name.clone()
        };

        let mut lines = Self::detail_lines(member);
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " esc close · y copy email · Y copy website",
            Style::default().fg(C_MUTED),
        )));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(C_PANEL_BORDER))
                        .title(Span::styled(
                            format!(" {} ", title),
                            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
                        ))
                        .style(Style::default().bg(C_BG)),
                )
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            popup,
        );
    }
}

impl Default for DetailOverlay {
    fn default() -> Self {
        Self::new()
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
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
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_and_empty_fields_are_omitted() {
        let member = Member {
            name: "Zoe".to_string(),
            photo: "images/zoe.jpg".to_string(),
            region: "West Africa".to_string(),
            ..Default::default()
        };
        let lines = DetailOverlay::detail_lines(&member);
        let text: String = lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .map(|s| s.content.clone().into_owned())
            .collect();
        assert!(text.contains("Name: "));
        assert!(text.contains("Region: "));
        assert!(!text.contains("Photo"));
        assert!(!text.contains("Email"));
    }
}
