//! MemberList component — the card list filling the right pane.
//!
//! Renders one two-row summary card per visible record (name, title,
//! organization, country) and owns the search input drawn along its
//! bottom edge. Opening a card raises the detail overlay.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, LoadPhase},
    component::Component,
    theme::{
        style_muted, style_selected, C_ACCENT, C_COUNTRY, C_MUTED, C_ORG, C_PRIMARY, C_SECONDARY,
    },
    widgets::{
        list_cursor::ListCursor,
        pane_chrome::pane_chrome,
        search_input::{SearchEvent, SearchInput},
    },
};

/// Rows per summary card.
const CARD_ROWS: usize = 2;

pub struct MemberList {
    pub cursor: ListCursor,
    search: SearchInput,
}

impl MemberList {
    pub fn new() -> Self {
        Self {
            cursor: ListCursor::new(),
            search: SearchInput::new("name, organization, expertise…"),
        }
    }

    pub fn activate_search(&mut self) {
        self.search.activate();
    }

    pub fn deactivate_search(&mut self) {
        self.search.deactivate();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.search.deactivate();
    }

    pub fn search_active(&self) -> bool {
        self.search.is_active()
    }

    /// Original member index behind the current selection.
    pub fn selected_original(&self, state: &AppState) -> Option<usize> {
        state.visible.get(self.cursor.selected).copied()
    }

    fn render_card(
        &self,
        member: &roster_core::member::Member,
        selected: bool,
        width: usize,
    ) -> [Line<'static>; CARD_ROWS] {
        let marker = if selected { "▸ " } else { "  " };
        let glyph = if member.has_photo() { "◉ " } else { "○ " };

        let name_style = if selected {
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_PRIMARY)
        };

        let mut top = vec![
            Span::styled(marker, Style::default().fg(C_ACCENT)),
            Span::styled(glyph, Style::default().fg(C_MUTED)),
            Span::styled(truncate_to_width(&member.name, width.saturating_sub(6)), name_style),
        ];
        if !member.pronouns.is_empty() {
            top.push(Span::styled(
                format!("  ({})", member.pronouns),
                style_muted(),
            ));
        }

        let mut bottom = vec![Span::raw("    ")];
        if !member.professional_title.is_empty() {
            bottom.push(Span::styled(
                truncate_to_width(&member.professional_title, width / 2),
                Style::default().fg(C_SECONDARY),
            ));
        }
        if !member.organization.is_empty() {
            if bottom.len() > 1 {
                bottom.push(Span::styled(" · ", style_muted()));
            }
            bottom.push(Span::styled(
                truncate_to_width(&member.organization, width / 3),
                Style::default().fg(C_ORG),
            ));
        }
        if !member.country_based.is_empty() {
            if bottom.len() > 1 {
                bottom.push(Span::styled(" · ", style_muted()));
            }
            bottom.push(Span::styled(
                truncate_to_width(&member.country_based, width / 4),
                Style::default().fg(C_COUNTRY),
            ));
        }

        let item_bg = if selected {
            style_selected()
        } else {
            Style::default()
        };
        [
            Line::from(top).style(item_bg),
            Line::from(bottom).style(item_bg),
        ]
    }

    fn placeholder_lines(&self, state: &AppState) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            "  No members found.",
            Style::default().fg(C_SECONDARY),
        ))];
        match &state.load {
            LoadPhase::Loading => {
                lines = vec![Line::from(Span::styled(
                    "  loading member directory…",
                    style_muted(),
                ))];
            }
            LoadPhase::Idle => {
                lines = vec![Line::from(Span::styled("  starting…", style_muted()))];
            }
            LoadPhase::Failed(message) => {
                lines.push(Line::from(Span::styled(
                    format!("  {}", message),
                    style_muted(),
                )));
                lines.push(Line::from(Span::styled(
                    "  press R to retry",
                    style_muted(),
                )));
            }
            LoadPhase::Empty => {
                lines.push(Line::from(Span::styled(
                    "  the directory came back empty — press R to retry",
                    style_muted(),
                )));
            }
            LoadPhase::Loaded { .. } => {
                lines.push(Line::from(Span::styled(
                    "  adjust the search or filters",
                    style_muted(),
                )));
            }
        }
        lines
    }
}

/// Truncate to a display width, appending an ellipsis when cut.
fn truncate_to_width(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}

impl Component for MemberList {
    fn id(&self) -> ComponentId {
        ComponentId::MemberList
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let len = state.visible.len();

        // Search mode input
        if self.search.is_active() {
            match key.code {
                KeyCode::Up => {
                    self.cursor.select_up(1);
                    return vec![];
                }
                KeyCode::Down => {
                    self.cursor.select_down(1, len);
                    return vec![];
                }
                _ => {}
            }
            return match self.search.handle_key(key) {
                SearchEvent::Edited(q) => vec![Action::SearchChanged(q)],
                SearchEvent::Submitted => vec![Action::CloseSearch],
                SearchEvent::Closed => vec![Action::CloseSearch],
            };
        }

        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.cursor.select_down(step, len),
            KeyCode::PageUp => self.cursor.select_up(10),
            KeyCode::PageDown => self.cursor.select_down(10, len),
            KeyCode::Home | KeyCode::Char('g') => self.cursor.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.cursor.select_last(len),

            KeyCode::Enter | KeyCode::Char('o') => {
                if let Some(idx) = self.selected_original(state) {
                    return vec![Action::OpenDetail(idx)];
                }
            }

            KeyCode::Char('y') => {
                if let Some(member) = state.visible_member(self.cursor.selected) {
                    if !member.email.is_empty() {
                        return vec![Action::CopyToClipboard(member.email.clone())];
                    }
                }
            }
            KeyCode::Char('Y') => {
                if let Some(member) = state.visible_member(self.cursor.selected) {
                    if !member.websites.is_empty() {
                        return vec![Action::CopyToClipboard(member.websites.clone())];
                    }
                }
            }

            _ => {}
        }

        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        let len = state.visible.len();
        match event.kind {
            MouseEventKind::ScrollUp => self.cursor.select_up(1),
            MouseEventKind::ScrollDown => self.cursor.select_down(1, len),
            MouseEventKind::Down(ratatui::crossterm::event::MouseButton::Left) => {
                let rel_row = event.row.saturating_sub(area.y + 1) as usize;
                let card_row = rel_row / CARD_ROWS;
                if self.cursor.handle_click(card_row, len) {
                    // A card click both selects and opens the detail view.
                    if let Some(idx) = self.selected_original(state) {
                        return vec![Action::OpenDetail(idx)];
                    }
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::CloseSearch => self.search.deactivate(),
            Action::ResetFilters => self.clear_search(),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let badge = if state.members.is_empty() {
            None
        } else {
            Some(format!("{}/{}", state.visible.len(), state.members.len()))
        };
        let block = pane_chrome("members", Some('2'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        // Reserve bottom rows for the search bar (and suggestion strip).
        let mut reserved = 0u16;
        if self.search.is_active() {
            reserved = 1;
            if !state.suggestions.is_empty() {
                reserved = 2;
            }
        }
        let content = Rect {
            height: inner.height.saturating_sub(reserved),
            ..inner
        };

        if state.members.is_empty() || state.visible.is_empty() {
            frame.render_widget(Paragraph::new(self.placeholder_lines(state)), content);
        } else {
            let rows = (content.height as usize) / CARD_ROWS;
            self.cursor.ensure_visible(rows);
            let width = content.width as usize;

            let mut lines: Vec<Line> = Vec::with_capacity(rows * CARD_ROWS);
            let end = (self.cursor.offset + rows).min(state.visible.len());
            for view_pos in self.cursor.offset..end {
                let member = &state.members[state.visible[view_pos]];
                let selected = view_pos == self.cursor.selected;
                let [top, bottom] = self.render_card(member, selected, width);
                lines.push(top);
                lines.push(bottom);
            }
            frame.render_widget(Paragraph::new(lines), content);
        }

        if self.search.is_active() {
            if !state.suggestions.is_empty() {
                let strip = Rect {
                    y: inner.y + inner.height.saturating_sub(2),
                    height: 1,
                    ..inner
                };
                let text = format!("≈ {}", state.suggestions.join(" · "));
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        truncate_to_width(&text, strip.width as usize),
                        style_muted(),
                    )),
                    strip,
                );
            }
            let search_area = Rect {
                y: inner.y + inner.height.saturating_sub(1),
                height: 1,
                ..inner
            };
            self.search.draw(frame, search_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("exactly10!", 10), "exactly10!");
        let cut = truncate_to_width("a much longer string", 8);
        assert!(cut.ends_with('…'));
        assert!(cut.chars().count() <= 8);
        assert_eq!(truncate_to_width("anything", 0), "");
    }
}
