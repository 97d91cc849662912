//! SearchInput — wraps tui-input for the free-text member search.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{style_search, C_MUTED, C_SEARCH_BG};

pub enum SearchEvent {
    Edited(String),
    Submitted,
    Closed,
}

pub struct SearchInput {
    input: Input,
    active: bool,
    placeholder: String,
}

impl SearchInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            active: false,
            placeholder: placeholder.into(),
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.input.value().is_empty()
    }

    /// Handle a key event.
    ///
    /// Esc behaviour:
    ///   - With text: clear it and emit `Edited("")` (search stays open)
    ///   - Already empty: deactivate and emit `Closed`
    pub fn handle_key(&mut self, key: KeyEvent) -> SearchEvent {
        match key.code {
            KeyCode::Esc => {
                if !self.input.value().is_empty() {
                    self.input = Input::default();
                    SearchEvent::Edited(String::new())
                } else {
                    self.deactivate();
                    SearchEvent::Closed
                }
            }
            KeyCode::Enter => {
                self.deactivate();
                SearchEvent::Submitted
            }
            _ => {
                self.input
                    .handle_event(&ratatui::crossterm::event::Event::Key(key));
                SearchEvent::Edited(self.input.value().to_string())
            }
        }
    }

    /// Render the search bar into `area` (one row).
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let scroll = self
            .input
            .visual_scroll(area.width.saturating_sub(4) as usize);
        let value = self.input.value();
        let content = if value.is_empty() {
            Span::styled(
                format!("⌕ {}", self.placeholder),
                Style::default().fg(C_MUTED).bg(C_SEARCH_BG),
            )
        } else {
            Span::styled(format!("⌕ {}", &value[scroll..]), style_search())
        };

        frame.render_widget(
            Paragraph::new(Line::from(content)).style(Style::default().bg(C_SEARCH_BG)),
            area,
        );

        if self.active {
            let cursor_x = area.x + 2 + (self.input.visual_cursor().saturating_sub(scroll)) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(1)), area.y));
        }
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new("search members…")
    }
}
