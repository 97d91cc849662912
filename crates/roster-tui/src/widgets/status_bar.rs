//! Status bar — bottom line with input mode, load state, counts, sort
//! field and key hints.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app_state::{AppState, LoadPhase};
use crate::theme::{
    C_MODE_GATE, C_MODE_NORMAL, C_MODE_SEARCH, C_MUTED, C_SECONDARY, C_TOAST_ERROR,
    C_TOAST_SUCCESS, C_TOAST_WARNING,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
    Gate,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Search => "SEARCH",
            Self::Gate => "GATE",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Search => C_MODE_SEARCH,
            Self::Gate => C_MODE_GATE,
        }
    }
}

fn load_summary(state: &AppState) -> (String, Color) {
    match &state.load {
        LoadPhase::Idle => ("○ idle".to_string(), C_MUTED),
        LoadPhase::Loading => ("⟳ loading…".to_string(), C_MODE_SEARCH),
        LoadPhase::Loaded { count, at } => (
            format!("● {} members · {}", count, at.format("%H:%M:%S")),
            C_TOAST_SUCCESS,
        ),
        LoadPhase::Empty => ("△ empty directory · R retry".to_string(), C_TOAST_WARNING),
        LoadPhase::Failed(_) => ("✗ load failed · R retry".to_string(), C_TOAST_ERROR),
    }
}

/// Draw the one-row status bar.
pub fn draw_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let mode = state.input_mode;
    let (load_text, load_color) = load_summary(state);

    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default()
                .fg(mode.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(load_text, Style::default().fg(load_color)),
    ];

    if matches!(state.load, LoadPhase::Loaded { .. }) {
        spans.push(Span::styled(
            format!("  showing {}", state.visible.len()),
            Style::default().fg(C_SECONDARY),
        ));
        spans.push(Span::styled(
            format!("  sort {}", state.criteria.sort_field()),
            Style::default().fg(C_SECONDARY),
        ));
    }

    let keys = match mode {
        InputMode::Normal => {
            "  ↑↓/jk select  Enter detail  / search  Space check  s sort  x reset  R reload  Tab panes  ? help  q quit"
        }
        InputMode::Search => "  type to search  ↑↓ move  Enter keep  Esc clear/close",
        InputMode::Gate => "  type the passphrase  Enter submit  Esc quit",
    };
    spans.push(Span::styled(keys, Style::default().fg(C_MUTED)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
