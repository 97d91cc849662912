//! PaneChrome — standardized bordered pane with focus styling and an
//! optional count badge in the top-right corner.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

use crate::theme::{
    style_focused_border, style_unfocused_border, C_KEY_HINT, C_MUTED, C_PRIMARY, C_SECONDARY,
};

/// Renders a bordered pane with consistent focus styling.
/// `number_key` shows as a `[N]` hint before the title; `badge` (e.g. a
/// "45/120" count) is right-aligned in the top border.
pub fn pane_chrome<'a>(
    title: &'a str,
    number_key: Option<char>,
    focused: bool,
    badge: Option<String>,
) -> Block<'a> {
    let border_style = if focused {
        style_focused_border()
    } else {
        style_unfocused_border()
    };

    let title_style = if focused {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_MUTED)
    };

    let mut title_spans = Vec::new();
    if let Some(key) = number_key {
        title_spans.push(Span::styled(
            format!("[{}] ", key),
            Style::default().fg(C_KEY_HINT),
        ));
    }
    title_spans.push(Span::styled(title, title_style));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(title_spans));

    if let Some(text) = badge {
        block.title_top(
            Line::from(Span::styled(
                format!(" {} ", text),
                Style::default().fg(C_SECONDARY),
            ))
            .right_aligned(),
        )
    } else {
        block
    }
}
