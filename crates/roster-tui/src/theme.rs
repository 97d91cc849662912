//! Color palette and style constants for the roster TUI.

use ratatui::style::{Color, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(16, 18, 22);
pub const C_ACCENT: Color = Color::Rgb(72, 182, 172);
pub const C_PRIMARY: Color = Color::Rgb(216, 220, 230);
pub const C_SECONDARY: Color = Color::Rgb(128, 134, 150);
pub const C_MUTED: Color = Color::Rgb(76, 80, 94);
pub const C_SELECTION_BG: Color = Color::Rgb(30, 34, 46);
pub const C_PANEL_BORDER: Color = Color::Rgb(42, 46, 58);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(92, 148, 210); // steel blue — clear focus indicator
pub const C_KEY_HINT: Color = Color::Rgb(92, 96, 118);

pub const C_SEARCH_BG: Color = Color::Rgb(22, 24, 34);
pub const C_SEARCH_FG: Color = Color::Rgb(238, 198, 92);

pub const C_ORG: Color = Color::Rgb(122, 152, 208);
pub const C_COUNTRY: Color = Color::Rgb(112, 172, 142);
pub const C_CHECKED: Color = Color::Rgb(98, 198, 132);

pub const C_TOAST_INFO: Color = Color::Rgb(86, 158, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(98, 198, 132);
pub const C_TOAST_WARNING: Color = Color::Rgb(238, 182, 86);
pub const C_TOAST_ERROR: Color = Color::Rgb(235, 96, 96);

pub const C_MODE_NORMAL: Color = Color::Rgb(128, 134, 150);
pub const C_MODE_SEARCH: Color = Color::Rgb(238, 198, 92);
pub const C_MODE_GATE: Color = Color::Rgb(235, 96, 96);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_selected() -> Style {
    Style::default().bg(C_SELECTION_BG).fg(C_PRIMARY)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_search() -> Style {
    Style::default().fg(C_SEARCH_FG).bg(C_SEARCH_BG)
}
