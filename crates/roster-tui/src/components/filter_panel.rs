//! FilterPanel component — region / pathogen / setting checkbox groups.
//!
//! Each group carries an "All" sentinel row. Checking "All" clears the
//! group's other boxes and the group stops filtering; checking a specific
//! box unchecks "All". Option lists derive from the loaded data rather
//! than a hardcoded list.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use roster_core::member::Member;
use roster_core::query::natural_cmp;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{style_muted, style_selected, C_CHECKED, C_MUTED, C_PRIMARY, C_SECONDARY},
};

/// The sentinel row present in every group.
pub const ALL_SENTINEL: &str = "All";

pub struct FilterOption {
    pub label: String,
    pub checked: bool,
}

pub struct FilterGroup {
    pub title: &'static str,
    pub options: Vec<FilterOption>,
}

impl FilterGroup {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            options: vec![FilterOption {
                label: ALL_SENTINEL.to_string(),
                checked: false,
            }],
        }
    }

    /// Replace the selectable options, keeping checks that survive by label.
    pub fn set_options(&mut self, labels: Vec<String>) {
        let kept: Vec<String> = self
            .options
            .iter()
            .skip(1)
            .filter(|o| o.checked)
            .map(|o| o.label.to_lowercase())
            .collect();
        let all_checked = self.options[0].checked;

        self.options = Vec::with_capacity(labels.len() + 1);
        self.options.push(FilterOption {
            label: ALL_SENTINEL.to_string(),
            checked: all_checked,
        });
        for label in labels {
            let checked = !all_checked && kept.contains(&label.to_lowercase());
            self.options.push(FilterOption { label, checked });
        }
    }

    /// Toggle the box at `idx`, enforcing "All" exclusivity.
    pub fn toggle(&mut self, idx: usize) {
        if idx >= self.options.len() {
            return;
        }
        if idx == 0 {
            let on = !self.options[0].checked;
            self.options[0].checked = on;
            if on {
                for option in &mut self.options[1..] {
                    option.checked = false;
                }
            }
        } else {
            self.options[idx].checked = !self.options[idx].checked;
            if self.options[idx].checked {
                self.options[0].checked = false;
            }
        }
    }

    /// Selected values as the engine sees them: "All" (or nothing) checked
    /// means an empty list — the group filters nothing.
    pub fn checked_values(&self) -> Vec<String> {
        if self.options[0].checked {
            return Vec::new();
        }
        self.options
            .iter()
            .skip(1)
            .filter(|o| o.checked)
            .map(|o| o.label.clone())
            .collect()
    }

    pub fn clear(&mut self) {
        for option in &mut self.options {
            option.checked = false;
        }
    }
}

/// A row of the flattened panel: a group header or a checkbox.
#[derive(Debug, Clone, Copy, PartialEq)]
enum RowRef {
    Header(usize),
    Option { group: usize, option: usize },
}

pub struct FilterPanel {
    pub groups: [FilterGroup; 3],
    cursor: usize, // flat row index, always on an Option row
    offset: usize,
}

impl FilterPanel {
    pub fn new() -> Self {
        Self {
            groups: [
                FilterGroup::new("region"),
                FilterGroup::new("pathogen"),
                FilterGroup::new("setting"),
            ],
            cursor: 1,
            offset: 0,
        }
    }

    /// Derive the option lists from the loaded member set.
    pub fn rebuild_options(&mut self, members: &[Member]) {
        self.groups[0].set_options(distinct_values(members, |m| vec![m.region.clone()]));
        self.groups[1].set_options(distinct_values(members, |m| {
            split_display_tokens(&m.health_threat_category)
        }));
        self.groups[2].set_options(distinct_values(members, |m| {
            split_display_tokens(&m.setting)
        }));
        self.snap_cursor();
    }

    pub fn clear_all(&mut self) {
        for group in &mut self.groups {
            group.clear();
        }
    }

    fn rows(&self) -> Vec<RowRef> {
        let mut rows = Vec::new();
        for (g, group) in self.groups.iter().enumerate() {
            rows.push(RowRef::Header(g));
            for o in 0..group.options.len() {
                rows.push(RowRef::Option { group: g, option: o });
            }
        }
        rows
    }

    fn option_rows(&self) -> Vec<usize> {
        self.rows()
            .iter()
            .enumerate()
            .filter(|(_, r)| matches!(r, RowRef::Option { .. }))
            .map(|(i, _)| i)
            .collect()
    }

    /// Keep the cursor on an option row after the row set changed.
    fn snap_cursor(&mut self) {
        let option_rows = self.option_rows();
        if option_rows.is_empty() {
            self.cursor = 0;
            return;
        }
        self.cursor = option_rows
            .iter()
            .copied()
            .find(|&r| r >= self.cursor)
            .unwrap_or(*option_rows.last().unwrap());
    }

    fn move_cursor(&mut self, delta: isize) {
        let option_rows = self.option_rows();
        if option_rows.is_empty() {
            return;
        }
        let pos = option_rows
            .iter()
            .position(|&r| r >= self.cursor)
            .unwrap_or(option_rows.len() - 1);
        let next = pos.saturating_add_signed(delta).min(option_rows.len() - 1);
        self.cursor = option_rows[next];
    }

    fn toggle_at_cursor(&mut self) -> Vec<Action> {
        if let Some(RowRef::Option { group, option }) = self.rows().get(self.cursor).copied() {
            self.groups[group].toggle(option);
            return vec![Action::CriteriaChanged];
        }
        vec![]
    }

    fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor.saturating_sub(height - 1);
        }
    }
}

fn distinct_values(members: &[Member], extract: impl Fn(&Member) -> Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for member in members {
        for value in extract(member) {
            let value = value.trim().to_string();
            if value.is_empty() {
                continue;
            }
            if !seen.iter().any(|s| s.eq_ignore_ascii_case(&value)) {
                seen.push(value);
            }
        }
    }
    seen.sort_by(|a, b| natural_cmp(a, b));
    seen
}

/// Sub-values of a multi-valued field with original casing kept for display.
fn split_display_tokens(field: &str) -> Vec<String> {
    field
        .split([',', ';'])
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

impl Component for FilterPanel {
    fn id(&self) -> ComponentId {
        ComponentId::FilterPanel
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-8),
            KeyCode::PageDown => self.move_cursor(8),
            KeyCode::Home | KeyCode::Char('g') => {
                self.cursor = 0;
                self.snap_cursor();
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = usize::MAX;
                self.snap_cursor();
            }
            KeyCode::Char(' ') | KeyCode::Enter => return self.toggle_at_cursor(),
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.move_cursor(-1),
            MouseEventKind::ScrollDown => self.move_cursor(1),
            MouseEventKind::Down(ratatui::crossterm::event::MouseButton::Left) => {
                let rel_row = event.row.saturating_sub(area.y + 1) as usize;
                let flat = self.offset + rel_row;
                if let Some(RowRef::Option { .. }) = self.rows().get(flat).copied() {
                    self.cursor = flat;
                    return self.toggle_at_cursor();
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ResetFilters = action {
            self.clear_all();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = crate::widgets::pane_chrome::pane_chrome("filters", Some('1'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        if state.members.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  filters appear after load", style_muted())),
                inner,
            );
            return;
        }

        let height = inner.height as usize;
        self.ensure_visible(height);

        let rows = self.rows();
        let end = (self.offset + height).min(rows.len());
        let mut lines: Vec<Line> = Vec::with_capacity(end - self.offset);

        for (flat, row) in rows[self.offset..end].iter().enumerate() {
            let flat = self.offset + flat;
            let line = match *row {
                RowRef::Header(g) => Line::from(Span::styled(
                    format!(" {}", self.groups[g].title.to_uppercase()),
                    Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
                )),
                RowRef::Option { group, option } => {
                    let opt = &self.groups[group].options[option];
                    let mark = if opt.checked { "[x]" } else { "[ ]" };
                    let mark_style = if opt.checked {
                        Style::default().fg(C_CHECKED)
                    } else {
                        Style::default().fg(C_SECONDARY)
                    };
                    let label_style = if flat == self.cursor && focused {
                        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(C_PRIMARY)
                    };
                    let line = Line::from(vec![
                        Span::raw("  "),
                        Span::styled(mark, mark_style),
                        Span::raw(" "),
                        Span::styled(opt.label.clone(), label_style),
                    ]);
                    if flat == self.cursor {
                        line.style(style_selected())
                    } else {
                        line
                    }
                }
            };
            lines.push(line);
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for FilterPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_with(labels: &[&str]) -> FilterGroup {
        let mut group = FilterGroup::new("region");
        group.set_options(labels.iter().map(|s| s.to_string()).collect());
        group
    }

    #[test]
    fn all_sentinel_clears_other_checks() {
        let mut group = group_with(&["West Africa", "South Asia"]);
        group.toggle(1);
        group.toggle(2);
        assert_eq!(group.checked_values().len(), 2);

        group.toggle(0); // check "All"
        assert!(group.options[0].checked);
        assert!(group.options[1..].iter().all(|o| !o.checked));
        assert!(group.checked_values().is_empty());
    }

    #[test]
    fn all_sentinel_equals_no_selection() {
        let mut group = group_with(&["West Africa"]);
        assert!(group.checked_values().is_empty()); // nothing checked
        group.toggle(0);
        assert!(group.checked_values().is_empty()); // "All" checked
    }

    #[test]
    fn specific_check_unchecks_all() {
        let mut group = group_with(&["West Africa"]);
        group.toggle(0);
        group.toggle(1);
        assert!(!group.options[0].checked);
        assert_eq!(group.checked_values(), vec!["West Africa".to_string()]);
    }

    #[test]
    fn rebuilding_options_preserves_surviving_checks() {
        let mut group = group_with(&["West Africa", "South Asia"]);
        group.toggle(1);
        group.set_options(vec!["East Africa".to_string(), "West Africa".to_string()]);
        assert_eq!(group.checked_values(), vec!["West Africa".to_string()]);
    }

    #[test]
    fn options_derive_from_member_fields() {
        let mut a = Member::default();
        a.health_threat_category = "Viral; Bacterial".to_string();
        let mut b = Member::default();
        b.health_threat_category = "bacterial, Fungal".to_string();

        let values = distinct_values(&[a, b], |m| split_display_tokens(&m.health_threat_category));
        // Case-insensitive dedupe keeps first-seen casing.
        assert_eq!(values, vec!["Bacterial", "Fungal", "Viral"]);
    }

    #[test]
    fn cursor_skips_header_rows() {
        let mut panel = FilterPanel::new();
        let members = vec![Member {
            region: "West Africa".to_string(),
            health_threat_category: "Viral".to_string(),
            setting: "Hospital".to_string(),
            ..Default::default()
        }];
        panel.rebuild_options(&members);

        panel.cursor = 0;
        panel.snap_cursor();
        assert!(matches!(
            panel.rows()[panel.cursor],
            RowRef::Option { .. }
        ));
        for _ in 0..20 {
            panel.move_cursor(1);
            assert!(matches!(
                panel.rows()[panel.cursor],
                RowRef::Option { .. }
            ));
        }
    }
}
