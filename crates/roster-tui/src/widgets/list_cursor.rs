//! Cursor + scroll offset over an externally-computed view.
//!
//! Filtering and ordering happen in the core engine; this only tracks
//! which row of the resulting view is selected and which slice is on
//! screen. All methods clamp against the view length passed in.

pub struct ListCursor {
    pub selected: usize,
    pub offset: usize,
}

impl ListCursor {
    pub fn new() -> Self {
        Self {
            selected: 0,
            offset: 0,
        }
    }

    /// Re-clamp after the view shrank (filter change, reload).
    pub fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        if self.offset > self.selected {
            self.offset = self.selected;
        }
    }

    pub fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_down(&mut self, n: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + n).min(len - 1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    pub fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Scroll so the selection is inside a window of `rows` items.
    pub fn ensure_visible(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + rows {
            self.offset = self.selected.saturating_sub(rows - 1);
        }
    }

    /// Selection position relative to the scrolled window.
    pub fn selected_in_view(&self, rows: usize) -> usize {
        self.selected
            .saturating_sub(self.offset)
            .min(rows.saturating_sub(1))
    }

    /// Handle a click on the `row`-th item of the window.
    /// Returns true if the selection changed to a valid item.
    pub fn handle_click(&mut self, row: usize, len: usize) -> bool {
        let target = self.offset + row;
        if target < len {
            self.selected = target;
            return true;
        }
        false
    }
}

impl Default for ListCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_clamps_to_view() {
        let mut cursor = ListCursor::new();
        cursor.select_down(3, 5);
        assert_eq!(cursor.selected, 3);
        cursor.select_down(10, 5);
        assert_eq!(cursor.selected, 4);
        cursor.select_up(100);
        assert_eq!(cursor.selected, 0);
        cursor.select_down(1, 0);
        assert_eq!(cursor.selected, 0);
    }

    #[test]
    fn clamp_after_shrink() {
        let mut cursor = ListCursor::new();
        cursor.select_down(9, 10);
        cursor.ensure_visible(4);
        assert_eq!(cursor.offset, 6);
        cursor.clamp(3);
        assert_eq!(cursor.selected, 2);
        assert!(cursor.offset <= cursor.selected);
    }

    #[test]
    fn click_selects_within_window() {
        let mut cursor = ListCursor::new();
        cursor.offset = 2;
        assert!(cursor.handle_click(1, 10));
        assert_eq!(cursor.selected, 3);
        assert!(!cursor.handle_click(9, 10));
    }
}
