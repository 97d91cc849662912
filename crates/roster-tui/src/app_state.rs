//! AppState — shared read-only data passed to all components during
//! render/event handling.
//!
//! Components read this for the member set and load status, but never
//! mutate it. The App event-loop is the only thing that writes to AppState.

use chrono::{DateTime, Local};

use roster_core::member::Member;
use roster_core::query::Criteria;

use crate::widgets::status_bar::InputMode;

/// Where the loader currently stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Loaded {
        count: usize,
        at: DateTime<Local>,
    },
    /// Transport-level success with zero records — surfaced as a warning,
    /// retryable like an error.
    Empty,
    Failed(String),
}

/// The full shared state of the application.
/// Components read this; only the App event-loop writes to it.
pub struct AppState {
    /// The normalized member set — immutable once loaded.
    pub members: Vec<Member>,
    /// Current UI-selected filter/sort state.
    pub criteria: Criteria,
    /// Original indices of the records currently displayed, in order.
    pub visible: Vec<usize>,
    pub load: LoadPhase,
    /// First few member names matching the active query (suggestion strip).
    pub suggestions: Vec<String>,
    /// False while the gate screen is shown.
    pub unlocked: bool,
    pub input_mode: InputMode,
}

impl AppState {
    pub fn new(unlocked: bool) -> Self {
        Self {
            members: Vec::new(),
            criteria: Criteria::default(),
            visible: Vec::new(),
            suggestions: Vec::new(),
            load: LoadPhase::Idle,
            unlocked,
            input_mode: if unlocked {
                InputMode::Normal
            } else {
                InputMode::Gate
            },
        }
    }

    /// Member behind position `pos` of the visible view.
    pub fn visible_member(&self, pos: usize) -> Option<&Member> {
        self.visible.get(pos).and_then(|&i| self.members.get(i))
    }
}
