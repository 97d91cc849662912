//! App — the component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - The loader task reports back through the same channel; at most one
//!   fetch is in flight (retries while loading are ignored, not queued).

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Style,
    widgets::Block,
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use roster_core::config::Config;
use roster_core::fetch::FetchError;
use roster_core::member::Member;
use roster_core::query::{self, Criteria};

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, LoadPhase},
    component::Component,
    components::{
        detail_overlay::DetailOverlay, filter_panel::FilterPanel, gate::GateScreen,
        help_overlay::HelpOverlay, member_list::MemberList,
    },
    focus::Pane,
    loader,
    theme::C_BG,
    widgets::{
        status_bar::{self, InputMode},
        toast::{Severity, ToastManager},
    },
};

/// Fields the sort selector cycles through.
const SORT_FIELDS: &[&str] = &[
    "name",
    "organization",
    "country_based",
    "region",
    "sector",
    "career_stage",
];

/// How long load outcome toasts stay up before auto-hiding.
const STATUS_HIDE: Duration = Duration::from_secs(1);

// ── Internal event bus ────────────────────────────────────────────────────────

pub enum AppMessage {
    Event(Event),
    LoadStarted,
    LoadFinished(Result<Vec<Member>, FetchError>),
}

// ── Pane area tracking ────────────────────────────────────────────────────────

/// Stores the last-drawn layout rects for each pane.
/// Used by `handle_mouse` to do hit-testing without recomputing the layout.
#[derive(Default, Clone)]
struct PaneAreas {
    filter_panel: Rect,
    member_list: Rect,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    config: Config,

    // ── Shared state (passed read-only to components) ─────────────────────────
    pub state: AppState,

    // ── Components ────────────────────────────────────────────────────────────
    member_list: MemberList,
    filter_panel: FilterPanel,
    detail_overlay: DetailOverlay,
    help_overlay: HelpOverlay,
    gate: GateScreen,

    // ── Session bookkeeping ───────────────────────────────────────────────────
    focus: Pane,
    toast: ToastManager,
    msg_tx: Option<mpsc::Sender<AppMessage>>,
    load_in_flight: bool,
    should_quit: bool,

    /// Last-drawn layout rects — used for mouse hit-testing.
    pane_areas: PaneAreas,
}

impl App {
    pub fn new(config: Config) -> Self {
        let unlocked = !config.gate.enabled;
        Self {
            config,
            state: AppState::new(unlocked),
            member_list: MemberList::new(),
            filter_panel: FilterPanel::new(),
            detail_overlay: DetailOverlay::new(),
            help_overlay: HelpOverlay::new(),
            gate: GateScreen::new(),
            focus: Pane::List,
            toast: ToastManager::new(),
            msg_tx: None,
            load_in_flight: false,
            should_quit: false,
            pane_areas: PaneAreas::default(),
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::channel::<AppMessage>(1024);
        self.msg_tx = Some(tx.clone());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // The one automatic load; everything after this is a user retry.
        self.start_load();

        // Toast expiry check + spinner animation.
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        loop {
            terminal.draw(|f| self.draw(f))?;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    self.handle_message(msg);
                }
                _ = toast_tick.tick() => {
                    self.toast.tick();
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    // ── Message handler ───────────────────────────────────────────────────────

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == ratatui::crossterm::event::KeyEventKind::Release {
                        return;
                    }
                    let actions = self.handle_key(key);
                    for action in actions {
                        self.dispatch(action);
                    }
                }
                Event::Mouse(mouse) => {
                    let actions = self.handle_mouse(mouse);
                    for action in actions {
                        self.dispatch(action);
                    }
                }
                _ => {}
            },

            AppMessage::LoadStarted => {
                self.state.load = LoadPhase::Loading;
                self.toast.spinner("loading member directory…");
            }

            AppMessage::LoadFinished(result) => {
                self.load_in_flight = false;
                // A fresh set invalidates any open detail index.
                if matches!(result, Ok(_)) {
                    self.detail_overlay.close();
                }
                match result {
                    Ok(members) if members.is_empty() => {
                        self.state.members = members;
                        self.state.load = LoadPhase::Empty;
                        self.recompute();
                        self.toast.resolve_spinner(
                            Severity::Warning,
                            "no members found in the directory",
                            Duration::from_secs(4),
                        );
                    }
                    Ok(members) => {
                        let count = members.len();
                        self.state.members = members;
                        self.state.load = LoadPhase::Loaded {
                            count,
                            at: chrono::Local::now(),
                        };
                        self.filter_panel.rebuild_options(&self.state.members);
                        self.recompute();
                        self.toast.resolve_spinner(
                            Severity::Success,
                            format!("loaded {count} members"),
                            STATUS_HIDE,
                        );
                    }
                    Err(e) => {
                        self.state.load = LoadPhase::Failed(e.to_string());
                        self.toast.resolve_spinner(
                            Severity::Error,
                            "unable to load members — press R to retry",
                            STATUS_HIDE,
                        );
                    }
                }
            }
        }
    }

    // ── Key routing ───────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Action::Quit];
        }
        if !self.state.unlocked {
            return self.gate.handle_key(key, &self.state);
        }
        if self.help_overlay.visible {
            return self.help_overlay.handle_key(key, &self.state);
        }
        if self.detail_overlay.is_open() {
            return self.detail_overlay.handle_key(key, &self.state);
        }
        if self.member_list.search_active() {
            return self.member_list.handle_key(key, &self.state);
        }

        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            KeyCode::Tab | KeyCode::BackTab => return vec![Action::FocusNext],
            KeyCode::Char('1') => return vec![Action::FocusPane(ComponentId::FilterPanel)],
            KeyCode::Char('2') => return vec![Action::FocusPane(ComponentId::MemberList)],
            KeyCode::Char('/') => return vec![Action::OpenSearch],
            KeyCode::Char('s') => return vec![Action::CycleSort],
            KeyCode::Char('S') => return vec![Action::CycleSortReverse],
            KeyCode::Char('x') => return vec![Action::ResetFilters],
            KeyCode::Char('R') => return vec![Action::Reload],
            _ => {}
        }

        match self.focus {
            Pane::Filters => self.filter_panel.handle_key(key, &self.state),
            Pane::List => self.member_list.handle_key(key, &self.state),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Vec<Action> {
        if !self.state.unlocked || self.help_overlay.visible {
            return vec![];
        }
        if self.detail_overlay.is_open() {
            return self
                .detail_overlay
                .handle_mouse(mouse, Rect::default(), &self.state);
        }

        let pos = Position::new(mouse.column, mouse.row);
        if self.pane_areas.member_list.contains(pos) {
            if matches!(mouse.kind, MouseEventKind::Down(_)) {
                self.focus = Pane::List;
            }
            let area = self.pane_areas.member_list;
            return self.member_list.handle_mouse(mouse, area, &self.state);
        }
        if self.pane_areas.filter_panel.contains(pos) {
            if matches!(mouse.kind, MouseEventKind::Down(_)) {
                self.focus = Pane::Filters;
            }
            let area = self.pane_areas.filter_panel;
            return self.filter_panel.handle_mouse(mouse, area, &self.state);
        }
        vec![]
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        // Broadcast to components first so they can react, then apply at the
        // app level; secondary actions go one level deep.
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.member_list.on_action(&action, s));
            out.extend(self.filter_panel.on_action(&action, s));
            out.extend(self.detail_overlay.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action);
        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        match &action {
            Action::Noop => {}
            _ => debug!("apply_action: {:?}", action),
        }
        match action {
            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPane(id) => {
                if let Some(pane) = Pane::from_component(id) {
                    self.focus = pane;
                }
            }

            // ── Search ────────────────────────────────────────────────────────
            Action::OpenSearch => {
                self.focus = Pane::List;
                self.member_list.activate_search();
                self.state.input_mode = InputMode::Search;
            }
            Action::CloseSearch => {
                self.state.input_mode = InputMode::Normal;
            }
            Action::SearchChanged(query) => {
                self.state.criteria.query = query;
                self.recompute();
            }

            // ── Filters / sort ────────────────────────────────────────────────
            Action::CriteriaChanged => self.recompute(),
            Action::ResetFilters => {
                // Checkbox and search state were cleared by the components
                // during the broadcast; reset the derived criteria too.
                self.state.criteria = Criteria::default();
                self.state.input_mode = InputMode::Normal;
                self.recompute();
                self.toast.push(
                    "filters reset — showing all members",
                    Severity::Info,
                    Duration::from_secs(2),
                );
            }
            Action::CycleSort => self.cycle_sort(false),
            Action::CycleSortReverse => self.cycle_sort(true),

            // ── Detail overlay (handled by the component broadcast) ───────────
            Action::OpenDetail(_) | Action::CloseDetail => {}

            // ── Loader ────────────────────────────────────────────────────────
            Action::Reload => self.start_load(),

            // ── UI ────────────────────────────────────────────────────────────
            Action::ToggleHelp => {}
            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        let display = if text.chars().count() > 40 {
                            format!("{}…", text.chars().take(40).collect::<String>())
                        } else {
                            text
                        };
                        self.toast.success(format!("copied: {}", display));
                    }
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }
            Action::Unlock => {
                self.state.unlocked = true;
                self.state.input_mode = InputMode::Normal;
                self.toast.success("login successful");
            }
            Action::Quit => self.should_quit = true,
            Action::Noop => {}
        }
    }

    fn cycle_sort(&mut self, reverse: bool) {
        let current = self.state.criteria.sort_field().to_string();
        let pos = SORT_FIELDS
            .iter()
            .position(|f| *f == current)
            .unwrap_or(0);
        let next = if reverse {
            (pos + SORT_FIELDS.len() - 1) % SORT_FIELDS.len()
        } else {
            (pos + 1) % SORT_FIELDS.len()
        };
        self.state.criteria.sort_field = SORT_FIELDS[next].to_string();
        self.recompute();
    }

    /// Re-derive the visible view from the immutable member set and the
    /// current criteria. The checkbox groups are the source of truth for
    /// the selected filter values.
    fn recompute(&mut self) {
        self.state.criteria.regions = self.filter_panel.groups[0].checked_values();
        self.state.criteria.pathogens = self.filter_panel.groups[1].checked_values();
        self.state.criteria.settings = self.filter_panel.groups[2].checked_values();

        self.state.visible = query::apply(&self.state.members, &self.state.criteria);

        let query = self.state.criteria.query.trim();
        self.state.suggestions = if query.is_empty() {
            Vec::new()
        } else {
            self.state
                .visible
                .iter()
                .filter_map(|&i| {
                    let name = &self.state.members[i].name;
                    (!name.is_empty()).then(|| name.clone())
                })
                .take(4)
                .collect()
        };

        self.member_list.cursor.clamp(self.state.visible.len());
    }

    fn start_load(&mut self) {
        if self.load_in_flight {
            debug!("reload ignored — fetch already in flight");
            return;
        }
        let Some(tx) = self.msg_tx.clone() else {
            return;
        };
        self.load_in_flight = true;
        loader::spawn(self.config.directory.members_url.clone(), tx);
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        // Fill the terminal with the base background colour so gaps between
        // panes appear dark rather than the terminal default.
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        if !self.state.unlocked {
            self.gate.draw(frame, area, true, &self.state);
            self.toast.draw(frame, area);
            return;
        }

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        let body = outer[0];
        let status = outer[1];

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(0)])
            .split(body);

        self.filter_panel
            .draw(frame, cols[0], self.focus == Pane::Filters, &self.state);
        self.member_list
            .draw(frame, cols[1], self.focus == Pane::List, &self.state);
        self.pane_areas.filter_panel = cols[0];
        self.pane_areas.member_list = cols[1];

        status_bar::draw_status_bar(frame, status, &self.state);

        // Overlays, topmost last.
        if self.detail_overlay.is_open() {
            self.detail_overlay.draw(frame, area, false, &self.state);
        }
        if self.help_overlay.visible {
            self.help_overlay.draw(frame, area, false, &self.state);
        }
        self.toast.draw(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_members() -> App {
        let mut app = App::new(Config::default());
        app.state.unlocked = true;
        app.state.input_mode = InputMode::Normal;
        app.state.members = vec![
            Member {
                name: "Zoe".to_string(),
                region: "West Africa".to_string(),
                organization: "Alpha Lab".to_string(),
                ..Default::default()
            },
            Member {
                name: "Amir".to_string(),
                region: "South Asia".to_string(),
                organization: "Beta Institute".to_string(),
                ..Default::default()
            },
        ];
        app.state.load = LoadPhase::Loaded {
            count: 2,
            at: chrono::Local::now(),
        };
        app.filter_panel.rebuild_options(&app.state.members);
        app.recompute();
        app
    }

    fn visible_names(app: &App) -> Vec<&str> {
        app.state
            .visible
            .iter()
            .map(|&i| app.state.members[i].name.as_str())
            .collect()
    }

    #[test]
    fn recompute_orders_by_name() {
        let app = app_with_members();
        assert_eq!(visible_names(&app), vec!["Amir", "Zoe"]);
    }

    #[test]
    fn checkbox_selection_flows_into_criteria() {
        let mut app = app_with_members();
        // Region options are name-sorted: [All, South Asia, West Africa].
        app.filter_panel.groups[0].toggle(2);
        app.dispatch(Action::CriteriaChanged);
        assert_eq!(app.state.criteria.regions, vec!["West Africa".to_string()]);
        assert_eq!(visible_names(&app), vec!["Zoe"]);
    }

    #[test]
    fn sort_cycles_through_fields_both_ways() {
        let mut app = app_with_members();
        app.dispatch(Action::CycleSort);
        assert_eq!(app.state.criteria.sort_field, "organization");
        // Alpha Lab (Zoe) sorts before Beta Institute (Amir).
        assert_eq!(visible_names(&app), vec!["Zoe", "Amir"]);

        app.dispatch(Action::CycleSortReverse);
        assert_eq!(app.state.criteria.sort_field, "name");
        app.dispatch(Action::CycleSortReverse);
        assert_eq!(app.state.criteria.sort_field, "career_stage");
    }

    #[test]
    fn reset_clears_search_and_checkboxes() {
        let mut app = app_with_members();
        app.filter_panel.groups[0].toggle(2);
        app.state.criteria.query = "zoe".to_string();
        app.recompute();
        assert_eq!(visible_names(&app), vec!["Zoe"]);

        app.dispatch(Action::ResetFilters);
        assert!(app.state.criteria.is_empty());
        assert_eq!(visible_names(&app), vec!["Amir", "Zoe"]);
    }

    #[test]
    fn search_drives_suggestions() {
        let mut app = app_with_members();
        app.dispatch(Action::SearchChanged("ami".to_string()));
        assert_eq!(visible_names(&app), vec!["Amir"]);
        assert_eq!(app.state.suggestions, vec!["Amir".to_string()]);

        app.dispatch(Action::SearchChanged(String::new()));
        assert!(app.state.suggestions.is_empty());
        assert_eq!(app.state.visible.len(), 2);
    }

    #[test]
    fn unlock_switches_mode() {
        let mut app = App::new(Config::default());
        assert!(!app.state.unlocked);
        app.dispatch(Action::Unlock);
        assert!(app.state.unlocked);
        assert_eq!(app.state.input_mode, InputMode::Normal);
    }
}
