//! Action enum — all user-initiated intents flowing from components to the App.

/// Unique identifier for a UI component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    FilterPanel,
    MemberList,
    DetailOverlay,
    HelpOverlay,
    GateScreen,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPane(ComponentId),

    // ── Search ───────────────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchChanged(String),

    // ── Filters / sort ───────────────────────────────────────────────────────
    /// A checkbox changed; the App re-reads the groups and recomputes.
    CriteriaChanged,
    ResetFilters,
    CycleSort,
    CycleSortReverse,

    // ── Detail overlay ───────────────────────────────────────────────────────
    OpenDetail(usize), // original index into the member set
    CloseDetail,

    // ── Loader ───────────────────────────────────────────────────────────────
    Reload,

    // ── UI ───────────────────────────────────────────────────────────────────
    ToggleHelp,
    CopyToClipboard(String),
    Unlock,
    Quit,
    Noop,
}
