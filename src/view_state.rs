//! In-memory popup state and the pure row renderer.

use crate::domain::hostname_label;
use crate::tab_data::{TabId, TabInfo, TabRow};

/// Shown in place of a missing or broken favicon
pub const PLACEHOLDER_FAVICON: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 40 40'%3E%3Crect width='40' height='40' rx='8' fill='%23d2d2d2'/%3E%3C/svg%3E";

pub const EMPTY_MESSAGE: &str = "No tabs found.";
pub const NO_RESULTS_MESSAGE: &str = "No tabs match your search.";
pub const TABS_UNAVAILABLE: &str =
    "Unable to access tabs. Make sure the extension has the 'tabs' permission.";

const UNTITLED: &str = "(no title)";

/// Set of tab ids that remembers insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: Vec<TabId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the id was already selected
    pub fn insert(&mut self, id: TabId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: TabId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&selected| selected != id);
        self.ids.len() < before
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.ids.contains(&id)
    }

    pub fn first(&self) -> Option<TabId> {
        self.ids.first().copied()
    }

    pub fn ids(&self) -> &[TabId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn retain(&mut self, mut keep: impl FnMut(TabId) -> bool) {
        self.ids.retain(|&id| keep(id));
    }
}

/// What the tab list should show
#[derive(Debug, Clone, PartialEq)]
pub enum VisibleRows {
    /// The window has no tabs at all
    Empty,
    /// Tabs exist but none match the query
    NoResults,
    Rows(Vec<TabRow>),
}

impl VisibleRows {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            VisibleRows::Empty => Some(EMPTY_MESSAGE),
            VisibleRows::NoResults => Some(NO_RESULTS_MESSAGE),
            VisibleRows::Rows(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub tabs: Vec<TabInfo>,
    pub query: String,
    pub selection: Selection,
    pub load_error: Option<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a fresh tab list and drop selected ids that no longer exist
    pub fn replace_tabs(&mut self, tabs: Vec<TabInfo>) {
        self.tabs = tabs;
        let tabs = &self.tabs;
        self.selection.retain(|id| tabs.iter().any(|tab| tab.id == id));
    }

    pub fn find_tab(&self, id: TabId) -> Option<&TabInfo> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    pub fn bulk_enabled(&self) -> bool {
        !self.selection.is_empty()
    }
}

/// Case-insensitive match against title and URL; an empty query matches all
pub fn tab_matches(tab: &TabInfo, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    format!("{} {}", tab.title, tab.url)
        .to_lowercase()
        .contains(&needle)
}

pub fn tab_row(tab: &TabInfo) -> TabRow {
    let title = if tab.title.is_empty() {
        UNTITLED.to_string()
    } else {
        tab.title.clone()
    };

    let favicon = tab
        .fav_icon_url
        .as_deref()
        .filter(|src| !src.is_empty())
        .unwrap_or(PLACEHOLDER_FAVICON)
        .to_string();

    TabRow {
        id: tab.id,
        title,
        label: hostname_label(&tab.url),
        favicon,
        pinned: tab.pinned,
        active: tab.active,
    }
}

/// Build the rows for the tabs matching `query`, in tab order
pub fn compute_visible_rows(tabs: &[TabInfo], query: &str) -> VisibleRows {
    if tabs.is_empty() {
        return VisibleRows::Empty;
    }

    let rows: Vec<TabRow> = tabs
        .iter()
        .filter(|tab| tab_matches(tab, query))
        .map(tab_row)
        .collect();

    if rows.is_empty() {
        VisibleRows::NoResults
    } else {
        VisibleRows::Rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tab(id: TabId, url: &str, title: &str) -> TabInfo {
        TabInfo::new(id, 1, url, title)
    }

    fn sample_tabs() -> Vec<TabInfo> {
        vec![
            tab(1, "https://github.com/yewstack/yew", "Yew framework"),
            tab(2, "https://docs.rs/url/latest/url/", "url - Rust"),
            tab(3, "https://mail.google.com/mail/u/0/", "Inbox"),
        ]
    }

    fn row_ids(rows: &VisibleRows) -> Vec<TabId> {
        match rows {
            VisibleRows::Rows(rows) => rows.iter().map(|row| row.id).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_empty_tabs_render_empty_state() {
        assert_eq!(compute_visible_rows(&[], ""), VisibleRows::Empty);
        assert_eq!(compute_visible_rows(&[], "anything"), VisibleRows::Empty);
        assert_eq!(VisibleRows::Empty.message(), Some(EMPTY_MESSAGE));
    }

    #[test]
    fn test_no_match_renders_no_results() {
        let rows = compute_visible_rows(&sample_tabs(), "stackoverflow");
        assert_eq!(rows, VisibleRows::NoResults);
        assert_eq!(rows.message(), Some(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn test_empty_query_matches_everything_in_order() {
        let rows = compute_visible_rows(&sample_tabs(), "");
        assert_eq!(row_ids(&rows), vec![1, 2, 3]);
        assert_eq!(rows.message(), None);
    }

    #[test]
    fn test_query_is_case_insensitive_over_title_and_url() {
        let tabs = sample_tabs();

        assert_eq!(row_ids(&compute_visible_rows(&tabs, "YEW")), vec![1]);
        assert_eq!(row_ids(&compute_visible_rows(&tabs, "docs.RS")), vec![2]);
        assert_eq!(row_ids(&compute_visible_rows(&tabs, "inbox")), vec![3]);
        assert_eq!(row_ids(&compute_visible_rows(&tabs, "  rust  ")), vec![2]);
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let tabs = sample_tabs();
        assert_eq!(compute_visible_rows(&tabs, "git"), compute_visible_rows(&tabs, "git"));
    }

    #[test]
    fn test_row_label_and_favicon_fallbacks() {
        let broken = tab(9, "not a url", "").with_fav_icon("");
        let good = tab(10, "https://www.rust-lang.org/learn", "Learn Rust")
            .with_fav_icon("https://www.rust-lang.org/favicon.ico")
            .pinned();

        assert_eq!(
            tab_row(&broken),
            TabRow {
                id: 9,
                title: "(no title)".to_string(),
                label: "not a url".to_string(),
                favicon: PLACEHOLDER_FAVICON.to_string(),
                pinned: false,
                active: false,
            }
        );
        assert_eq!(
            tab_row(&good),
            TabRow {
                id: 10,
                title: "Learn Rust".to_string(),
                label: "www.rust-lang.org".to_string(),
                favicon: "https://www.rust-lang.org/favicon.ico".to_string(),
                pinned: true,
                active: false,
            }
        );
    }

    #[test]
    fn test_selection_keeps_insertion_order() {
        let mut selection = Selection::new();
        assert!(selection.insert(7));
        assert!(selection.insert(3));
        assert!(selection.insert(9));
        assert!(!selection.insert(3));

        assert_eq!(selection.ids(), &[7, 3, 9]);
        assert_eq!(selection.first(), Some(7));

        assert!(selection.remove(7));
        assert!(!selection.remove(7));
        assert_eq!(selection.first(), Some(3));
    }

    #[test]
    fn test_replace_tabs_prunes_selection() {
        let mut state = ViewState::new();
        state.replace_tabs(sample_tabs());
        state.selection.insert(3);
        state.selection.insert(1);
        assert!(state.bulk_enabled());

        state.replace_tabs(vec![tab(1, "https://github.com", "GitHub")]);

        assert_eq!(state.selection.ids(), &[1]);
        assert!(
            state
                .selection
                .ids()
                .iter()
                .all(|&id| state.find_tab(id).is_some())
        );

        state.replace_tabs(Vec::new());
        assert!(state.selection.is_empty());
        assert!(!state.bulk_enabled());
    }
}
