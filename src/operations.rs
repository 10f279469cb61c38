/// Tab operations: the command dispatcher and the tab source it drives

use crate::debounce::Debouncer;
use crate::error::TabError;
use crate::tab_data::{TabId, TabInfo, TabQuery, TabUpdate, WindowId};
use crate::view_state::{TABS_UNAVAILABLE, ViewState};

/// The browser's tab-management facility
///
/// Futures are not `Send`: everything runs on the popup's event loop.
#[allow(async_fn_in_trait)]
pub trait TabSource {
    async fn query_tabs(&self, query: TabQuery) -> Result<Vec<TabInfo>, TabError>;

    async fn update_tab(&self, id: TabId, update: TabUpdate) -> Result<TabInfo, TabError>;

    /// Remove one or more tabs in a single call
    async fn remove_tabs(&self, ids: &[TabId]) -> Result<(), TabError>;

    async fn get_tab(&self, id: TabId) -> Result<TabInfo, TabError>;

    async fn focus_window(&self, window_id: WindowId) -> Result<(), TabError>;
}

/// A user gesture, decoupled from the DOM event that produced it
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Activate(TabId),
    Close(TabId),
    TogglePin(TabId),
    ToggleSelect(TabId, bool),
    FocusSelected,
    CloseSelected,
    Search(String),
}

impl Command {
    /// Keyboard shortcut on a tab row
    ///
    /// `on_row` is false when the key was pressed on one of the row's own
    /// controls and bubbled up; those keys belong to the control.
    pub fn from_row_key(id: TabId, key: &str, on_row: bool) -> Option<Command> {
        if !on_row {
            return None;
        }
        match key {
            "Enter" => Some(Command::Activate(id)),
            "Delete" => Some(Command::Close(id)),
            _ => None,
        }
    }
}

/// What the UI has to do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Tabs or query changed; redraw the list
    Render,
    /// Only the selection changed; recompute bulk button state
    SelectionChanged,
    /// A tab was activated; the popup should close
    ClosePopup,
    /// Arm the quiet-interval timer for this ticket
    SearchPending(u64),
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Refreshing,
}

/// Owns the view state and applies commands to it
pub struct Dispatcher<S> {
    source: S,
    state: ViewState,
    phase: Phase,
    search: Debouncer<String>,
}

impl<S: TabSource> Dispatcher<S> {
    pub fn new(source: S) -> Self {
        Dispatcher {
            source,
            state: ViewState::new(),
            phase: Phase::Idle,
            search: Debouncer::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn dispatch(&mut self, command: Command) -> Effect {
        log::debug!("dispatch {:?}", command);

        match command {
            Command::Activate(id) => self.activate(id).await,
            Command::Close(id) => self.close(id).await,
            Command::TogglePin(id) => self.toggle_pin(id).await,
            Command::ToggleSelect(id, checked) => self.toggle_select(id, checked),
            Command::FocusSelected => match self.state.selection.first() {
                Some(id) => self.activate(id).await,
                None => Effect::Ignored,
            },
            Command::CloseSelected => self.close_selected().await,
            Command::Search(text) => Effect::SearchPending(self.search.schedule(text)),
        }
    }

    /// Apply the pending query if `ticket` is still the latest keystroke
    pub fn settle_search(&mut self, ticket: u64) -> Effect {
        match self.search.settle(ticket) {
            Some(query) => {
                self.state.query = query;
                Effect::Render
            }
            None => Effect::Ignored,
        }
    }

    /// Re-query the tab source and replace the tab list wholesale
    pub async fn refresh(&mut self) -> Result<(), TabError> {
        self.phase = Phase::Refreshing;
        log::debug!("{:?}: querying current window", self.phase);
        let result = self.source.query_tabs(TabQuery::current_window()).await;
        self.phase = Phase::Idle;

        match result {
            Ok(tabs) => {
                log::debug!("refreshed {} tabs", tabs.len());
                self.state.replace_tabs(tabs);
                self.state.load_error = None;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to query tabs: {}", e);
                self.state.load_error = Some(TABS_UNAVAILABLE.to_string());
                Err(e)
            }
        }
    }

    async fn reconcile(&mut self) -> Effect {
        // Errors are already recorded in the view state
        let _ = self.refresh().await;
        Effect::Render
    }

    async fn activate(&mut self, id: TabId) -> Effect {
        match self.focus_tab(id).await {
            Ok(()) => Effect::ClosePopup,
            Err(e) => {
                log::error!("Failed to activate tab {}: {}", id, e);
                self.reconcile().await
            }
        }
    }

    async fn focus_tab(&self, id: TabId) -> Result<(), TabError> {
        self.source.update_tab(id, TabUpdate::activate()).await?;
        let tab = self.source.get_tab(id).await?;
        self.source.focus_window(tab.window_id).await
    }

    async fn close(&mut self, id: TabId) -> Effect {
        match self.source.remove_tabs(&[id]).await {
            Ok(()) => {
                self.state.selection.remove(id);
            }
            Err(e) => log::error!("Failed to close tab {}: {}", id, e),
        }
        self.reconcile().await
    }

    async fn toggle_pin(&mut self, id: TabId) -> Effect {
        let pinned = self.state.find_tab(id).map(|tab| tab.pinned).unwrap_or(false);

        if let Err(e) = self.source.update_tab(id, TabUpdate::pin(!pinned)).await {
            log::error!("Failed to toggle pin on tab {}: {}", id, e);
        }
        self.reconcile().await
    }

    fn toggle_select(&mut self, id: TabId, checked: bool) -> Effect {
        if checked {
            self.state.selection.insert(id);
        } else {
            self.state.selection.remove(id);
        }
        Effect::SelectionChanged
    }

    async fn close_selected(&mut self) -> Effect {
        if self.state.selection.is_empty() {
            return Effect::Ignored;
        }

        let ids = self.state.selection.ids().to_vec();
        match self.source.remove_tabs(&ids).await {
            Ok(()) => self.state.selection.clear(),
            Err(e) => log::error!("Failed to close {} selected tabs: {}", ids.len(), e),
        }
        self.reconcile().await
    }
}
