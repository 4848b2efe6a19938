use std::time::{Duration, Instant};

use serde::Serialize;

use super::debounce::{SEARCH_DEBOUNCE, SearchDebouncer};
use super::local::{LocalPage, compute_local_page};
use super::reducer::{TableAction, reduce};
use super::state::{ColumnDef, PAGE_SIZE_OPTIONS, PaginationState, TableMode, TableRow};
use crate::domain::page::ListPage;

pub const DEFAULT_EMPTY_MESSAGE: &str = "No results found.";
pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "Search...";

/// Static configuration of one table instance.
#[derive(Clone, Debug)]
pub struct TableConfig {
    pub mode: TableMode,
    pub columns: Vec<ColumnDef>,
    pub initial: PaginationState,
    pub debounce: Duration,
    pub empty_message: String,
    pub search_placeholder: String,
    pub page_size_options: Vec<usize>,
}

impl TableConfig {
    pub fn new(mode: TableMode, columns: &[ColumnDef]) -> Self {
        Self {
            mode,
            columns: columns.to_vec(),
            initial: PaginationState::default(),
            debounce: SEARCH_DEBOUNCE,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
        }
    }

    pub fn initial_state(mut self, state: PaginationState) -> Self {
        self.initial = state;
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = placeholder.into();
        self
    }

    pub fn debounce(mut self, window: Duration) -> Self {
        self.debounce = window;
        self
    }
}

/// Pagination metadata returned by the server alongside the current page.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ServerPageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

impl<T> From<&ListPage<T>> for ServerPageInfo {
    fn from(page: &ListPage<T>) -> Self {
        Self {
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_count: page.total_count,
        }
    }
}

/// State change the caller must refetch for (server mode only).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateChange {
    /// Monotonically increasing; responses to older sequences are stale.
    pub sequence: u64,
    pub state: PaginationState,
}

/// Stateful wrapper around [`reduce`] that adds search debouncing, response
/// ordering and the mode split.
#[derive(Debug)]
pub struct TableController {
    config: TableConfig,
    state: PaginationState,
    debouncer: SearchDebouncer,
    search_input: String,
    sequence: u64,
    server_page: ServerPageInfo,
    /// Lowercased cell text per local row, one entry per configured column.
    local_index: Vec<Vec<String>>,
}

impl TableController {
    pub fn new(config: TableConfig) -> Self {
        let state = config.initial.clone();
        Self {
            debouncer: SearchDebouncer::new(config.debounce),
            search_input: state.search.clone(),
            state,
            config,
            sequence: 0,
            server_page: ServerPageInfo::default(),
            local_index: Vec::new(),
        }
    }

    /// Replaces the dataset a local-mode table pages over, so page bounds are
    /// known before the first render.
    pub fn load_rows<R: TableRow>(&mut self, rows: &[R]) {
        self.local_index = rows
            .iter()
            .map(|row| {
                self.config
                    .columns
                    .iter()
                    .map(|column| row.cell(column.key).to_string().to_lowercase())
                    .collect()
            })
            .collect();
    }

    /// Seeds a server-mode table with the page that was fetched for its
    /// initial state.
    pub fn with_server_page(mut self, info: ServerPageInfo) -> Self {
        self.server_page = info;
        self
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Committed state.
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Text currently in the search box, possibly not yet committed.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn server_page(&self) -> ServerPageInfo {
        self.server_page
    }

    /// Total pages as known for the active mode.
    pub fn total_pages(&self) -> usize {
        match self.config.mode {
            TableMode::Server => self.server_page.total_pages,
            TableMode::Local => self.local_total_pages(),
        }
    }

    fn local_total_pages(&self) -> usize {
        let filtered = match self.state.search_term() {
            Some(term) => {
                let needle = term.to_lowercase();
                self.local_index
                    .iter()
                    .filter(|cells| cells.iter().any(|cell| cell.contains(&needle)))
                    .count()
            }
            None => self.local_index.len(),
        };
        filtered.div_ceil(self.state.limit.max(1))
    }

    /// Applies a user action.
    ///
    /// Server mode: search input is debounced and reported later through
    /// [`poll`](Self::poll); any other action first flushes a pending search
    /// and then returns the change to refetch for, if the state moved.
    /// Local mode: the state is updated synchronously and `None` is returned,
    /// since no fetch is needed.
    pub fn dispatch(&mut self, action: TableAction, now: Instant) -> Option<StateChange> {
        if !self.accepts(&action) {
            log::debug!("Ignoring table action on unknown or unsortable column: {action:?}");
            return None;
        }

        match self.config.mode {
            TableMode::Local => {
                if let TableAction::SetSearch(value) = &action {
                    self.search_input = value.clone();
                }
                self.state = reduce(&self.state, &action, self.local_total_pages());
                None
            }
            TableMode::Server => {
                if let TableAction::SetSearch(value) = &action {
                    self.search_input = value.clone();
                    self.debouncer.push(value.clone(), now);
                    return None;
                }

                let before = self.state.clone();
                if let Some(search) = self.debouncer.flush() {
                    self.state = reduce(&self.state, &TableAction::SetSearch(search), self.total_pages());
                }
                self.state = reduce(&self.state, &action, self.total_pages());
                self.emit_if_changed(&before)
            }
        }
    }

    /// Commits a debounced search once its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<StateChange> {
        if self.config.mode != TableMode::Server {
            return None;
        }
        let search = self.debouncer.poll(now)?;
        let before = self.state.clone();
        self.state = reduce(&self.state, &TableAction::SetSearch(search), self.total_pages());
        self.emit_if_changed(&before)
    }

    /// Records the server page fetched for `sequence`.
    ///
    /// Returns `false` and ignores the response when a newer change has been
    /// emitted since, so out-of-order responses never overwrite fresher data.
    pub fn accept_response(&mut self, sequence: u64, info: ServerPageInfo) -> bool {
        if sequence != self.sequence {
            log::debug!(
                "Discarding stale table response {sequence}, latest is {}",
                self.sequence
            );
            return false;
        }
        self.server_page = info;
        true
    }

    /// Rows to display for the committed state.
    ///
    /// Server mode returns the fetched page untouched: a partial page is never
    /// sorted or filtered locally. Local mode recomputes from the full dataset.
    pub fn visible_rows<'a, R: TableRow>(&mut self, rows: &'a [R]) -> LocalPage<'a, R> {
        match self.config.mode {
            TableMode::Server => LocalPage {
                rows: rows.iter().collect(),
                filtered_count: self.server_page.total_count,
                page: self.state.page,
                total_pages: self.server_page.total_pages,
            },
            TableMode::Local => {
                self.load_rows(rows);
                compute_local_page(rows, &self.config.columns, &self.state)
            }
        }
    }

    fn accepts(&self, action: &TableAction) -> bool {
        match action {
            TableAction::SetSort { column, .. } | TableAction::ToggleSort { column } => self
                .config
                .columns
                .iter()
                .any(|c| c.sortable && c.key == column.as_str()),
            _ => true,
        }
    }

    fn emit_if_changed(&mut self, before: &PaginationState) -> Option<StateChange> {
        if &self.state == before {
            return None;
        }
        self.sequence += 1;
        Some(StateChange {
            sequence: self.sequence,
            state: self.state.clone(),
        })
    }
}
