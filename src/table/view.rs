//! Render model handed to templates.

use serde::Serialize;

use super::controller::TableController;
use super::pagination::page_window;
use super::reducer::{TableAction, reduce};
use super::state::{PaginationState, TableMode, TableRow};
use super::summary::PageSummary;

/// One column header.
#[derive(Debug, Serialize)]
pub struct HeaderView {
    /// Wire name of the column, e.g. `BOOK_TITLE`.
    pub key: &'static str,
    /// Text shown in the header cell.
    pub label: &'static str,
    /// Whether the header renders as a sort link.
    pub sortable: bool,
    /// `asc`/`desc` when this column drives the current sort.
    pub direction: Option<&'static str>,
    /// Link that toggles sorting on this column; `None` when unsortable.
    pub sort_url: Option<String>,
}

/// One body row, cells already formatted for display.
#[derive(Debug, Serialize)]
pub struct RowView {
    /// Record identifier, used for the details link.
    pub id: String,
    /// Display text per column, in column order.
    pub cells: Vec<String>,
}

/// Entry of the numbered pager.
#[derive(Debug, Serialize)]
pub struct PageLink {
    /// `None` renders an ellipsis.
    pub number: Option<usize>,
    /// Target of the link; `None` for the ellipsis.
    pub url: Option<String>,
    /// Marks the page being shown.
    pub current: bool,
}

/// Entry of the page size selector.
#[derive(Debug, Serialize)]
pub struct PageSizeOption {
    /// Rows per page.
    pub size: usize,
    /// Link switching to this size, back on page 1.
    pub url: String,
    /// Marks the size in effect.
    pub selected: bool,
}

/// Everything a template needs to draw the table, its search box, pager and
/// summary line.
#[derive(Debug, Serialize)]
pub struct TableView {
    /// Whether paging is done upstream or in memory.
    pub mode: TableMode,
    /// Route the table's links point at, e.g. `/books`.
    pub base_path: String,
    pub columns: Vec<HeaderView>,
    /// Rows of the visible page only.
    pub rows: Vec<RowView>,
    pub is_empty: bool,
    /// Shown in place of the rows when `is_empty`.
    pub empty_message: String,
    /// Search text as submitted, untrimmed.
    pub search: String,
    pub search_placeholder: String,
    /// Debounce window the search box applies before submitting.
    pub debounce_ms: u64,
    /// Parameters the search form must carry over (page is left out so a new
    /// search starts on page 1).
    pub hidden_params: Vec<(String, String)>,
    pub summary: PageSummary,
    /// `summary` rendered as "Showing X to Y of Z results".
    pub summary_text: String,
    /// Page actually shown, after clamping.
    pub page: usize,
    /// Never zero, so "Page 1 of 1" is shown for empty results.
    pub total_pages: usize,
    pub pages: Vec<PageLink>,
    /// Pager arrows; `None` when the move would not change the page.
    pub first_url: Option<String>,
    pub previous_url: Option<String>,
    pub next_url: Option<String>,
    pub last_url: Option<String>,
    pub page_sizes: Vec<PageSizeOption>,
}

/// Builds `base?query` for `state`, appending the non-empty `extra` filters.
pub fn link(base: &str, state: &PaginationState, extra: &[(&'static str, String)]) -> String {
    let mut pairs = state.query_pairs();
    pairs.extend(
        extra
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .cloned(),
    );
    match serde_html_form::to_string(&pairs) {
        Ok(query) if !query.is_empty() => format!("{base}?{query}"),
        _ => base.to_string(),
    }
}

impl TableView {
    /// Builds the view for `rows`.
    ///
    /// In server mode `rows` is the fetched page; in local mode the full
    /// dataset, which the controller filters, sorts and slices.
    pub fn build<R: TableRow>(
        controller: &mut TableController,
        rows: &[R],
        base_path: &str,
        extra: &[(&'static str, String)],
    ) -> Self {
        let visible = controller.visible_rows(rows);
        let state = controller.state().clone();
        let config = controller.config();
        let mode = config.mode;

        let (page, total_count) = match mode {
            TableMode::Server => (state.page, controller.server_page().total_count),
            TableMode::Local => (visible.page, visible.filtered_count),
        };
        let total_pages = visible.total_pages;
        let shown_state = PaginationState {
            page,
            ..state.clone()
        };
        let go = |action: TableAction| link(base_path, &reduce(&shown_state, &action, total_pages), extra);

        let columns = config
            .columns
            .iter()
            .map(|column| {
                let active = state.sort_by.as_deref() == Some(column.key);
                HeaderView {
                    key: column.key,
                    label: column.label,
                    sortable: column.sortable,
                    direction: active.then(|| state.sort_order.as_str()),
                    sort_url: column.sortable.then(|| {
                        go(TableAction::ToggleSort {
                            column: column.key.to_string(),
                        })
                    }),
                }
            })
            .collect();

        let row_views: Vec<RowView> = visible
            .rows
            .iter()
            .map(|row| RowView {
                id: row.row_id(),
                cells: config
                    .columns
                    .iter()
                    .map(|column| row.cell(column.key).to_string())
                    .collect(),
            })
            .collect();

        let pages = page_window(total_pages, page)
            .into_iter()
            .map(|number| PageLink {
                number,
                url: number.map(|n| go(TableAction::SetPage(n))),
                current: number == Some(page),
            })
            .collect();

        let has_previous = page > 1;
        let has_next = page < total_pages;

        let page_sizes = config
            .page_size_options
            .iter()
            .map(|&size| PageSizeOption {
                size,
                url: go(TableAction::SetLimit(size)),
                selected: size == state.limit,
            })
            .collect();

        let mut hidden_params = vec![("limit".to_string(), state.limit.to_string())];
        if let Some(sort_by) = &state.sort_by {
            hidden_params.push(("sortBy".to_string(), sort_by.clone()));
            hidden_params.push(("sortOrder".to_string(), state.sort_order.to_string()));
        }
        hidden_params.extend(
            extra
                .iter()
                .filter(|(_, value)| !value.trim().is_empty())
                .map(|(key, value)| (key.to_string(), value.clone())),
        );

        let summary = PageSummary::new(page, state.limit, total_count);

        Self {
            mode,
            base_path: base_path.to_string(),
            columns,
            is_empty: row_views.is_empty(),
            rows: row_views,
            empty_message: config.empty_message.clone(),
            search: controller.search_input().to_string(),
            search_placeholder: config.search_placeholder.clone(),
            debounce_ms: u64::try_from(config.debounce.as_millis()).unwrap_or(u64::MAX),
            hidden_params,
            summary_text: summary.to_string(),
            summary,
            page,
            total_pages: total_pages.max(1),
            pages,
            first_url: has_previous.then(|| go(TableAction::FirstPage)),
            previous_url: has_previous.then(|| go(TableAction::PreviousPage)),
            next_url: has_next.then(|| go(TableAction::NextPage)),
            last_url: has_next.then(|| go(TableAction::LastPage)),
            page_sizes,
        }
    }
}
