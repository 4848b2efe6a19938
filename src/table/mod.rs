//! Paginated table controller.
//!
//! Owns the pagination, sort and search state of one tabular view and decides
//! whether that state drives an in-memory recomputation ([`TableMode::Local`])
//! or a refetch by the caller ([`TableMode::Server`]). All transitions go
//! through the pure [`reduce`] function so they can be tested without any
//! rendering framework.

pub mod controller;
pub mod debounce;
pub mod local;
pub mod pagination;
pub mod reducer;
pub mod state;
pub mod summary;
pub mod view;

pub use controller::{ServerPageInfo, StateChange, TableConfig, TableController};
pub use debounce::{SEARCH_DEBOUNCE, SearchDebouncer};
pub use local::{LocalPage, compute_local_page};
pub use reducer::{TableAction, reduce};
pub use state::{
    CellValue, ColumnDef, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, PaginationState, SortOrder,
    TableMode, TableQuery, TableRow,
};
pub use summary::PageSummary;
pub use view::TableView;
