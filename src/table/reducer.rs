use super::state::{PaginationState, SortOrder};

/// A requested change of table state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableAction {
    SetPage(usize),
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
    SetLimit(usize),
    SetSearch(String),
    /// Sort by `column` in an explicit direction.
    SetSort {
        column: String,
        direction: SortOrder,
    },
    /// Header click: ascending for a new column, flip for the active one.
    ToggleSort {
        column: String,
    },
    ClearSort,
}

/// Applies `action` to `state` and returns the next state.
///
/// `total_pages` bounds the next/last navigation; a value of zero is treated
/// as a single empty page. Page-size, search and sort changes always return to
/// page 1.
pub fn reduce(state: &PaginationState, action: &TableAction, total_pages: usize) -> PaginationState {
    let last_page = total_pages.max(1);
    let mut next = state.clone();

    match action {
        TableAction::SetPage(page) => next.page = (*page).max(1),
        TableAction::FirstPage => next.page = 1,
        TableAction::PreviousPage => next.page = state.page.saturating_sub(1).max(1),
        TableAction::NextPage => next.page = (state.page + 1).min(last_page).max(1),
        TableAction::LastPage => next.page = last_page,
        TableAction::SetLimit(limit) => {
            next.limit = (*limit).max(1);
            next.page = 1;
        }
        TableAction::SetSearch(search) => {
            next.search = search.trim().to_string();
            next.page = 1;
        }
        TableAction::SetSort { column, direction } => {
            next.sort_by = Some(column.clone());
            next.sort_order = *direction;
            next.page = 1;
        }
        TableAction::ToggleSort { column } => {
            if state.sort_by.as_deref() == Some(column.as_str()) {
                next.sort_order = state.sort_order.flipped();
            } else {
                next.sort_by = Some(column.clone());
                next.sort_order = SortOrder::Asc;
            }
            next.page = 1;
        }
        TableAction::ClearSort => {
            next.sort_by = None;
            next.sort_order = SortOrder::Asc;
            next.page = 1;
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(page: usize) -> PaginationState {
        PaginationState {
            page,
            ..PaginationState::default()
        }
    }

    #[test]
    fn limit_and_search_changes_reset_page() {
        let state = on_page(4);

        assert_eq!(reduce(&state, &TableAction::SetLimit(50), 9).page, 1);
        assert_eq!(
            reduce(&state, &TableAction::SetSearch("abc".into()), 9).page,
            1
        );
    }

    #[test]
    fn toggle_sort_starts_ascending_then_flips() {
        let state = on_page(1);
        let toggle = TableAction::ToggleSort {
            column: "PRICE".into(),
        };

        let first = reduce(&state, &toggle, 1);
        assert_eq!(first.sort_by.as_deref(), Some("PRICE"));
        assert_eq!(first.sort_order, SortOrder::Asc);

        let second = reduce(&first, &toggle, 1);
        assert_eq!(second.sort_order, SortOrder::Desc);

        let other = reduce(
            &second,
            &TableAction::ToggleSort {
                column: "AUTHOR".into(),
            },
            1,
        );
        assert_eq!(other.sort_by.as_deref(), Some("AUTHOR"));
        assert_eq!(other.sort_order, SortOrder::Asc);
    }

    #[test]
    fn clear_sort_removes_column() {
        let state = reduce(
            &on_page(2),
            &TableAction::SetSort {
                column: "PRICE".into(),
                direction: SortOrder::Desc,
            },
            3,
        );
        let cleared = reduce(&state, &TableAction::ClearSort, 3);

        assert_eq!(cleared.sort_by, None);
        assert_eq!(cleared.sort_order, SortOrder::Asc);
    }

    #[test]
    fn navigation_stays_within_bounds_with_zero_pages() {
        let state = on_page(1);

        assert_eq!(reduce(&state, &TableAction::NextPage, 0).page, 1);
        assert_eq!(reduce(&state, &TableAction::PreviousPage, 0).page, 1);
        assert_eq!(reduce(&state, &TableAction::LastPage, 0).page, 1);
        assert_eq!(reduce(&state, &TableAction::SetPage(0), 0).page, 1);
    }

    #[test]
    fn next_and_last_follow_total_pages() {
        let state = on_page(2);

        assert_eq!(reduce(&state, &TableAction::NextPage, 3).page, 3);
        assert_eq!(reduce(&on_page(3), &TableAction::NextPage, 3).page, 3);
        assert_eq!(reduce(&state, &TableAction::LastPage, 7).page, 7);
        assert_eq!(reduce(&state, &TableAction::FirstPage, 7).page, 1);
    }
}
