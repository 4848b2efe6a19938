use super::state::{ColumnDef, PaginationState, SortOrder, TableRow};

/// Visible subset of a fully fetched dataset.
#[derive(Debug)]
pub struct LocalPage<'a, R> {
    pub rows: Vec<&'a R>,
    /// Number of rows left after filtering, before pagination.
    pub filtered_count: usize,
    /// Page actually shown, clamped into `1..=total_pages`.
    pub page: usize,
    pub total_pages: usize,
}

/// Filters, sorts and paginates `rows` in memory.
///
/// Pure function of its inputs: the same rows and state always produce the
/// same visible subset. The sort is stable so equal keys keep their original
/// order.
pub fn compute_local_page<'a, R: TableRow>(
    rows: &'a [R],
    columns: &[ColumnDef],
    state: &PaginationState,
) -> LocalPage<'a, R> {
    let mut visible: Vec<&R> = match state.search_term() {
        Some(term) => rows.iter().filter(|row| row.matches(term, columns)).collect(),
        None => rows.iter().collect(),
    };

    if let Some(key) = state.sort_by.as_deref() {
        visible.sort_by(|a, b| {
            let ordering = a.cell(key).compare(&b.cell(key));
            match state.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    let filtered_count = visible.len();
    let limit = state.limit.max(1);
    let total_pages = filtered_count.div_ceil(limit);
    let page = state.page.clamp(1, total_pages.max(1));

    let rows = visible
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .collect();

    LocalPage {
        rows,
        filtered_count,
        page,
        total_pages,
    }
}
