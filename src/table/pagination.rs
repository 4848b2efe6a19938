//! Numbered page window shown under a table.

/// Returns the page numbers to render, with `None` standing for an ellipsis.
///
/// Shows `left_edge` pages at the start, `left_current`/`right_current` pages
/// around `current_page` and `right_edge` pages at the end.
pub fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Page window with the default edge sizes used by the dashboard tables.
pub fn page_window(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    get_pages(total_pages, current_page.max(1), 2, 2, 4, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_pages_for_empty_results() {
        assert!(page_window(0, 1).is_empty());
    }

    #[test]
    fn short_ranges_have_no_gaps() {
        assert_eq!(
            page_window(4, 2),
            vec![Some(1), Some(2), Some(3), Some(4)]
        );
    }

    #[test]
    fn long_ranges_collapse_into_ellipses() {
        assert_eq!(
            page_window(20, 10),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20)
            ]
        );
    }
}
