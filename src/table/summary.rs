use std::fmt::{Display, Formatter};

use serde::Serialize;

/// "Showing X to Y of Z results" bounds for the visible page.
///
/// Always satisfies `0 <= from <= to <= total`, including the empty case and
/// pages past the end of the data.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct PageSummary {
    pub from: usize,
    pub to: usize,
    pub total: usize,
}

impl PageSummary {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        if total == 0 {
            return Self {
                from: 0,
                to: 0,
                total: 0,
            };
        }

        let page = page.max(1);
        let limit = limit.max(1);
        let offset = (page - 1).saturating_mul(limit);
        let from = offset.saturating_add(1).min(total);
        let to = page.saturating_mul(limit).min(total).max(from);

        Self { from, to, total }
    }
}

impl Display for PageSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Showing {} to {} of {} results",
            self.from, self.to, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_total_reports_zeros() {
        let summary = PageSummary::new(1, 10, 0);
        assert_eq!(summary.to_string(), "Showing 0 to 0 of 0 results");
    }

    #[test]
    fn last_partial_page_is_capped_by_total() {
        let summary = PageSummary::new(3, 10, 25);
        assert_eq!((summary.from, summary.to, summary.total), (21, 25, 25));
    }

    #[test]
    fn bounds_hold_for_every_small_state() {
        for total in 0..40 {
            for limit in 0..12 {
                for page in 0..8 {
                    let s = PageSummary::new(page, limit, total);
                    assert!(s.from <= s.to, "{page} {limit} {total}");
                    assert!(s.to <= s.total, "{page} {limit} {total}");
                    assert_eq!(s.total, total);
                }
            }
        }
    }
}
