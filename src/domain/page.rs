//! Envelope shapes shared by every list and delete endpoint.

use serde::{Deserialize, Serialize};

/// One page of a server-paginated collection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<T> {
    pub data: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Some endpoints spell the counter in lower case.
    #[serde(alias = "totalcount")]
    pub total_count: usize,
}

impl<T> ListPage<T> {
    /// Empty result used when a list fetch fails and the page degrades.
    pub fn empty(current_page: usize) -> Self {
        Self {
            data: Vec::new(),
            current_page: current_page.max(1),
            total_pages: 0,
            total_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Body returned by delete endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_id: Option<String>,
}

impl DeleteOutcome {
    /// Outcome synthesized for endpoints that answer with an empty body.
    pub fn deleted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            deleted_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_page_accepts_lowercase_total_count() {
        let page: ListPage<String> = serde_json::from_str(
            r#"{"data":["a"],"currentPage":1,"totalPages":1,"totalcount":1}"#,
        )
        .unwrap();
        assert_eq!(page.total_count, 1);
    }

    #[test]
    fn empty_page_never_reports_page_zero() {
        let page: ListPage<String> = ListPage::empty(0);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.is_empty());
    }
}
