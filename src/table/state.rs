use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

/// Direction of the active sort.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Lenient parse used for query strings; anything but `desc` is ascending.
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the table recomputes its view in memory or delegates to a refetch.
///
/// Fixed per table instance at configuration time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableMode {
    Local,
    Server,
}

/// Pagination, sort and search state of a table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    /// 1-based page number.
    pub page: usize,
    /// Page size, always at least 1.
    pub limit: usize,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
    pub search: String,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            sort_by: None,
            sort_order: SortOrder::Asc,
            search: String::new(),
        }
    }
}

impl PaginationState {
    /// Builds a state from raw query parameters.
    ///
    /// Pages below 1 become 1, a zero or unparsable limit falls back to
    /// `default_limit`, and `sortBy` is dropped unless it names one of the
    /// sortable `columns`.
    pub fn from_query(query: &TableQuery, columns: &[ColumnDef], default_limit: usize) -> Self {
        let page = parse_positive(query.page.as_deref()).unwrap_or(1);
        let limit = parse_positive(query.limit.as_deref()).unwrap_or(default_limit.max(1));
        let sort_by = query
            .sort_by
            .as_deref()
            .map(str::trim)
            .filter(|key| columns.iter().any(|c| c.sortable && c.key == *key))
            .map(str::to_string);
        let sort_order = query
            .sort_order
            .as_deref()
            .map(SortOrder::parse_lenient)
            .unwrap_or_default();
        let search = query.search.as_deref().unwrap_or("").trim().to_string();

        Self {
            page,
            limit,
            sort_by,
            sort_order,
            search,
        }
    }

    /// Trimmed search term, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        if term.is_empty() { None } else { Some(term) }
    }

    /// Query parameters describing this state, omitting defaults that carry no
    /// information (blank search, missing sort column).
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sortBy", sort_by.clone()));
            pairs.push(("sortOrder", self.sort_order.to_string()));
        }
        if let Some(term) = self.search_term() {
            pairs.push(("search", term.to_string()));
        }
        pairs
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value > 0)
}

/// Raw, untrusted table parameters as they arrive in a query string.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
}

/// Column descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    /// Field identifier, also used as the `sortBy` value.
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
}

impl ColumnDef {
    pub const fn sortable(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: true,
        }
    }

    pub const fn plain(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: false,
        }
    }
}

/// Typed cell content used for local sorting and rendering.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Empty,
}

impl CellValue {
    /// Total order: empty cells first, numbers numerically, text
    /// case-insensitively.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Empty, Empty) => Ordering::Equal,
            (Empty, _) => Ordering::Less,
            (_, Empty) => Ordering::Greater,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Decimal(a), Decimal(b)) => a.total_cmp(b),
            (Integer(a), Decimal(b)) => (*a as f64).total_cmp(b),
            (Decimal(a), Integer(b)) => a.total_cmp(&(*b as f64)),
            (Text(a), Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (a, b) => a.to_string().cmp(&b.to_string()),
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(value) => f.write_str(value),
            CellValue::Integer(value) => write!(f, "{value}"),
            CellValue::Decimal(value) => write!(f, "{value:.2}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::from(value.as_str())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Decimal(value)
    }
}

/// A record that can be displayed by the table controller.
pub trait TableRow {
    /// Identifier used to build row links.
    fn row_id(&self) -> String;

    /// Value of the column named `key`; unknown keys yield [`CellValue::Empty`].
    fn cell(&self, key: &str) -> CellValue;

    /// Whether the row matches a free-text search term over `columns`.
    fn matches(&self, term: &str, columns: &[ColumnDef]) -> bool {
        let needle = term.to_lowercase();
        columns
            .iter()
            .any(|column| self.cell(column.key).to_string().to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: [ColumnDef; 2] = [
        ColumnDef::sortable("NAME", "Name"),
        ColumnDef::plain("NOTES", "Notes"),
    ];

    #[test]
    fn from_query_coerces_invalid_values() {
        let query = TableQuery {
            page: Some("0".into()),
            limit: Some("abc".into()),
            sort_by: Some("NOTES".into()),
            sort_order: Some("DESC".into()),
            search: Some("  rust ".into()),
        };

        let state = PaginationState::from_query(&query, &COLUMNS, 20);

        assert_eq!(state.page, 1);
        assert_eq!(state.limit, 20);
        assert_eq!(state.sort_by, None);
        assert_eq!(state.sort_order, SortOrder::Desc);
        assert_eq!(state.search, "rust");
    }

    #[test]
    fn query_pairs_skip_blank_search_and_sort() {
        let state = PaginationState::default();
        assert_eq!(
            state.query_pairs(),
            vec![("page", "1".to_string()), ("limit", "10".to_string())]
        );
    }

    #[test]
    fn cell_values_order_numbers_numerically() {
        assert_eq!(
            CellValue::Integer(9).compare(&CellValue::Integer(10)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Text("b".into()).compare(&CellValue::Text("A".into())),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::Empty.compare(&CellValue::Decimal(1.0)),
            Ordering::Less
        );
    }
}
