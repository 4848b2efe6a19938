use serde::{Deserialize, Serialize};

use crate::domain::types::{QueryId, TopicId, YesNo};
use crate::table::{CellValue, ColumnDef, TableRow};

/// Q&A questions are listed without server pagination, so every column sorts
/// locally.
pub const QANDA_COLUMNS: [ColumnDef; 7] = [
    ColumnDef::sortable("QUERY", "Question"),
    ColumnDef::sortable("QUERY_TYPE", "Type"),
    ColumnDef::sortable("TOPIC_ID", "Topic"),
    ColumnDef::sortable("MARKS_PER_QUERY", "Marks"),
    ColumnDef::sortable("MINUS_MARKS_PERC", "Negative %"),
    ColumnDef::sortable("MULTI_CHOICE", "Multi choice"),
    ColumnDef::sortable("ACTIVE", "Active"),
];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct QandA {
    pub query_id: QueryId,
    pub topic_id: TopicId,
    pub query: String,
    pub query_type: String,
    pub marks_per_query: i64,
    pub minus_marks_perc: i64,
    pub active: YesNo,
    pub multi_choice: YesNo,
    #[serde(default)]
    pub lookup_values: String,
}

impl TableRow for QandA {
    fn row_id(&self) -> String {
        self.query_id.to_string()
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "QUERY" => CellValue::from(&self.query),
            "QUERY_TYPE" => CellValue::from(&self.query_type),
            "TOPIC_ID" => CellValue::from(self.topic_id.as_str()),
            "MARKS_PER_QUERY" => CellValue::from(self.marks_per_query),
            "MINUS_MARKS_PERC" => CellValue::from(self.minus_marks_perc),
            "MULTI_CHOICE" => CellValue::from(self.multi_choice.as_str()),
            "ACTIVE" => CellValue::from(self.active.as_str()),
            "LOOKUP_VALUES" => CellValue::from(&self.lookup_values),
            _ => CellValue::Empty,
        }
    }

    /// Search covers the question text, its type and the answer options.
    fn matches(&self, term: &str, _columns: &[ColumnDef]) -> bool {
        let term = term.to_lowercase();
        [&self.query, &self.query_type, &self.lookup_values]
            .iter()
            .any(|value| value.to_lowercase().contains(&term))
    }
}

/// Payload of `POST /qna`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewQandA {
    pub topic_id: String,
    pub query: String,
    pub query_type: String,
    pub marks_per_query: i64,
    pub minus_marks_perc: i64,
    pub active: YesNo,
    pub multi_choice: YesNo,
    pub lookup_values: String,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct UpdateQandA {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks_per_query: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minus_marks_perc: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_choice: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_values: Option<String>,
}

impl UpdateQandA {
    pub fn active(active: YesNo) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }
}

/// Tri-state flag filter: `all` (or absent) means "do not filter".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlagFilter {
    #[default]
    All,
    Only(YesNo),
}

impl FlagFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse::<YesNo>().ok())
            .map_or(FlagFilter::All, FlagFilter::Only)
    }

    pub fn as_param(self) -> Option<&'static str> {
        match self {
            FlagFilter::All => None,
            FlagFilter::Only(flag) => Some(flag.as_str()),
        }
    }
}

/// Filters forwarded to the Q&A list endpoint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QandAFilter {
    pub search: Option<String>,
    pub query_type: Option<String>,
    pub active: FlagFilter,
    pub multi_choice: FlagFilter,
    pub lookup_values: Option<String>,
    pub min_marks: Option<i64>,
    pub max_marks: Option<i64>,
    pub topic_id: Option<String>,
}

impl QandAFilter {
    /// Query parameters with unset filters omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                pairs.push((key, value.trim().to_string()));
            }
        };
        push("search", self.search.clone());
        push("queryType", self.query_type.clone());
        push("active", self.active.as_param().map(str::to_string));
        push("multiChoice", self.multi_choice.as_param().map(str::to_string));
        push("lookupValues", self.lookup_values.clone());
        // Zero bounds are treated as unset.
        push("minMarks", self.min_marks.filter(|m| *m != 0).map(|m| m.to_string()));
        push("maxMarks", self.max_marks.filter(|m| *m != 0).map(|m| m.to_string()));
        push("topicId", self.topic_id.clone());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(query: &str, lookup: &str) -> QandA {
        QandA {
            query_id: QueryId::new("q1").unwrap(),
            topic_id: TopicId::new("t1").unwrap(),
            query: query.to_string(),
            query_type: "MCQ".to_string(),
            marks_per_query: 2,
            minus_marks_perc: 25,
            active: YesNo::Yes,
            multi_choice: YesNo::No,
            lookup_values: lookup.to_string(),
        }
    }

    #[test]
    fn search_matches_lookup_values() {
        let q = question("Which keyword declares a constant?", "const,let,static");
        assert!(q.matches("STATIC", &QANDA_COLUMNS));
        assert!(!q.matches("trait", &QANDA_COLUMNS));
    }

    #[test]
    fn filter_skips_all_and_blank_values() {
        let filter = QandAFilter {
            search: Some("  ".into()),
            active: FlagFilter::parse(Some("all")),
            multi_choice: FlagFilter::parse(Some("Y")),
            min_marks: Some(0),
            max_marks: Some(5),
            ..QandAFilter::default()
        };
        assert_eq!(
            filter.query_pairs(),
            vec![("multiChoice", "Y".to_string()), ("maxMarks", "5".to_string())]
        );
    }
}
