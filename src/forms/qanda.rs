use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::qanda::{FlagFilter, NewQandA, QandAFilter, UpdateQandA};
use crate::domain::types::{YesNo, non_blank};
use crate::forms::{checkbox, optional_number, sanitize};

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Create/edit form for a Q&A question.
pub struct QandAForm {
    #[validate(length(min = 1, message = "Topic is required"))]
    pub topic_id: String,
    #[validate(length(min = 10, message = "Query must be at least 10 characters"))]
    pub query: String,
    #[validate(length(min = 1, message = "Query type is required"))]
    pub query_type: String,
    #[serde(default, deserialize_with = "optional_number")]
    #[validate(
        required(message = "Marks are required"),
        range(min = 1, max = 100, message = "Marks must be between 1 and 100")
    )]
    pub marks_per_query: Option<i64>,
    #[serde(default, deserialize_with = "optional_number")]
    #[validate(
        required(message = "Minus marks percentage is required"),
        range(min = 0, max = 100, message = "Minus marks percentage must be between 0 and 100")
    )]
    pub minus_marks_perc: Option<i64>,
    #[serde(default, deserialize_with = "checkbox")]
    pub active: bool,
    #[serde(default, deserialize_with = "checkbox")]
    pub multi_choice: bool,
    #[serde(default)]
    pub lookup_values: String,
}

impl QandAForm {
    pub fn normalized(mut self) -> Self {
        self.topic_id = self.topic_id.trim().to_string();
        self.query = sanitize(&self.query);
        self.query_type = self.query_type.trim().to_string();
        self.lookup_values = self.lookup_values.trim().to_string();
        self
    }
}

impl From<QandAForm> for NewQandA {
    fn from(form: QandAForm) -> Self {
        Self {
            topic_id: form.topic_id,
            query: form.query,
            query_type: form.query_type,
            marks_per_query: form.marks_per_query.unwrap_or_default(),
            minus_marks_perc: form.minus_marks_perc.unwrap_or_default(),
            active: YesNo::from(form.active),
            multi_choice: YesNo::from(form.multi_choice),
            lookup_values: form.lookup_values,
        }
    }
}

impl From<QandAForm> for UpdateQandA {
    fn from(form: QandAForm) -> Self {
        Self {
            topic_id: Some(form.topic_id),
            query: Some(form.query),
            query_type: Some(form.query_type),
            marks_per_query: form.marks_per_query,
            minus_marks_perc: form.minus_marks_perc,
            active: Some(YesNo::from(form.active)),
            multi_choice: Some(YesNo::from(form.multi_choice)),
            lookup_values: Some(form.lookup_values),
        }
    }
}

/// Filter bar of the Q&A list page, as submitted in the query string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QandAFilterQuery {
    pub query_type: Option<String>,
    pub active: Option<String>,
    pub multi_choice: Option<String>,
    pub lookup_values: Option<String>,
    #[serde(default, deserialize_with = "optional_number")]
    pub min_marks: Option<i64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub max_marks: Option<i64>,
    pub topic_id: Option<String>,
}

impl QandAFilterQuery {
    /// Builds the upstream filter. The free-text search is applied locally by
    /// the table, so it is not forwarded.
    pub fn to_filter(&self) -> QandAFilter {
        QandAFilter {
            search: None,
            query_type: self.query_type.clone().and_then(non_blank),
            active: FlagFilter::parse(self.active.as_deref()),
            multi_choice: FlagFilter::parse(self.multi_choice.as_deref()),
            lookup_values: self.lookup_values.clone().and_then(non_blank),
            min_marks: self.min_marks,
            max_marks: self.max_marks,
            topic_id: self.topic_id.clone().and_then(non_blank),
        }
    }

    /// Non-empty filters as query pairs, for carrying them through table links.
    pub fn link_params(&self) -> Vec<(&'static str, String)> {
        self.to_filter().query_pairs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::field_errors;

    #[test]
    fn short_query_and_out_of_range_marks_are_rejected() {
        let form = QandAForm {
            topic_id: "t1".into(),
            query: "Too short".into(),
            query_type: "MCQ".into(),
            marks_per_query: Some(101),
            minus_marks_perc: Some(0),
            active: true,
            multi_choice: false,
            lookup_values: String::new(),
        };

        let errors = field_errors(&form.validate().unwrap_err());
        assert!(errors.contains_key("QUERY"));
        assert!(errors.contains_key("MARKS_PER_QUERY"));
        assert!(!errors.contains_key("MINUS_MARKS_PERC"));
    }

    #[test]
    fn checkboxes_become_flags() {
        let form: QandAForm = serde_html_form::from_str(
            "TOPIC_ID=t1&QUERY=What+is+ownership%3F&QUERY_TYPE=TEXT\
             &MARKS_PER_QUERY=5&MINUS_MARKS_PERC=0&MULTI_CHOICE=on",
        )
        .unwrap();
        let payload = NewQandA::from(form);
        assert_eq!(payload.active, YesNo::No);
        assert_eq!(payload.multi_choice, YesNo::Yes);
    }

    #[test]
    fn filter_query_drops_all_flags() {
        let query: QandAFilterQuery =
            serde_html_form::from_str("active=all&multiChoice=N&minMarks=&topicId=t9").unwrap();
        let filter = query.to_filter();
        assert_eq!(filter.active, FlagFilter::All);
        assert_eq!(filter.multi_choice, FlagFilter::Only(YesNo::No));
        assert_eq!(filter.min_marks, None);
        assert_eq!(filter.topic_id.as_deref(), Some("t9"));
    }
}
