use serde::{Deserialize, Serialize};

use crate::domain::types::{TopicId, YesNo};
use crate::table::{CellValue, ColumnDef, TableRow};

pub const TOPIC_COLUMNS: [ColumnDef; 5] = [
    ColumnDef::sortable("TOPIC_NAME", "Topic"),
    ColumnDef::sortable("STREAM", "Stream"),
    ColumnDef::sortable("QUERIES_COUNT", "Questions"),
    ColumnDef::sortable("CREATION_DATE", "Created"),
    ColumnDef::plain("ACTIVE", "Active"),
];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Topic {
    pub topic_id: TopicId,
    pub topic_name: String,
    pub stream: String,
    pub description: String,
    #[serde(default)]
    pub active: YesNo,
    pub creation_date: String,
    #[serde(default)]
    pub queries_count: u32,
}

impl TableRow for Topic {
    fn row_id(&self) -> String {
        self.topic_id.to_string()
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "TOPIC_NAME" => CellValue::from(&self.topic_name),
            "STREAM" => CellValue::from(&self.stream),
            "QUERIES_COUNT" => CellValue::from(i64::from(self.queries_count)),
            "CREATION_DATE" => CellValue::from(super::display_date(&self.creation_date).as_str()),
            "ACTIVE" => CellValue::from(self.active.as_str()),
            "DESCRIPTION" => CellValue::from(&self.description),
            _ => CellValue::Empty,
        }
    }
}

/// Body of single-topic responses.
///
/// The API documents `{ data, message? }`, but some deployments answer with
/// the bare record; both are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TopicEnvelope {
    Wrapped {
        data: Topic,
        #[serde(default)]
        message: Option<String>,
    },
    Bare(Topic),
}

impl TopicEnvelope {
    pub fn into_topic(self) -> Topic {
        match self {
            TopicEnvelope::Wrapped { data, .. } => data,
            TopicEnvelope::Bare(topic) => topic,
        }
    }
}

/// Payload of `POST /topics`. Id, creation date and question count are
/// assigned upstream.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewTopic {
    pub topic_name: String,
    pub stream: String,
    pub description: String,
    pub active: YesNo,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct UpdateTopic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<YesNo>,
}

impl UpdateTopic {
    pub fn active(active: YesNo) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }
}
