use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::topic::{NewTopic, UpdateTopic};
use crate::domain::types::YesNo;
use crate::forms::{checkbox, sanitize};

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Create/edit form for a topic.
pub struct TopicForm {
    #[validate(length(min = 1, max = 100, message = "Topic name must be 1 to 100 characters"))]
    pub topic_name: String,
    #[validate(length(min = 1, max = 100, message = "Stream must be 1 to 100 characters"))]
    pub stream: String,
    #[validate(length(min = 1, max = 500, message = "Description must be 1 to 500 characters"))]
    pub description: String,
    #[serde(default, deserialize_with = "checkbox")]
    pub active: bool,
}

impl TopicForm {
    pub fn normalized(mut self) -> Self {
        self.topic_name = self.topic_name.trim().to_string();
        self.stream = self.stream.trim().to_string();
        self.description = sanitize(&self.description);
        self
    }
}

impl From<TopicForm> for NewTopic {
    fn from(form: TopicForm) -> Self {
        Self {
            topic_name: form.topic_name,
            stream: form.stream,
            description: form.description,
            active: YesNo::from(form.active),
        }
    }
}

impl From<TopicForm> for UpdateTopic {
    fn from(form: TopicForm) -> Self {
        Self {
            topic_name: Some(form.topic_name),
            stream: Some(form.stream),
            description: Some(form.description),
            active: Some(YesNo::from(form.active)),
        }
    }
}
