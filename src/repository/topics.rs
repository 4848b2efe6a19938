use async_trait::async_trait;

use crate::api::paths;
use crate::domain::page::{DeleteOutcome, ListPage};
use crate::domain::topic::{NewTopic, Topic, TopicEnvelope, UpdateTopic};
use crate::domain::types::TopicId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{HttpRepository, ListQuery, TopicReader, TopicWriter, optional};

#[async_trait]
impl TopicReader for HttpRepository {
    async fn list_topics(&self, query: ListQuery) -> RepositoryResult<ListPage<Topic>> {
        let page = self
            .api
            .get_with_query(&paths::topics(), &query.query_pairs())
            .await?;
        Ok(page)
    }

    async fn get_topic_by_id(&self, id: &TopicId) -> RepositoryResult<Option<Topic>> {
        let envelope: Option<TopicEnvelope> = optional(self.api.get(&paths::topic(id)).await)?;
        Ok(envelope.map(TopicEnvelope::into_topic))
    }
}

#[async_trait]
impl TopicWriter for HttpRepository {
    async fn create_topic(&self, topic: &NewTopic) -> RepositoryResult<Topic> {
        let envelope: TopicEnvelope = self.api.post(&paths::topics(), topic).await?;
        Ok(envelope.into_topic())
    }

    async fn update_topic(&self, id: &TopicId, updates: &UpdateTopic) -> RepositoryResult<Topic> {
        let envelope: TopicEnvelope = self.api.put(&paths::topic(id), updates).await?;
        Ok(envelope.into_topic())
    }

    async fn delete_topic(&self, id: &TopicId) -> RepositoryResult<DeleteOutcome> {
        Ok(self.api.delete(&paths::topic(id)).await?)
    }
}
