//! Services behind the topics pages.

use validator::Validate;

use crate::api::paths::build_query_string;
use crate::cache::PageCache;
use crate::domain::page::{DeleteOutcome, ListPage};
use crate::domain::topic::{NewTopic, Topic, UpdateTopic};
use crate::domain::types::{TopicId, YesNo};
use crate::forms::topics::TopicForm;
use crate::paths;
use crate::repository::{ListQuery, TopicReader, TopicWriter};
use crate::services::{ServiceError, ServiceResult, require_id};

pub async fn list_topics<R>(repo: &R, cache: &PageCache, query: ListQuery) -> ListPage<Topic>
where
    R: TopicReader + ?Sized,
{
    let key = format!("{}{}", paths::TOPICS, build_query_string(&query.query_pairs()));
    if let Some(page) = cache.get(&key) {
        return page;
    }

    let page_number = query.state.page;
    match repo.list_topics(query).await {
        Ok(page) => {
            cache.insert(&key, &page);
            page
        }
        Err(err) => {
            log::error!("Failed to fetch topics list: {err}");
            ListPage::empty(page_number)
        }
    }
}

pub async fn get_topic<R>(repo: &R, cache: &PageCache, id: &str) -> ServiceResult<Topic>
where
    R: TopicReader + ?Sized,
{
    let topic_id: TopicId = require_id(id, "Topic")?;
    let key = paths::details(paths::TOPICS, &topic_id);
    if let Some(topic) = cache.get(&key) {
        return Ok(topic);
    }

    let topic = repo
        .get_topic_by_id(&topic_id)
        .await
        .map_err(|err| ServiceError::upstream(err, "Failed to fetch topic."))?
        .ok_or_else(|| ServiceError::NotFound("Topic not found".to_string()))?;
    cache.insert(&key, &topic);
    Ok(topic)
}

pub async fn create_topic<R>(repo: &R, cache: &PageCache, form: TopicForm) -> ServiceResult<Topic>
where
    R: TopicWriter + ?Sized,
{
    let form = form.normalized();
    form.validate()?;

    let topic = repo
        .create_topic(&NewTopic::from(form))
        .await
        .map_err(|err| ServiceError::upstream(err, "Failed to create topic. Please try again."))?;

    cache.invalidate(paths::TOPICS);
    Ok(topic)
}

pub async fn update_topic<R>(
    repo: &R,
    cache: &PageCache,
    id: &str,
    form: TopicForm,
) -> ServiceResult<Topic>
where
    R: TopicWriter + ?Sized,
{
    let topic_id: TopicId = require_id(id, "Topic")?;
    let form = form.normalized();
    form.validate()?;

    apply_update(
        repo,
        cache,
        &topic_id,
        &UpdateTopic::from(form),
        "Failed to update topic. Please try again.",
    )
    .await
}

pub async fn toggle_topic_status<R>(
    repo: &R,
    cache: &PageCache,
    id: &str,
    current: YesNo,
) -> ServiceResult<Topic>
where
    R: TopicWriter + ?Sized,
{
    let topic_id: TopicId = require_id(id, "Topic")?;
    apply_update(
        repo,
        cache,
        &topic_id,
        &UpdateTopic::active(current.toggled()),
        "Failed to update topic status. Please try again.",
    )
    .await
}

pub async fn delete_topic<R>(
    repo: &R,
    cache: &PageCache,
    id: &str,
) -> ServiceResult<DeleteOutcome>
where
    R: TopicWriter + ?Sized,
{
    let topic_id: TopicId = require_id(id, "Topic")?;

    let outcome = repo
        .delete_topic(&topic_id)
        .await
        .map_err(|err| ServiceError::upstream(err, "Failed to delete topic. Please try again."))?;
    if !outcome.success {
        return Err(ServiceError::Upstream(outcome.message));
    }

    cache.invalidate(paths::TOPICS);
    Ok(outcome)
}

async fn apply_update<R>(
    repo: &R,
    cache: &PageCache,
    topic_id: &TopicId,
    updates: &UpdateTopic,
    message: &str,
) -> ServiceResult<Topic>
where
    R: TopicWriter + ?Sized,
{
    let topic = repo
        .update_topic(topic_id, updates)
        .await
        .map_err(|err| ServiceError::upstream(err, message))?;

    cache.invalidate(paths::TOPICS);
    cache.invalidate(&paths::details(paths::TOPICS, topic_id));
    Ok(topic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn form(name: &str) -> TopicForm {
        TopicForm {
            topic_name: name.to_string(),
            stream: "Systems".to_string(),
            description: "Ownership and borrowing".to_string(),
            active: true,
        }
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_api() {
        let mut repo = MockRepository::new();
        repo.expect_create_topic().times(0);

        let err = create_topic(&repo, &PageCache::default(), form(""))
            .await
            .unwrap_err();

        assert!(err.field_errors().unwrap().contains_key("TOPIC_NAME"));
    }

    /// Ensures `success: false` from the API is treated as a failure.
    #[tokio::test]
    async fn delete_reported_as_failed_is_an_error() {
        let mut repo = MockRepository::new();
        repo.expect_delete_topic().returning(|_| {
            Ok(DeleteOutcome {
                success: false,
                message: "Topic still has questions".to_string(),
                deleted_id: None,
            })
        });

        let err = delete_topic(&repo, &PageCache::default(), "t1")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Topic still has questions");
    }

    #[tokio::test]
    async fn update_without_api_message_uses_generic_one() {
        let mut repo = MockRepository::new();
        repo.expect_update_topic().returning(|_, _| {
            Err(RepositoryError::Upstream {
                status: 500,
                message: None,
            })
        });

        let err = update_topic(&repo, &PageCache::default(), "t1", form("Rust"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to update topic. Please try again.");
    }
}
