use async_trait::async_trait;

use crate::api::{ApiClient, ApiResult};
use crate::domain::book::{Book, NewBook, UpdateBook};
use crate::domain::page::{DeleteOutcome, ListPage};
use crate::domain::qanda::{NewQandA, QandA, QandAFilter, UpdateQandA};
use crate::domain::topic::{NewTopic, Topic, UpdateTopic};
use crate::domain::types::{BookId, QueryId, TopicId, UserId};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::table::{PaginationState, SortOrder};

pub mod books;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod qanda;
pub mod topics;
pub mod users;

/// Filter keys accepted by `GET /books` besides the table state.
pub const BOOK_FILTERS: [&str; 3] = ["category", "author", "active"];
pub const TOPIC_FILTERS: [&str; 3] = ["TOPIC_NAME", "STREAM", "ACTIVE"];
pub const USER_FILTERS: [&str; 7] = [
    "USER_NAME",
    "NAME",
    "USER_ROLE",
    "ACTIVE",
    "LOOKUP_VALUES",
    "BATCH_NAME",
    "DEPARTMENT",
];

/// Parameters of a server-paginated list call.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub state: PaginationState,
    pub filters: Vec<(&'static str, String)>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self {
            state: PaginationState::default(),
            filters: Vec::new(),
        }
    }

    pub fn from_state(state: PaginationState) -> Self {
        Self {
            state,
            filters: Vec::new(),
        }
    }

    pub fn paginate(mut self, page: usize, limit: usize) -> Self {
        self.state.page = page.max(1);
        self.state.limit = limit.max(1);
        self
    }

    pub fn sort(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.state.sort_by = Some(column.into());
        self.state.sort_order = order;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.state.search = term.into();
        self
    }

    /// Adds an entity-specific filter. Blank values are ignored.
    pub fn filter(mut self, key: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.filters.push((key, value.trim().to_string()));
        }
        self
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.state.query_pairs();
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}

#[async_trait]
pub trait BookReader {
    async fn list_books(&self, query: ListQuery) -> RepositoryResult<ListPage<Book>>;
    async fn get_book_by_id(&self, id: &BookId) -> RepositoryResult<Option<Book>>;
}

#[async_trait]
pub trait BookWriter {
    async fn create_book(&self, book: &NewBook) -> RepositoryResult<Book>;
    async fn update_book(&self, id: &BookId, updates: &UpdateBook) -> RepositoryResult<Book>;
    async fn delete_book(&self, id: &BookId) -> RepositoryResult<DeleteOutcome>;
}

#[async_trait]
pub trait TopicReader {
    async fn list_topics(&self, query: ListQuery) -> RepositoryResult<ListPage<Topic>>;
    async fn get_topic_by_id(&self, id: &TopicId) -> RepositoryResult<Option<Topic>>;
}

#[async_trait]
pub trait TopicWriter {
    async fn create_topic(&self, topic: &NewTopic) -> RepositoryResult<Topic>;
    async fn update_topic(&self, id: &TopicId, updates: &UpdateTopic) -> RepositoryResult<Topic>;
    async fn delete_topic(&self, id: &TopicId) -> RepositoryResult<DeleteOutcome>;
}

/// Q&A questions come back as a bare array: the table pages them locally.
#[async_trait]
pub trait QandAReader {
    async fn list_qanda(&self, filter: &QandAFilter) -> RepositoryResult<Vec<QandA>>;
    async fn get_qanda_by_id(&self, id: &QueryId) -> RepositoryResult<Option<QandA>>;
}

#[async_trait]
pub trait QandAWriter {
    async fn create_qanda(&self, qanda: &NewQandA) -> RepositoryResult<QandA>;
    async fn update_qanda(&self, id: &QueryId, updates: &UpdateQandA) -> RepositoryResult<QandA>;
    async fn delete_qanda(&self, id: &QueryId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait UserReader {
    async fn list_users(&self, query: ListQuery) -> RepositoryResult<ListPage<User>>;
    async fn get_user_by_id(&self, id: &UserId) -> RepositoryResult<Option<User>>;
}

#[async_trait]
pub trait UserWriter {
    async fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
    async fn update_user(&self, id: &UserId, updates: &UpdateUser) -> RepositoryResult<User>;
    async fn delete_user(&self, id: &UserId) -> RepositoryResult<()>;
}

/// Repository backed by the upstream REST API.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    api: ApiClient,
    qanda_collection: String,
}

impl HttpRepository {
    pub fn new(api: ApiClient, qanda_collection: impl Into<String>) -> Self {
        Self {
            api,
            qanda_collection: qanda_collection.into(),
        }
    }
}

/// Maps a 404 to `Ok(None)` for single-entity lookups.
fn optional<T>(result: ApiResult<T>) -> RepositoryResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(RepositoryError::from(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_appends_filters_after_state() {
        let query = ListQuery::new()
            .paginate(2, 20)
            .sort("PRICE", SortOrder::Desc)
            .filter("category", "Fiction")
            .filter("author", "  ");

        assert_eq!(
            query.query_pairs(),
            vec![
                ("page", "2".to_string()),
                ("limit", "20".to_string()),
                ("sortBy", "PRICE".to_string()),
                ("sortOrder", "desc".to_string()),
                ("category", "Fiction".to_string()),
            ]
        );
    }
}
