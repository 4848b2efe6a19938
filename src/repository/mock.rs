//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::book::{Book, NewBook, UpdateBook};
use crate::domain::page::{DeleteOutcome, ListPage};
use crate::domain::qanda::{NewQandA, QandA, QandAFilter, UpdateQandA};
use crate::domain::topic::{NewTopic, Topic, UpdateTopic};
use crate::domain::types::{BookId, QueryId, TopicId, UserId};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    BookReader, BookWriter, ListQuery, QandAReader, QandAWriter, TopicReader, TopicWriter,
    UserReader, UserWriter,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl BookReader for Repository {
        async fn list_books(&self, query: ListQuery) -> RepositoryResult<ListPage<Book>>;
        async fn get_book_by_id(&self, id: &BookId) -> RepositoryResult<Option<Book>>;
    }

    #[async_trait]
    impl BookWriter for Repository {
        async fn create_book(&self, book: &NewBook) -> RepositoryResult<Book>;
        async fn update_book(&self, id: &BookId, updates: &UpdateBook) -> RepositoryResult<Book>;
        async fn delete_book(&self, id: &BookId) -> RepositoryResult<DeleteOutcome>;
    }

    #[async_trait]
    impl TopicReader for Repository {
        async fn list_topics(&self, query: ListQuery) -> RepositoryResult<ListPage<Topic>>;
        async fn get_topic_by_id(&self, id: &TopicId) -> RepositoryResult<Option<Topic>>;
    }

    #[async_trait]
    impl TopicWriter for Repository {
        async fn create_topic(&self, topic: &NewTopic) -> RepositoryResult<Topic>;
        async fn update_topic(&self, id: &TopicId, updates: &UpdateTopic) -> RepositoryResult<Topic>;
        async fn delete_topic(&self, id: &TopicId) -> RepositoryResult<DeleteOutcome>;
    }

    #[async_trait]
    impl QandAReader for Repository {
        async fn list_qanda(&self, filter: &QandAFilter) -> RepositoryResult<Vec<QandA>>;
        async fn get_qanda_by_id(&self, id: &QueryId) -> RepositoryResult<Option<QandA>>;
    }

    #[async_trait]
    impl QandAWriter for Repository {
        async fn create_qanda(&self, qanda: &NewQandA) -> RepositoryResult<QandA>;
        async fn update_qanda(&self, id: &QueryId, updates: &UpdateQandA) -> RepositoryResult<QandA>;
        async fn delete_qanda(&self, id: &QueryId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl UserReader for Repository {
        async fn list_users(&self, query: ListQuery) -> RepositoryResult<ListPage<User>>;
        async fn get_user_by_id(&self, id: &UserId) -> RepositoryResult<Option<User>>;
    }

    #[async_trait]
    impl UserWriter for Repository {
        async fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
        async fn update_user(&self, id: &UserId, updates: &UpdateUser) -> RepositoryResult<User>;
        async fn delete_user(&self, id: &UserId) -> RepositoryResult<()>;
    }
}
