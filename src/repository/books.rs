use async_trait::async_trait;

use crate::api::paths;
use crate::domain::book::{Book, NewBook, UpdateBook};
use crate::domain::page::{DeleteOutcome, ListPage};
use crate::domain::types::BookId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{BookReader, BookWriter, HttpRepository, ListQuery, optional};

#[async_trait]
impl BookReader for HttpRepository {
    async fn list_books(&self, query: ListQuery) -> RepositoryResult<ListPage<Book>> {
        let page = self
            .api
            .get_with_query(&paths::books(), &query.query_pairs())
            .await?;
        Ok(page)
    }

    async fn get_book_by_id(&self, id: &BookId) -> RepositoryResult<Option<Book>> {
        optional(self.api.get(&paths::book(id)).await)
    }
}

#[async_trait]
impl BookWriter for HttpRepository {
    async fn create_book(&self, book: &NewBook) -> RepositoryResult<Book> {
        Ok(self.api.post(&paths::books(), book).await?)
    }

    async fn update_book(&self, id: &BookId, updates: &UpdateBook) -> RepositoryResult<Book> {
        Ok(self.api.put(&paths::book(id), updates).await?)
    }

    async fn delete_book(&self, id: &BookId) -> RepositoryResult<DeleteOutcome> {
        Ok(self.api.delete(&paths::book(id)).await?)
    }
}
