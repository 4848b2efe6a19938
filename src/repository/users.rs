use async_trait::async_trait;

use crate::api::paths;
use crate::domain::page::ListPage;
use crate::domain::types::UserId;
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{HttpRepository, ListQuery, UserReader, UserWriter, optional};

#[async_trait]
impl UserReader for HttpRepository {
    async fn list_users(&self, query: ListQuery) -> RepositoryResult<ListPage<User>> {
        let page = self
            .api
            .get_with_query(&paths::users(), &query.query_pairs())
            .await?;
        Ok(page)
    }

    async fn get_user_by_id(&self, id: &UserId) -> RepositoryResult<Option<User>> {
        optional(self.api.get(&paths::user(id)).await)
    }
}

#[async_trait]
impl UserWriter for HttpRepository {
    async fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        Ok(self.api.post(&paths::users(), user).await?)
    }

    async fn update_user(&self, id: &UserId, updates: &UpdateUser) -> RepositoryResult<User> {
        Ok(self.api.put(&paths::user(id), updates).await?)
    }

    /// The users endpoint answers delete with an arbitrary body; only the
    /// status matters.
    async fn delete_user(&self, id: &UserId) -> RepositoryResult<()> {
        Ok(self.api.delete_unit(&paths::user(id)).await?)
    }
}
