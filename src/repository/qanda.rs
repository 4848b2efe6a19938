use async_trait::async_trait;

use crate::api::paths;
use crate::domain::qanda::{NewQandA, QandA, QandAFilter, UpdateQandA};
use crate::domain::types::QueryId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{HttpRepository, QandAReader, QandAWriter, optional};

#[async_trait]
impl QandAReader for HttpRepository {
    async fn list_qanda(&self, filter: &QandAFilter) -> RepositoryResult<Vec<QandA>> {
        let path = paths::qanda_collection(&self.qanda_collection);
        let items = self.api.get_with_query(&path, &filter.query_pairs()).await?;
        Ok(items)
    }

    async fn get_qanda_by_id(&self, id: &QueryId) -> RepositoryResult<Option<QandA>> {
        optional(self.api.get(&paths::qanda(id)).await)
    }
}

#[async_trait]
impl QandAWriter for HttpRepository {
    async fn create_qanda(&self, qanda: &NewQandA) -> RepositoryResult<QandA> {
        Ok(self.api.post(&paths::qanda_root(), qanda).await?)
    }

    async fn update_qanda(&self, id: &QueryId, updates: &UpdateQandA) -> RepositoryResult<QandA> {
        Ok(self.api.put(&paths::qanda(id), updates).await?)
    }

    async fn delete_qanda(&self, id: &QueryId) -> RepositoryResult<()> {
        Ok(self.api.delete_unit(&paths::qanda(id)).await?)
    }
}
