use async_trait::async_trait;
use models::product::{self, Product};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(product::find_all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        Ok(product::find_by_id(&self.db, id).await?)
    }

    async fn save(&self, p: Product) -> Result<Product, ServiceError> {
        Ok(product::save(&self.db, p).await?)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(product::delete_by_id(&self.db, id).await?)
    }
}
