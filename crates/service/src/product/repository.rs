use async_trait::async_trait;
use models::product::Product;

use crate::errors::ServiceError;
use crate::storage::json_table::JsonTable;

/// Store capability consumed by [`super::ProductService`]: products keyed by
/// a store-assigned integer id.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError>;
    /// Insert when `product.id` is `None` (a fresh id is assigned), otherwise
    /// write the record under its id. Returns the stored record.
    async fn save(&self, product: Product) -> Result<Product, ServiceError>;
    /// Idempotent; returns whether a record was removed.
    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Table-backed store: process-local, or mirrored to a JSON file.
#[derive(Clone)]
pub struct TableProductRepository {
    table: JsonTable<Product>,
}

impl TableProductRepository {
    pub fn in_memory() -> Self {
        Self { table: JsonTable::in_memory() }
    }

    pub async fn open<P: Into<std::path::PathBuf>>(path: P) -> Result<Self, ServiceError> {
        Ok(Self { table: JsonTable::open(path).await? })
    }
}

#[async_trait]
impl ProductRepository for TableProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.table.list().await)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        Ok(self.table.get(id).await)
    }

    async fn save(&self, product: Product) -> Result<Product, ServiceError> {
        self.table
            .upsert_with(product.id, |id| Product { id: Some(id), ..product })
            .await
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        self.table.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str) -> Product {
        Product { id: None, name: name.into(), quantity: 1, price: 1.0, observation: None }
    }

    #[tokio::test]
    async fn save_assigns_ids_and_overwrites_by_id() -> Result<(), anyhow::Error> {
        let repo = TableProductRepository::in_memory();
        let a = repo.save(product("a")).await?;
        let b = repo.save(product("b")).await?;
        assert_eq!((a.id, b.id), (Some(1), Some(2)));

        let renamed = repo.save(Product { name: "a2".into(), ..a }).await?;
        assert_eq!(renamed.id, Some(1));
        assert_eq!(repo.find_by_id(1).await?.map(|p| p.name), Some("a2".to_string()));
        assert_eq!(repo.find_all().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn file_store_reopens_with_same_records() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("products_{}.json", uuid::Uuid::new_v4()));
        let repo = TableProductRepository::open(&tmp).await?;
        let saved = repo.save(product("persisted")).await?;

        let reopened = TableProductRepository::open(&tmp).await?;
        assert_eq!(reopened.find_by_id(1).await?, Some(saved));
        assert!(reopened.delete_by_id(1).await?);
        assert!(!reopened.delete_by_id(1).await?);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
