use std::sync::Arc;

use common::metrics;
use configs::UpdatePolicy;
use models::product::Product;
use tracing::{debug, info, instrument, warn};

use crate::errors::ServiceError;
use crate::product::dto::ProductDto;
use crate::product::repository::ProductRepository;

/// Application service encapsulating product business rules.
///
/// Sole mediator between [`ProductDto`] and the persisted [`Product`]: it owns
/// existence checks and identity assignment. Holds no mutable state, so one
/// instance can be shared across concurrent callers.
pub struct ProductService<R: ProductRepository + ?Sized> {
    repo: Arc<R>,
    update_policy: UpdatePolicy,
}

impl<R: ProductRepository + ?Sized> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self::with_update_policy(repo, UpdatePolicy::default()) }

    pub fn with_update_policy(repo: Arc<R>, update_policy: UpdatePolicy) -> Self {
        Self { repo, update_policy }
    }

    pub fn update_policy(&self) -> UpdatePolicy { self.update_policy }

    /// Every product in store order. An empty store yields an empty vec.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<ProductDto>, ServiceError> {
        metrics::record_operation("list_all");
        let products = self.repo.find_all().await?;
        debug!(count = products.len(), "listed products");
        Ok(products.into_iter().map(ProductDto::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<ProductDto, ServiceError> {
        metrics::record_operation("get_by_id");
        match self.repo.find_by_id(id).await? {
            Some(product) => Ok(product.into()),
            None => Err(not_found("get_by_id", format!("product with id {id} not found"))),
        }
    }

    /// Insert a new product. Any id on `dto` is discarded; the returned DTO is
    /// the caller's input carrying the store-assigned id.
    #[instrument(skip(self, dto), fields(name = %dto.name))]
    pub async fn create(&self, mut dto: ProductDto) -> Result<ProductDto, ServiceError> {
        metrics::record_operation("create");
        dto.id = None;
        let saved = self.repo.save(Product::from(dto.clone())).await?;
        dto.id = saved.id;
        info!(id = ?dto.id, "product created");
        Ok(dto)
    }

    /// Write `dto` under the path `id`, which always wins over `dto.id`.
    /// Returns the submitted DTO, not a store round-trip.
    #[instrument(skip(self, dto))]
    pub async fn update(&self, id: i32, mut dto: ProductDto) -> Result<ProductDto, ServiceError> {
        metrics::record_operation("update");
        dto.id = Some(id);
        if self.update_policy == UpdatePolicy::RequireExisting && self.repo.find_by_id(id).await?.is_none() {
            return Err(not_found(
                "update",
                format!("cannot update product with id {id}: product does not exist"),
            ));
        }
        self.repo.save(Product::from(dto.clone())).await?;
        info!(id, "product updated");
        Ok(dto)
    }

    /// Remove a product. The existence check and the delete are two store
    /// calls; a record that vanishes in between is reported as not found.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        metrics::record_operation("delete");
        let missing = || format!("cannot delete product with id {id}: product does not exist");
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(not_found("delete", missing()));
        }
        if !self.repo.delete_by_id(id).await? {
            warn!(id, "product removed concurrently before delete");
            return Err(not_found("delete", missing()));
        }
        info!(id, "product deleted");
        Ok(())
    }
}

fn not_found(op: &str, message: String) -> ServiceError {
    metrics::record_not_found(op);
    warn!(op, %message, "product not found");
    ServiceError::not_found(message)
}
