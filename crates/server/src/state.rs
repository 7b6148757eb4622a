use std::sync::Arc;

use service::product::{ProductRepository, ProductService};

/// Shared handler state. The store is erased to a trait object so the
/// backend can be chosen from configuration at startup.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductService<dyn ProductRepository>>,
}

impl AppState {
    pub fn new(products: ProductService<dyn ProductRepository>) -> Self {
        Self { products: Arc::new(products) }
    }
}
