//! Service layer for the product catalog.
//! - `product::ProductService` owns existence checks, identity rules and DTO mapping.
//! - `product::repository::ProductRepository` is the store capability the service consumes.
//! - `storage` holds the id-keyed table backing the memory and JSON file stores.

pub mod errors;
pub mod storage;
pub mod product;
#[cfg(test)]
pub mod test_support;
