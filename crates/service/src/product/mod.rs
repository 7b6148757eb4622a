//! Product catalog: transfer object, store capability and the service that
//! mediates between them.

pub mod dto;
pub mod repository;
pub mod repo;
pub mod service;

pub use dto::ProductDto;
pub use repository::ProductRepository;
pub use service::ProductService;
