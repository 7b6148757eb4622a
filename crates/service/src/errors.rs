use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// An id-targeted operation found no matching product. The message is
    /// shown to API callers as-is.
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self { Self::NotFound(message.into()) }
}
