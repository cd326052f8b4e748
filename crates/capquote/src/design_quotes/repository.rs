use super::domain::{DesignId, DesignQuoteRecord};

/// Storage abstraction so the service can run against any backing store.
/// Each design holds at most one quote.
pub trait DesignQuoteRepository: Send + Sync {
    fn fetch(&self, design_id: &DesignId) -> Result<Option<DesignQuoteRecord>, RepositoryError>;
    fn save(&self, record: DesignQuoteRecord) -> Result<DesignQuoteRecord, RepositoryError>;
    fn delete(&self, design_id: &DesignId) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
