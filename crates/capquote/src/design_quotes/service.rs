use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{DesignId, DesignQuotePatch, DesignQuoteRecord, QuoteSelections};
use super::repository::{DesignQuoteRepository, RepositoryError};
use crate::export::{design_quote_sheet, ExportError, QuoteSheet};
use crate::pricing::{CachedQuote, Quote, QuoteEngine, QuoteError, QuoteType};

/// Service that prices selections and keeps the cached result in sync.
pub struct DesignQuoteService<R> {
    repository: Arc<R>,
    engine: QuoteEngine,
}

static DESIGN_QUOTE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_quote_id() -> String {
    let id = DESIGN_QUOTE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("dq-{id:06}")
}

impl<R> DesignQuoteService<R>
where
    R: DesignQuoteRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: QuoteEngine) -> Self {
        Self { repository, engine }
    }

    pub fn get(&self, design_id: &DesignId) -> Result<DesignQuoteRecord, DesignQuoteError> {
        let record = self
            .repository
            .fetch(design_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Price the selections and store them, replacing any quote the design
    /// already had.
    pub fn create(
        &self,
        design_id: DesignId,
        selections: QuoteSelections,
    ) -> Result<DesignQuoteRecord, DesignQuoteError> {
        let cached = self.price(&selections)?;
        let now = Utc::now();
        let record = DesignQuoteRecord {
            id: next_quote_id(),
            design_id,
            selections,
            cached,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.save(record)?;
        info!(
            design_id = %stored.design_id.0,
            quote_id = %stored.id,
            quote_type = %stored.selections.quote_type,
            "design quote created"
        );
        Ok(stored)
    }

    /// Apply a patch and recalculate the cached pricing.
    pub fn update(
        &self,
        design_id: &DesignId,
        patch: DesignQuotePatch,
    ) -> Result<DesignQuoteRecord, DesignQuoteError> {
        let mut record = self.get(design_id)?;
        patch.apply(&mut record.selections);
        record.cached = self.price(&record.selections)?;
        record.updated_at = Utc::now();

        let stored = self.repository.save(record)?;
        info!(
            design_id = %stored.design_id.0,
            quote_id = %stored.id,
            "design quote updated"
        );
        Ok(stored)
    }

    pub fn delete(&self, design_id: &DesignId) -> Result<(), DesignQuoteError> {
        self.repository.delete(design_id)?;
        info!(design_id = %design_id.0, "design quote deleted");
        Ok(())
    }

    /// CSV sheet of the stored quote, rendered from its cached pricing.
    pub fn export(&self, design_id: &DesignId) -> Result<QuoteSheet, DesignQuoteError> {
        let record = self.get(design_id)?;
        Ok(design_quote_sheet(&record)?)
    }

    fn price(&self, selections: &QuoteSelections) -> Result<CachedQuote, DesignQuoteError> {
        let quote: Quote = match selections.quote_type {
            QuoteType::Domestic => {
                let request = selections.domestic_request()?;
                request.validate()?;
                self.engine.domestic(&request)?.into()
            }
            QuoteType::Overseas => {
                let request = selections.overseas_request()?;
                request.validate()?;
                self.engine.overseas(&request)?.into()
            }
        };
        Ok(CachedQuote::from_quote(&quote)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DesignQuoteError {
    #[error(transparent)]
    Quote(#[from] QuoteError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("failed to serialize price breaks: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl DesignQuoteError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DesignQuoteError::Repository(RepositoryError::NotFound))
    }
}
