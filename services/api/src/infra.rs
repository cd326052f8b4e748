use capquote::config::AppConfig;
use capquote::design_quotes::{DesignId, DesignQuoteRecord, DesignQuoteRepository, RepositoryError};
use capquote::error::AppError;
use capquote::QuoteEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::cli::RateCardArgs;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDesignQuoteRepository {
    records: Arc<Mutex<HashMap<DesignId, DesignQuoteRecord>>>,
}

impl DesignQuoteRepository for InMemoryDesignQuoteRepository {
    fn fetch(&self, design_id: &DesignId) -> Result<Option<DesignQuoteRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(design_id).cloned())
    }

    fn save(&self, record: DesignQuoteRecord) -> Result<DesignQuoteRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.design_id.clone(), record.clone());
        Ok(record)
    }

    fn delete(&self, design_id: &DesignId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard
            .remove(design_id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

/// Loads the rate card named on the command line, or the configured one.
pub(crate) fn build_engine(config: &AppConfig, args: RateCardArgs) -> Result<QuoteEngine, AppError> {
    let mut pricing = config.pricing.clone();
    if let Some(path) = args.rate_card {
        pricing.rate_card_path = Some(path);
    }

    let rates = pricing.load_rate_card()?;
    let source = match &pricing.rate_card_path {
        Some(path) => path.display().to_string(),
        None => "bundled".to_string(),
    };
    info!(
        %source,
        styles = rates.domestic.styles.len(),
        hat_types = rates.overseas.hat_types.len(),
        "rate card loaded"
    );
    Ok(QuoteEngine::new(Arc::new(rates)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use capquote::design_quotes::{DesignQuoteService, QuoteSelections};
    use capquote::pricing::RateCard;

    #[test]
    fn repository_backs_design_quote_service() {
        let engine = QuoteEngine::new(Arc::new(RateCard::standard().expect("bundled rate card")));
        let repository = Arc::new(InMemoryDesignQuoteRepository::default());
        let service = DesignQuoteService::new(repository.clone(), engine);
        let design = DesignId("design-1".to_string());

        service
            .create(design.clone(), QuoteSelections::overseas("Sport", 1000))
            .expect("creates");
        assert!(repository.fetch(&design).expect("fetches").is_some());

        service.delete(&design).expect("deletes");
        assert!(matches!(
            repository.delete(&design),
            Err(RepositoryError::NotFound)
        ));
    }
}
