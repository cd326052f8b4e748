//! Quotes attached to designs, persisted with their cached pricing.
//!
//! The service recalculates a quote whenever its selections change and
//! stores the price breaks plus the applicable totals in cents, so listings
//! can show prices without re-running the engine.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{DesignId, DesignQuotePatch, DesignQuoteRecord, DesignQuoteView, QuoteSelections};
pub use repository::{DesignQuoteRepository, RepositoryError};
pub use router::design_quote_router;
pub use service::{DesignQuoteError, DesignQuoteService};
