//! Quote pricing for custom hat orders: rate-card driven domestic and
//! overseas calculators, CSV quote sheets, and quotes cached per design.

pub mod config;
pub mod design_quotes;
pub mod error;
pub mod export;
pub mod pricing;
pub mod telemetry;

pub use error::AppError;
pub use pricing::QuoteEngine;
