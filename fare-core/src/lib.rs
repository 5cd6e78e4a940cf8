pub mod models;
pub mod normalizer;
pub mod selector;
pub mod extractor;
pub mod orchestrator;
pub mod supplier;

pub use models::{AirportCode, Flight, NotFound, RawOffer, SearchRequest, SearchResult};
pub use normalizer::{normalize, NormalizationError};
pub use selector::{cheapest_flight, select_cheapest};
pub use extractor::{extract, Extraction};
pub use orchestrator::SearchOrchestrator;
pub use supplier::{OfferQuery, OfferSource, SupplierError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
