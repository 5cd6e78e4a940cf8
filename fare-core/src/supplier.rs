use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{AirportCode, RawOffer};

/// Parameters of one flight-offer lookup against an external provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferQuery {
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub departure_date: NaiveDate,
    pub adults: u32,
}

impl OfferQuery {
    pub fn one_adult(origin: AirportCode, destination: AirportCode, departure_date: NaiveDate) -> Self {
        Self {
            origin,
            destination,
            departure_date,
            adults: 1,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SupplierError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Supplier returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Malformed supplier response: {0}")]
    Decode(String),
    #[error("Supplier misconfigured: {0}")]
    Misconfigured(String),
}

#[async_trait]
pub trait OfferSource: Send + Sync {
    /// Short identifier used in logs and health output
    fn name(&self) -> &str;

    /// Fetch raw flight offers matching the query
    async fn search_offers(&self, query: &OfferQuery) -> Result<Vec<RawOffer>, SupplierError>;
}
