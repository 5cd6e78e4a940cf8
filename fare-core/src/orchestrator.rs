use std::sync::Arc;
use tracing::{info, warn, Instrument};

use crate::extractor::extract;
use crate::models::{AirportCode, NotFound, SearchRequest, SearchResult};
use crate::selector::{cheapest_flight, select_cheapest};
use crate::supplier::{OfferQuery, OfferSource};

/// Entry point for a cheapest-flight search.
///
/// Sources are consulted in order: the configured offer source, then any
/// text supplied with the request. Every call resolves to a `SearchResult`;
/// upstream failures are logged and treated as "no offers".
#[derive(Clone, Default)]
pub struct SearchOrchestrator {
    source: Option<Arc<dyn OfferSource>>,
}

impl SearchOrchestrator {
    pub fn new(source: Option<Arc<dyn OfferSource>>) -> Self {
        Self { source }
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source.as_deref().map(|s| s.name())
    }

    pub async fn search(&self, request: SearchRequest) -> SearchResult {
        let span = tracing::info_span!(
            "flight_search",
            origin = %request.origin,
            destination = %request.destination,
            date = %request.date,
        );
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: SearchRequest) -> SearchResult {
        let route = AirportCode::parse(&request.origin)
            .and_then(|o| AirportCode::parse(&request.destination).map(|d| (o, d)))
            .ok();

        let mut consulted_source = false;
        if let (Some(source), Some((origin, destination))) = (&self.source, &route) {
            consulted_source = true;
            let query = OfferQuery::one_adult(origin.clone(), destination.clone(), request.date);

            match source.search_offers(&query).await {
                Ok(offers) if !offers.is_empty() => {
                    info!("{} returned {} offers", source.name(), offers.len());
                    return select_cheapest(&offers, origin, destination, request.date);
                }
                Ok(_) => info!("{} returned no offers", source.name()),
                Err(e) => warn!("Offer source {} failed: {}", source.name(), e),
            }
        }

        if let Some(text) = request.source_text.as_deref().filter(|t| !t.trim().is_empty()) {
            info!("Extracting flights from {} bytes of text", text.len());
            return cheapest_flight(extract(text)).into();
        }

        if route.is_none() {
            return SearchResult::not_found(NotFound::INVALID_REQUEST);
        }

        if consulted_source {
            SearchResult::not_found(NotFound::NO_FLIGHTS)
        } else {
            SearchResult::not_found(NotFound::NO_SOURCE)
        }
    }
}
