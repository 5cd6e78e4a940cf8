use async_trait::async_trait;
use fare_core::{OfferQuery, OfferSource, RawOffer, SupplierError};
use serde_json::json;

/// Offline source answering every query with one canned AB123 offer at 199.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyOfferSource;

#[async_trait]
impl OfferSource for DummyOfferSource {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn search_offers(&self, query: &OfferQuery) -> Result<Vec<RawOffer>, SupplierError> {
        Ok(vec![json!({
            "type": "flight-offer",
            "id": "1",
            "price": { "currency": "USD", "total": "199.00" },
            "itineraries": [{
                "segments": [{
                    "departure": {
                        "iataCode": query.origin.as_str(),
                        "at": format!("{}T08:00:00", query.departure_date),
                    },
                    "arrival": { "iataCode": query.destination.as_str() },
                    "carrierCode": "AB",
                    "number": "123"
                }]
            }]
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fare_core::{select_cheapest, AirportCode};

    #[tokio::test]
    async fn test_dummy_offer_normalizes() {
        let origin = AirportCode::parse("SFO").unwrap();
        let destination = AirportCode::parse("LAX").unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let query = OfferQuery::one_adult(origin.clone(), destination.clone(), date);

        let offers = DummyOfferSource.search_offers(&query).await.unwrap();
        let result = select_cheapest(&offers, &origin, &destination, date);

        let flight = result.flight().expect("dummy offer should normalize");
        assert_eq!(flight.flight_number(), "AB123");
        assert_eq!(flight.price().to_string(), "199.00");
    }
}
