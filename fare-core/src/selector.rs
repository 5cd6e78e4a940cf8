use chrono::NaiveDate;
use tracing::debug;

use crate::models::{AirportCode, Flight, NotFound, RawOffer, SearchResult};
use crate::normalizer::normalize;

/// Pick the cheapest offer that normalizes; malformed offers are skipped.
pub fn select_cheapest(
    offers: &[RawOffer],
    origin: &AirportCode,
    destination: &AirportCode,
    date: NaiveDate,
) -> SearchResult {
    if offers.is_empty() {
        return SearchResult::not_found(NotFound::NO_FLIGHTS);
    }

    let candidates = offers
        .iter()
        .enumerate()
        .filter_map(|(idx, raw)| match normalize(raw, origin, destination, date) {
            Ok(flight) => Some(flight),
            Err(e) => {
                debug!("Skipping offer #{}: {}", idx, e);
                None
            }
        });

    cheapest_flight(candidates).into()
}

/// Minimum by price; the earliest flight wins a tie.
pub fn cheapest_flight<I>(flights: I) -> Option<Flight>
where
    I: IntoIterator<Item = Flight>,
{
    flights.into_iter().fold(None, |best, flight| match best {
        Some(current) if current.price() <= flight.price() => Some(current),
        _ => Some(flight),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn route() -> (AirportCode, AirportCode, NaiveDate) {
        (
            AirportCode::parse("SFO").unwrap(),
            AirportCode::parse("LAX").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
    }

    fn offer(total: &str, carrier: &str, number: &str) -> RawOffer {
        json!({
            "price": { "total": total },
            "itineraries": [{ "segments": [{ "carrierCode": carrier, "number": number }] }]
        })
    }

    fn selected_number(result: &SearchResult) -> &str {
        result.flight().expect("expected a flight").flight_number()
    }

    #[test]
    fn test_empty_offers_not_found() {
        let (o, d, date) = route();
        assert_eq!(
            select_cheapest(&[], &o, &d, date),
            SearchResult::not_found(NotFound::NO_FLIGHTS)
        );
    }

    #[test]
    fn test_selects_global_minimum() {
        let (o, d, date) = route();
        let offers = vec![
            offer("310.00", "AA", "1"),
            offer("120.50", "BB", "2"),
            offer("199.99", "CC", "3"),
        ];
        let result = select_cheapest(&offers, &o, &d, date);
        assert_eq!(selected_number(&result), "BB2");
    }

    #[test]
    fn test_tie_keeps_first_in_input_order() {
        let (o, d, date) = route();
        let offers = vec![
            offer("200.00", "AA", "1"),
            offer("150.00", "BB", "2"),
            offer("150.0", "CC", "3"),
            offer("150", "DD", "4"),
        ];
        let result = select_cheapest(&offers, &o, &d, date);
        assert_eq!(selected_number(&result), "BB2");
    }

    #[test]
    fn test_malformed_offers_are_skipped() {
        let (o, d, date) = route();
        let offers = vec![
            json!({ "itineraries": [{ "segments": [{ "carrierCode": "ZZ", "number": "9" }] }] }),
            offer("180.00", "AA", "1"),
            json!({ "price": { "total": "1.00" } }),
        ];
        let result = select_cheapest(&offers, &o, &d, date);
        assert_eq!(selected_number(&result), "AA1");
    }

    #[test]
    fn test_all_malformed_not_found() {
        let (o, d, date) = route();
        let offers = vec![json!({}), json!({ "price": { "total": "abc" } })];
        assert_eq!(
            select_cheapest(&offers, &o, &d, date),
            SearchResult::not_found(NotFound::NO_FLIGHTS)
        );
    }

    #[test]
    fn test_cheapest_flight_over_empty_input() {
        assert!(cheapest_flight(Vec::new()).is_none());
    }
}
