use chrono::NaiveDate;
use regex::{CaptureMatches, Captures, Regex};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

use crate::models::{AirportCode, Flight};

static FLIGHT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)Flight\s+(\w+)\s+from\s+([A-Z]{3})\s+to\s+([A-Z]{3})\s+on\s+(\d{4}-\d{2}-\d{2})\s+for\s+\$(\d+(?:\.\d+)?)",
    )
    .expect("flight line pattern is valid")
});

/// Flights mentioned in a piece of free text.
///
/// Nothing is parsed until iteration; every call to [`Extraction::iter`]
/// rescans the text from the start.
#[derive(Debug, Clone, Copy)]
pub struct Extraction<'t> {
    text: &'t str,
}

pub fn extract(text: &str) -> Extraction<'_> {
    Extraction { text }
}

impl<'t> Extraction<'t> {
    pub fn iter(&self) -> Flights<'t> {
        Flights {
            matches: FLIGHT_LINE.captures_iter(self.text),
        }
    }
}

impl<'t> IntoIterator for Extraction<'t> {
    type Item = Flight;
    type IntoIter = Flights<'t>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'t> IntoIterator for &Extraction<'t> {
    type Item = Flight;
    type IntoIter = Flights<'t>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Flights<'t> {
    matches: CaptureMatches<'static, 't>,
}

impl Iterator for Flights<'_> {
    type Item = Flight;

    fn next(&mut self) -> Option<Flight> {
        for caps in self.matches.by_ref() {
            match flight_from_captures(&caps) {
                Some(flight) => return Some(flight),
                None => debug!("Ignoring unparsable flight mention: {:?}", &caps[0]),
            }
        }
        None
    }
}

fn flight_from_captures(caps: &Captures<'_>) -> Option<Flight> {
    let origin = AirportCode::parse(&caps[2]).ok()?;
    let destination = AirportCode::parse(&caps[3]).ok()?;
    let date = NaiveDate::parse_from_str(&caps[4], "%Y-%m-%d").ok()?;
    let price = Decimal::from_str(&caps[5]).ok()?;

    Flight::new(&caps[1], price, origin, destination, date).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_FLIGHTS: &str = "Flight AB123 from SFO to LAX on 2025-01-01 for $199\n\
                               Flight XY456 from SFO to LAX on 2025-01-01 for $150";

    #[test]
    fn test_single_flight() {
        let flights: Vec<Flight> = extract("Flight AB123 from SFO to LAX on 2025-01-01 for $199")
            .iter()
            .collect();

        assert_eq!(flights.len(), 1);
        let f = &flights[0];
        assert_eq!(f.flight_number(), "AB123");
        assert_eq!(f.origin().as_str(), "SFO");
        assert_eq!(f.destination().as_str(), "LAX");
        assert_eq!(f.date(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(f.price(), Decimal::from(199));
    }

    #[test]
    fn test_multiple_flights_in_order() {
        let numbers: Vec<String> = extract(TWO_FLIGHTS)
            .iter()
            .map(|f| f.flight_number().to_string())
            .collect();
        assert_eq!(numbers, vec!["AB123", "XY456"]);
    }

    #[test]
    fn test_empty_and_unrelated_text() {
        assert_eq!(extract("").iter().count(), 0);
        assert_eq!(extract("no flights mentioned").iter().count(), 0);
    }

    #[test]
    fn test_case_insensitive_keywords_and_codes() {
        let flights: Vec<Flight> = extract("FLIGHT ua9 FROM sfo TO jfk ON 2025-03-04 FOR $88.40")
            .iter()
            .collect();

        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].flight_number(), "ua9");
        assert_eq!(flights[0].origin().as_str(), "SFO");
        assert_eq!(flights[0].destination().as_str(), "JFK");
        assert_eq!(flights[0].price(), Decimal::from_str("88.40").unwrap());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let line = "Flight AB1 from SFO to LAX on 2025-01-01 for $10. ";
        let text = line.repeat(3);
        assert_eq!(extract(&text).iter().count(), 3);
    }

    #[test]
    fn test_impossible_date_is_skipped() {
        let text = "Flight AB1 from SFO to LAX on 2025-13-40 for $10\n\
                    Flight AB2 from SFO to LAX on 2025-02-01 for $20";
        let numbers: Vec<String> = extract(text)
            .iter()
            .map(|f| f.flight_number().to_string())
            .collect();
        assert_eq!(numbers, vec!["AB2"]);
    }

    #[test]
    fn test_extraction_is_restartable() {
        let extraction = extract(TWO_FLIGHTS);
        let first: Vec<Flight> = extraction.iter().collect();
        let second: Vec<Flight> = (&extraction).into_iter().collect();
        assert_eq!(first, second);
    }
}
