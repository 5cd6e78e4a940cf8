use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CoreError, CoreResult};

/// An offer exactly as a flight-search provider returned it.
pub type RawOffer = serde_json::Value;

/// Three-letter IATA airport code, always upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode(String);

impl AirportCode {
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let code = raw.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "airport code must be three letters, got {:?}",
                raw
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AirportCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AirportCode> for String {
    fn from(code: AirportCode) -> Self {
        code.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single priced flight in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flight {
    flight_number: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    origin: AirportCode,
    destination: AirportCode,
    date: NaiveDate,
}

impl Flight {
    pub fn new(
        flight_number: impl Into<String>,
        price: Decimal,
        origin: AirportCode,
        destination: AirportCode,
        date: NaiveDate,
    ) -> CoreResult<Self> {
        let flight_number = flight_number.into();
        if flight_number.is_empty() {
            return Err(CoreError::ValidationError("flight number is empty".to_string()));
        }
        if price < Decimal::ZERO {
            return Err(CoreError::ValidationError(format!("negative price {}", price)));
        }

        Ok(Self {
            flight_number,
            price,
            origin,
            destination,
            date,
        })
    }

    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn origin(&self) -> &AirportCode {
        &self.origin
    }

    pub fn destination(&self) -> &AirportCode {
        &self.destination
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFound {
    pub reason: String,
}

impl NotFound {
    pub const NO_FLIGHTS: &'static str = "no flights found for the given criteria";
    pub const INVALID_REQUEST: &'static str = "invalid request";
    pub const NO_SOURCE: &'static str = "no flight data source available";

    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Outcome of one search: a flight, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchResult {
    Found(Flight),
    NotFound(NotFound),
}

impl SearchResult {
    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound(NotFound::new(reason))
    }

    pub fn flight(&self) -> Option<&Flight> {
        match self {
            Self::Found(flight) => Some(flight),
            Self::NotFound(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl From<Option<Flight>> for SearchResult {
    fn from(flight: Option<Flight>) -> Self {
        match flight {
            Some(flight) => Self::Found(flight),
            None => Self::not_found(NotFound::NO_FLIGHTS),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub source_text: Option<String>,
}

impl SearchRequest {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            date,
            source_text: None,
        }
    }

    pub fn with_source_text(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }
}
