use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::models::{AirportCode, Flight, RawOffer};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizationError {
    #[error("offer has no price.total")]
    MissingPrice,
    #[error("offer price.total is not a valid amount: {0}")]
    InvalidPrice(String),
    #[error("offer has no itineraries[0].segments[0].{0}")]
    MissingSegmentField(&'static str),
    #[error("offer rejected: {0}")]
    Rejected(String),
}

/// Project a provider offer onto a `Flight`.
///
/// Only `price.total` and the first segment's `carrierCode`/`number` are read.
/// Route and date come from the request and are not checked against the offer.
pub fn normalize(
    raw: &RawOffer,
    origin: &AirportCode,
    destination: &AirportCode,
    date: NaiveDate,
) -> Result<Flight, NormalizationError> {
    let price = read_price(raw)?;

    let segment = &raw["itineraries"][0]["segments"][0];
    let carrier = read_segment_str(segment, "carrierCode")?;
    let number = read_segment_str(segment, "number")?;

    Flight::new(
        format!("{}{}", carrier, number),
        price,
        origin.clone(),
        destination.clone(),
        date,
    )
    .map_err(|e| NormalizationError::Rejected(e.to_string()))
}

fn read_price(raw: &RawOffer) -> Result<Decimal, NormalizationError> {
    let total = &raw["price"]["total"];
    let price = match total {
        Value::Null => return Err(NormalizationError::MissingPrice),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    };

    match price {
        Some(p) if p >= Decimal::ZERO => Ok(p),
        _ => Err(NormalizationError::InvalidPrice(total.to_string())),
    }
}

fn read_segment_str<'a>(segment: &'a Value, field: &'static str) -> Result<&'a str, NormalizationError> {
    segment[field]
        .as_str()
        .filter(|s| !s.is_empty())
        .ok_or(NormalizationError::MissingSegmentField(field))
}
