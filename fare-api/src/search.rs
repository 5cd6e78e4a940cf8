use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use fare_core::{SearchRequest, SearchResult};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_flights))
        .route("/health", get(health))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    pub date: Option<String>,
    /// Free text to extract flights from when no offer source answers
    pub text: Option<String>,
}

impl SearchParams {
    fn into_request(self) -> Result<SearchRequest, AppError> {
        let raw_date = self
            .date
            .ok_or_else(|| AppError::ValidationError("missing query parameter: date".to_string()))?;
        let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d").map_err(|_| {
            AppError::ValidationError(format!("date must be YYYY-MM-DD, got {:?}", raw_date))
        })?;

        let mut request = SearchRequest::new(self.origin, self.destination, date);
        request.source_text = self.text;
        Ok(request)
    }
}

/// GET /search?origin=SFO&destination=LAX&date=2025-01-01
pub async fn search_flights(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResult>, AppError> {
    let request = params.into_request()?;
    let result = state.orchestrator.search(request).await;
    Ok(Json(result))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "offer_source": state.orchestrator.source_name(),
    }))
}
