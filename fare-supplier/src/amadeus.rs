use async_trait::async_trait;
use fare_core::{OfferQuery, OfferSource, RawOffer, SupplierError};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::app_config::AmadeusConfig;

/// Tokens are refreshed this long before the provider says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct FlightOffersResponse {
    #[serde(default)]
    data: Vec<RawOffer>,
}

struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// Amadeus Self-Service flight-offers client (OAuth2 client credentials).
pub struct AmadeusClient {
    config: AmadeusConfig,
    client: reqwest::Client,
    token: RwLock<Option<CachedToken>>,
}

impl AmadeusClient {
    pub fn new(config: AmadeusConfig) -> Result<Self, SupplierError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SupplierError::Transport(e.to_string()))?;

        Ok(Self {
            config,
            client,
            token: RwLock::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn access_token(&self) -> Result<String, SupplierError> {
        if let Some(token) = self.token.read().await.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        let mut slot = self.token.write().await;
        // Another request may have refreshed while we waited for the lock
        if let Some(token) = slot.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        debug!("Requesting Amadeus access token");
        let response = self
            .client
            .post(self.url("/v1/security/oauth2/token"))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.expose().as_str()),
            ])
            .send()
            .await
            .map_err(|e| SupplierError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SupplierError::Auth(format!("token endpoint returned {}: {}", status, body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SupplierError::Decode(e.to_string()))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *slot = Some(CachedToken {
            value: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });

        Ok(token.access_token)
    }
}

#[async_trait]
impl OfferSource for AmadeusClient {
    fn name(&self) -> &str {
        "amadeus"
    }

    async fn search_offers(&self, query: &OfferQuery) -> Result<Vec<RawOffer>, SupplierError> {
        let token = self.access_token().await?;
        let departure_date = query.departure_date.format("%Y-%m-%d").to_string();
        let adults = query.adults.to_string();

        let response = self
            .client
            .get(self.url("/v2/shopping/flight-offers"))
            .bearer_auth(token)
            .query(&[
                ("originLocationCode", query.origin.as_str()),
                ("destinationLocationCode", query.destination.as_str()),
                ("departureDate", departure_date.as_str()),
                ("adults", adults.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SupplierError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SupplierError::Status { status, body });
        }

        let offers: FlightOffersResponse = response
            .json()
            .await
            .map_err(|e| SupplierError::Decode(e.to_string()))?;

        info!(
            "Amadeus returned {} offers for {} -> {} on {}",
            offers.data.len(),
            query.origin,
            query.destination,
            departure_date
        );
        Ok(offers.data)
    }
}
