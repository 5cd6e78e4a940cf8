pub mod app_config;
pub mod secret;
pub mod amadeus;
pub mod dummy;

pub use amadeus::AmadeusClient;
pub use dummy::DummyOfferSource;
pub use secret::Masked;

use std::sync::Arc;

use app_config::{SupplierConfig, SupplierMode};
use fare_core::{OfferSource, SupplierError};

/// Build the offer source selected by configuration, if any.
pub fn build_offer_source(config: &SupplierConfig) -> Result<Option<Arc<dyn OfferSource>>, SupplierError> {
    let source: Arc<dyn OfferSource> = match config.mode {
        SupplierMode::None => return Ok(None),
        SupplierMode::Dummy => Arc::new(DummyOfferSource),
        SupplierMode::Amadeus => {
            let settings = config.amadeus.clone().ok_or_else(|| {
                SupplierError::Misconfigured("supplier.amadeus is not configured".to_string())
            })?;
            Arc::new(AmadeusClient::new(settings)?)
        }
    };
    Ok(Some(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_offer_source_by_mode() {
        let none = SupplierConfig::default();
        assert!(build_offer_source(&none).unwrap().is_none());

        let dummy = SupplierConfig { mode: SupplierMode::Dummy, amadeus: None };
        assert_eq!(build_offer_source(&dummy).unwrap().unwrap().name(), "dummy");

        let amadeus = SupplierConfig { mode: SupplierMode::Amadeus, amadeus: None };
        assert!(matches!(build_offer_source(&amadeus), Err(SupplierError::Misconfigured(_))));
    }
}
