//! Exchange rates answered from static configuration.

use crate::core::config::TransferConfig;
use crate::core::currency::CurrencyRateProvider;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tracing::debug;

/// Serves the configured scalar for one currency pair, and its reciprocal
/// for the opposite direction. There is deliberately no live-rate provider
/// behind this trait.
pub struct FixedRateProvider {
    base: String,
    quote: String,
    rate: f64,
}

impl FixedRateProvider {
    pub fn new(base: &str, quote: &str, rate: f64) -> Self {
        FixedRateProvider {
            base: base.to_string(),
            quote: quote.to_string(),
            rate,
        }
    }

    /// Rate provider for the configured pair; `exchange_rate` is quoted as
    /// source units per target unit (INR per USD).
    pub fn from_config(config: &TransferConfig) -> Self {
        Self::new(
            &config.target_currency,
            &config.source_currency,
            config.exchange_rate,
        )
    }
}

#[async_trait]
impl CurrencyRateProvider for FixedRateProvider {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        if from == to {
            return Ok(1.0);
        }
        if from == self.base && to == self.quote {
            debug!("Serving configured rate {} for {from}->{to}", self.rate);
            return Ok(self.rate);
        }
        if from == self.quote && to == self.base {
            let inverse = 1.0 / self.rate;
            debug!("Serving inverse rate {inverse} for {from}->{to}");
            return Ok(inverse);
        }
        Err(anyhow!("No configured rate from {} to {}", from, to))
    }
}
