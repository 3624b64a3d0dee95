//! Pure fee and conversion math for a single transfer quote.

use crate::core::schedule::FeeSchedule;
use std::fmt::Display;
use thiserror::Error;

/// Which currency the caller's amount is denominated in.
///
/// Fees are always assessed on the INR side of the transfer, so the
/// direction decides whether the input needs a pre-fee conversion. The CLI
/// owns this value and passes it explicitly on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    InrToUsd,
    UsdToInr,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::InrToUsd => write!(f, "INR to USD"),
            Direction::UsdToInr => write!(f, "USD to INR"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum QuoteError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// Amount fell outside every configured tier. Schedules are validated
    /// to cover `(0, ∞)`, so this indicates a configuration defect.
    #[error("unable to determine fee tier for ₹{0}")]
    TierLookup(f64),
}

/// The fee breakdown for one transfer. Derived, never persisted.
///
/// `fee_amount` and `total_amount` are INR. `equivalent_amount` is USD for
/// [`Direction::InrToUsd`] and INR for [`Direction::UsdToInr`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferQuote {
    pub direction: Direction,
    pub fee_rate: f64,
    pub fee_amount: f64,
    pub total_amount: f64,
    pub equivalent_amount: f64,
}

impl TransferQuote {
    pub fn fee_rate_percent(&self) -> f64 {
        self.fee_rate * 100.0
    }
}

/// Parses user-entered text into a valid transfer amount.
pub fn parse_amount(input: &str) -> Result<f64, QuoteError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(QuoteError::InvalidAmount("amount is empty".to_string()));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| QuoteError::InvalidAmount(format!("'{trimmed}' is not a number")))?;
    validate_amount(value)
}

fn validate_amount(amount: f64) -> Result<f64, QuoteError> {
    if !amount.is_finite() {
        return Err(QuoteError::InvalidAmount(
            "amount must be finite".to_string(),
        ));
    }
    if amount <= 0.0 {
        return Err(QuoteError::InvalidAmount(
            "amount must be greater than zero".to_string(),
        ));
    }
    Ok(amount)
}

/// Quotes a transfer from a known send amount.
///
/// The amount is converted to INR first when entered in USD, the fee is
/// assessed on the INR amount, and the total is what the sender pays.
/// All math runs at full f64 precision; rounding happens at display time.
pub fn quote_send(
    amount: f64,
    schedule: &FeeSchedule,
    inr_per_usd: f64,
    direction: Direction,
) -> Result<TransferQuote, QuoteError> {
    let amount = validate_amount(amount)?;

    let inr_amount = match direction {
        Direction::InrToUsd => amount,
        Direction::UsdToInr => amount * inr_per_usd,
    };

    let tier = schedule
        .tier_for(inr_amount)
        .ok_or(QuoteError::TierLookup(inr_amount))?;

    let fee_amount = inr_amount * tier.rate;
    let total_amount = inr_amount + fee_amount;
    let equivalent_amount = match direction {
        Direction::InrToUsd => inr_amount / inr_per_usd,
        Direction::UsdToInr => inr_amount,
    };

    Ok(TransferQuote {
        direction,
        fee_rate: tier.rate,
        fee_amount,
        total_amount,
        equivalent_amount,
    })
}

/// Quotes the gross amount required so the recipient nets `target`.
///
/// The fee is a percentage of the gross, so the gross is solved as
/// `net / (1 - rate)`. The tier is keyed off the INR equivalent of the
/// target, never the raw input, since tier bounds are INR-denominated.
/// For tiered schedules this makes the reverse path non-invertible with
/// the forward path across tier boundaries.
pub fn quote_receive(
    target: f64,
    schedule: &FeeSchedule,
    inr_per_usd: f64,
    direction: Direction,
) -> Result<TransferQuote, QuoteError> {
    let target = validate_amount(target)?;

    let net_inr = match direction {
        Direction::InrToUsd => target * inr_per_usd,
        Direction::UsdToInr => target,
    };

    let tier = schedule
        .tier_for(net_inr)
        .ok_or(QuoteError::TierLookup(net_inr))?;

    let gross = net_inr / (1.0 - tier.rate);
    let fee_amount = gross - net_inr;

    Ok(TransferQuote {
        direction,
        fee_rate: tier.rate,
        fee_amount,
        total_amount: gross,
        equivalent_amount: net_inr,
    })
}
