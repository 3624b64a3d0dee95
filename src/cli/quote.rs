use super::ui;
use crate::core::config::AppConfig;
use crate::core::currency::CurrencyRateProvider;
use crate::core::format;
use crate::core::quote::{self, Direction, QuoteError};
use anyhow::{Result, bail};
use tracing::debug;

pub async fn run(
    amounts: &[String],
    direction: Direction,
    config: &AppConfig,
    rates: &(dyn CurrencyRateProvider + Send + Sync),
) -> Result<()> {
    let schedule = config.active_schedule()?;
    let inr_per_usd = rates
        .get_rate(
            &config.transfer.target_currency,
            &config.transfer.source_currency,
        )
        .await?;

    let mut table = ui::new_styled_table();
    let (amount_header, equivalent_header) = match direction {
        Direction::InrToUsd => ("Amount (INR)", "Will Receive (USD)"),
        Direction::UsdToInr => ("Amount (USD)", "Converted (INR)"),
    };
    table.set_header(vec![
        ui::header_cell(amount_header),
        ui::header_cell("Fee %"),
        ui::header_cell("Fee (INR)"),
        ui::header_cell("Total to Pay (INR)"),
        ui::header_cell(equivalent_header),
    ]);

    for raw in amounts {
        let quoted = quote::parse_amount(raw)
            .and_then(|amount| quote::quote_send(amount, schedule, inr_per_usd, direction));
        match quoted {
            Ok(quote) => {
                let equivalent = match direction {
                    Direction::InrToUsd => format::format_usd(quote.equivalent_amount),
                    Direction::UsdToInr => format::format_inr(quote.equivalent_amount),
                };
                table.add_row(vec![
                    ui::amount_cell(raw),
                    ui::amount_cell(&format::format_rate(quote.fee_rate)),
                    ui::amount_cell(&format::format_inr(quote.fee_amount)),
                    ui::amount_cell(&format::format_inr(quote.total_amount)),
                    ui::amount_cell(&equivalent),
                ]);
            }
            Err(QuoteError::InvalidAmount(reason)) => {
                // Invalid input resets the row, it does not abort the batch.
                debug!("Skipping amount '{}': {}", raw, reason);
                table.add_row(vec![
                    ui::amount_cell(raw),
                    ui::placeholder_cell(),
                    ui::placeholder_cell(),
                    ui::placeholder_cell(),
                    ui::placeholder_cell(),
                ]);
            }
            Err(e @ QuoteError::TierLookup(_)) => {
                bail!("Unable to determine fee tier: {e}");
            }
        }
    }

    println!(
        "Transfer quote: {}\n",
        ui::style_text(&direction.to_string(), ui::StyleType::Title)
    );
    println!("{table}");
    Ok(())
}
