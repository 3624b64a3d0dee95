use super::ui;
use crate::core::config::AppConfig;
use crate::core::currency::CurrencyRateProvider;
use crate::core::format;
use crate::core::quote::{self, Direction};
use anyhow::{Context, Result};
use comfy_table::Cell;

/// Quotes the gross amount the sender must pay so the recipient nets the
/// requested amount.
pub async fn run(
    amount: &str,
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

    let target = quote::parse_amount(amount).context("Cannot quote the requested amount")?;
    let quote = quote::quote_receive(target, schedule, inr_per_usd, direction)
        .context("Cannot quote the requested amount")?;

    let target_display = match direction {
        Direction::InrToUsd => format::format_usd(target),
        Direction::UsdToInr => format::format_inr(target),
    };

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell(""), ui::header_cell("Value")]);
    table.add_row(vec![
        Cell::new("Target to Receive"),
        ui::amount_cell(&target_display),
    ]);
    table.add_row(vec![
        Cell::new("Fee Rate"),
        ui::amount_cell(&format::format_rate(quote.fee_rate)),
    ]);
    table.add_row(vec![
        Cell::new("Fee (INR)"),
        ui::amount_cell(&format::format_inr(quote.fee_amount)),
    ]);
    table.add_row(vec![
        Cell::new("Net Converted (INR)"),
        ui::amount_cell(&format::format_inr(quote.equivalent_amount)),
    ]);
    table.add_row(vec![
        Cell::new("Total to Pay (INR)"),
        ui::amount_cell(&format::format_inr(quote.total_amount)),
    ]);

    println!(
        "Reverse quote: {}\n",
        ui::style_text(&direction.to_string(), ui::StyleType::Title)
    );
    println!("{table}");
    println!(
        "\nPay {} and the recipient receives {}.",
        ui::style_text(
            &format::format_inr(quote.total_amount),
            ui::StyleType::TotalValue
        ),
        ui::style_text(&target_display, ui::StyleType::TotalLabel)
    );
    Ok(())
}
