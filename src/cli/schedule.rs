use super::ui;
use crate::core::config::AppConfig;
use crate::core::format;
use anyhow::Result;

/// Displays the active fee schedule and the configured exchange rate.
pub fn run(config: &AppConfig) -> Result<()> {
    let schedule = config.active_schedule()?;

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Transfer Amount (INR)"),
        ui::header_cell("Fee Rate"),
    ]);

    for tier in &schedule.tiers {
        let range = match tier.max {
            Some(max) => format!(
                "{} - {}",
                format::format_inr(tier.min),
                format::format_inr(max)
            ),
            None => format!("above {}", format::format_inr(tier.min)),
        };
        table.add_row(vec![
            ui::amount_cell(&range),
            ui::amount_cell(&format::format_rate(tier.rate)),
        ]);
    }

    let kind = if schedule.is_flat() { " (flat rate)" } else { "" };
    println!(
        "Fee schedule: {}{}\n",
        ui::style_text(&schedule.name, ui::StyleType::Title),
        kind
    );
    println!("{table}");
    println!(
        "\nExchange rate: {} = {}",
        format::format_inr(config.transfer.exchange_rate),
        format::format_usd(1.0)
    );
    Ok(())
}
