use anyhow::{bail, Result};
use clap::Args;
use stockboard_lib::{MarketClass, Query, QuoteQuery};

use crate::output::{print_json, print_quotes_table, OutputFormat};

#[derive(Args)]
pub struct TopArgs {
    /// Market class: KOSPI, KOSDAQ, KONEX
    #[arg(long, default_value = "KOSPI")]
    pub market: String,

    /// How many listings to show
    #[arg(long, default_value = "10")]
    pub count: usize,

    /// Trading date (YYYYMMDD); service default is the latest date when omitted
    #[arg(long)]
    pub date: Option<String>,

    /// Rows to request before ranking
    #[arg(long, default_value = "1000")]
    pub rows: i64,
}

pub async fn run(args: &TopArgs, format: &OutputFormat) -> Result<()> {
    let market: MarketClass = match args.market.parse() {
        Ok(m) => m,
        Err(()) => bail!(
            "unknown market class: {} (use KOSPI, KOSDAQ, or KONEX)",
            args.market
        ),
    };

    let mut query = QuoteQuery::default()
        .with_market(market)
        .with_rows(args.rows);
    if let Some(date) = &args.date {
        query = query.with_base_date(date);
    }

    let client = super::quote_client()?;
    let quotes = client.top_or_empty(&query, args.count).await;

    if quotes.is_empty() {
        eprintln!("No quotes found.");
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_quotes_table(&quotes),
        OutputFormat::Json => print_json(&quotes),
    }
    Ok(())
}
