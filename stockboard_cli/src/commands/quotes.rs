use anyhow::{bail, Result};
use clap::Args;
use stockboard_lib::{MarketClass, Query, QuoteQuery};

use crate::output::{print_json, print_quotes_table, OutputFormat};

#[derive(Args)]
pub struct QuotesArgs {
    /// Exact short code (ticker), e.g. 005930
    #[arg(long)]
    pub code: Option<String>,

    /// Exact ISIN code
    #[arg(long)]
    pub isin: Option<String>,

    /// Listed name; exact unless --like is given
    #[arg(long)]
    pub name: Option<String>,

    /// Treat --name as a partial (substring) match
    #[arg(long)]
    pub like: bool,

    /// Market class: KOSPI, KOSDAQ, KONEX
    #[arg(long)]
    pub market: Option<String>,

    /// Single trading date (YYYYMMDD)
    #[arg(long)]
    pub date: Option<String>,

    /// Start of a date range (YYYYMMDD)
    #[arg(long)]
    pub from: Option<String>,

    /// End of a date range (YYYYMMDD)
    #[arg(long)]
    pub to: Option<String>,

    /// Rows per page
    #[arg(long, default_value = "100")]
    pub rows: i64,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,
}

pub fn build_query(args: &QuotesArgs) -> Result<QuoteQuery> {
    let mut query = QuoteQuery::default()
        .with_page(args.page)
        .with_rows(args.rows);

    if let Some(code) = &args.code {
        query = query.with_short_code(code);
    }
    if let Some(isin) = &args.isin {
        query = query.with_isin(isin);
    }
    if let Some(name) = &args.name {
        query = if args.like {
            query.with_name_like(name)
        } else {
            query.with_name(name)
        };
    }
    if let Some(market) = &args.market {
        let parsed: MarketClass = match market.parse() {
            Ok(m) => m,
            Err(()) => bail!("unknown market class: {} (use KOSPI, KOSDAQ, or KONEX)", market),
        };
        query = query.with_market(parsed);
    }
    if let Some(date) = &args.date {
        query = query.with_base_date(date);
    }
    match (&args.from, &args.to) {
        (Some(from), Some(to)) => query = query.with_date_range(from, to),
        (None, None) => {}
        _ => bail!("--from and --to must be given together"),
    }

    Ok(query)
}

pub async fn run(args: &QuotesArgs, format: &OutputFormat) -> Result<()> {
    let client = super::quote_client()?;
    let query = build_query(args)?;
    let quotes = client.quotes_or_empty(&query).await;

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

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> QuotesArgs {
        QuotesArgs {
            code: None,
            isin: None,
            name: None,
            like: false,
            market: None,
            date: None,
            from: None,
            to: None,
            rows: 100,
            page: 1,
        }
    }

    #[test]
    fn like_flag_switches_name_to_partial_match() {
        let mut a = args();
        a.name = Some("전자".to_string());
        a.like = true;
        let query = build_query(&a).unwrap();
        assert_eq!(query.name_like.as_deref(), Some("전자"));
        assert!(query.name.is_none());
    }

    #[test]
    fn half_open_date_range_is_rejected() {
        let mut a = args();
        a.from = Some("20240101".to_string());
        assert!(build_query(&a).is_err());
    }

    #[test]
    fn unknown_market_is_rejected() {
        let mut a = args();
        a.market = Some("NASDAQ".to_string());
        assert!(build_query(&a).is_err());
    }
}
