use anyhow::{bail, Result};
use clap::Args;
use stockboard_lib::{Db, Refresher, ScrapeClient};

use crate::output::{print_json, print_news_table, OutputFormat};

#[derive(Args)]
pub struct NewsArgs {
    /// Stock short code, e.g. 005930
    pub symbol: String,

    /// Maximum headlines to show
    #[arg(long, default_value = "20")]
    pub count: usize,
}

pub async fn run(args: &NewsArgs, db_path: &str, format: &OutputFormat) -> Result<()> {
    if args.symbol.is_empty() || !args.symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
        bail!("invalid symbol: {}", args.symbol);
    }

    let db = Db::open(db_path)?;
    db.init()?;
    let scraper = ScrapeClient::new()?;
    let mut refresher = Refresher::new(db, scraper);

    let mut items = refresher.stock_news(&args.symbol).await?;
    items.truncate(args.count);

    if items.is_empty() {
        eprintln!("No news found for {}.", args.symbol);
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_news_table(&items),
        OutputFormat::Json => print_json(&items),
    }
    Ok(())
}
