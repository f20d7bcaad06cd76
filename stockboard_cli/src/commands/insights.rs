use anyhow::Result;
use clap::Args;
use stockboard_lib::{Db, Refresher, ScrapeClient};

use crate::output::{print_json, print_news_table, OutputFormat};

#[derive(Args)]
pub struct InsightsArgs {
    /// Maximum headlines to show
    #[arg(long, default_value = "20")]
    pub count: usize,
}

pub async fn run(args: &InsightsArgs, db_path: &str, format: &OutputFormat) -> Result<()> {
    let db = Db::open(db_path)?;
    db.init()?;
    let scraper = ScrapeClient::new()?;
    let mut refresher = Refresher::new(db, scraper);

    let mut items = refresher.insights().await?;
    items.truncate(args.count);

    if items.is_empty() {
        eprintln!("No headlines available.");
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_news_table(&items),
        OutputFormat::Json => print_json(&items),
    }
    Ok(())
}
