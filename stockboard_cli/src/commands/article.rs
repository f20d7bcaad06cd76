use anyhow::Result;
use clap::Args;
use serde::Serialize;
use stockboard_lib::{ScrapeClient, ScrapeError};

use crate::output::{print_article, print_json, OutputFormat};

#[derive(Args)]
pub struct ArticleArgs {
    /// Article URL (allow-listed hosts only)
    pub url: String,
}

#[derive(Serialize)]
struct ArticleJson<'a> {
    title: &'a str,
    date: &'a str,
    source: &'a str,
    paragraphs: &'a [String],
}

pub async fn run(args: &ArticleArgs, format: &OutputFormat) -> Result<()> {
    let scraper = ScrapeClient::new()?;
    let article = match scraper.article(&args.url).await {
        Ok(article) => article,
        Err(ScrapeError::DomainNotAllowed { host }) => {
            eprintln!("Refusing to scrape {}: host is not allow-listed.", host);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let Some(article) = article else {
        eprintln!("No article content found.");
        return Ok(());
    };

    match format {
        OutputFormat::Table => print_article(&article),
        OutputFormat::Json => print_json(&ArticleJson {
            title: &article.title,
            date: &article.date,
            source: &article.source,
            paragraphs: &article.paragraphs,
        }),
    }
    Ok(())
}
