mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "stockboard")]
#[command(about = "Browse Korean stock quotes and scraped market news")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// SQLite database path for scraped news (env: STOCKBOARD_DB)
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search daily quotes by code, name, or market
    Quotes(commands::quotes::QuotesArgs),
    /// Market overview: top N listings by market cap
    Top(commands::top::TopArgs),
    /// Per-symbol news via the staleness-gated store
    News(commands::news::NewsArgs),
    /// Global market headlines via the staleness-gated store
    Insights(commands::insights::InsightsArgs),
    /// Scrape one article and print its paragraphs
    Article(commands::article::ArticleArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stockboard_lib=info".parse().unwrap())
                .add_directive("krx_api=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let db_path = cli
        .db
        .clone()
        .or_else(|| std::env::var("STOCKBOARD_DB").ok())
        .unwrap_or_else(|| "stockboard.db".to_string());

    match &cli.command {
        Commands::Quotes(args) => commands::quotes::run(args, &format).await?,
        Commands::Top(args) => commands::top::run(args, &format).await?,
        Commands::News(args) => commands::news::run(args, &db_path, &format).await?,
        Commands::Insights(args) => commands::insights::run(args, &db_path, &format).await?,
        Commands::Article(args) => commands::article::run(args, &format).await?,
    }

    Ok(())
}
