use serde::Serialize;
use stockboard_lib::types::Quote;
use stockboard_lib::{ArticleContent, NewsItem};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled, Serialize)]
struct QuoteRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Code")]
    #[serde(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Market")]
    #[serde(rename = "Market")]
    market: String,
    #[tabled(rename = "Close")]
    #[serde(rename = "Close")]
    close: String,
    #[tabled(rename = "Change")]
    #[serde(rename = "Change")]
    change: String,
    #[tabled(rename = "Change%")]
    #[serde(rename = "Change%")]
    change_percent: String,
    #[tabled(rename = "Volume")]
    #[serde(rename = "Volume")]
    volume: String,
    #[tabled(rename = "Market Cap")]
    #[serde(rename = "Market Cap")]
    market_cap: String,
}

impl From<&Quote> for QuoteRow {
    fn from(quote: &Quote) -> Self {
        Self {
            date: quote.date_stamp.clone(),
            code: quote.short_code.clone(),
            name: quote.name.clone(),
            market: quote.market_category.clone(),
            close: format_amount(quote.close_price),
            change: format_amount(quote.change),
            change_percent: format!("{:.2}", quote.change_percent),
            volume: format_amount(quote.volume),
            market_cap: format_amount(quote.market_cap),
        }
    }
}

#[derive(Tabled, Serialize)]
struct NewsRow {
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Source")]
    #[serde(rename = "Source")]
    source: String,
    #[tabled(rename = "Published")]
    #[serde(rename = "Published")]
    published: String,
    #[tabled(rename = "Link")]
    #[serde(rename = "Link")]
    link: String,
}

impl From<&NewsItem> for NewsRow {
    fn from(item: &NewsItem) -> Self {
        Self {
            title: item.title.clone(),
            source: item.source.clone(),
            published: item.published_label.clone(),
            link: item.link.clone(),
        }
    }
}

pub fn print_quotes_table(quotes: &[Quote]) {
    let rows: Vec<QuoteRow> = quotes.iter().map(QuoteRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn print_news_table(items: &[NewsItem]) {
    let rows: Vec<NewsRow> = items.iter().map(NewsRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn print_article(article: &ArticleContent) {
    println!("{}", article.title);
    if !article.date.is_empty() {
        println!("{} | {}", article.date, article.source);
    } else {
        println!("{}", article.source);
    }
    println!();
    for paragraph in &article.paragraphs {
        println!("{}", paragraph);
        println!();
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

/// Whole-number amounts print without a fractional part; anything else keeps
/// two decimals.
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_amount_drops_trailing_zero_fraction() {
        assert_eq!(format_amount(79600.0), "79600");
        assert_eq!(format_amount(-400.0), "-400");
    }

    #[test]
    fn format_amount_keeps_two_decimals() {
        assert_eq!(format_amount(0.71), "0.71");
        assert_eq!(format_amount(-0.5), "-0.50");
    }

    #[test]
    fn quote_row_carries_formatted_fields() {
        let quote = Quote {
            date_stamp: "20240102".to_string(),
            short_code: "005930".to_string(),
            isin_code: "KR7005930003".to_string(),
            name: "삼성전자".to_string(),
            market_category: "KOSPI".to_string(),
            close_price: 79600.0,
            change: 1100.0,
            change_percent: 1.4,
            open: 78500.0,
            high: 79800.0,
            low: 78200.0,
            volume: 17142847.0,
            trading_value: 0.0,
            listed_shares: 0.0,
            market_cap: 475194690980000.0,
        };
        let row = QuoteRow::from(&quote);
        assert_eq!(row.close, "79600");
        assert_eq!(row.change_percent, "1.40");
        assert_eq!(row.market, "KOSPI");
    }
}
