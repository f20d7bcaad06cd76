//! Quote records: the raw wire form, the typed form, and the normalization
//! helpers (numeric coercion, dedup-latest-wins, top-N by market cap).

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A quote row exactly as the service sends it: every numeric field is a
/// string, often with thousands separators or a currency symbol.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuote {
    #[serde(rename = "basDt", default)]
    pub base_date: String,
    #[serde(rename = "srtnCd", default)]
    pub short_code: String,
    #[serde(rename = "isinCd", default)]
    pub isin_code: String,
    #[serde(rename = "itmsNm", default)]
    pub name: String,
    #[serde(rename = "mrktCtg", default)]
    pub market_category: String,
    #[serde(rename = "clpr", default)]
    pub close_price: String,
    #[serde(rename = "vs", default)]
    pub change: String,
    #[serde(rename = "fltRt", default)]
    pub change_percent: String,
    #[serde(rename = "mkp", default)]
    pub open: String,
    #[serde(rename = "hipr", default)]
    pub high: String,
    #[serde(rename = "lopr", default)]
    pub low: String,
    #[serde(rename = "trqu", default)]
    pub volume: String,
    #[serde(rename = "trPrc", default)]
    pub trading_value: String,
    #[serde(rename = "lstgStCnt", default)]
    pub listed_shares: String,
    #[serde(rename = "mrktTotAmt", default)]
    pub market_cap: String,
}

/// A normalized quote with every numeric field coerced.
///
/// `date_stamp` stays a fixed-width `YYYYMMDD` string: plain string ordering
/// equals chronological ordering, which [`dedup_latest`] relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub date_stamp: String,
    pub short_code: String,
    pub isin_code: String,
    pub name: String,
    pub market_category: String,
    pub close_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    pub trading_value: f64,
    pub listed_shares: f64,
    pub market_cap: f64,
}

impl From<RawQuote> for Quote {
    fn from(raw: RawQuote) -> Self {
        Self {
            date_stamp: raw.base_date,
            short_code: raw.short_code,
            isin_code: raw.isin_code,
            name: raw.name,
            market_category: raw.market_category,
            close_price: coerce_number(&raw.close_price),
            change: coerce_number(&raw.change),
            change_percent: coerce_number(&raw.change_percent),
            open: coerce_number(&raw.open),
            high: coerce_number(&raw.high),
            low: coerce_number(&raw.low),
            volume: coerce_number(&raw.volume),
            trading_value: coerce_number(&raw.trading_value),
            listed_shares: coerce_number(&raw.listed_shares),
            market_cap: coerce_number(&raw.market_cap),
        }
    }
}

/// Coerces a numeric-looking string to `f64`.
///
/// Every character that is not a digit, `.`, or `-` is discarded before
/// parsing; empty or unparseable remainders yield 0. Deliberately lossy:
/// thousands separators, currency symbols, and stray suffixes vanish silently.
pub fn coerce_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Keeps exactly one quote per short code: the one with the greatest
/// `date_stamp` under plain string ordering. Codes keep the position of
/// their first appearance in the input.
pub fn dedup_latest(quotes: Vec<Quote>) -> Vec<Quote> {
    let mut by_code: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<Quote> = Vec::new();
    for quote in quotes {
        match by_code.get(&quote.short_code) {
            Some(&idx) => {
                if quote.date_stamp > out[idx].date_stamp {
                    out[idx] = quote;
                }
            }
            None => {
                by_code.insert(quote.short_code.clone(), out.len());
                out.push(quote);
            }
        }
    }
    out
}

/// Sorts descending by market cap and truncates to `n`. The sort is stable,
/// so ties keep their input order.
pub fn top_by_market_cap(mut quotes: Vec<Quote>, n: usize) -> Vec<Quote> {
    quotes.sort_by(|a, b| {
        b.market_cap
            .partial_cmp(&a.market_cap)
            .unwrap_or(Ordering::Equal)
    });
    quotes.truncate(n);
    quotes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(code: &str, date: &str, market_cap: f64) -> Quote {
        Quote {
            date_stamp: date.to_string(),
            short_code: code.to_string(),
            isin_code: String::new(),
            name: String::new(),
            market_category: String::new(),
            close_price: 0.0,
            change: 0.0,
            change_percent: 0.0,
            open: 0.0,
            high: 0.0,
            low: 0.0,
            volume: 0.0,
            trading_value: 0.0,
            listed_shares: 0.0,
            market_cap,
        }
    }

    #[test]
    fn coerce_strips_separators_and_symbols() {
        assert_eq!(coerce_number("79,600"), 79600.0);
        assert_eq!(coerce_number("₩1,500"), 1500.0);
        assert_eq!(coerce_number("12.34%"), 12.34);
        assert_eq!(coerce_number("-2,150원"), -2150.0);
    }

    #[test]
    fn coerce_without_digits_yields_zero() {
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("n/a"), 0.0);
        assert_eq!(coerce_number("-"), 0.0);
        assert_eq!(coerce_number("—"), 0.0);
    }

    #[test]
    fn coerce_garbage_remainder_yields_zero() {
        // Two decimal points survive the filter but fail to parse.
        assert_eq!(coerce_number("1.234.5"), 0.0);
    }

    #[test]
    fn dedup_keeps_greatest_date_per_code() {
        let quotes = vec![
            quote("005930", "20240102", 1.0),
            quote("000660", "20240103", 2.0),
            quote("005930", "20240104", 3.0),
            quote("005930", "20240103", 4.0),
        ];
        let deduped = dedup_latest(quotes);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].short_code, "005930");
        assert_eq!(deduped[0].date_stamp, "20240104");
        assert_eq!(deduped[1].short_code, "000660");
    }

    #[test]
    fn top_n_sorts_descending_with_stable_ties() {
        let quotes = vec![
            quote("A", "20240102", coerce_number("₩500")),
            quote("B", "20240102", coerce_number("₩1,500")),
            quote("C", "20240102", coerce_number("₩200")),
            quote("D", "20240102", coerce_number("₩1,500")),
        ];
        let top = top_by_market_cap(quotes, 4);
        let caps: Vec<f64> = top.iter().map(|q| q.market_cap).collect();
        assert_eq!(caps, vec![1500.0, 1500.0, 500.0, 200.0]);
        // B appeared before D in the input; the tie must preserve that.
        assert_eq!(top[0].short_code, "B");
        assert_eq!(top[1].short_code, "D");
    }

    #[test]
    fn top_n_truncates() {
        let quotes = vec![
            quote("A", "20240102", 3.0),
            quote("B", "20240102", 1.0),
            quote("C", "20240102", 2.0),
        ];
        let top = top_by_market_cap(quotes, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].short_code, "A");
        assert_eq!(top[1].short_code, "C");
    }

    #[test]
    fn raw_quote_coerces_every_numeric_field() {
        let raw = RawQuote {
            base_date: "20240102".into(),
            short_code: "005930".into(),
            isin_code: "KR7005930003".into(),
            name: "삼성전자".into(),
            market_category: "KOSPI".into(),
            close_price: "79,600".into(),
            change: "-400".into(),
            change_percent: "-.5".into(),
            open: "80,000".into(),
            high: "80,100".into(),
            low: "79,500".into(),
            volume: "17,142,847".into(),
            trading_value: "1,367,843,000,000".into(),
            listed_shares: "5,969,782,550".into(),
            market_cap: "475,194,690,980,000".into(),
        };
        let quote = Quote::from(raw);
        assert_eq!(quote.close_price, 79600.0);
        assert_eq!(quote.change, -400.0);
        assert_eq!(quote.change_percent, -0.5);
        assert_eq!(quote.volume, 17142847.0);
        assert_eq!(quote.market_cap, 475194690980000.0);
    }
}
