use std::collections::HashMap;

use krx_api::{MarketClass, Query, QuoteQuery};
use url::Url;

fn params(query: &QuoteQuery) -> HashMap<String, String> {
    let base = Url::parse("https://example.test/getStockPriceInfo").unwrap();
    let url = query.add_to_url(&base);
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[test]
fn default_query_only_sets_page() {
    let map = params(&QuoteQuery::default());
    assert_eq!(map.get("pageNo").map(String::as_str), Some("1"));
    assert!(!map.contains_key("numOfRows"));
    assert!(!map.contains_key("srtnCd"));
}

#[test]
fn paging_parameters() {
    let query = QuoteQuery::default().with_page(3).with_rows(500);
    let map = params(&query);
    assert_eq!(map.get("pageNo").map(String::as_str), Some("3"));
    assert_eq!(map.get("numOfRows").map(String::as_str), Some("500"));
}

#[test]
fn code_and_name_filters() {
    let query = QuoteQuery::default()
        .with_short_code("005930")
        .with_isin("KR7005930003")
        .with_name("삼성전자");
    let map = params(&query);
    assert_eq!(map.get("srtnCd").map(String::as_str), Some("005930"));
    assert_eq!(map.get("isinCd").map(String::as_str), Some("KR7005930003"));
    assert_eq!(map.get("itmsNm").map(String::as_str), Some("삼성전자"));
}

#[test]
fn partial_name_uses_like_parameter() {
    let query = QuoteQuery::default().with_name_like("전자");
    let map = params(&query);
    assert_eq!(map.get("likeItmsNm").map(String::as_str), Some("전자"));
    assert!(!map.contains_key("itmsNm"));
}

#[test]
fn market_class_and_date_range() {
    let query = QuoteQuery::default()
        .with_market(MarketClass::Kosdaq)
        .with_date_range("20240101", "20240131");
    let map = params(&query);
    assert_eq!(map.get("mrktCls").map(String::as_str), Some("KOSDAQ"));
    assert_eq!(map.get("beginBasDt").map(String::as_str), Some("20240101"));
    assert_eq!(map.get("endBasDt").map(String::as_str), Some("20240131"));
}

#[test]
fn market_class_parses_case_insensitively() {
    assert_eq!("kospi".parse::<MarketClass>(), Ok(MarketClass::Kospi));
    assert_eq!("KONEX".parse::<MarketClass>(), Ok(MarketClass::Konex));
    assert!("NYSE".parse::<MarketClass>().is_err());
}
