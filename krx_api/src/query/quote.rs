//! Query builder for the daily stock price endpoint.

use std::fmt;
use std::str::FromStr;

use url::Url;

use super::common::{Query, QueryCommon};

/// Market classification accepted by the quote service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarketClass {
    Kospi,
    Kosdaq,
    Konex,
}

impl fmt::Display for MarketClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kospi => write!(f, "KOSPI"),
            Self::Kosdaq => write!(f, "KOSDAQ"),
            Self::Konex => write!(f, "KONEX"),
        }
    }
}

impl FromStr for MarketClass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "KOSPI" => Ok(Self::Kospi),
            "KOSDAQ" => Ok(Self::Kosdaq),
            "KONEX" => Ok(Self::Konex),
            _ => Err(()),
        }
    }
}

/// Query for daily quotes. All filters are optional; the service intersects
/// whichever are present. Dates are fixed-width `YYYYMMDD` strings.
#[derive(Clone, Debug, Default)]
pub struct QuoteQuery {
    pub common: QueryCommon,
    /// Exact short code (ticker), e.g. `005930`.
    pub short_code: Option<String>,
    /// Exact ISIN code.
    pub isin: Option<String>,
    /// Exact listed name.
    pub name: Option<String>,
    /// Partial listed name (substring match on the service side).
    pub name_like: Option<String>,
    /// Market classification filter.
    pub market: Option<MarketClass>,
    /// Single trading date.
    pub base_date: Option<String>,
    /// Start of a trading date range (inclusive).
    pub begin_date: Option<String>,
    /// End of a trading date range (inclusive).
    pub end_date: Option<String>,
}

impl QuoteQuery {
    pub fn with_short_code(mut self, short_code: &str) -> Self {
        self.short_code = Some(short_code.to_string());
        self
    }

    pub fn with_isin(mut self, isin: &str) -> Self {
        self.isin = Some(isin.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_name_like(mut self, fragment: &str) -> Self {
        self.name_like = Some(fragment.to_string());
        self
    }

    pub fn with_market(mut self, market: MarketClass) -> Self {
        self.market = Some(market);
        self
    }

    pub fn with_base_date(mut self, date: &str) -> Self {
        self.base_date = Some(date.to_string());
        self
    }

    pub fn with_date_range(mut self, begin: &str, end: &str) -> Self {
        self.begin_date = Some(begin.to_string());
        self.end_date = Some(end.to_string());
        self
    }
}

impl Query for QuoteQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        let mut pairs = url.query_pairs_mut();
        if let Some(short_code) = &self.short_code {
            pairs.append_pair("srtnCd", short_code);
        }
        if let Some(isin) = &self.isin {
            pairs.append_pair("isinCd", isin);
        }
        if let Some(name) = &self.name {
            pairs.append_pair("itmsNm", name);
        }
        if let Some(fragment) = &self.name_like {
            pairs.append_pair("likeItmsNm", fragment);
        }
        if let Some(market) = &self.market {
            pairs.append_pair("mrktCls", &market.to_string());
        }
        if let Some(date) = &self.base_date {
            pairs.append_pair("basDt", date);
        }
        if let Some(begin) = &self.begin_date {
            pairs.append_pair("beginBasDt", begin);
        }
        if let Some(end) = &self.end_date {
            pairs.append_pair("endBasDt", end);
        }
        drop(pairs);
        url
    }

    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}
