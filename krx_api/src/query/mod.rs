mod common;
pub use self::common::{Query, QueryCommon};

mod quote;
pub use self::quote::{MarketClass, QuoteQuery};
