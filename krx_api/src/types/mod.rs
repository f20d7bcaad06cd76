mod envelope;
pub use self::envelope::{Body, Envelope, Header, Items, OneOrMany, ResponseEnvelope};

mod quote;
pub use self::quote::{coerce_number, dedup_latest, top_by_market_cap, Quote, RawQuote};
