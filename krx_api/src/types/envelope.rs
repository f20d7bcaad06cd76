//! The nested JSON envelope the open-data service wraps every response in.

use serde::Deserialize;

use super::quote::RawQuote;

/// Top-level response wrapper: `{ "response": { "header": ..., "body": ... } }`.
#[derive(Deserialize)]
pub struct Envelope {
    pub response: ResponseEnvelope,
}

#[derive(Deserialize)]
pub struct ResponseEnvelope {
    pub header: Header,
    /// Absent on some error responses.
    #[serde(default)]
    pub body: Option<Body>,
}

/// `"00"` means success; anything else is an upstream error.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub result_code: String,
    #[serde(default)]
    pub result_msg: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    #[serde(default)]
    pub num_of_rows: Option<i64>,
    #[serde(default)]
    pub page_no: Option<i64>,
    #[serde(default)]
    pub total_count: Option<i64>,
    /// Missing entirely when the query matched zero rows.
    #[serde(default)]
    pub items: Option<Items>,
}

#[derive(Deserialize)]
pub struct Items {
    #[serde(default)]
    pub item: Option<OneOrMany<RawQuote>>,
}

/// The service returns a bare object instead of a one-element array when a
/// query matches exactly one row. Both shapes normalize to a `Vec`.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_object_item_equals_one_element_array() {
        let single: Items =
            serde_json::from_str(r#"{"item": {"srtnCd": "005930"}}"#).unwrap();
        let wrapped: Items =
            serde_json::from_str(r#"{"item": [{"srtnCd": "005930"}]}"#).unwrap();

        let single = single.item.unwrap().into_vec();
        let wrapped = wrapped.item.unwrap().into_vec();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].short_code, wrapped[0].short_code);
    }

    #[test]
    fn missing_item_field_deserializes_to_none() {
        let items: Items = serde_json::from_str("{}").unwrap();
        assert!(items.item.is_none());
    }
}
