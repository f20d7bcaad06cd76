//! Shared query infrastructure: the [`Query`] trait and [`QueryCommon`] paging fields.

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for paging.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the page number (1-indexed).
    fn with_page(mut self, page: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = page;
        self
    }

    /// Sets the number of rows per page.
    fn with_rows(mut self, rows: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().num_of_rows = Some(rows);
        self
    }
}

/// Fields shared by all query types: paging only, in this service.
#[derive(Clone, Debug)]
pub struct QueryCommon {
    /// Page number (1-indexed). Defaults to 1.
    pub page: i64,
    /// Rows per page. `None` uses the service default (10).
    pub num_of_rows: Option<i64>,
}

impl Default for QueryCommon {
    fn default() -> QueryCommon {
        QueryCommon {
            page: 1,
            num_of_rows: None,
        }
    }
}

impl QueryCommon {
    /// Appends the paging parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("pageNo", &self.page.to_string());
        if let Some(rows) = self.num_of_rows {
            url.query_pairs_mut()
                .append_pair("numOfRows", &rows.to_string());
        };
        url
    }
}
