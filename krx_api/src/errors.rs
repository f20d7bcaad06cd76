//! Error types for the API client.

/// Errors that can occur when calling the open-data quote service.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The service returned a non-success HTTP status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The JSON envelope arrived with a result code other than `"00"`.
    #[error("Upstream result code {code}: {msg}")]
    Upstream { code: String, msg: String },
}
