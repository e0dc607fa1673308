//! Buffered view of a response that did not come back `200 OK`.
//!
//! Only the failure path buffers a response this way. Successful responses are
//! handed back to the caller unread so the body can be decoded as text or as a
//! property set.
use http::StatusCode;

use crate::errors::RequestError;

/// Snapshot of a non-OK response, taken before the connection is released.
#[derive(Debug)]
pub struct FailedResponse {
    /// Resolved location the request was sent to.
    pub url: url::Url,

    /// Numeric HTTP status code (e.g., `404`, `500`).
    pub status: StatusCode,

    /// Canonical reason phrase (e.g., `"Not Found"`).
    ///
    /// `"Unknown"` for non-standard codes.
    pub status_text: String,

    /// Whatever body the server sent, or a `<no body:...>` placeholder.
    pub body: String,
}

impl From<FailedResponse> for RequestError {
    fn from(resp: FailedResponse) -> Self {
        RequestError::Status {
            status: resp.status,
            reason: resp.status_text,
            url: resp.url,
            body: resp.body,
        }
    }
}
