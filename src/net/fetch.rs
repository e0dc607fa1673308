use http::StatusCode;
use reqwest::blocking::{Client, Response};

use crate::errors::RequestError;
use crate::net::FailedResponse;

// Issues a blocking GET and hands back the unread response if the server answered 200 OK.
// Any other status is turned into a `RequestError::Status` carrying whatever body was sent.
pub fn fetch(url: &url::Url) -> Result<Response, RequestError> {
    // A fresh client per call, with nothing kept idle afterwards
    let client = Client::builder().pool_max_idle_per_host(0).build()?;
    let res = client.get(url.clone()).send()?;

    let status = res.status();
    log::debug!("GET {} -> {}", url, status);

    if status != StatusCode::OK {
        log::warn!("GET {} failed with status {}", url, status);
        let failed = FailedResponse {
            url: url.clone(),
            status,
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            body: potential_body(res),
        };
        return Err(failed.into());
    }

    Ok(res)
}

/// Reads the body of a failed response if possible. Never fails: a read error is
/// folded into a `<no body:...>` placeholder so it cannot mask the status failure.
fn potential_body(res: Response) -> String {
    match res.text() {
        Ok(body) => body,
        Err(e) => {
            log::trace!("Cannot capture body of failed response: {}", e);
            format!("<no body:{}>", e)
        }
    }
}
