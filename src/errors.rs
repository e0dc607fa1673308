use http::StatusCode;

/// Errors produced while decoding a property-file body.
#[derive(Debug, thiserror::Error)]
pub enum PropertiesError {
    #[error("Malformed \\uxxxx encoding on line {line}")]
    MalformedUnicodeEscape { line: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid base location {base}: {reason}")]
    InvalidBase { base: String, reason: String },

    #[error("Cannot resolve {path:?} against the base location: {source}")]
    Resolve {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unable to communicate with server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GET request failed ({code} {reason}) {url}\n{body}", code = .status.as_u16())]
    Status {
        status: StatusCode,
        reason: String,
        url: url::Url,
        body: String,
    },

    #[error("Invalid properties body: {0}")]
    Properties(#[from] PropertiesError),
}

impl RequestError {
    /// True for failures talking to the server: transport errors and non-OK statuses.
    pub fn is_communication(&self) -> bool {
        matches!(self, RequestError::Transport(_) | RequestError::Status { .. })
    }

    /// Status code received from the server, if the request got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            RequestError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_layout() {
        let err = RequestError::Status {
            status: StatusCode::NOT_FOUND,
            reason: "Not Found".to_string(),
            url: url::Url::parse("http://localhost:8080/app/missing").unwrap(),
            body: "not found".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "GET request failed (404 Not Found) http://localhost:8080/app/missing\nnot found"
        );
        assert!(err.is_communication());
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn properties_error_is_not_communication() {
        let err = RequestError::from(PropertiesError::MalformedUnicodeEscape { line: 3 });
        assert!(!err.is_communication());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("line 3"));
    }
}
