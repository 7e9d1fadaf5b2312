//! Error classification for registry requests.

use reqwest::StatusCode;

/// Ways a single metadata request can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, DNS, TLS or body-read failure
    Transport { url: String, message: String },
    /// The registry answered with a non-2xx status
    HttpStatus { url: String, status: StatusCode },
    /// The body is not valid JSON
    Decode { url: String, message: String },
    /// Valid JSON that lacks an expected key
    Schema { url: String, message: String },
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport { url, message } => {
                write!(f, "Request to {} failed: {}", url, message)
            }
            FetchError::HttpStatus { url, status } if *status == StatusCode::NOT_FOUND => {
                write!(
                    f,
                    "Not found: {} (HTTP 404). Check the package name and version.",
                    url
                )
            }
            FetchError::HttpStatus { url, status } => {
                write!(f, "HTTP {} from {}", status.as_u16(), url)
            }
            FetchError::Decode { url, message } => {
                write!(f, "Response from {} is not valid JSON: {}", url, message)
            }
            FetchError::Schema { url, message } => {
                write!(
                    f,
                    "Response from {} is missing package metadata: {}",
                    url, message
                )
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Converts a reqwest failure into a `FetchError`, keeping the status when
/// the error came from one.
pub fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    match error.status() {
        Some(status) => FetchError::HttpStatus {
            url: url.to_string(),
            status,
        },
        None => FetchError::Transport {
            url: url.to_string(),
            message: error_chain(&error),
        },
    }
}

/// reqwest's top-level message is terse ("error sending request"), so the
/// source chain is appended.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
