use {
    reqwest::{Response, StatusCode},
    serde::{Deserialize, Serialize},
    serde_json::Value,
    std::fmt,
    thiserror::Error,
};

/// Error kind enumeration for Twitter operations
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TwitterErrorKind {
    /// Network-related error
    Network,
    /// Connection error
    Connection,
    /// Timeout error
    Timeout,
    /// Error parsing response
    Parse,
    /// Authentication/authorization error
    Auth,
    /// Resource not found
    NotFound,
    /// Rate limit exceeded
    RateLimit,
    /// Server error
    Server,
    /// Forbidden access
    Forbidden,
    /// API-specific error
    Api,
    /// Unknown error
    Unknown,
}

/// A Twitter API v2 error object, as found in an `errors` array or as a
/// top-level problem document.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TwitterApiError {
    pub title: String,
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

/// Error type for Twitter operations
#[derive(Error, Debug)]
pub enum TwitterError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Response parsing error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Twitter API error: {0} (type: {1}){2}")]
    ApiError(String, String, String),

    #[error("Twitter API status error: {0}")]
    StatusError(StatusCode),

    #[error("Unknown error: {0}")]
    Other(String),
}

/// Standard error response structure for Twitter operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterErrorResponse {
    /// Detailed error message
    pub reason: String,
    /// Type of error (network, server, auth, etc.)
    pub kind: TwitterErrorKind,
    /// HTTP status code if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl fmt::Display for TwitterErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for TwitterErrorResponse {}

impl TwitterError {
    /// Create a new error from a Twitter API error object
    pub fn from_api_error(error: &TwitterApiError) -> Self {
        let detail = error
            .detail
            .as_ref()
            .map_or_else(String::new, |d| format!(" - {}", d));

        TwitterError::ApiError(error.title.clone(), error.error_type.clone(), detail)
    }

    /// Convert the error to a standardized [TwitterErrorResponse]
    pub fn to_error_response(&self) -> TwitterErrorResponse {
        let (kind, status_code) = match self {
            TwitterError::Network(req_err) => {
                let kind = if req_err.is_timeout() {
                    TwitterErrorKind::Timeout
                } else if req_err.is_connect() {
                    TwitterErrorKind::Connection
                } else {
                    TwitterErrorKind::Network
                };

                (kind, None)
            }
            TwitterError::ParseError(_) => (TwitterErrorKind::Parse, None),
            TwitterError::ApiError(title, error_type, _) => classify_api_error(title, error_type),
            TwitterError::StatusError(status) => {
                (classify_status(*status), Some(status.as_u16()))
            }
            TwitterError::Other(_) => (TwitterErrorKind::Unknown, None),
        };

        TwitterErrorResponse {
            reason: self.to_string(),
            kind,
            status_code,
        }
    }
}

impl From<TwitterError> for TwitterErrorResponse {
    fn from(error: TwitterError) -> Self {
        error.to_error_response()
    }
}

/// Extract error kind and status code from an API error's title and type.
fn classify_api_error(title: &str, error_type: &str) -> (TwitterErrorKind, Option<u16>) {
    if error_type.contains("rate") || title.contains("Rate") || title.contains("Too Many") {
        (TwitterErrorKind::RateLimit, Some(429))
    } else if error_type.contains("auth") || title.contains("Unauthorized") {
        (TwitterErrorKind::Auth, Some(401))
    } else if error_type.contains("not-found") || title.contains("Not Found") {
        (TwitterErrorKind::NotFound, Some(404))
    } else if error_type.contains("forbidden") || title.contains("Forbidden") {
        (TwitterErrorKind::Forbidden, Some(403))
    } else if error_type.contains("server") {
        (TwitterErrorKind::Server, Some(500))
    } else {
        (TwitterErrorKind::Api, None)
    }
}

fn classify_status(status: StatusCode) -> TwitterErrorKind {
    match status.as_u16() {
        429 => TwitterErrorKind::RateLimit,
        401 => TwitterErrorKind::Auth,
        403 => TwitterErrorKind::Forbidden,
        404 => TwitterErrorKind::NotFound,
        code if code >= 500 => TwitterErrorKind::Server,
        _ => TwitterErrorKind::Unknown,
    }
}

/// Result type for Twitter operations
pub type TwitterResult<T> = Result<T, TwitterError>;

/// The v1.1 style `{"code": .., "message": ..}` error body.
#[derive(Debug, Deserialize)]
struct TwitterDefaultError {
    code: i32,
    message: String,
}

/// Maps the well known v1.1 error codes to a title and type.
fn legacy_code_title(code: i64) -> Option<(&'static str, &'static str)> {
    match code {
        32 => Some(("Unauthorized", "authentication")),
        88 => Some(("Rate Limit Exceeded", "rate_limit")),
        34 => Some(("Not Found Error", "not-found")),
        _ => None,
    }
}

/// Parse a successful Twitter API response
fn parse_successful_twitter_response<T>(text: &str) -> TwitterResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    let parsed = serde_json::from_str::<T>(text)?;

    // A 2xx body may still carry an `errors` array.
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if let Some(first_error) = value
            .get("errors")
            .and_then(|e| e.as_array())
            .and_then(|errors| errors.first())
        {
            return Err(parse_error_from_json(first_error));
        }
    }

    Ok(parsed)
}

/// Parse a failed Twitter API response
fn parse_failed_twitter_response<T>(text: &str, status: StatusCode) -> TwitterResult<T> {
    if let Ok(default_error) = serde_json::from_str::<TwitterDefaultError>(text) {
        let (title, error_type) = legacy_code_title(default_error.code as i64)
            .unwrap_or(("Twitter API Error", "default"));

        return Err(TwitterError::ApiError(
            title.to_string(),
            error_type.to_string(),
            format!(
                " - {} (Code: {})",
                default_error.message, default_error.code
            ),
        ));
    }

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if let Some(first_error) = value
            .get("errors")
            .and_then(|e| e.as_array())
            .and_then(|errors| errors.first())
        {
            return Err(parse_error_from_json(first_error));
        }

        // Problem document, e.g. a 403 for duplicate content.
        if value.get("title").is_some() || value.get("detail").is_some() {
            return Err(parse_error_from_json(&value));
        }
    }

    Err(TwitterError::StatusError(status))
}

/// Parse error details from a JSON Value
fn parse_error_from_json(error: &Value) -> TwitterError {
    let legacy = error
        .get("code")
        .and_then(|c| c.as_i64())
        .and_then(legacy_code_title);

    let (title, error_type) = match legacy {
        Some((title, error_type)) => (title, error_type),
        None => (
            error
                .get("title")
                .and_then(|t| t.as_str())
                .unwrap_or("Unknown Error"),
            error
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or("unknown"),
        ),
    };

    let mut detail = String::new();
    if let Some(d) = error.get("detail").and_then(|d| d.as_str()) {
        detail.push_str(&format!(" - {}", d));
    }
    if let Some(message) = error.get("message").and_then(|m| m.as_str()) {
        detail.push_str(&format!(" - {}", message));
    }

    TwitterError::ApiError(title.to_string(), error_type.to_string(), detail)
}

/// Helper function to parse Twitter API response
pub async fn parse_twitter_response<T>(response: Response) -> TwitterResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    let status = response.status();
    let text = response.text().await.map_err(TwitterError::Network)?;

    if status.is_success() {
        parse_successful_twitter_response(&text)
    } else {
        parse_failed_twitter_response(&text, status)
    }
}
