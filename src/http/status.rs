//! Classification of unsuccessful GitHub API responses.

use log::{debug, warn};
use reqwest::{Response, StatusCode};

/// Header GitHub uses to report the remaining unauthenticated request budget.
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Why a request to the API did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Rate limit exceeded (HTTP 403 with an exhausted budget, or 429)
    RateLimited,
    /// Authentication failed (HTTP 401)
    Unauthorized,
    /// Forbidden access (HTTP 403 with budget left)
    Forbidden,
    /// Resource not found (HTTP 404)
    NotFound,
    /// Any other 4xx response
    ClientError(u16),
    /// 5xx response
    ServerError(u16),
    /// A status that is neither success nor an error class (1xx, unfollowed 3xx)
    UnexpectedStatus(u16),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::RateLimited => write!(
                f,
                "GitHub API rate limit exceeded; set GITHUB_TOKEN or wait for the next poll"
            ),
            ApiError::Unauthorized => {
                write!(f, "Authentication failed. Check your GITHUB_TOKEN.")
            }
            ApiError::Forbidden => write!(f, "Access to this resource is forbidden"),
            ApiError::NotFound => write!(f, "The requested resource was not found"),
            ApiError::ClientError(code) => write!(f, "Request error: HTTP {}", code),
            ApiError::ServerError(code) => write!(f, "Server error: HTTP {}", code),
            ApiError::UnexpectedStatus(code) => write!(f, "Unexpected HTTP status {}", code),
        }
    }
}

impl std::error::Error for ApiError {}

/// Classifies a response. Returns `None` for a successful status.
pub fn classify_response(response: &Response) -> Option<ApiError> {
    let status = response.status();
    if status.is_success() {
        return None;
    }

    let budget_exhausted = response
        .headers()
        .get(RATE_LIMIT_REMAINING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");

    Some(classify_status(status, budget_exhausted))
}

fn classify_status(status: StatusCode, budget_exhausted: bool) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN if budget_exhausted => ApiError::RateLimited,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
        StatusCode::NOT_FOUND => ApiError::NotFound,
        s if s.is_client_error() => ApiError::ClientError(s.as_u16()),
        s if s.is_server_error() => ApiError::ServerError(s.as_u16()),
        s => ApiError::UnexpectedStatus(s.as_u16()),
    }
}

/// Turns an unsuccessful response into an error, passing successful ones through.
pub fn check_status(response: Response) -> anyhow::Result<Response> {
    match classify_response(&response) {
        None => Ok(response),
        Some(err) => Err(anyhow::Error::from(err)),
    }
}

/// Logs why a refresh of `what` produced nothing. Rate limiting is the one
/// failure worth surfacing at `warn`; everything else waits for the next poll.
pub fn log_refresh_failure(what: &str, err: &anyhow::Error) {
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::RateLimited) => warn!("Skipping {} refresh: {}", what, err),
        Some(api_error) => debug!("Skipping {} refresh: {}", what, api_error),
        None => debug!("Skipping {} refresh: {:#}", what, err),
    }
}
