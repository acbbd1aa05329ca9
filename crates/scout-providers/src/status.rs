use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use scout_core::error::DiscoveryError;
use scout_core::model::ProviderKind;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Maps an upstream HTTP status onto a classified discovery failure.
/// Returns `None` for successes and statuses with no dedicated class.
pub fn classify_status(
    provider: ProviderKind,
    status: StatusCode,
    resource: &str,
    headers: &HeaderMap,
) -> Option<DiscoveryError> {
    match status {
        StatusCode::TOO_MANY_REQUESTS => Some(DiscoveryError::RateLimited {
            provider,
            retry_after: retry_after(headers),
        }),
        // GitHub reports an exhausted quota as 403 with zero remaining.
        StatusCode::FORBIDDEN if ratelimit_exhausted(headers) => Some(DiscoveryError::RateLimited {
            provider,
            retry_after: retry_after(headers),
        }),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Some(DiscoveryError::AuthFailure {
            provider,
            message: format!(
                "{} rejected the credentials for {resource} (HTTP {status})",
                provider.display_name()
            ),
        }),
        StatusCode::NOT_FOUND => Some(DiscoveryError::NotFound {
            provider,
            resource: resource.to_string(),
        }),
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            Some(DiscoveryError::Network {
                provider,
                message: format!("{} unavailable (HTTP {status})", provider.display_name()),
            })
        }
        _ => None,
    }
}

/// Classifies a transport-level failure. Errors that carry a status are
/// classified by status; everything else is a network failure.
pub fn classify_transport_error(
    provider: ProviderKind,
    resource: &str,
    err: &reqwest::Error,
) -> DiscoveryError {
    if let Some(status) = err.status()
        && let Some(classified) = classify_status(provider, status, resource, &HeaderMap::new())
    {
        return classified;
    }
    DiscoveryError::Network {
        provider,
        message: err.to_string(),
    }
}

/// Delay hinted by `retry-after` or `x-ratelimit-reset`. Carried on
/// [`DiscoveryError::RateLimited`] for the caller; nothing here retries.
pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    if let Some(delay) = retry_after_seconds(headers) {
        return Some(Duration::from_secs(delay));
    }
    ratelimit_reset_seconds(headers).map(Duration::from_secs)
}

fn retry_after_seconds(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("retry-after")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
}

fn ratelimit_reset_seconds(headers: &HeaderMap) -> Option<u64> {
    let reset = headers
        .get("x-ratelimit-reset")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())?;
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    reset.checked_sub(now).filter(|delay| *delay > 0)
}

fn ratelimit_exhausted(headers: &HeaderMap) -> bool {
    headers
        .get("x-ratelimit-remaining")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim() == "0")
        .unwrap_or(false)
}
