use crate::model::ProviderKind;
use std::time::Duration;
use thiserror::Error;

/// Classified cause of a failed discovery call.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("{provider} authentication failed: {message}")]
    AuthFailure {
        provider: ProviderKind,
        message: String,
    },
    #[error("{provider} resource not found: {resource}")]
    NotFound {
        provider: ProviderKind,
        resource: String,
    },
    #[error("{provider} rate limit exceeded")]
    RateLimited {
        provider: ProviderKind,
        retry_after: Option<Duration>,
    },
    #[error("network error talking to {provider}: {message}")]
    Network {
        provider: ProviderKind,
        message: String,
    },
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl DiscoveryError {
    pub fn provider(&self) -> Option<ProviderKind> {
        match self {
            DiscoveryError::AuthFailure { provider, .. }
            | DiscoveryError::NotFound { provider, .. }
            | DiscoveryError::RateLimited { provider, .. }
            | DiscoveryError::Network { provider, .. } => Some(*provider),
            DiscoveryError::Unsupported(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DiscoveryError::NotFound { .. })
    }
}
