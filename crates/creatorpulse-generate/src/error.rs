use thiserror::Error;

/// Errors surfaced by generation workflows.
///
/// Upstream variants carry enough shape for callers to decide whether a
/// retry is worthwhile; this crate never retries on its own.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InsufficientData(String),

    #[error("{0}")]
    Validation(String),

    #[error("generator not configured: {0}")]
    NotConfigured(String),

    #[error("generator request timed out after {0}s")]
    UpstreamTimeout(u64),

    #[error("generator rate limit exceeded")]
    UpstreamRateLimited,

    #[error("generator request failed")]
    UpstreamHttp(#[source] reqwest::Error),

    #[error("generator returned a malformed response: {0}")]
    UpstreamMalformed(String),
}

impl GenerateError {
    /// Whether the caller could plausibly succeed by retrying later.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamTimeout(_) | Self::UpstreamRateLimited | Self::UpstreamHttp(_)
        )
    }

    /// Stable machine-readable code for API and CLI error surfaces.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::InsufficientData(_) => "insufficient_data",
            Self::Validation(_) => "validation_error",
            Self::NotConfigured(_) => "not_configured",
            Self::UpstreamTimeout(_) => "upstream_timeout",
            Self::UpstreamRateLimited => "upstream_rate_limited",
            Self::UpstreamHttp(_) => "upstream_error",
            Self::UpstreamMalformed(_) => "upstream_malformed",
        }
    }
}

impl From<creatorpulse_core::UnknownOption> for GenerateError {
    fn from(err: creatorpulse_core::UnknownOption) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::GenerateError;

    #[test]
    fn retryable_classification_covers_transient_failures() {
        assert!(GenerateError::UpstreamTimeout(60).is_retryable());
        assert!(GenerateError::UpstreamRateLimited.is_retryable());
        assert!(!GenerateError::NotFound("creator_1".into()).is_retryable());
        assert!(!GenerateError::Validation("bad tone".into()).is_retryable());
        assert!(!GenerateError::UpstreamMalformed("no choices".into()).is_retryable());
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(GenerateError::NotFound("x".into()).code(), "not_found");
        assert_eq!(GenerateError::UpstreamRateLimited.code(), "upstream_rate_limited");
    }
}
