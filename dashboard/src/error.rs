//! Error types for the dashboard

use thiserror::Error;

/// Errors that can occur when talking to the remote event API
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body was not the expected JSON
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Unauthorized - missing or expired token
    #[error("Unauthorized - invalid or expired token")]
    Unauthorized,

    /// The resource does not exist in this project
    #[error("Not found: {0}")]
    NotFound(String),

    /// The server refused the change (quota exhausted, already reserved)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// API returned any other error
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },
}

impl ApiError {
    /// Whether the user has to sign in again
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// A fetched record that breaks one of its own invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// More seats remain than the conference holds
    #[error("conference {id}: {remaining} remaining seats exceed quota of {quota}")]
    SeatsExceedQuota {
        /// Conference identifier
        id: String,
        /// Remaining seats reported by the API
        remaining: u32,
        /// Conference quota
        quota: u32,
    },

    /// The conference ends before it starts
    #[error("conference {id}: ends at {end} before it starts at {start}")]
    EndsBeforeStart {
        /// Conference identifier
        id: String,
        /// Start time
        start: String,
        /// End time
        end: String,
    },
}

/// Invalid configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required value is empty
    #[error("{0} must not be empty")]
    Missing(&'static str),

    /// A page size is zero
    #[error("{0} must be at least 1")]
    ZeroPageSize(&'static str),

    /// A date filter is not `YYYY-MM-DD`
    #[error("{key} is not a YYYY-MM-DD date: {value}")]
    InvalidDate {
        /// Variable name
        key: &'static str,
        /// Offending value
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 500): boom");
        assert!(ApiError::Unauthorized.is_auth());
        assert!(!ApiError::Conflict("full".to_string()).is_auth());

        let err = RecordError::SeatsExceedQuota {
            id: "c1".to_string(),
            remaining: 12,
            quota: 10,
        };
        assert_eq!(
            err.to_string(),
            "conference c1: 12 remaining seats exceed quota of 10"
        );
    }
}
